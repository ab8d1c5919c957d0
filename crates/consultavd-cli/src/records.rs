//! Record editing and raw table browser command handlers.

use clap::{Subcommand, ValueEnum};
use consultavd_client::{ApiClient, Entity, TableQuery};
use consultavd_core::Record;
use serde_json::{Map, Value};

use crate::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityArg {
    #[value(alias = "lojas")]
    Stores,
    #[value(alias = "circuitos")]
    Circuits,
    #[value(alias = "inventario")]
    Inventory,
}

impl From<EntityArg> for Entity {
    fn from(entity: EntityArg) -> Self {
        match entity {
            EntityArg::Stores => Entity::Stores,
            EntityArg::Circuits => Entity::Circuits,
            EntityArg::Inventory => Entity::Inventory,
        }
    }
}

/// Column values of a create, insert or update.
#[derive(Debug, Clone, PartialEq, clap::Args)]
pub struct FieldArgs {
    /// Column assignment, repeatable (e.g. --set uf=SP)
    #[arg(
        long = "set",
        value_name = "COLUMN=VALUE",
        value_parser = parse_assignment,
        required = true
    )]
    pub fields: Vec<(String, Value)>,
}

impl FieldArgs {
    /// The assignments as a row; a repeated column keeps its last value.
    fn to_record(&self) -> Record {
        Record::new(self.fields.iter().cloned().collect::<Map<String, Value>>())
    }
}

/// Sub-commands available under `record`.
#[derive(Debug, Subcommand)]
pub enum RecordCommands {
    /// Create a store, circuit or inventory item
    Create {
        #[arg(value_enum)]
        entity: EntityArg,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Change columns of an existing row
    Update {
        #[arg(value_enum)]
        entity: EntityArg,
        id: i64,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a row by id
    Delete {
        #[arg(value_enum)]
        entity: EntityArg,
        id: i64,
    },
}

/// Sub-commands available under `table`.
#[derive(Debug, Subcommand)]
pub enum TableCommands {
    /// List the tables of the backend database
    List,
    /// Show a window of rows
    Show {
        name: String,
        /// Text matched against every text column
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        order_by: Option<String>,
        #[arg(long)]
        desc: bool,
        #[arg(long, default_value = "100")]
        limit: u32,
        #[arg(long, default_value = "0")]
        offset: u32,
    },
    /// Insert a row
    Insert {
        name: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Update a row by primary key
    Update {
        name: String,
        id: i64,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a row by primary key
    Delete { name: String, id: i64 },
}

/// Parses text as JSON, falling back to a plain string.
pub(crate) fn json_or_text(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

/// Parses `COLUMN=VALUE`. The value goes through [`json_or_text`], so
/// `--set loja_id=12` sends a number and `--set gr=null` clears the column.
pub(crate) fn parse_assignment(raw: &str) -> Result<(String, Value), String> {
    let (column, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=VALUE, got '{raw}'"))?;
    let column = column.trim();
    if column.is_empty() {
        return Err(format!("missing column name in '{raw}'"));
    }
    Ok((column.to_owned(), json_or_text(value)))
}

/// Print one store row, one column per line.
///
/// # Errors
///
/// Returns an error if the store does not exist or the fetch fails.
pub(crate) async fn run_store(client: &ApiClient, id: i64) -> anyhow::Result<()> {
    let store = client.store(id).await?;
    output::print_fields(&store);
    Ok(())
}

/// # Errors
///
/// Returns an error if the backend rejects the change.
pub(crate) async fn run_record(
    client: &ApiClient,
    command: &RecordCommands,
) -> anyhow::Result<()> {
    match command {
        RecordCommands::Create { entity, fields } => {
            let entity = Entity::from(*entity);
            let created = client.create_record(entity, &fields.to_record()).await?;
            tracing::info!(%entity, "record created");
            output::print_fields(&created);
        }
        RecordCommands::Update { entity, id, fields } => {
            let entity = Entity::from(*entity);
            let updated = client.update_record(entity, *id, &fields.to_record()).await?;
            tracing::info!(%entity, id, "record updated");
            output::print_fields(&updated);
        }
        RecordCommands::Delete { entity, id } => {
            let entity = Entity::from(*entity);
            let message = client.delete_record(entity, *id).await?;
            tracing::info!(%entity, id, "record deleted");
            let message = message.unwrap_or_else(|| format!("deleted {entity} {id}"));
            println!("{message}");
        }
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the backend call fails.
pub(crate) async fn run_table(client: &ApiClient, command: &TableCommands) -> anyhow::Result<()> {
    match command {
        TableCommands::List => {
            output::print_names("tables", &client.tables().await?);
        }
        TableCommands::Show {
            name,
            search,
            order_by,
            desc,
            limit,
            offset,
        } => {
            let query = TableQuery {
                search: search.clone(),
                order_by: order_by.clone(),
                descending: *desc,
                limit: *limit,
                offset: *offset,
            };
            let data = client.table_rows(name, &query).await?;
            let rows: Vec<&Map<String, Value>> = data.rows.iter().map(Record::as_map).collect();
            output::print_grid(&data.columns, &rows);
            println!(
                "{} rows from offset {offset} ({} total)",
                rows.len(),
                data.total
            );
        }
        TableCommands::Insert { name, fields } => {
            let id = client.insert_row(name, &fields.to_record()).await?;
            tracing::info!(table = %name, id, "row inserted");
            println!("inserted row {id} into {name}");
        }
        TableCommands::Update { name, id, fields } => {
            let updated = client.update_row(name, *id, &fields.to_record()).await?;
            println!("{updated} row(s) updated in {name}");
        }
        TableCommands::Delete { name, id } => {
            let deleted = client.delete_row(name, *id).await?;
            println!("{deleted} row(s) deleted from {name}");
        }
    }
    Ok(())
}
