mod admin;
mod browse;
mod export;
mod output;
mod records;
mod search;

use clap::{Parser, Subcommand};
use consultavd_client::{ApiClient, StoreFilters};
use tracing_subscriber::EnvFilter;

use crate::admin::{AuditArgs, CacheCommands, TemplateCommands};
use crate::export::ExportCommands;
use crate::records::{RecordCommands, TableCommands};
use crate::search::{FindKind, RefineArgs};

#[derive(Debug, Parser)]
#[command(name = "consultavd")]
#[command(about = "ConsultaVD command center")]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "CONSULTAVD_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check that the backend is up
    Health,
    /// Store, circuit and carrier counters
    Dashboard {
        /// Refresh every SECS seconds (30 when no value is given) until
        /// interrupted
        #[arg(
            long,
            value_name = "SECS",
            num_args = 0..=1,
            default_missing_value = "30"
        )]
        watch: Option<u64>,
    },
    /// Search stores by name, PEOP code or id
    Stores { query: String },
    /// List the carriers of a store
    Carriers { store: String },
    /// List the circuits of a store and carrier
    Circuits { store: String, carrier: String },
    /// Search by store, carrier and circuit
    Search {
        store: String,
        carrier: String,
        circuit: String,
        #[command(flatten)]
        refine: RefineArgs,
    },
    /// Unified or single-field search
    Find {
        #[arg(value_enum)]
        kind: FindKind,
        term: String,
        #[command(flatten)]
        refine: RefineArgs,
    },
    /// Page through the store table with server-side filters
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        uf: Option<String>,
        /// Text matched against store name and address
        #[arg(long)]
        term: Option<String>,
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "50")]
        limit: u32,
    },
    /// Show one store row by id
    Store { id: i64 },
    /// Create, update or delete stores, circuits and inventory items
    Record {
        #[command(subcommand)]
        command: RecordCommands,
    },
    /// Browse and edit raw database tables
    Table {
        #[command(subcommand)]
        command: TableCommands,
    },
    /// Download tables or search results as files
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },
    /// Show the audit log
    Audit(AuditArgs),
    /// Backend cache panel
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
    /// Manage message templates
    Templates {
        #[command(subcommand)]
        command: TemplateCommands,
    },
    /// Run a read-only SQL query
    Sql { query: String },
    /// Interactive store/carrier/circuit picker
    Browse,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` must be loaded before clap reads `CONSULTAVD_API_URL`.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = consultavd_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(api_url) = cli.api_url {
        config.set_api_url(api_url)?;
    }
    tracing::debug!(env = %config.env, api_url = %config.api_url, "configuration loaded");

    let Some(command) = cli.command else {
        println!("consultavd ready; run with --help to list commands");
        return Ok(());
    };

    let client = ApiClient::from_config(&config)?;
    match command {
        Commands::Health => search::run_health(&client).await?,
        Commands::Dashboard { watch } => admin::run_dashboard(&client, watch).await?,
        Commands::Stores { query } => search::run_stores(&client, &config, &query).await?,
        Commands::Carriers { store } => search::run_carriers(&client, &store).await?,
        Commands::Circuits { store, carrier } => {
            search::run_circuits(&client, &store, &carrier).await?;
        }
        Commands::Search {
            store,
            carrier,
            circuit,
            refine,
        } => search::run_search(client, &config, &store, &carrier, &circuit, &refine).await?,
        Commands::Find { kind, term, refine } => {
            search::run_find(&client, &config, kind, &term, &refine).await?;
        }
        Commands::List {
            status,
            uf,
            term,
            page,
            limit,
        } => {
            let filters = StoreFilters {
                status,
                uf,
                search: term,
            };
            search::run_list(&client, &filters, page, limit).await?;
        }
        Commands::Store { id } => records::run_store(&client, id).await?,
        Commands::Record { command } => records::run_record(&client, &command).await?,
        Commands::Table { command } => records::run_table(&client, &command).await?,
        Commands::Export { command } => export::run_export(&client, &config, &command).await?,
        Commands::Audit(args) => admin::run_audit(&client, &args).await?,
        Commands::Cache { command } => admin::run_cache(&client, &command).await?,
        Commands::Templates { command } => admin::run_templates(&client, &command).await?,
        Commands::Sql { query } => admin::run_sql(&client, &query).await?,
        Commands::Browse => browse::run_browse(client, &config).await?,
    }

    Ok(())
}
