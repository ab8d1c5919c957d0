//! `export` command: table downloads and refined search results as CSV.

use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};
use consultavd_client::{ApiClient, Entity, Export, ExportFormat, SearchExport};
use consultavd_core::{refine, AppConfig};
use serde_json::{Map, Value};

use crate::records::EntityArg;
use crate::search::{self, FindKind, RefineArgs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Excel,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Excel => ExportFormat::Excel,
        }
    }
}

/// Sub-commands available under `export`.
#[derive(Debug, Subcommand)]
pub enum ExportCommands {
    /// Download a whole store, circuit or inventory table
    Table {
        #[arg(value_enum)]
        entity: EntityArg,
        #[arg(long, value_enum, default_value = "csv")]
        format: FormatArg,
        /// Target file (defaults to the name suggested by the backend)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Run a search and save the refined store list as CSV
    Search {
        #[arg(value_enum)]
        kind: FindKind,
        term: String,
        #[command(flatten)]
        refine: RefineArgs,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

/// Where to write a download: the explicit path, else the backend's
/// filename, else `fallback`. Backend names are reduced to their final
/// component so they cannot escape the working directory.
fn target_path(explicit: Option<&Path>, export: &Export, fallback: &str) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    export
        .filename
        .as_deref()
        .and_then(|name| Path::new(name).file_name())
        .map_or_else(|| PathBuf::from(fallback), PathBuf::from)
}

async fn save(path: &Path, export: &Export) -> anyhow::Result<()> {
    tokio::fs::write(path, &export.content)
        .await
        .map_err(|e| anyhow::anyhow!("writing {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = export.content.len(), "export saved");
    println!("saved {} ({} bytes)", path.display(), export.content.len());
    Ok(())
}

/// Filters sent with a search export; they end up in the file's metadata row.
fn export_filters(term: &str, refine: &RefineArgs) -> Map<String, Value> {
    let mut filters = Map::new();
    filters.insert("termo".to_owned(), Value::String(term.to_owned()));
    if let Some(status) = &refine.status {
        filters.insert("status".to_owned(), Value::String(status.clone()));
    }
    if let Some(text) = &refine.filter {
        filters.insert("filtro".to_owned(), Value::String(text.clone()));
    }
    filters
}

/// # Errors
///
/// Returns an error if the download fails, the search has no rows left
/// after refinement, or the file cannot be written.
pub(crate) async fn run_export(
    client: &ApiClient,
    config: &AppConfig,
    command: &ExportCommands,
) -> anyhow::Result<()> {
    match command {
        ExportCommands::Table {
            entity,
            format,
            output,
        } => {
            let entity = Entity::from(*entity);
            let format = ExportFormat::from(*format);
            let export = client.export_table(entity, format).await?;
            let fallback = format!("{entity}.{}", format.extension());
            save(&target_path(output.as_deref(), &export, &fallback), &export).await
        }
        ExportCommands::Search {
            kind,
            term,
            refine: refine_args,
            output,
        } => {
            let result = search::find(client, *kind, term).await?;
            let params = refine_args.to_params(config.page_size);
            let refined = refine(&result.stores, &params);
            if refined.total() == 0 {
                anyhow::bail!("no stores left to export after filtering");
            }

            let body = SearchExport {
                results: refined.all.into_iter().cloned().collect(),
                search_type: kind.label(),
                filters: export_filters(term, refine_args),
            };
            let export = client.export_search_results(&body).await?;
            let fallback = format!("resultados_{}.csv", kind.label());
            save(&target_path(output.as_deref(), &export, &fallback), &export).await
        }
    }
}
