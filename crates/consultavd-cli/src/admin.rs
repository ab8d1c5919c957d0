//! Dashboard, audit log, cache panel, template and SQL console command
//! handlers.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use consultavd_client::{ApiClient, DashboardStats, NewTemplate, TemplateKind};
use consultavd_core::AuditFilter;

use crate::output::{self, clip};
use crate::records::json_or_text;

/// Sub-commands available under `cache`.
#[derive(Debug, Subcommand)]
pub enum CacheCommands {
    /// Show backend cache counters
    Stats,
    /// Empty the backend cache
    Clear,
}

/// Sub-commands available under `templates`.
#[derive(Debug, Subcommand)]
pub enum TemplateCommands {
    /// List saved templates, newest first
    List {
        /// Only templates of this kind
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },
    /// Save a new template
    Create {
        #[arg(long, value_enum)]
        kind: KindArg,
        #[arg(long)]
        name: String,
        /// Template body; JSON is stored as-is, anything else as a string
        #[arg(long)]
        content: String,
    },
    /// Delete a template by id
    Delete { id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Informativo,
    Alerta,
}

impl From<KindArg> for TemplateKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Informativo => TemplateKind::Informativo,
            KindArg::Alerta => TemplateKind::Alerta,
        }
    }
}

/// Arguments of the `audit` command: one backend page plus local filters.
#[derive(Debug, Clone, clap::Args)]
pub struct AuditArgs {
    #[arg(long, default_value = "1")]
    pub page: u32,
    #[arg(long, default_value = "50")]
    pub limit: u32,
    /// Exact user name
    #[arg(long)]
    pub user: Option<String>,
    /// Exact action (INSERT, UPDATE, DELETE)
    #[arg(long)]
    pub action: Option<String>,
    /// Exact table name
    #[arg(long)]
    pub table: Option<String>,
    /// Case-insensitive text within "<action> em <table>"
    #[arg(long)]
    pub search: Option<String>,
    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last day to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

impl AuditArgs {
    fn filter(&self) -> AuditFilter {
        AuditFilter {
            user: self.user.clone(),
            action: self.action.clone(),
            table: self.table.clone(),
            search: self.search.clone(),
            from: self.from,
            to: self.to,
        }
    }
}

fn ranked_line(counts: &BTreeMap<String, u64>) -> String {
    DashboardStats::ranked(counts)
        .into_iter()
        .map(|(key, count)| format!("{key}={count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_dashboard(stats: &DashboardStats) {
    println!("stores:              {}", stats.total_lojas);
    println!("circuits:            {}", stats.total_circuitos);
    println!("stores by status:    {}", ranked_line(&stats.lojas_por_status));
    println!("stores by UF:        {}", ranked_line(&stats.lojas_por_uf));
    println!(
        "circuits by carrier: {}",
        ranked_line(&stats.circuitos_por_operadora)
    );
}

/// Print the dashboard counters, once or every `watch` seconds until Ctrl-C.
///
/// A failed refresh is logged and the previous numbers stay on screen.
///
/// # Errors
///
/// Returns an error if the first fetch fails.
pub(crate) async fn run_dashboard(client: &ApiClient, watch: Option<u64>) -> anyhow::Result<()> {
    print_dashboard(&client.dashboard_stats().await?);
    let Some(secs) = watch else {
        return Ok(());
    };

    let period = Duration::from_secs(secs.max(1));
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    loop {
        tokio::select! {
            _ = ticker.tick() => match client.dashboard_stats().await {
                Ok(stats) => {
                    println!();
                    print_dashboard(&stats);
                }
                Err(e) => tracing::warn!(error = %e, "dashboard refresh failed"),
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(())
}

/// Print one page of the audit log after local filtering.
///
/// # Errors
///
/// Returns an error if the date window is inverted or the fetch fails.
pub(crate) async fn run_audit(client: &ApiClient, args: &AuditArgs) -> anyhow::Result<()> {
    if let (Some(from), Some(to)) = (args.from, args.to) {
        if from > to {
            anyhow::bail!("--from {from} is after --to {to}");
        }
    }

    let page = client.audit_logs(args.page, args.limit).await?;
    let filter = args.filter();
    let entries = filter.apply(&page.items);

    if entries.is_empty() {
        println!("no audit entries match on page {}", args.page);
    } else {
        println!(
            "{:<21}{:<14}{:<30}{:<10}CHANGED",
            "TIMESTAMP", "USER", "SUMMARY", "RECORD"
        );
        for entry in &entries {
            let timestamp = entry.parsed_timestamp().map_or_else(
                || clip(&entry.timestamp, 19),
                |ts| ts.format("%Y-%m-%d %H:%M:%S").to_string(),
            );
            println!(
                "{:<21}{:<14}{:<30}{:<10}{}",
                timestamp,
                clip(entry.user.as_deref().unwrap_or("-"), 12),
                clip(&entry.summary(), 28),
                entry.record_id.as_deref().unwrap_or("-"),
                entry.changed_fields().join(","),
            );
        }
    }
    println!(
        "{} of {} entries on page {}/{} ({} total)",
        entries.len(),
        page.items.len(),
        page.info.page,
        page.info.page_count(),
        page.info.total
    );
    Ok(())
}

/// # Errors
///
/// Returns an error if the backend call fails.
pub(crate) async fn run_cache(client: &ApiClient, command: &CacheCommands) -> anyhow::Result<()> {
    match command {
        CacheCommands::Stats => {
            let stats = client.cache_stats().await?;
            println!("enabled:    {}", stats.enabled);
            println!("hits:       {}", stats.hits);
            println!("misses:     {}", stats.misses);
            println!("hit rate:   {:.1}%", stats.hit_rate);
            println!("sets:       {}", stats.sets);
            println!("evictions:  {}", stats.evictions);
            println!("size:       {}/{}", stats.current_size, stats.max_size);
        }
        CacheCommands::Clear => {
            let message = client.clear_cache().await?;
            tracing::info!("backend cache cleared");
            println!("{}", message.as_deref().unwrap_or("cache cleared"));
        }
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the backend call fails.
pub(crate) async fn run_templates(
    client: &ApiClient,
    command: &TemplateCommands,
) -> anyhow::Result<()> {
    match command {
        TemplateCommands::List { kind } => {
            let templates = client.templates(kind.map(TemplateKind::from)).await?;
            if templates.is_empty() {
                println!("no templates saved");
                return Ok(());
            }
            println!("{:<6}{:<13}{:<32}CREATED", "ID", "KIND", "NAME");
            for template in &templates {
                println!(
                    "{:<6}{:<13}{:<32}{}",
                    template.id,
                    template.tipo,
                    clip(&template.nome, 30),
                    template.criado_em.as_deref().unwrap_or("-"),
                );
            }
        }
        TemplateCommands::Create {
            kind,
            name,
            content,
        } => {
            let template = NewTemplate {
                tipo: (*kind).into(),
                nome: name.clone(),
                conteudo: json_or_text(content),
            };
            let created = client.create_template(&template).await?;
            println!("created template {} ({})", created.id, created.nome);
        }
        TemplateCommands::Delete { id } => {
            client.delete_template(*id).await?;
            println!("deleted template {id}");
        }
    }
    Ok(())
}

/// Run a read-only SQL query and print the rows as a table.
///
/// # Errors
///
/// Returns an error if the statement is not a `SELECT` or the backend
/// rejects it.
pub(crate) async fn run_sql(client: &ApiClient, query: &str) -> anyhow::Result<()> {
    let trimmed = query.trim();
    if !trimmed
        .get(..6)
        .is_some_and(|head| head.eq_ignore_ascii_case("select"))
    {
        anyhow::bail!("only SELECT statements are allowed");
    }

    let result = client.execute_sql(trimmed).await?;
    let rows: Vec<_> = result.data.iter().collect();
    output::print_grid(&result.columns, &rows);
    println!("({} rows)", rows.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_content_accepts_json_or_text() {
        assert_eq!(
            json_or_text(r#"{"texto":"ok"}"#),
            serde_json::json!({ "texto": "ok" })
        );
        assert_eq!(
            json_or_text("Circuito fora do ar"),
            serde_json::Value::String("Circuito fora do ar".to_owned())
        );
    }

    #[test]
    fn dashboard_counts_render_largest_first() {
        let counts = BTreeMap::from([
            ("RJ".to_owned(), 120),
            ("MG".to_owned(), 40),
            ("SP".to_owned(), 200),
        ]);
        assert_eq!(ranked_line(&counts), "SP=200, RJ=120, MG=40");
        assert_eq!(ranked_line(&BTreeMap::new()), "");
    }

    #[test]
    fn audit_args_build_filter() {
        let args = AuditArgs {
            page: 1,
            limit: 50,
            user: Some("ana".into()),
            action: None,
            table: Some("lojas_lojas".into()),
            search: None,
            from: NaiveDate::from_ymd_opt(2024, 1, 1),
            to: None,
        };
        let filter = args.filter();
        assert_eq!(filter.user.as_deref(), Some("ana"));
        assert_eq!(filter.table.as_deref(), Some("lojas_lojas"));
        assert!(filter.to.is_none());
    }
}
