//! Store lookup and search command handlers.

use clap::{Args, ValueEnum};
use consultavd_client::{ApiClient, CascadingResolver, FieldSearch, StoreFilters};
use consultavd_core::{
    AppConfig, Pagination, RefinerParams, SearchResult, SortDirection, SortField,
};

use crate::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    Name,
    Code,
    City,
}

impl From<SortKey> for SortField {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Name => SortField::Name,
            SortKey::Code => SortField::Code,
            SortKey::City => SortField::City,
        }
    }
}

/// Client-side refinement applied to the store list of a search result.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct RefineArgs {
    /// Keep only stores whose status is exactly this value (e.g. ATIVA)
    #[arg(long)]
    pub status: Option<String>,
    /// Case-insensitive text matched against name, code and city
    #[arg(long)]
    pub filter: Option<String>,
    /// Sort column
    #[arg(long, value_enum, default_value = "name")]
    pub sort: SortKey,
    /// Sort descending
    #[arg(long)]
    pub desc: bool,
    /// Page to show (1-based)
    #[arg(long, default_value = "1")]
    pub page: usize,
    /// Rows per page (defaults to the configured page size)
    #[arg(long)]
    pub page_size: Option<usize>,
}

impl Default for RefineArgs {
    fn default() -> Self {
        Self {
            status: None,
            filter: None,
            sort: SortKey::Name,
            desc: false,
            page: 1,
            page_size: None,
        }
    }
}

impl RefineArgs {
    pub(crate) fn to_params(&self, default_page_size: usize) -> RefinerParams {
        RefinerParams {
            status: self.status.clone().unwrap_or_default(),
            query: self.filter.clone().unwrap_or_default(),
            sort_field: self.sort.into(),
            direction: if self.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            },
            page: Some(Pagination::new(
                self.page,
                self.page_size.unwrap_or(default_page_size),
            )),
        }
    }
}

/// Single-field and unified search kinds accepted by `find`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FindKind {
    /// Search across stores, circuits and inventory
    Unified,
    /// People (PEOP) code
    People,
    /// Circuit designation
    Designation,
    Address,
    /// Vivo circuit id
    VivoId,
    /// GGL or GR manager name
    GglGr,
}

impl FindKind {
    /// Command-line spelling, also sent as the export's search type.
    pub(crate) fn label(self) -> String {
        self.to_possible_value()
            .map_or_else(|| format!("{self:?}"), |value| value.get_name().to_owned())
    }

    fn field(self) -> Option<FieldSearch> {
        match self {
            FindKind::Unified => None,
            FindKind::People => Some(FieldSearch::PeopleCode),
            FindKind::Designation => Some(FieldSearch::Designation),
            FindKind::Address => Some(FieldSearch::Address),
            FindKind::VivoId => Some(FieldSearch::VivoId),
            FindKind::GglGr => Some(FieldSearch::GglGr),
        }
    }
}

/// Check backend health.
///
/// # Errors
///
/// Returns an error if the backend is unreachable or answers non-2xx.
pub(crate) async fn run_health(client: &ApiClient) -> anyhow::Result<()> {
    let health = client.health().await?;
    println!(
        "{} ({})",
        health.status,
        health.timestamp.as_deref().unwrap_or("no timestamp")
    );
    Ok(())
}

/// List stores matching a free-text query.
///
/// Queries shorter than the configured minimum are rejected locally, the same
/// way the interactive picker skips them.
///
/// # Errors
///
/// Returns an error if the query is too short or the lookup fails.
pub(crate) async fn run_stores(
    client: &ApiClient,
    config: &AppConfig,
    query: &str,
) -> anyhow::Result<()> {
    if query.chars().count() < config.store_search_min_chars {
        anyhow::bail!(
            "store search needs at least {} characters",
            config.store_search_min_chars
        );
    }
    let candidates = client.search_stores(query).await?;
    output::print_candidates(&candidates);
    Ok(())
}

/// # Errors
///
/// Returns an error if the lookup fails.
pub(crate) async fn run_carriers(client: &ApiClient, store: &str) -> anyhow::Result<()> {
    let carriers = client.get_carriers(store).await?;
    output::print_names("carriers", &carriers);
    Ok(())
}

/// # Errors
///
/// Returns an error if the lookup fails.
pub(crate) async fn run_circuits(
    client: &ApiClient,
    store: &str,
    carrier: &str,
) -> anyhow::Result<()> {
    let circuits = client.get_circuits(store, carrier).await?;
    output::print_names("circuits", &circuits);
    Ok(())
}

/// Walk the store -> carrier -> circuit chain and print the combined search.
///
/// Warns, but continues, when the backend does not list the given carrier or
/// circuit for the selection above it.
///
/// # Errors
///
/// Returns an error if the combined search fails.
pub(crate) async fn run_search(
    client: ApiClient,
    config: &AppConfig,
    store: &str,
    carrier: &str,
    circuit: &str,
    refine: &RefineArgs,
) -> anyhow::Result<()> {
    let resolver =
        CascadingResolver::new(client).with_min_query_chars(config.store_search_min_chars);

    resolver.select_store(store).await;
    if !resolver.snapshot().carriers().iter().any(|c| c == carrier) {
        eprintln!("warning: carrier '{carrier}' is not listed for store '{store}'");
    }
    resolver.select_carrier(carrier).await?;
    if !resolver.snapshot().circuits().iter().any(|c| c == circuit) {
        eprintln!("warning: circuit '{circuit}' is not listed for {store}/{carrier}");
    }
    resolver.select_circuit(circuit)?;

    let result = resolver.search().await?;
    output::print_search_result(&result, refine, config.page_size);
    Ok(())
}

/// Run a unified or single-field search and print the refined store list.
///
/// # Errors
///
/// Returns an error if the search fails.
pub(crate) async fn run_find(
    client: &ApiClient,
    config: &AppConfig,
    kind: FindKind,
    term: &str,
    refine: &RefineArgs,
) -> anyhow::Result<()> {
    let result = find(client, kind, term).await?;
    output::print_search_result(&result, refine, config.page_size);
    Ok(())
}

/// Unified or single-field search, by kind.
///
/// # Errors
///
/// Returns an error if the search fails.
pub(crate) async fn find(
    client: &ApiClient,
    kind: FindKind,
    term: &str,
) -> anyhow::Result<SearchResult> {
    let result = match kind.field() {
        Some(field) => client.search_by_field(field, term).await?,
        None => client.unified_search(term).await?,
    };
    tracing::debug!(
        kind = ?kind,
        stores = result.stores.len(),
        circuits = result.circuits.len(),
        inventory = result.inventory.len(),
        "search complete"
    );
    Ok(result)
}

/// Print one server-side page of the store table.
///
/// # Errors
///
/// Returns an error if the listing fails.
pub(crate) async fn run_list(
    client: &ApiClient,
    filters: &StoreFilters,
    page: u32,
    limit: u32,
) -> anyhow::Result<()> {
    let page_data = client.list_stores(filters, page, limit).await?;
    if page_data.items.is_empty() {
        println!("no stores on page {page}");
        return Ok(());
    }
    let rows: Vec<_> = page_data.items.iter().collect();
    output::print_records(&rows);
    println!(
        "page {}/{} ({} stores)",
        page_data.info.page,
        page_data.info.page_count(),
        page_data.info.total
    );
    Ok(())
}
