//! `ConsultaVD` API response types.
//!
//! Most endpoints wrap their payload in a `{"success": ..., "data": ...}`
//! envelope; [`ApiResponse`] captures that pattern generically and
//! [`PaginatedResponse`] adds the `pagination` block of listing endpoints.
//! The health, SQL and template endpoints answer with bare bodies.

use std::collections::BTreeMap;

use consultavd_core::Record;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ClientError;

/// Envelope shared by the search, store, audit and cache endpoints.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Unwraps the payload of a successful envelope.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] when `success` is false.
    /// - [`ClientError::MissingData`] when `data` is absent.
    pub fn into_data(self, context: &str) -> Result<T, ClientError> {
        self.check()?;
        self.data.ok_or_else(|| ClientError::MissingData {
            context: context.to_owned(),
        })
    }

    /// Fails with [`ClientError::Api`] when `success` is false.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] carrying `error`, then `message`, then a
    /// generic text.
    pub fn check(&self) -> Result<(), ClientError> {
        if self.success {
            return Ok(());
        }
        let message = self
            .error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "request was not successful".to_owned());
        Err(ClientError::Api(message))
    }
}

/// `pagination` block of a listing endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(default)]
    pub pages: Option<u32>,
}

impl PageInfo {
    /// Page count, computed from `total` and `limit` when the backend omits it.
    #[must_use]
    pub fn page_count(&self) -> u32 {
        self.pages.unwrap_or_else(|| {
            if self.limit == 0 {
                1
            } else {
                u32::try_from(self.total.div_ceil(u64::from(self.limit)))
                    .unwrap_or(u32::MAX)
                    .max(1)
            }
        })
    }
}

/// Envelope of a paged listing.
#[derive(Debug, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: PageInfo,
    #[serde(default)]
    pub error: Option<String>,
}

/// One page of results together with its pagination block.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub info: PageInfo,
}

impl<T> PaginatedResponse<T> {
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when `success` is false.
    pub fn into_page(self) -> Result<Page<T>, ClientError> {
        if !self.success {
            return Err(ClientError::Api(
                self.error
                    .unwrap_or_else(|| "request was not successful".to_owned()),
            ));
        }
        Ok(Page {
            items: self.data,
            info: self.pagination,
        })
    }
}

/// `GET /api/health` body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Backend cache counters shown on the cache panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub evictions: u64,
    pub current_size: u64,
    pub max_size: u64,
    /// Percentage in `0.0..=100.0`.
    pub hit_rate: f64,
    pub enabled: bool,
}

/// Category of a saved message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Informativo,
    Alerta,
}

impl TemplateKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateKind::Informativo => "informativo",
            TemplateKind::Alerta => "alerta",
        }
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub tipo: TemplateKind,
    pub nome: String,
    /// Free-form template body (text and placeholders) stored as JSON.
    pub conteudo: Value,
    #[serde(default)]
    pub criado_em: Option<String>,
}

/// Request body for `POST /api/templates`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTemplate {
    pub tipo: TemplateKind,
    pub nome: String,
    pub conteudo: Value,
}

/// `POST /api/sql/execute` body: column names and one object per row.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SqlResult {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub data: Vec<Map<String, Value>>,
}

/// Server-side filters of `GET /api/lojas`. Unset fields are not sent.
///
/// `search` matches store name and address on the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl StoreFilters {
    /// Query pairs for the set filters.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("status", self.status.as_deref()),
            ("uf", self.uf.as_deref()),
            ("search", self.search.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}

/// Dashboard counters (`GET /api/dashboard/stats`).
///
/// Count maps are keyed by the raw column value; a null status or carrier
/// arrives as the key `"null"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub total_lojas: u64,
    pub lojas_por_status: BTreeMap<String, u64>,
    pub total_circuitos: u64,
    pub circuitos_por_operadora: BTreeMap<String, u64>,
    pub lojas_por_uf: BTreeMap<String, u64>,
}

impl DashboardStats {
    /// Entries of a count map, largest first, ties in key order.
    #[must_use]
    pub fn ranked(counts: &BTreeMap<String, u64>) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> =
            counts.iter().map(|(key, count)| (key.as_str(), *count)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

/// Entity tables with dedicated CRUD endpoints under `/api/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Stores,
    Circuits,
    Inventory,
}

impl Entity {
    /// Path segment under `/api/`, also the table name accepted by export.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Entity::Stores => "lojas",
            Entity::Circuits => "circuitos",
            Entity::Inventory => "inventario",
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.path())
    }
}

/// Paging, search and ordering of `GET /api/table/{name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    /// Substring matched against every text column.
    pub search: Option<String>,
    /// Column to order by; the backend ignores unknown columns.
    pub order_by: Option<String>,
    pub descending: bool,
    pub limit: u32,
    pub offset: u32,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            search: None,
            order_by: None,
            descending: false,
            limit: 100,
            offset: 0,
        }
    }
}

impl TableQuery {
    /// Query pairs in the backend's parameter names.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(column) = &self.order_by {
            pairs.push(("orderBy", column.clone()));
            let direction = if self.descending { "desc" } else { "asc" };
            pairs.push(("orderDir", direction.to_owned()));
        }
        pairs
    }
}

/// One window of a raw table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
    /// Matching rows before `limit`/`offset`.
    pub total: u64,
}

/// File format of `GET /api/export/{table}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
}

impl ExportFormat {
    /// Value of the `format` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "excel",
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
        }
    }
}

/// Request body of `POST /api/export/search-results`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchExport {
    pub results: Vec<Record>,
    #[serde(rename = "searchType")]
    pub search_type: String,
    pub filters: Map<String, Value>,
}

/// A downloaded file: the server-suggested name and the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub filename: Option<String>,
    pub content: Vec<u8>,
}

/// Single-field search endpoints under `/api/search/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSearch {
    PeopleCode,
    Designation,
    Address,
    VivoId,
    GglGr,
}

impl FieldSearch {
    /// Path segment under `/api/search/`.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            FieldSearch::PeopleCode => "people",
            FieldSearch::Designation => "designation",
            FieldSearch::Address => "address",
            FieldSearch::VivoId => "id-vivo",
            FieldSearch::GglGr => "ggl-gr",
        }
    }

    /// Query parameter carrying the term.
    #[must_use]
    pub fn param(self) -> &'static str {
        match self {
            FieldSearch::PeopleCode => "code",
            FieldSearch::Designation => "designation",
            FieldSearch::Address => "address",
            FieldSearch::VivoId => "id_vivo",
            FieldSearch::GglGr => "ggl_gr",
        }
    }
}
