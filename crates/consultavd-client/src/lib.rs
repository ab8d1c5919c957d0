//! Typed client for the `ConsultaVD` backend and the async cascading resolver
//! built on top of it.

mod admin;
pub mod client;
pub mod debounce;
pub mod directory;
pub mod error;
mod export;
pub mod fallback;
mod records;
pub mod resolver;
mod search;
pub mod types;

pub use client::ApiClient;
pub use debounce::{debounced, Debounced};
pub use directory::StoreDirectory;
pub use error::ClientError;
pub use fallback::degrade_to_empty;
pub use resolver::{CascadingResolver, SearchError, DEFAULT_MIN_QUERY_CHARS};
pub use types::{
    ApiResponse, CacheStats, DashboardStats, Entity, Export, ExportFormat, FieldSearch, Health,
    NewTemplate, Page, PageInfo, PaginatedResponse, SearchExport, SqlResult, StoreFilters,
    TableData, TableQuery, Template, TemplateKind,
};
