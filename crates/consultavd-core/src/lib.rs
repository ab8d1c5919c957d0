pub mod app_config;
pub mod audit;
pub mod cascade;
pub mod config;
pub mod record;
pub mod refine;
pub mod resolve;
pub mod stats;

pub use app_config::{AppConfig, Environment};
pub use audit::{AuditEntry, AuditFilter};
pub use cascade::{CascadeError, CascadeStage, Fetch, ResolverState, SelectionKey, Slot};
pub use config::{load_app_config, load_app_config_from_env};
pub use record::{Record, SearchResult, StoreCandidate, StoreRecord};
pub use refine::{refine, Pagination, Refined, RefinerParams, SortDirection, SortField};
pub use resolve::{resolve_field, LogicalField, PLACEHOLDER};
pub use stats::{summarize, ResultStats};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
