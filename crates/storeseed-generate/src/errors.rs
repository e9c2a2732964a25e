use storeseed_core::Table;
use storeseed_store::StoreError;
use thiserror::Error;

/// Errors emitted while seeding.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
    #[error("no {table} rows available to reference")]
    EmptyPool { table: Table },
    #[error("unknown menu choice '{0}'")]
    UnknownChoice(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("relation worker failed: {0}")]
    Worker(String),
}
