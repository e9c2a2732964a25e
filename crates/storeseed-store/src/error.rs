use storeseed_core::Table;
use thiserror::Error;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("no open transaction")]
    NoTransaction,
    #[error("a transaction is already open")]
    TransactionOpen,
    #[error("write to {table} rejected")]
    Rejected { table: Table },
    #[error("unsupported engine: {0}")]
    UnsupportedEngine(String),
    #[error("invalid store state: {0}")]
    Invalid(String),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
