use std::io;
use std::path::PathBuf;

use storeseed_generate::GenerationError;
use storeseed_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read settings {path}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings file {path}")]
    Settings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("database url is required (use --database-url or DATABASE_URL)")]
    MissingDatabaseUrl,
    #[error("failed to read input")]
    Input(#[source] io::Error),
    #[error("invalid menu choice")]
    Choice(#[source] GenerationError),
    #[error("record count must be a non-negative integer, got '{0}'")]
    InvalidCount(String),
    #[error("invalid options")]
    Options(#[source] GenerationError),
    #[error("logging setup failed: {0}")]
    Logging(String),
    #[error("failed to open store")]
    Store(#[source] StoreError),
    #[error("seeding failed, all changes rolled back")]
    Seed(#[source] GenerationError),
    #[error("failed to write report {path}")]
    Report {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CliError {
    /// Process exit status: 2 for bad input caught before any transaction,
    /// 1 for failures while talking to the store or writing results.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Store(StoreError::UnsupportedEngine(_)) => 2,
            CliError::Store(_) | CliError::Seed(_) | CliError::Report { .. } => 1,
            _ => 2,
        }
    }
}
