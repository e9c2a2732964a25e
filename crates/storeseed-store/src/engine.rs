use crate::error::{Result, StoreError};
use crate::memory::MemoryStore;
use crate::options::ConnectOptions;
use crate::postgres::PostgresStore;
use crate::store::Store;

/// Storage engine selected from a connection URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Postgres,
    /// In-process store; nothing outlives the process.
    Memory,
}

impl Engine {
    pub fn detect(url: &str) -> Result<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(Engine::Postgres)
        } else if url.starts_with("memory://") {
            Ok(Engine::Memory)
        } else {
            let scheme = url.split("://").next().unwrap_or(url);
            Err(StoreError::UnsupportedEngine(scheme.to_string()))
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Engine::Postgres => "postgres",
            Engine::Memory => "memory",
        }
    }
}

/// Open the store named by `url`.
pub async fn open_store(url: &str, options: &ConnectOptions) -> Result<Box<dyn Store>> {
    match Engine::detect(url)? {
        Engine::Postgres => Ok(Box::new(PostgresStore::connect(url, options).await?)),
        Engine::Memory => Ok(Box::new(MemoryStore::new())),
    }
}
