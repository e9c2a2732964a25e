//! Storage backends for seeding runs.
//!
//! A run writes every table inside one transaction. Backends implement
//! [`Store`] plus one [`BatchWriter`] per seeded entity.

pub mod bulk;
pub mod engine;
pub mod error;
pub mod memory;
pub mod options;
pub mod postgres;
pub mod store;

pub use bulk::{BulkInsertGuard, BulkMode};
pub use engine::{Engine, open_store};
pub use error::{Result, StoreError};
pub use memory::{MemoryStore, Tables};
pub use options::ConnectOptions;
pub use postgres::PostgresStore;
pub use store::{BatchWriter, Store};
