//! Rule-based synthetic data generation for the storeseed schema.
//!
//! Records are produced by per-entity [`RecordFaker`]s, written in chunks by
//! the batch persister, and linked through the order/product fan-out. The
//! [`SeedEngine`] runs the selected steps inside one store transaction.

pub mod batch;
pub mod engine;
pub mod errors;
pub mod generators;
pub mod model;
pub mod pool;
pub mod relations;
pub mod selection;

pub use batch::{DEFAULT_CHUNK_SIZE, persist_in_batches};
pub use engine::SeedEngine;
pub use errors::GenerationError;
pub use generators::RecordFaker;
pub use model::{SeedOptions, SeedReport, TableReport};
pub use pool::Pool;
pub use relations::{RelationOptions, RelationSummary, build_order_relations};
pub use selection::{Selection, Step};
