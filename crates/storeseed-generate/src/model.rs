use serde::{Deserialize, Serialize};

use storeseed_core::Table;

use crate::batch::DEFAULT_CHUNK_SIZE;
use crate::errors::GenerationError;
use crate::relations::RelationOptions;
use crate::selection::Selection;

/// Options for the seed engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedOptions {
    /// Records generated and written per storage call.
    pub chunk_size: usize,
    /// Order workers launched per relation flush.
    pub relation_batch_size: usize,
    /// Upper bound of distinct products per order.
    pub max_products_per_order: usize,
    /// Fixed RNG seed; a fresh one is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for SeedOptions {
    fn default() -> Self {
        let relations = RelationOptions::default();
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            relation_batch_size: relations.batch_size,
            max_products_per_order: relations.max_per_order,
            seed: None,
        }
    }
}

impl SeedOptions {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.chunk_size == 0 {
            return Err(GenerationError::InvalidConfig(
                "chunk size must be greater than zero".to_string(),
            ));
        }
        self.relation_options().validate()
    }

    pub fn relation_options(&self) -> RelationOptions {
        RelationOptions {
            batch_size: self.relation_batch_size,
            max_per_order: self.max_products_per_order,
        }
    }
}

/// Rows written to one table during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableReport {
    pub table: Table,
    pub rows: u64,
}

/// Report for a committed seeding run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedReport {
    pub run_id: String,
    pub selection: Selection,
    pub record_count: u64,
    pub seed: Option<u64>,
    pub tables: Vec<TableReport>,
    pub duration_ms: u64,
}

impl SeedReport {
    pub fn new(run_id: String, selection: Selection, record_count: u64, seed: Option<u64>) -> Self {
        Self {
            run_id,
            selection,
            record_count,
            seed,
            tables: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn record(&mut self, table: Table, rows: usize) {
        self.tables.push(TableReport {
            table,
            rows: rows as u64,
        });
    }

    /// Rows written to `table`, zero when the run did not touch it.
    pub fn rows(&self, table: Table) -> u64 {
        self.tables
            .iter()
            .filter(|report| report.table == table)
            .map(|report| report.rows)
            .sum()
    }

    pub fn total_rows(&self) -> u64 {
        self.tables.iter().map(|report| report.rows).sum()
    }
}
