use std::sync::Arc;

use rand::{Rng, RngCore};

use storeseed_core::Table;

use crate::errors::GenerationError;

/// Non-empty set of values from an already written table.
///
/// Cloning shares the underlying values.
#[derive(Debug, Clone)]
pub struct Pool<T> {
    table: Table,
    values: Arc<[T]>,
}

impl<T> Pool<T> {
    pub fn new(table: Table, values: Vec<T>) -> Result<Self, GenerationError> {
        if values.is_empty() {
            return Err(GenerationError::EmptyPool { table });
        }
        Ok(Self {
            table,
            values: values.into(),
        })
    }

    pub fn table(&self) -> Table {
        self.table
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Uniform pick with replacement.
    pub fn pick(&self, rng: &mut dyn RngCore) -> &T {
        &self.values[rng.random_range(0..self.values.len())]
    }
}
