use async_trait::async_trait;

use storeseed_core::{
    Category, Client, Order, Product, ProductOrderRelation, Record, Report, Review,
};

use crate::bulk::BulkMode;
use crate::error::Result;

/// Writes batches of one entity type into the open transaction.
#[async_trait]
pub trait BatchWriter<T: Record>: Send {
    /// Append `rows` to their table, assigning sequence ids in place.
    async fn write_batch(&mut self, rows: &mut [T]) -> Result<()>;
}

/// Transactional store targeted by a seeding run.
///
/// Lookups observe rows written earlier in the same transaction.
#[async_trait]
pub trait Store:
    BatchWriter<Client>
    + BatchWriter<Category>
    + BatchWriter<Product>
    + BatchWriter<Review>
    + BatchWriter<Order>
    + BatchWriter<ProductOrderRelation>
    + BatchWriter<Report>
    + Send
{
    /// Returns the engine identifier (e.g. `postgres`).
    fn engine(&self) -> &'static str;

    /// Handle on the store's bulk-insert mode flag.
    fn bulk_mode(&self) -> BulkMode;

    async fn begin(&mut self) -> Result<()>;

    async fn commit(&mut self) -> Result<()>;

    async fn rollback(&mut self) -> Result<()>;

    async fn client_ids(&mut self) -> Result<Vec<String>>;

    async fn category_ids(&mut self) -> Result<Vec<i32>>;

    async fn product_ids(&mut self) -> Result<Vec<i32>>;

    async fn product_names(&mut self) -> Result<Vec<String>>;
}
