use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::debug;

use storeseed_core::{
    Category, Client, Order, Product, ProductOrderRelation, Record, Report, Review, Table,
};

use crate::bulk::BulkMode;
use crate::error::{Result, StoreError};
use crate::store::{BatchWriter, Store};

/// Rows of every seeded table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tables {
    pub clients: Vec<Client>,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub reviews: Vec<Review>,
    pub orders: Vec<Order>,
    pub relations: Vec<ProductOrderRelation>,
    pub reports: Vec<Report>,
}

impl Tables {
    pub fn len(&self, table: Table) -> usize {
        match table {
            Table::Clients => self.clients.len(),
            Table::Categories => self.categories.len(),
            Table::Products => self.products.len(),
            Table::Reviews => self.reviews.len(),
            Table::Orders => self.orders.len(),
            Table::ProductOrderRelations => self.relations.len(),
            Table::Reports => self.reports.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Table::ALL.into_iter().all(|table| self.len(table) == 0)
    }

    fn append(&mut self, mut other: Tables) {
        self.clients.append(&mut other.clients);
        self.categories.append(&mut other.categories);
        self.products.append(&mut other.products);
        self.reviews.append(&mut other.reviews);
        self.orders.append(&mut other.orders);
        self.relations.append(&mut other.relations);
        self.reports.append(&mut other.reports);
    }
}

/// In-process store with transaction semantics.
///
/// Writes are staged until `commit`; `rollback` discards them. Sequences keep
/// advancing across rollbacks, as database sequences do. Used for dry runs
/// (`memory://`) and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    committed: Tables,
    staged: Option<Tables>,
    sequences: BTreeMap<Table, i32>,
    rejected: Option<Table>,
    bulk_mode: BulkMode,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later write to `table` fail, to exercise rollback paths.
    pub fn reject_writes_to(&mut self, table: Table) {
        self.rejected = Some(table);
    }

    pub fn committed(&self) -> &Tables {
        &self.committed
    }

    pub fn in_transaction(&self) -> bool {
        self.staged.is_some()
    }

    /// Number of successful batch writes since creation.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn write_rows<T: Record>(
        &mut self,
        rows: &mut [T],
        select: fn(&mut Tables) -> &mut Vec<T>,
    ) -> Result<()> {
        let table = T::TABLE;
        if self.rejected == Some(table) {
            return Err(StoreError::Rejected { table });
        }
        let staged = self.staged.as_mut().ok_or(StoreError::NoTransaction)?;
        let sequence = self.sequences.entry(table).or_insert(0);
        for row in rows.iter_mut() {
            *sequence += 1;
            row.assign_id(*sequence);
        }
        select(staged).extend(rows.iter().cloned());
        self.writes += 1;
        debug!(table = %table, rows = rows.len(), "batch staged");
        Ok(())
    }

    fn visible(&self) -> impl Iterator<Item = &Tables> {
        std::iter::once(&self.committed).chain(self.staged.as_ref())
    }
}

macro_rules! memory_writer {
    ($ty:ty, $field:ident) => {
        #[async_trait]
        impl BatchWriter<$ty> for MemoryStore {
            async fn write_batch(&mut self, rows: &mut [$ty]) -> Result<()> {
                self.write_rows(rows, |tables| &mut tables.$field)
            }
        }
    };
}

memory_writer!(Client, clients);
memory_writer!(Category, categories);
memory_writer!(Product, products);
memory_writer!(Review, reviews);
memory_writer!(Order, orders);
memory_writer!(ProductOrderRelation, relations);
memory_writer!(Report, reports);

#[async_trait]
impl Store for MemoryStore {
    fn engine(&self) -> &'static str {
        "memory"
    }

    fn bulk_mode(&self) -> BulkMode {
        self.bulk_mode.clone()
    }

    async fn begin(&mut self) -> Result<()> {
        if self.staged.is_some() {
            return Err(StoreError::TransactionOpen);
        }
        self.staged = Some(Tables::default());
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        let staged = self.staged.take().ok_or(StoreError::NoTransaction)?;
        self.committed.append(staged);
        Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
        self.staged.take().ok_or(StoreError::NoTransaction)?;
        Ok(())
    }

    async fn client_ids(&mut self) -> Result<Vec<String>> {
        Ok(self
            .visible()
            .flat_map(|tables| tables.clients.iter().map(|client| client.id.clone()))
            .collect())
    }

    async fn category_ids(&mut self) -> Result<Vec<i32>> {
        Ok(self
            .visible()
            .flat_map(|tables| tables.categories.iter().map(|category| category.id))
            .collect())
    }

    async fn product_ids(&mut self) -> Result<Vec<i32>> {
        Ok(self
            .visible()
            .flat_map(|tables| tables.products.iter().map(|product| product.id))
            .collect())
    }

    async fn product_names(&mut self) -> Result<Vec<String>> {
        Ok(self
            .visible()
            .flat_map(|tables| tables.products.iter().map(|product| product.name.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(names: &[&str]) -> Vec<Category> {
        names
            .iter()
            .map(|name| Category {
                id: 0,
                name: name.to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn commit_publishes_staged_rows_with_ids() {
        let mut store = MemoryStore::new();
        store.begin().await.expect("begin");

        let mut batch = categories(&["Books", "Garden"]);
        store.write_batch(&mut batch).await.expect("write");
        assert_eq!(batch[0].id, 1);
        assert_eq!(batch[1].id, 2);
        assert_eq!(store.category_ids().await.expect("ids"), vec![1, 2]);
        assert!(store.committed().is_empty());

        store.commit().await.expect("commit");
        assert_eq!(store.committed().categories, batch);
        assert!(!store.in_transaction());
    }

    #[tokio::test]
    async fn rollback_discards_staged_rows_but_not_sequences() {
        let mut store = MemoryStore::new();
        store.begin().await.expect("begin");
        store
            .write_batch(&mut categories(&["Toys"]))
            .await
            .expect("write");
        store.rollback().await.expect("rollback");
        assert!(store.committed().is_empty());

        store.begin().await.expect("begin again");
        let mut batch = categories(&["Music"]);
        store.write_batch(&mut batch).await.expect("write again");
        assert_eq!(batch[0].id, 2);
    }

    #[tokio::test]
    async fn write_outside_transaction_fails() {
        let mut store = MemoryStore::new();
        let result = store.write_batch(&mut categories(&["Tools"])).await;
        assert!(matches!(result, Err(StoreError::NoTransaction)));
    }

    #[tokio::test]
    async fn rejected_table_fails_writes() {
        let mut store = MemoryStore::new();
        store.reject_writes_to(Table::Categories);
        store.begin().await.expect("begin");
        let result = store.write_batch(&mut categories(&["Shoes"])).await;
        assert!(matches!(
            result,
            Err(StoreError::Rejected {
                table: Table::Categories
            })
        ));
    }

    #[tokio::test]
    async fn begin_twice_is_an_error() {
        let mut store = MemoryStore::new();
        store.begin().await.expect("begin");
        assert!(matches!(
            store.begin().await,
            Err(StoreError::TransactionOpen)
        ));
    }
}
