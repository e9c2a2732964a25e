use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, info};

use storeseed_core::{
    Category, Client, Order, Product, ProductOrderRelation, Record, Report, Review,
};

use crate::bulk::BulkMode;
use crate::error::{Result, StoreError};
use crate::options::ConnectOptions;
use crate::store::{BatchWriter, Store};

mod queries;

/// Store backed by a PostgreSQL database.
///
/// All writes and lookups go through a single transaction opened by `begin`.
pub struct PostgresStore {
    pool: PgPool,
    tx: Option<Transaction<'static, Postgres>>,
    bulk_mode: BulkMode,
}

impl PostgresStore {
    /// Create a store using a pre-configured pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            tx: None,
            bulk_mode: BulkMode::new(),
        }
    }

    /// Connect a new pool to `url`.
    pub async fn connect(url: &str, options: &ConnectOptions) -> Result<Self> {
        let connect_options = PgConnectOptions::from_str(url)?;
        info!(
            host = %connect_options.get_host(),
            port = connect_options.get_port(),
            database = connect_options.get_database().unwrap_or("<default>"),
            "connecting to postgres"
        );
        let pool = PgPoolOptions::new()
            .max_connections(options.max_connections)
            .acquire_timeout(options.acquire_timeout)
            .connect_with(connect_options)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn transaction(&mut self) -> Result<&mut Transaction<'static, Postgres>> {
        self.tx.as_mut().ok_or(StoreError::NoTransaction)
    }
}

macro_rules! postgres_writer {
    ($ty:ty, $insert:path) => {
        #[async_trait]
        impl BatchWriter<$ty> for PostgresStore {
            async fn write_batch(&mut self, rows: &mut [$ty]) -> Result<()> {
                if rows.is_empty() {
                    return Ok(());
                }
                let tx = self.transaction()?;
                $insert(&mut **tx, rows).await?;
                let table = <$ty as Record>::TABLE;
                debug!(table = %table, rows = rows.len(), "batch written");
                Ok(())
            }
        }
    };
}

postgres_writer!(Client, queries::insert_clients);
postgres_writer!(Category, queries::insert_categories);
postgres_writer!(Product, queries::insert_products);
postgres_writer!(Review, queries::insert_reviews);
postgres_writer!(Order, queries::insert_orders);
postgres_writer!(ProductOrderRelation, queries::insert_relations);
postgres_writer!(Report, queries::insert_reports);

#[async_trait]
impl Store for PostgresStore {
    fn engine(&self) -> &'static str {
        "postgres"
    }

    fn bulk_mode(&self) -> BulkMode {
        self.bulk_mode.clone()
    }

    async fn begin(&mut self) -> Result<()> {
        if self.tx.is_some() {
            return Err(StoreError::TransactionOpen);
        }
        let mut tx = self.pool.begin().await?;
        if self.bulk_mode.is_enabled() {
            sqlx::query("SET LOCAL synchronous_commit = off")
                .execute(&mut *tx)
                .await?;
        }
        self.tx = Some(tx);
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        let tx = self.tx.take().ok_or(StoreError::NoTransaction)?;
        tx.commit().await?;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
        let tx = self.tx.take().ok_or(StoreError::NoTransaction)?;
        tx.rollback().await?;
        Ok(())
    }

    async fn client_ids(&mut self) -> Result<Vec<String>> {
        let tx = self.transaction()?;
        queries::client_ids(&mut **tx).await
    }

    async fn category_ids(&mut self) -> Result<Vec<i32>> {
        let tx = self.transaction()?;
        queries::category_ids(&mut **tx).await
    }

    async fn product_ids(&mut self) -> Result<Vec<i32>> {
        let tx = self.transaction()?;
        queries::product_ids(&mut **tx).await
    }

    async fn product_names(&mut self) -> Result<Vec<String>> {
        let tx = self.transaction()?;
        queries::product_names(&mut **tx).await
    }
}
