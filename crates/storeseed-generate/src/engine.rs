use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use storeseed_core::Table;
use storeseed_store::{BulkInsertGuard, Store};

use crate::batch::persist_in_batches;
use crate::errors::GenerationError;
use crate::generators::{
    category_faker, client_faker, order_faker, product_faker, report_faker, review_faker,
};
use crate::model::{SeedOptions, SeedReport};
use crate::pool::Pool;
use crate::relations::build_order_relations;
use crate::selection::{Selection, Step};

/// Runs a seeding selection against a store inside one transaction.
pub struct SeedEngine<'a, S: Store + ?Sized> {
    store: &'a mut S,
    options: SeedOptions,
    reference_time: Option<DateTime<Utc>>,
}

impl<'a, S: Store + ?Sized> SeedEngine<'a, S> {
    pub fn new(store: &'a mut S, options: SeedOptions) -> Self {
        Self {
            store,
            options,
            reference_time: None,
        }
    }

    /// Date orders relative to `time` instead of the wall clock.
    pub fn with_reference_time(mut self, time: DateTime<Utc>) -> Self {
        self.reference_time = Some(time);
        self
    }

    pub fn options(&self) -> &SeedOptions {
        &self.options
    }

    /// Generate `count` records for every step of `selection`.
    ///
    /// Either every step is committed or, on the first error, the whole
    /// transaction is rolled back and the error returned. Bulk insert mode is
    /// on for the duration of the call.
    pub async fn run(
        &mut self,
        selection: Selection,
        count: usize,
    ) -> Result<SeedReport, GenerationError> {
        self.options.validate()?;

        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let mut rng = run_rng(self.options.seed);
        let reference_time = self.reference_time.unwrap_or_else(Utc::now);
        let mut report = SeedReport::new(
            run_id.clone(),
            selection,
            count as u64,
            self.options.seed,
        );

        let bulk_mode = self.store.bulk_mode();
        let _bulk = BulkInsertGuard::enable(&bulk_mode);

        info!(
            run_id = %run_id,
            engine = self.store.engine(),
            selection = %selection,
            count,
            seed = self.options.seed,
            "seeding started"
        );

        self.store.begin().await?;

        let mut outcome = Ok(());
        if count == 0 {
            info!(run_id = %run_id, "record count is zero; nothing to generate");
        } else {
            for &step in selection.steps() {
                outcome = self
                    .run_step(step, count, &mut rng, reference_time, &mut report)
                    .await;
                if outcome.is_err() {
                    break;
                }
            }
        }

        match outcome {
            Ok(()) => {
                self.store.commit().await?;
                report.duration_ms = start.elapsed().as_millis() as u64;
                info!(
                    run_id = %run_id,
                    tables = report.tables.len(),
                    rows = report.total_rows(),
                    duration_ms = report.duration_ms,
                    "seeding committed"
                );
                Ok(report)
            }
            Err(err) => {
                warn!(run_id = %run_id, error = %err, "seeding failed, rolling back");
                if let Err(rollback_err) = self.store.rollback().await {
                    warn!(run_id = %run_id, error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }

    async fn run_step(
        &mut self,
        step: Step,
        count: usize,
        rng: &mut ChaCha8Rng,
        reference_time: DateTime<Utc>,
        report: &mut SeedReport,
    ) -> Result<(), GenerationError> {
        let step_start = Instant::now();
        let chunk_size = self.options.chunk_size;
        let store = &mut *self.store;
        info!(table = %step.table(), rows = count, "generating table");

        match step {
            Step::Clients => {
                let clients =
                    persist_in_batches(store, &client_faker(), count, chunk_size, rng).await?;
                report.record(Table::Clients, clients.len());
            }
            Step::Categories => {
                let categories =
                    persist_in_batches(store, &category_faker(), count, chunk_size, rng).await?;
                report.record(Table::Categories, categories.len());
            }
            Step::Products => {
                let categories = Pool::new(Table::Categories, store.category_ids().await?)?;
                let faker = product_faker(categories);
                let products = persist_in_batches(store, &faker, count, chunk_size, rng).await?;
                report.record(Table::Products, products.len());
            }
            Step::Reviews => {
                let clients = Pool::new(Table::Clients, store.client_ids().await?)?;
                let products = Pool::new(Table::Products, store.product_ids().await?)?;
                let faker = review_faker(clients, products);
                let reviews = persist_in_batches(store, &faker, count, chunk_size, rng).await?;
                report.record(Table::Reviews, reviews.len());
            }
            Step::Orders => {
                let clients = Pool::new(Table::Clients, store.client_ids().await?)?;
                let products = Pool::new(Table::Products, store.product_ids().await?)?;
                let faker = order_faker(clients, reference_time);
                let orders = persist_in_batches(store, &faker, count, chunk_size, rng).await?;
                report.record(Table::Orders, orders.len());

                let summary = build_order_relations(
                    store,
                    &orders,
                    &products,
                    self.options.relation_options(),
                    rng,
                )
                .await?;
                report.record(Table::ProductOrderRelations, summary.relations);
            }
            Step::Reports => {
                let clients = Pool::new(Table::Clients, store.client_ids().await?)?;
                let names = Pool::new(Table::Products, store.product_names().await?)?;
                let faker = report_faker(clients, names);
                let reports = persist_in_batches(store, &faker, count, chunk_size, rng).await?;
                report.record(Table::Reports, reports.len());
            }
        }

        info!(
            table = %step.table(),
            duration_ms = step_start.elapsed().as_millis() as u64,
            "table generated"
        );
        Ok(())
    }
}

fn run_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    }
}
