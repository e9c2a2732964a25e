use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::seq::index;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::info;

use storeseed_core::{Order, ProductOrderRelation, Table};
use storeseed_store::BatchWriter;

use crate::errors::GenerationError;
use crate::pool::Pool;

/// Knobs of the order/product fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationOptions {
    /// Workers launched (and relation rows flushed) per batch.
    pub batch_size: usize,
    /// Upper bound of distinct products linked to one order.
    pub max_per_order: usize,
}

impl Default for RelationOptions {
    fn default() -> Self {
        Self {
            batch_size: 100,
            max_per_order: 5,
        }
    }
}

impl RelationOptions {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.batch_size == 0 {
            return Err(GenerationError::InvalidConfig(
                "relation batch size must be greater than zero".to_string(),
            ));
        }
        if self.max_per_order == 0 {
            return Err(GenerationError::InvalidConfig(
                "max products per order must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of a fan-out run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationSummary {
    pub orders: usize,
    pub relations: usize,
    pub flushes: usize,
}

/// Worker completions that get a progress line: every `batch_size`-th one and
/// the last.
fn is_progress_mark(done: usize, batch_size: usize, total: usize) -> bool {
    done % batch_size == 0 || done == total
}

/// Link every order to between one and `max_per_order` distinct products.
///
/// One task runs per order, launched in batches of `batch_size`. Each task
/// gets its own RNG seeded from `rng` in launch order and hands its rows back
/// through its join handle. A batch is flushed, in launch order, once all of
/// its tasks have finished.
pub async fn build_order_relations<S, R>(
    sink: &mut S,
    orders: &[Order],
    products: &Pool<i32>,
    options: RelationOptions,
    rng: &mut R,
) -> Result<RelationSummary, GenerationError>
where
    S: BatchWriter<ProductOrderRelation> + ?Sized,
    R: RngCore + Send,
{
    options.validate()?;

    let total = orders.len();
    let completed = Arc::new(AtomicUsize::new(0));
    let mut summary = RelationSummary {
        orders: total,
        ..RelationSummary::default()
    };

    for (batch_index, batch) in orders.chunks(options.batch_size).enumerate() {
        let first = batch_index * options.batch_size;
        let mut workers = JoinSet::new();

        for (offset, order) in batch.iter().enumerate() {
            let position = first + offset;
            let order_id = order.id;
            let worker_seed = rng.next_u64();
            let products = products.clone();
            let completed = Arc::clone(&completed);
            let max_per_order = options.max_per_order;
            let batch_size = options.batch_size;

            workers.spawn(async move {
                let mut worker_rng = ChaCha8Rng::seed_from_u64(worker_seed);
                let relations: Vec<ProductOrderRelation> =
                    pick_products(products.as_slice(), max_per_order, &mut worker_rng)
                        .into_iter()
                        .map(|product_id| ProductOrderRelation {
                            order_id,
                            product_id,
                        })
                        .collect();

                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                if is_progress_mark(done, batch_size, total) {
                    info!(done, total, "order workers finished {done}/{total}");
                }
                (position, relations)
            });
        }

        let mut finished = Vec::with_capacity(batch.len());
        while let Some(joined) = workers.join_next().await {
            let result = joined.map_err(|err| GenerationError::Worker(err.to_string()))?;
            finished.push(result);
        }
        finished.sort_by_key(|(position, _)| *position);

        let mut rows: Vec<ProductOrderRelation> = finished
            .into_iter()
            .flat_map(|(_, relations)| relations)
            .collect();
        sink.write_batch(&mut rows).await?;

        summary.relations += rows.len();
        summary.flushes += 1;
        info!(
            table = %Table::ProductOrderRelations,
            rows = rows.len(),
            orders = first + batch.len(),
            total,
            "relations flushed"
        );
    }

    Ok(summary)
}

/// Distinct products for one order; at least one, at most
/// `min(max_per_order, pool size)`.
fn pick_products(pool: &[i32], max_per_order: usize, rng: &mut ChaCha8Rng) -> Vec<i32> {
    let upper = max_per_order.min(pool.len());
    if upper == 0 {
        return Vec::new();
    }
    let amount = rng.random_range(1..=upper);
    index::sample(rng, pool.len(), amount)
        .into_iter()
        .map(|i| pool[i])
        .collect()
}
