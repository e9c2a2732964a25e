use rand::RngCore;
use tracing::info;

use storeseed_core::Record;
use storeseed_store::BatchWriter;

use crate::errors::GenerationError;
use crate::generators::RecordFaker;

/// Rows generated and written per storage call.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Generate `total` records in chunks of `chunk_size`, writing each chunk
/// before the next one is generated.
///
/// Returns every written record with its store-assigned id. A failed write is
/// returned as is; undoing earlier chunks is left to the caller's transaction.
pub async fn persist_in_batches<T, S, R>(
    sink: &mut S,
    faker: &RecordFaker<T>,
    total: usize,
    chunk_size: usize,
    rng: &mut R,
) -> Result<Vec<T>, GenerationError>
where
    T: Record + Default,
    S: BatchWriter<T> + ?Sized,
    R: RngCore + Send,
{
    if chunk_size == 0 {
        return Err(GenerationError::InvalidConfig(
            "chunk size must be greater than zero".to_string(),
        ));
    }

    let table = T::TABLE;
    let mut written = Vec::with_capacity(chunk_size.min(total));
    while written.len() < total {
        let size = chunk_size.min(total - written.len());
        let mut chunk = faker.generate_many(size, &mut *rng);
        sink.write_batch(&mut chunk).await?;
        written.append(&mut chunk);

        let done = written.len();
        info!(table = %table, done, total, "generated {done}/{total} {table}");
    }

    Ok(written)
}
