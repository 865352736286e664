//parallel/mod.rs
use log::{debug, info};
use parking_lot::Mutex;
use rayon::prelude::*;

use crate::registry::CategoryRegistry;
use crate::report::{categorize, categorize_one, BenchmarkResult, CategorizedReport, Row};
use crate::schema::ParameterSchema;
use crate::NameError;

// Below this many results the sequential path is faster
const PARALLEL_THRESHOLD: usize = 64;

// Decoding one name is a regex scan plus a few small allocations, so a
// chunk needs a few dozen names before rayon's per-task cost is repaid.
const MIN_CHUNK: usize = 32;
const MAX_CHUNK: usize = 4096;

/// Chunk size giving each core about four chunks of names.
pub fn calculate_chunk_size(total_results: usize) -> usize {
    let chunks = num_cpus::get() * 4;
    total_results.div_ceil(chunks).clamp(MIN_CHUNK, MAX_CHUNK)
}

/// Parallel [`categorize`]. Rows keep input order and the registry keeps
/// first-seen input order, so the result matches the sequential path.
pub fn categorize_parallel(
    results: &[BenchmarkResult],
    strict: bool,
) -> Result<CategorizedReport, NameError> {
    if results.len() < PARALLEL_THRESHOLD {
        debug!("{} results, categorizing sequentially", results.len());
        return categorize(results, strict);
    }

    let chunk_size = calculate_chunk_size(results.len());
    info!(
        "Categorizing {} results in parallel (chunk size {})",
        results.len(),
        chunk_size
    );

    let chunks: Vec<Vec<Row>> = results
        .par_chunks(chunk_size)
        .map(|chunk| {
            chunk
                .iter()
                .map(|r| categorize_one(r, strict))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let rows: Vec<Row> = chunks.into_iter().flatten().collect();
    Ok(CategorizedReport::from_rows(
        rows,
        ParameterSchema::for_report(results),
    ))
}

/// Records every row into a registry shared between workers. Registration
/// order across threads is unspecified.
pub fn record_shared(rows: &[Row], registry: &Mutex<CategoryRegistry>) {
    rows.par_iter().for_each(|row| {
        registry.lock().record(&row.parsed);
    });
}
