use anyhow::Result;
use rayon::prelude::*;

use crate::{Cave, CaveConfig, algorithm::BatchProgress};

/// Generate one cave per seed in parallel.
///
/// Every run owns its grid and a generator seeded from its own seed, so the output for a given
/// seed matches [`Cave::generate_seeded`]. Results are returned in seed order.
pub fn generate_batch(config: &CaveConfig, seeds: &[u64], show_progress: bool) -> Result<Vec<Cave>> {
    config.validate()?;

    let progress = if show_progress {
        BatchProgress::new(seeds.len())
    } else {
        BatchProgress::hidden()
    };

    let caves = seeds
        .par_iter()
        .map(|&seed| -> Result<Cave> {
            let cave = Cave::generate_seeded(config.clone(), seed)?;
            if !cave.is_fully_connected() {
                progress.record_disconnected();
                tracing::debug!(seed, rooms = cave.room_regions().len(), "cave left disconnected");
            }
            progress.increment();
            Ok(cave)
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(
        caves = caves.len(),
        disconnected = progress.disconnected(),
        "generated batch"
    );
    progress.finish();

    Ok(caves)
}
