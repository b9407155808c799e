use crate::{Grid, Region, Tile};

/// Drop every region with fewer than `threshold` tiles, overwriting its cells with `fill`.
///
/// Surviving regions keep their relative order. Returns how many regions were removed.
pub fn prune_regions(grid: &mut Grid, regions: &mut Vec<Region>, threshold: usize, fill: Tile) -> usize {
    let before = regions.len();
    regions.retain(|region| {
        let keep = region.len() >= threshold;
        if !keep {
            grid.fill_tiles(region.tiles(), fill);
        }
        keep
    });
    let removed = before - regions.len();
    tracing::debug!(removed, kept = regions.len(), threshold, ?fill, "pruned regions");
    removed
}
