use fixedbitset::FixedBitSet;
use std::collections::VecDeque;

use crate::{Coord, Grid, Region, RegionBuilder, RegionId, Tile};

// Axis neighbour offsets, visited in this order for every popped cell
const NEIGHBOUR_DELTAS: [(i32, i32); 4] = [
    (-1, 0), // Left
    (0, -1), // Down
    (1, 0),  // Right
    (0, 1),  // Up
];

/// Flood-fill the component containing `start`.
///
/// Cells of the same type are claimed in `visited`. When `edge_marker` is set, a member with
/// an unclaimed neighbour of that type is recorded as an edge tile.
fn region_at(
    grid: &Grid,
    start: (usize, usize),
    visited: &mut FixedBitSet,
    edge_marker: Option<Tile>,
    id: RegionId,
) -> Region {
    let target = grid[start];
    let mut builder = RegionBuilder::new(id, target);
    let mut queue = VecDeque::new();

    queue.push_back(Coord::from(start));
    visited.insert(grid.flat_index(start.0, start.1));

    while let Some(tile) = queue.pop_front() {
        let mut is_edge = false;
        for (dx, dy) in NEIGHBOUR_DELTAS {
            let next = tile.offset(dx, dy);
            if !grid.in_bounds(next.x, next.y) {
                continue;
            }
            let (nx, ny) = (next.x as usize, next.y as usize);
            let index = grid.flat_index(nx, ny);
            if visited.contains(index) {
                continue;
            }

            let neighbour = grid[(nx, ny)];
            if neighbour == target {
                queue.push_back(next);
                visited.insert(index);
            } else if edge_marker == Some(neighbour) {
                is_edge = true;
            }
        }
        builder.add_tile(tile, is_edge);
    }

    builder.finish()
}

/// Partition every `target` cell into 4-connected regions.
///
/// Seeds are discovered column by column (x outer, y inner) so the output order is stable for
/// a given grid.
pub fn extract_regions(grid: &Grid, target: Tile, edge_marker: Option<Tile>) -> Vec<Region> {
    let (width, height) = grid.size();
    let mut visited = FixedBitSet::with_capacity(grid.len());
    let mut regions = Vec::new();

    for x in 0..width {
        for y in 0..height {
            if grid[(x, y)] == target && !visited.contains(grid.flat_index(x, y)) {
                let id = RegionId(regions.len());
                regions.push(region_at(grid, (x, y), &mut visited, edge_marker, id));
            }
        }
    }

    tracing::debug!(?target, count = regions.len(), "extracted regions");
    regions
}

/// Wall regions (no edge tiles) followed by room regions edged against walls.
pub fn extract_all(grid: &Grid) -> (Vec<Region>, Vec<Region>) {
    let walls = extract_regions(grid, Tile::Wall, None);
    let rooms = extract_regions(grid, Tile::Empty, Some(Tile::Wall));
    (walls, rooms)
}

/// Whether every region's first tile lies in the component of the first region's first tile.
///
/// Components are taken from the current grid, so cells opened after extraction count.
pub fn regions_share_component(grid: &Grid, regions: &[Region]) -> bool {
    let Some(first) = regions.first() else {
        return true;
    };
    let start = first.tiles()[0];
    if !grid.in_bounds(start.x, start.y) {
        return false;
    }

    let mut visited = FixedBitSet::with_capacity(grid.len());
    let component = region_at(grid, (start.x as usize, start.y as usize), &mut visited, None, first.id());
    tracing::trace!(size = component.len(), "flood filled first region");

    regions.iter().all(|region| {
        let tile = region.tiles()[0];
        grid.in_bounds(tile.x, tile.y) && visited.contains(grid.flat_index(tile.x as usize, tile.y as usize))
    })
}
