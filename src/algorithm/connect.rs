use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Coord, Grid, Region, Tile, algorithm::create_passage, link_pair};

/// Strategy used to order rooms before carving corridors between neighbours in the order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionType {
    /// Greedy chain through the closest unvisited centroid.
    #[default]
    #[serde(alias = "closest")]
    Nearest,
    /// Bottom-to-top sweep by centroid height.
    #[serde(alias = "zig_zag", alias = "zigzag")]
    Directional,
}

/// Parameters for [`connect_regions`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectionSettings {
    /// How rooms are ordered before carving.
    pub connection_type: ConnectionType,
    /// Chance that a consecutive pair is considered at all.
    pub probability: f32,
    /// Corridors longer than this are not carved.
    pub max_distance: f32,
    /// Radius of the disk stamped along each corridor.
    pub radius: i32,
}

/// What happened to each consecutive pair during one connection run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConnectionSummary {
    /// Consecutive pairs considered.
    pub pairs: usize,
    /// Pairs whose probability draw failed.
    pub skipped_by_chance: usize,
    /// Pairs where either region had no edge tiles.
    pub skipped_without_edges: usize,
    /// Pairs whose closest edges were too far apart.
    pub skipped_by_distance: usize,
    /// Corridors carved.
    pub carved: usize,
}

/// Chain regions by repeatedly jumping to the nearest remaining centroid.
///
/// Each chain starts from the first remaining region, which is marked as connected to main.
/// Consecutive regions in a chain are linked as they are visited.
pub fn order_nearest(mut remaining: Vec<Region>) -> Vec<Region> {
    let mut order = Vec::with_capacity(remaining.len());

    while !remaining.is_empty() {
        let mut current = remaining.remove(0);
        current.connected_to_main = true;

        loop {
            let mut nearest = None;
            let mut min_sqr_distance = f32::INFINITY;
            for (i, room) in remaining.iter().enumerate() {
                let distance = current.centroid().sqr_distance(room.centroid());
                if distance < min_sqr_distance {
                    min_sqr_distance = distance;
                    nearest = Some(i);
                }
            }

            let Some(i) = nearest else {
                order.push(current);
                break;
            };
            let mut next = remaining.remove(i);
            current.link(&mut next);
            order.push(current);
            current = next;
        }
    }

    order
}

/// Stable sort by ascending centroid y.
pub fn order_directional(regions: &mut [Region]) {
    regions.sort_by(|a, b| a.centroid().y.total_cmp(&b.centroid().y));
}

// Angle of the vector from `b` to `a`, folded into the upper half plane
fn approach_angle(a: Coord, b: Coord) -> f32 {
    ((a.y - b.y).abs() as f32).atan2((a.x - b.x) as f32)
}

/// Closest pair of edge tiles between two regions, or `None` if either has no edges.
///
/// The search starts from the first edge tile of each region and only accepts strict
/// distance improvements. In directional mode an improvement must also lower the approach
/// angle. The starting angle is signed, so when `a` lies below `b` the first pair is rarely
/// displaced.
pub fn closest_edges(a: &Region, b: &Region, connection_type: ConnectionType) -> Option<(Coord, Coord)> {
    let (&first_a, &first_b) = (a.edge_tiles().first()?, b.edge_tiles().first()?);
    let mut best = (first_a, first_b);
    let mut min_sqr_distance = first_a.sqr_distance(first_b);
    let mut min_angle = ((first_a.y - first_b.y) as f32).atan2((first_a.x - first_b.x) as f32);

    for &coord_a in a.edge_tiles() {
        for &coord_b in b.edge_tiles() {
            let sqr_distance = coord_a.sqr_distance(coord_b);
            if sqr_distance >= min_sqr_distance {
                continue;
            }
            if connection_type == ConnectionType::Directional {
                let angle = approach_angle(coord_a, coord_b);
                if angle >= min_angle {
                    continue;
                }
                min_angle = angle;
            }
            min_sqr_distance = sqr_distance;
            best = (coord_a, coord_b);
        }
    }

    Some(best)
}

/// Order `regions` and carve a corridor between each consecutive pair.
///
/// The ordered list replaces `regions`. Pairs are skipped by chance, when either side has
/// no edge tiles, or when the closest edges are at least `max_distance` apart.
pub fn connect_regions(
    grid: &mut Grid,
    regions: &mut Vec<Region>,
    settings: &ConnectionSettings,
    rng: &mut impl Rng,
) -> ConnectionSummary {
    match settings.connection_type {
        ConnectionType::Nearest => *regions = order_nearest(std::mem::take(regions)),
        ConnectionType::Directional => order_directional(regions),
    }

    let max_sqr_distance = f64::from(settings.max_distance) * f64::from(settings.max_distance);
    let probability = f64::from(settings.probability.clamp(0.0, 1.0));
    let mut summary = ConnectionSummary::default();

    for i in 1..regions.len() {
        summary.pairs += 1;
        if !rng.random_bool(probability) {
            summary.skipped_by_chance += 1;
            continue;
        }

        let (a, b) = (&regions[i - 1], &regions[i]);
        let Some((edge_a, edge_b)) = closest_edges(a, b, settings.connection_type) else {
            tracing::trace!(a = %a.id(), b = %b.id(), "no edge tiles, skipping");
            summary.skipped_without_edges += 1;
            continue;
        };

        let sqr_distance = edge_a.sqr_distance(edge_b);
        if sqr_distance as f64 >= max_sqr_distance {
            tracing::trace!(a = %a.id(), b = %b.id(), sqr_distance, "rooms too far apart");
            summary.skipped_by_distance += 1;
            continue;
        }

        link_pair(regions, i - 1, i);
        create_passage(grid, edge_a, edge_b, settings.radius, Tile::Empty);
        summary.carved += 1;
    }

    tracing::debug!(?summary, "connected rooms");
    summary
}
