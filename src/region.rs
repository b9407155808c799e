use std::fmt::{Display, Formatter};

use crate::{Coord, Tile};

/// Opaque identifier assigned to a region in discovery order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub usize);

impl Display for RegionId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mean position of a region's tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Centroid {
    /// Mean column.
    pub x: f32,
    /// Mean row.
    pub y: f32,
}

impl Centroid {
    /// Squared Euclidean distance to `other`.
    pub fn sqr_distance(self, other: Centroid) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }
}

/// Maximal 4-connected set of same-type tiles.
#[derive(Clone, Debug)]
pub struct Region {
    id: RegionId,
    tile: Tile,
    tiles: Vec<Coord>,
    edge_tiles: Vec<Coord>,
    centroid: Centroid,
    /// Set once a corridor links this region to another.
    pub connected: bool,
    /// Set when the region is reachable from a chain root.
    pub connected_to_main: bool,
}

impl Region {
    /// Identifier assigned at extraction.
    pub fn id(&self) -> RegionId {
        self.id
    }

    /// Tile type shared by every member.
    pub fn tile(&self) -> Tile {
        self.tile
    }

    /// Members in flood-fill discovery order.
    pub fn tiles(&self) -> &[Coord] {
        &self.tiles
    }

    /// Members adjacent to the edge-marker tile type.
    pub fn edge_tiles(&self) -> &[Coord] {
        &self.edge_tiles
    }

    /// Mean position of the members.
    pub fn centroid(&self) -> Centroid {
        self.centroid
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false for a finished region.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Record an undirected link, sharing the reachable-from-root flag across both ends.
    pub fn link(&mut self, other: &mut Region) {
        self.connected = true;
        other.connected = true;
        let main = self.connected_to_main || other.connected_to_main;
        self.connected_to_main = main;
        other.connected_to_main = main;
    }
}

/// Link two regions of a list by index.
pub fn link_pair(regions: &mut [Region], a: usize, b: usize) {
    debug_assert_ne!(a, b, "A region cannot be linked to itself");
    let (low, high) = (a.min(b), a.max(b));
    let (head, tail) = regions.split_at_mut(high);
    head[low].link(&mut tail[0]);
}

/// Accumulates a region during a flood fill.
pub struct RegionBuilder {
    id: RegionId,
    tile: Tile,
    tiles: Vec<Coord>,
    edge_tiles: Vec<Coord>,
    sum: (i64, i64),
}

impl RegionBuilder {
    /// Start an empty region of `tile` cells.
    pub fn new(id: RegionId, tile: Tile) -> Self {
        Self {
            id,
            tile,
            tiles: Vec::new(),
            edge_tiles: Vec::new(),
            sum: (0, 0),
        }
    }

    /// Append a member, also recording it as an edge tile when `is_edge` is set.
    pub fn add_tile(&mut self, coord: Coord, is_edge: bool) {
        self.tiles.push(coord);
        if is_edge {
            self.edge_tiles.push(coord);
        }
        self.sum.0 += i64::from(coord.x);
        self.sum.1 += i64::from(coord.y);
    }

    /// Freeze the region and compute its centroid.
    pub fn finish(self) -> Region {
        assert!(
            !self.tiles.is_empty(),
            "Region {} finished without any tiles",
            self.id
        );
        let n = self.tiles.len() as f64;
        let centroid = Centroid {
            x: (self.sum.0 as f64 / n) as f32,
            y: (self.sum.1 as f64 / n) as f32,
        };
        Region {
            id: self.id,
            tile: self.tile,
            tiles: self.tiles,
            edge_tiles: self.edge_tiles,
            centroid,
            connected: false,
            connected_to_main: false,
        }
    }
}
