use anyhow::{Context, Result, bail};
use ndarray::Array2;
use std::{
    fmt::{Display, Formatter},
    ops::{Index, IndexMut},
    str::FromStr,
};

use crate::{Coord, Tile};

/// Rectangular binary tile map, indexed `(x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    tiles: Array2<Tile>,
}

impl Grid {
    /// Creates a `width` by `height` grid filled with `fill`
    pub fn new(width: usize, height: usize, fill: Tile) -> Self {
        debug_assert!(width > 0, "Grid width must be greater than zero");
        debug_assert!(height > 0, "Grid height must be greater than zero");
        Self {
            tiles: Array2::from_elem((width, height), fill),
        }
    }

    /// Wrap an existing `(x, y)` tile array
    pub fn from_tiles(tiles: Array2<Tile>) -> Self {
        debug_assert!(!tiles.is_empty(), "Grid must contain at least one tile");
        Self { tiles }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.tiles.dim().0
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.tiles.dim().1
    }

    /// `(width, height)`
    pub fn size(&self) -> (usize, usize) {
        self.tiles.dim()
    }

    /// Underlying tile array
    pub fn tiles(&self) -> &Array2<Tile> {
        &self.tiles
    }

    /// Whether `(x, y)` lies on the grid
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }

    /// Whether `(x, y)` lies on the outermost ring
    pub fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x == self.width() - 1 || y == self.height() - 1
    }

    /// Tile at `(x, y)`
    pub fn get(&self, x: usize, y: usize) -> Tile {
        debug_assert!(x < self.width(), "Index out of bounds for grid width");
        debug_assert!(y < self.height(), "Index out of bounds for grid height");
        self.tiles[(x, y)]
    }

    /// Set the tile at `(x, y)`
    pub fn set(&mut self, x: usize, y: usize, tile: Tile) {
        debug_assert!(x < self.width(), "Index out of bounds for grid width");
        debug_assert!(y < self.height(), "Index out of bounds for grid height");
        self.tiles[(x, y)] = tile;
    }

    /// Tile at `coord`, or `None` if it lies outside the grid.
    pub fn get_coord(&self, coord: Coord) -> Option<Tile> {
        self.in_bounds(coord.x, coord.y)
            .then(|| self.tiles[(coord.x as usize, coord.y as usize)])
    }

    /// Set the tile at `coord`, ignoring positions outside the grid.
    pub fn set_coord(&mut self, coord: Coord, tile: Tile) {
        if self.in_bounds(coord.x, coord.y) {
            self.tiles[(coord.x as usize, coord.y as usize)] = tile;
        }
    }

    /// Overwrite every listed position with `tile`.
    pub fn fill_tiles(&mut self, coords: &[Coord], tile: Tile) {
        for &coord in coords {
            self.set_coord(coord, tile);
        }
    }

    /// Number of cells holding `tile`
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// Flat index used by per-cell flag buffers.
    pub fn flat_index(&self, x: usize, y: usize) -> usize {
        x * self.height() + y
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = Tile;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.tiles[index]
    }
}

impl IndexMut<(usize, usize)> for Grid {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.tiles[index]
    }
}

impl FromStr for Grid {
    type Err = anyhow::Error;

    /// Parse rows of tile characters. The first row is the top of the map (`y = height - 1`).
    fn from_str(map_str: &str) -> Result<Self> {
        let rows: Vec<Vec<Tile>> = map_str
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with("#!")) // Skip blank or commented lines
            .enumerate()
            .map(|(n, line)| {
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(Tile::try_from)
                    .collect::<Result<Vec<_>>>()
                    .with_context(|| format!("Failed to parse grid row {n}"))
            })
            .collect::<Result<_>>()?;

        let height = rows.len();
        if height == 0 {
            bail!("Grid must contain at least one row");
        }
        let width = rows[0].len();
        if width == 0 {
            bail!("Grid must contain at least one column");
        }
        if let Some(n) = rows.iter().position(|row| row.len() != width) {
            bail!("All rows must have the same length (row {n} differs)");
        }

        let tiles = Array2::from_shape_fn((width, height), |(x, y)| rows[height - 1 - y][x]);
        Ok(Self::from_tiles(tiles))
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        for y in (0..self.height()).rev() {
            for x in 0..self.width() {
                write!(f, "{}", self.tiles[(x, y)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
