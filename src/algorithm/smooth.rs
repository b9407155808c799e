use ndarray::Array2;

use crate::{Grid, Kernel, Tile};

/// Weighted wall count around `(x, y)`. Positions off the grid count as walls.
pub fn convolve(grid: &Grid, kernel: &Kernel, x: usize, y: usize) -> i32 {
    let (width, height) = grid.size();
    let b = kernel.bounds() as isize;
    let (x, y) = (x as isize, y as isize);

    let mut sum = 0;
    for i in (x - b)..=(x + b) {
        for j in (y - b)..=(y + b) {
            let weight = kernel.at((b + x - i) as usize, (b + y - j) as usize);
            let inside = i >= 0 && j >= 0 && (i as usize) < width && (j as usize) < height;
            if !inside || grid[(i as usize, j as usize)].is_wall() {
                sum += weight;
            }
        }
    }
    sum
}

/// One smoothing pass. Every cell is classified against the same input snapshot.
pub fn smooth(grid: &Grid, kernel: &Kernel, threshold: i32) -> Grid {
    let tiles = Array2::from_shape_fn(grid.size(), |(x, y)| {
        let conv = convolve(grid, kernel, x, y);
        if conv > threshold {
            Tile::Wall
        } else if conv < threshold {
            Tile::Empty
        } else {
            grid[(x, y)]
        }
    });
    Grid::from_tiles(tiles)
}

/// Apply [`smooth`] `passes` times.
pub fn smooth_passes(grid: &Grid, kernel: &Kernel, threshold: i32, passes: usize) -> Grid {
    let mut current = grid.clone();
    for pass in 0..passes {
        current = smooth(&current, kernel, threshold);
        tracing::trace!(pass, walls = current.count(Tile::Wall), "smoothing pass");
    }
    current
}
