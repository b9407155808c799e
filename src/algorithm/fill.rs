use rand::Rng;

use crate::{Grid, Tile};

/// Random fill with a solid one-tile border.
///
/// Interior cells become walls with probability `fill_percent`.
pub fn fill(width: usize, height: usize, fill_percent: f32, rng: &mut impl Rng) -> Grid {
    let mut grid = Grid::new(width, height, Tile::Empty);
    for x in 0..width {
        for y in 0..height {
            let tile = if grid.is_border(x, y) || rng.random::<f32>() < fill_percent {
                Tile::Wall
            } else {
                Tile::Empty
            };
            grid.set(x, y, tile);
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn border_is_always_wall() {
        let mut rng = StdRng::seed_from_u64(7);
        for (w, h) in [(1, 1), (2, 5), (17, 9), (40, 40)] {
            let grid = fill(w, h, 0.3, &mut rng);
            for x in 0..w {
                for y in 0..h {
                    if grid.is_border(x, y) {
                        assert_eq!(grid.get(x, y), Tile::Wall, "border ({x}, {y}) of {w}x{h}");
                    }
                }
            }
        }
    }

    #[test]
    fn extremes_fill_deterministically() {
        let mut rng = StdRng::seed_from_u64(1);
        let open = fill(12, 8, 0.0, &mut rng);
        assert_eq!(open.count(Tile::Empty), 10 * 6);
        let solid = fill(12, 8, 1.0, &mut rng);
        assert_eq!(solid.count(Tile::Empty), 0);
    }

    #[test]
    fn same_seed_same_grid() {
        let a = fill(30, 20, 0.45, &mut StdRng::seed_from_u64(99));
        let b = fill(30, 20, 0.45, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
