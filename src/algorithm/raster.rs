use crate::{Coord, Grid, Tile};

/// Integer line from `from` to `to`, both endpoints included.
///
/// Steps one cell at a time along the axis with the larger delta, advancing the other axis
/// whenever the accumulated error reaches that delta.
pub fn line(from: Coord, to: Coord) -> Vec<Coord> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    let mut inverted = false;
    let mut step = dx.signum();
    let mut gradient_step = dy.signum();
    let mut longest = dx.abs();
    let mut shortest = dy.abs();

    if longest < shortest {
        inverted = true;
        longest = dy.abs();
        shortest = dx.abs();
        step = dy.signum();
        gradient_step = dx.signum();
    }

    let mut points = Vec::with_capacity(longest as usize + 1);
    let (mut x, mut y) = (from.x, from.y);
    let mut accumulation = longest / 2;
    for _ in 0..longest {
        points.push(Coord::new(x, y));

        if inverted {
            y += step;
        } else {
            x += step;
        }

        accumulation += shortest;
        if accumulation >= longest {
            if inverted {
                x += gradient_step;
            } else {
                y += gradient_step;
            }
            accumulation -= longest;
        }
    }
    points.push(Coord::new(x, y));

    debug_assert_eq!(points.last(), Some(&to));
    points
}

/// Stamp a filled disk of `radius` around `centre`, clipped to the grid.
///
/// Only the part of the bounding square that lies on the grid is visited.
pub fn draw_circle(grid: &mut Grid, centre: Coord, radius: i32, tile: Tile) {
    let radius = i64::from(radius);
    let (cx, cy) = (i64::from(centre.x), i64::from(centre.y));
    let xs = (cx - radius).max(0)..=(cx + radius).min(grid.width() as i64 - 1);
    let ys = (cy - radius).max(0)..=(cy + radius).min(grid.height() as i64 - 1);

    for x in xs {
        for y in ys.clone() {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= radius * radius {
                grid.set(x as usize, y as usize, tile);
            }
        }
    }
}

/// Carve a corridor of `radius` between two cells.
pub fn create_passage(grid: &mut Grid, from: Coord, to: Coord, radius: i32, tile: Tile) {
    for point in line(from, to) {
        draw_circle(grid, point, radius, tile);
    }
}
