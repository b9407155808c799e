use cave_generation::{
    Cave, CaveConfig, Coord, Grid, Kernel, RegionBuilder, RegionId, Stage, Tile,
    algorithm::{
        ConnectionSettings, ConnectionType, connect_regions, extract_all, extract_regions, fill,
        line, prune_regions, smooth_passes,
    },
};
use rand::{SeedableRng, rngs::StdRng};
use std::collections::HashSet;

fn room_at(id: usize, coord: Coord) -> cave_generation::Region {
    let mut builder = RegionBuilder::new(RegionId(id), Tile::Empty);
    builder.add_tile(coord, true);
    builder.finish()
}

#[test]
fn open_ten_by_ten_has_ring_and_room() {
    let mut rng = StdRng::seed_from_u64(0);
    let grid = fill(10, 10, 0.0, &mut rng);
    for x in 0..10 {
        for y in 0..10 {
            let expected = if grid.is_border(x, y) { Tile::Wall } else { Tile::Empty };
            assert_eq!(grid.get(x, y), expected);
        }
    }

    let grid = smooth_passes(&grid, &Kernel::moore(), 4, 0);
    let (walls, rooms) = extract_all(&grid);
    assert_eq!(walls.len(), 1);
    assert_eq!(walls[0].len(), 36);
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].len(), 64);
}

#[test]
fn single_hole_is_smoothed_away() {
    let mut grid = Grid::new(5, 5, Tile::Wall);
    grid.set(2, 2, Tile::Empty);
    let smoothed = smooth_passes(&grid, &Kernel::filled(3, 1), 4, 1);
    assert_eq!(smoothed.count(Tile::Wall), 25);
}

#[test]
fn corridor_joins_distant_corners() {
    let mut grid = Grid::new(10, 10, Tile::Wall);
    grid.set(1, 1, Tile::Empty);
    grid.set(8, 8, Tile::Empty);
    let mut rooms = extract_regions(&grid, Tile::Empty, Some(Tile::Wall));
    assert_eq!(rooms.len(), 2);

    let settings = ConnectionSettings {
        connection_type: ConnectionType::Nearest,
        probability: 1.0,
        max_distance: 20.0,
        radius: 1,
    };
    let summary = connect_regions(&mut grid, &mut rooms, &settings, &mut StdRng::seed_from_u64(0));
    assert_eq!(summary.carved, 1);

    let points = line(Coord::new(1, 1), Coord::new(8, 8));
    for x in 0..10 {
        for y in 0..10 {
            let cell = Coord::from((x, y));
            let carved = points.iter().any(|p| p.sqr_distance(cell) <= 1);
            let expected = if carved { Tile::Empty } else { Tile::Wall };
            assert_eq!(grid.get(x, y), expected, "cell {cell}");
        }
    }

    let rooms = extract_regions(&grid, Tile::Empty, Some(Tile::Wall));
    assert_eq!(rooms.len(), 1);
}

#[test]
fn rooms_beyond_cap_are_never_linked() {
    // Sorted by height these are 17, 130 and 100 apart (squared).
    let coords = [Coord::new(2, 2), Coord::new(6, 3), Coord::new(13, 12), Coord::new(3, 12)];
    let cases: [(f32, [bool; 4]); 4] = [
        (3.0, [false, false, false, false]),
        (4.2, [true, true, false, false]),
        (10.5, [true, true, true, true]),
        (11.5, [true, true, true, true]),
    ];

    for (max_distance, expected) in cases {
        let mut grid = Grid::new(16, 16, Tile::Wall);
        for &c in &coords {
            grid.set_coord(c, Tile::Empty);
        }
        let mut rooms: Vec<_> = coords.iter().enumerate().map(|(i, &c)| room_at(i, c)).collect();

        let settings = ConnectionSettings {
            connection_type: ConnectionType::Directional,
            probability: 1.0,
            max_distance,
            radius: 1,
        };
        let summary = connect_regions(&mut grid, &mut rooms, &settings, &mut StdRng::seed_from_u64(11));

        let ids: Vec<usize> = rooms.iter().map(|r| r.id().0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        let connected: Vec<bool> = rooms.iter().map(|r| r.connected).collect();
        assert_eq!(connected, expected, "max distance {max_distance}");
        assert_eq!(summary.carved + summary.skipped_by_distance, 3);
    }
}

#[test]
fn pruned_regions_meet_threshold() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut grid = fill(40, 30, 0.48, &mut rng);
    grid = smooth_passes(&grid, &Kernel::moore(), 4, 2);
    let (mut walls, mut rooms) = extract_all(&grid);
    let before_rooms = rooms.clone();

    prune_regions(&mut grid, &mut walls, 6, Tile::Empty);
    prune_regions(&mut grid, &mut rooms, 12, Tile::Wall);

    assert!(walls.iter().all(|r| r.len() >= 6));
    assert!(rooms.iter().all(|r| r.len() >= 12));
    let kept: HashSet<RegionId> = rooms.iter().map(|r| r.id()).collect();
    for removed in before_rooms.iter().filter(|r| !kept.contains(&r.id())) {
        assert!(removed.len() < 12);
        for &coord in removed.tiles() {
            assert_eq!(grid.get_coord(coord), Some(Tile::Wall));
        }
    }
}

#[test]
fn full_pipeline_produces_connected_cave() {
    let config = CaveConfig {
        width: 64,
        height: 48,
        fill_percent: 0.45,
        smooth_steps: 4,
        wall_region_threshold: 20,
        room_region_threshold: 20,
        max_room_distance: 1000.0,
        corridor_radius: 1,
        ..CaveConfig::default()
    };
    for seed in 0..4 {
        let cave = Cave::generate_seeded(config.clone(), seed).unwrap();
        assert_eq!(cave.stage(), Stage::Connected);
        assert!(cave.is_fully_connected());

        // Every surviving room now sits in one open component.
        let grid = cave.grid().unwrap();
        let components = extract_regions(grid, Tile::Empty, None);
        let component_of = |coord: Coord| components.iter().position(|c| c.tiles().contains(&coord));
        let owners: HashSet<_> = cave
            .room_regions()
            .iter()
            .map(|room| component_of(room.tiles()[0]))
            .collect();
        assert!(owners.len() <= 1, "seed {seed} left {} separate room groups", owners.len());
        assert!(!owners.contains(&None));
    }
}

#[test]
fn directional_pipeline_sorts_rooms_by_height() {
    let config = CaveConfig {
        width: 60,
        height: 60,
        connection_type: ConnectionType::Directional,
        connection_probability: 0.0,
        wall_region_threshold: 10,
        room_region_threshold: 10,
        ..CaveConfig::default()
    };
    let cave = Cave::generate_seeded(config, 77).unwrap();
    let heights: Vec<f32> = cave.room_regions().iter().map(|r| r.centroid().y).collect();
    assert!(heights.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(cave.last_connection().unwrap().carved, 0);
}

#[test]
fn distance_skips_leave_cave_split() {
    let config = CaveConfig {
        width: 60,
        height: 40,
        max_room_distance: 0.0,
        ..CaveConfig::default()
    };
    let cave = Cave::generate_seeded(config, 3).unwrap();
    let summary = cave.last_connection().unwrap();
    assert_eq!(summary.carved, 0);
    assert_eq!(summary.skipped_by_distance, summary.pairs);
    assert!(cave.room_regions().len() > 1);
    assert!(!cave.is_fully_connected());
}
