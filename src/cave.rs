use anyhow::Result;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::fmt::{Display, Formatter};

use crate::{
    CaveConfig, Grid, Region, Tile,
    algorithm::{
        ConnectionSummary, connect_regions, extract_all, fill, prune_regions, regions_share_component,
        smooth,
    },
};

/// Pipeline position of a [`Cave`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// No grid yet.
    Unfilled,
    /// Random fill done.
    Filled,
    /// Number of smoothing passes applied so far.
    Smoothed(usize),
    /// Wall and room regions extracted.
    RegionsExtracted,
    /// Small regions removed.
    Pruned,
    /// Corridors carved. Further steps do nothing.
    Connected,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Stage::Unfilled => write!(f, "unfilled"),
            Stage::Filled => write!(f, "filled"),
            Stage::Smoothed(passes) => write!(f, "smoothed ({passes})"),
            Stage::RegionsExtracted => write!(f, "regions extracted"),
            Stage::Pruned => write!(f, "pruned"),
            Stage::Connected => write!(f, "connected"),
        }
    }
}

/// A cave being generated, one pipeline stage at a time.
///
/// Region lists are only meaningful for the grid they were extracted from; refilling the grid
/// clears them.
pub struct Cave {
    config: CaveConfig,
    grid: Option<Grid>,
    wall_regions: Vec<Region>,
    room_regions: Vec<Region>,
    stage: Stage,
    last_connection: Option<ConnectionSummary>,
}

impl Cave {
    /// Validate `config` and start an unfilled cave.
    pub fn new(config: CaveConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            grid: None,
            wall_regions: Vec::new(),
            room_regions: Vec::new(),
            stage: Stage::Unfilled,
            last_connection: None,
        })
    }

    /// Run the full pipeline from a fixed seed.
    pub fn generate_seeded(config: CaveConfig, seed: u64) -> Result<Self> {
        let mut cave = Self::new(config)?;
        cave.generate(&mut StdRng::seed_from_u64(seed));
        Ok(cave)
    }

    /// Parameters this cave was built with.
    pub fn config(&self) -> &CaveConfig {
        &self.config
    }

    /// Current pipeline stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The tile grid, once filled.
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// Wall regions from the last extraction, minus pruned ones.
    pub fn wall_regions(&self) -> &[Region] {
        &self.wall_regions
    }

    /// Room regions, in connection order once connected.
    pub fn room_regions(&self) -> &[Region] {
        &self.room_regions
    }

    /// Outcome of the connection stage, if it has run.
    pub fn last_connection(&self) -> Option<ConnectionSummary> {
        self.last_connection
    }

    /// Consume the cave and keep only its grid.
    pub fn into_grid(self) -> Option<Grid> {
        self.grid
    }

    /// Whether every remaining room lies in one open area of the carved grid.
    pub fn is_fully_connected(&self) -> bool {
        self.stage == Stage::Connected
            && self
                .grid
                .as_ref()
                .is_some_and(|grid| regions_share_component(grid, &self.room_regions))
    }

    /// Fill a fresh grid and discard everything derived from the previous one.
    pub fn regenerate(&mut self, rng: &mut impl Rng) {
        let CaveConfig {
            width,
            height,
            fill_percent,
            ..
        } = self.config;
        self.grid = Some(fill(width, height, fill_percent, rng));
        self.wall_regions.clear();
        self.room_regions.clear();
        self.last_connection = None;
        self.stage = Stage::Filled;
        tracing::debug!(width, height, fill_percent, "filled grid");
    }

    /// Advance by a single stage and return the new stage.
    pub fn step(&mut self, rng: &mut impl Rng) -> Stage {
        if self.stage == Stage::Unfilled {
            self.regenerate(rng);
            return self.stage;
        }
        let Some(grid) = self.grid.as_mut() else {
            return self.stage;
        };

        let passes = match self.stage {
            Stage::Filled => Some(0),
            Stage::Smoothed(n) => Some(n),
            _ => None,
        };

        self.stage = match (self.stage, passes) {
            (_, Some(n)) if n < self.config.smooth_steps => {
                *grid = smooth(grid, &self.config.kernel, self.config.smooth_threshold);
                Stage::Smoothed(n + 1)
            }
            (_, Some(_)) => {
                let (walls, rooms) = extract_all(grid);
                self.wall_regions = walls;
                self.room_regions = rooms;
                Stage::RegionsExtracted
            }
            (Stage::RegionsExtracted, None) => {
                prune_regions(
                    grid,
                    &mut self.wall_regions,
                    self.config.wall_region_threshold,
                    Tile::Empty,
                );
                prune_regions(
                    grid,
                    &mut self.room_regions,
                    self.config.room_region_threshold,
                    Tile::Wall,
                );
                Stage::Pruned
            }
            (Stage::Pruned, None) => {
                let summary = connect_regions(
                    grid,
                    &mut self.room_regions,
                    &self.config.connection_settings(),
                    rng,
                );
                self.last_connection = Some(summary);
                Stage::Connected
            }
            (stage, None) => stage,
        };

        tracing::debug!(stage = %self.stage, "pipeline step");
        self.stage
    }

    /// Regenerate and run every stage through to [`Stage::Connected`].
    pub fn generate(&mut self, rng: &mut impl Rng) -> &Grid {
        self.regenerate(rng);
        while self.stage != Stage::Connected {
            self.step(rng);
        }

        tracing::info!(
            walls = self.wall_regions.len(),
            rooms = self.room_regions.len(),
            corridors = self.last_connection.map_or(0, |s| s.carved),
            "generated cave"
        );
        self.grid
            .as_ref()
            .unwrap_or_else(|| unreachable!("regenerate always fills the grid"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_config() -> CaveConfig {
        CaveConfig {
            width: 10,
            height: 10,
            fill_percent: 0.0,
            smooth_steps: 0,
            wall_region_threshold: 0,
            room_region_threshold: 0,
            ..CaveConfig::default()
        }
    }

    #[test]
    fn steps_through_every_stage() {
        let mut cave = Cave::new(CaveConfig {
            smooth_steps: 2,
            ..open_config()
        })
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let stages: Vec<Stage> = (0..7).map(|_| cave.step(&mut rng)).collect();
        assert_eq!(
            stages,
            vec![
                Stage::Filled,
                Stage::Smoothed(1),
                Stage::Smoothed(2),
                Stage::RegionsExtracted,
                Stage::Pruned,
                Stage::Connected,
                Stage::Connected,
            ]
        );
    }

    #[test]
    fn open_box_regions() {
        let mut cave = Cave::new(open_config()).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        cave.regenerate(&mut rng);
        assert_eq!(cave.step(&mut rng), Stage::RegionsExtracted);
        assert_eq!(cave.wall_regions().len(), 1);
        assert_eq!(cave.wall_regions()[0].len(), 36);
        assert_eq!(cave.room_regions().len(), 1);
        assert_eq!(cave.room_regions()[0].len(), 64);
    }

    #[test]
    fn regenerate_resets_derived_state() {
        let mut cave = Cave::new(open_config()).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        cave.generate(&mut rng);
        assert!(cave.last_connection().is_some());
        assert!(!cave.room_regions().is_empty());

        cave.regenerate(&mut rng);
        assert_eq!(cave.stage(), Stage::Filled);
        assert!(cave.wall_regions().is_empty());
        assert!(cave.room_regions().is_empty());
        assert!(cave.last_connection().is_none());
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let config = CaveConfig {
            width: 48,
            height: 32,
            wall_region_threshold: 10,
            room_region_threshold: 10,
            ..CaveConfig::default()
        };
        let a = Cave::generate_seeded(config.clone(), 1234).unwrap();
        let b = Cave::generate_seeded(config, 1234).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.last_connection(), b.last_connection());
    }

    #[test]
    fn connectivity_needs_connected_stage() {
        let mut cave = Cave::new(open_config()).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        cave.regenerate(&mut rng);
        assert!(!cave.is_fully_connected());
        cave.generate(&mut rng);
        assert!(cave.is_fully_connected());
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(
            Cave::new(CaveConfig {
                width: 0,
                ..CaveConfig::default()
            })
            .is_err()
        );
    }
}
