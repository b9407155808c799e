//! # `CaveGeneration`
//!
//! `CaveGeneration` is a library for procedurally generating connected 2D cave maps.
//!
//! A cave is built in stages: a random fill, weighted-kernel smoothing, flood-fill region
//! extraction, pruning of small regions, and finally corridors carved between the remaining
//! rooms.

// #![deny(warnings)]
#![deny(missing_docs)]
// #![deny(unused)]
// #![deny(dead_code)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]

/// Generation passes: fill, smoothing, region analysis and corridors.
pub mod algorithm;
/// Parallel generation of many caves.
pub mod batch;
mod cave;
mod config;
mod coord;
mod grid;
mod kernel;
mod region;
mod tile;

pub use batch::generate_batch;
pub use cave::{Cave, Stage};
pub use config::{CaveConfig, MAX_CORRIDOR_RADIUS, MAX_DIMENSION, MAX_SMOOTH_STEPS};
pub use coord::Coord;
pub use grid::Grid;
pub use kernel::{Kernel, normalise_size};
pub use region::{Centroid, Region, RegionBuilder, RegionId, link_pair};
pub use tile::Tile;
