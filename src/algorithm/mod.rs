mod connect;
mod fill;
mod progress;
mod prune;
mod raster;
mod regions;
mod smooth;

pub use connect::{
    ConnectionSettings, ConnectionSummary, ConnectionType, closest_edges, connect_regions,
    order_directional, order_nearest,
};
pub use fill::fill;
pub use progress::BatchProgress;
pub use prune::prune_regions;
pub use raster::{create_passage, draw_circle, line};
pub use regions::{extract_all, extract_regions, regions_share_component};
pub use smooth::{convolve, smooth, smooth_passes};
