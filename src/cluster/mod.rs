//! Package cluster implements map-marker clustering in Web-Mercator pixel space
pub mod centroid;
pub mod dbscan;
pub mod feature;
pub mod grid;
pub mod kdtree;
pub mod point;
pub mod projection;
pub mod registry;

#[cfg(test)]
mod centroid_test;
#[cfg(test)]
mod dbscan_test;
#[cfg(test)]
mod kdtree_test;
#[cfg(test)]
mod test_support;

pub use feature::FeatureCollection;
pub use point::{GeoPoint, PointList, Viewport};
pub use registry::Algorithm;
// Public API exports - allow unused imports as these are part of the public API
#[allow(unused_imports)]
pub use centroid::Centroid;
#[allow(unused_imports)]
pub use point::LngLat;
#[allow(unused_imports)]
pub use dbscan::{neighbor_merge, region_query};
#[allow(unused_imports)]
pub use grid::{ASSUMED_VIEWPORT_HEIGHT, ASSUMED_VIEWPORT_WIDTH, GridLayout, MAX_GRID_CELLS, build_grid, grid_cluster, grid_dimensions};
#[allow(unused_imports)]
pub use kdtree::{KDTree, new_kd_tree};
#[allow(unused_imports)]
pub use projection::{Pixel, TILE_SIZE, pixel_distance, to_geo, to_pixel};
