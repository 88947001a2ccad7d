//! Point sources the clustering endpoint reads from

use std::path::Path;

use log::{info, warn};

use crate::cluster::{GeoPoint, PointList, Viewport};
use crate::error::Result;

mod file;


pub use file::{read_points_csv, read_points_geojson};

/// Supplies the candidate points for a clustering request
///
/// Implementations hand out a fresh list per call so that clustering runs
/// never share point objects.
pub trait DataProvider: Send + Sync {
    /// Returns every point when `viewport` is `None`, otherwise the points
    /// strictly inside it.
    fn points(&self, viewport: Option<&Viewport>) -> Result<PointList>;
}

/// Immutable in-memory point set, usually loaded once from a static file
#[derive(Debug, Clone, Default)]
pub struct StaticPointStore {
    points: PointList,
}

impl StaticPointStore {
    /// Builds a store, dropping points whose coordinates are off the map
    pub fn from_points(mut points: PointList) -> Self {
        let total = points.len();
        points.retain(GeoPoint::has_valid_coordinates);
        if points.len() < total {
            warn!("Dropped {} points with invalid coordinates", total - points.len());
        }
        StaticPointStore { points }
    }

    /// Loads a point file; a `.csv` extension selects the CSV reader,
    /// anything else is read as a GeoJSON FeatureCollection.
    pub fn load(path: &Path) -> Result<Self> {
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        let points = if is_csv {
            read_points_csv(path)?
        } else {
            read_points_geojson(path)?
        };

        info!("Loaded {} points from {:?}", points.len(), path);
        Ok(StaticPointStore { points })
    }

    #[allow(dead_code)] // Pairs with `is_empty`
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl DataProvider for StaticPointStore {
    fn points(&self, viewport: Option<&Viewport>) -> Result<PointList> {
        let points = match viewport {
            None => self.points.clone(),
            Some(v) => self
                .points
                .iter()
                .filter(|p| v.contains(*p))
                .cloned()
                .collect::<Vec<GeoPoint>>(),
        };
        Ok(points)
    }
}
