use std::str::FromStr;

use log::debug;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use super::centroid::Centroid;
use super::dbscan::neighbor_merge;
use super::grid::grid_cluster;
use super::point::Viewport;
use crate::error::{Error, Result};
use crate::provider::DataProvider;

/// Clustering algorithms selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum Algorithm {
    /// Single-pass neighbor merge
    #[strum(serialize = "dbscan")]
    NeighborMerge,
    /// Fixed grid with collision merge, needs a viewport
    #[strum(serialize = "grid")]
    Grid,
}

impl Algorithm {
    /// Resolves an algorithm by its registered name
    pub fn resolve(name: &str) -> Result<Self> {
        Algorithm::from_str(name).map_err(|_| Error::UnknownAlgorithm(name.to_string()))
    }

    /// Registered names, in declaration order
    pub fn names() -> Vec<&'static str> {
        Algorithm::iter().map(|a| a.name()).collect()
    }

    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    pub fn requires_viewport(&self) -> bool {
        matches!(self, Algorithm::Grid)
    }

    /// Fetches the candidate points and clusters them
    ///
    /// # Arguments
    ///
    /// * `provider` - Point source, asked for the points inside `viewport`
    /// * `icon_size` - Clustering radius in pixels
    /// * `zoom` - Zoom level of the pixel space
    /// * `viewport` - Visible bounding box; required by [`Algorithm::Grid`]
    pub fn cluster(
        &self,
        provider: &dyn DataProvider,
        icon_size: f64,
        zoom: f64,
        viewport: Option<&Viewport>,
    ) -> Result<Vec<Centroid>> {
        // Reject before touching the data source
        if self.requires_viewport() && viewport.is_none() {
            return Err(Error::MissingViewport(self.name()));
        }

        let points = provider.points(viewport)?;
        debug!("{self}: {} candidate points", points.len());

        match (self, viewport) {
            (Algorithm::NeighborMerge, _) => neighbor_merge(points, icon_size, zoom),
            (Algorithm::Grid, Some(viewport)) => grid_cluster(points, icon_size, zoom, viewport),
            (Algorithm::Grid, None) => Err(Error::MissingViewport(self.name())),
        }
    }
}
