//! Web-Mercator tile-pixel projection
//!
//! Every distance used by the clustering algorithms is measured in this pixel
//! space, so a fixed radius in pixels corresponds to a fixed on-screen marker
//! size regardless of zoom.

use std::f64::consts::PI;

use super::point::{GeoPoint, LngLat};
use crate::error::{Error, Result};

/// Edge length of a single map tile in pixels
pub const TILE_SIZE: f64 = 256.0;

/// Position in the world pixel space of a given zoom level
///
/// The position is stored as [x, y] where:
/// - `[0]` grows eastwards from the antimeridian
/// - `[1]` grows southwards from the top edge of the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel(pub [f64; 2]);

impl Pixel {
    /// Euclidean distance between two pixel positions
    pub fn distance(&self, other: &Pixel) -> f64 {
        let dx = self.0[0] - other.0[0];
        let dy = self.0[1] - other.0[1];
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.0[0].is_finite() && self.0[1].is_finite()
    }
}

/// Width (and height) of the whole world in pixels at `zoom`
pub fn map_size(zoom: f64) -> f64 {
    TILE_SIZE * 2f64.powf(zoom)
}

/// Projects a longitude/latitude pair (degrees) to pixel space
pub fn lng_lat_to_pixel(lng: f64, lat: f64, zoom: f64) -> Pixel {
    let size = map_size(zoom);
    let lambda = lng.to_radians();
    let phi = lat.to_radians();

    let x = size * (PI + lambda) / (2.0 * PI);
    let y = size * (PI - (PI / 4.0 + phi / 2.0).tan().ln()) / (2.0 * PI);
    Pixel([x, y])
}

/// Projects a point to pixel space
///
/// NaN and infinities propagate (latitudes beyond ±90 have no real y); use
/// [`project`] where a finite position is required.
pub fn to_pixel(point: &impl LngLat, zoom: f64) -> Pixel {
    lng_lat_to_pixel(point.lng(), point.lat(), zoom)
}

/// Inverse of [`lng_lat_to_pixel`]
///
/// # Returns
///
/// `(lng, lat)` in degrees
#[allow(dead_code)] // Part of public API, exercised by the projection tests
pub fn to_geo(x: f64, y: f64, zoom: f64) -> (f64, f64) {
    let size = map_size(zoom);
    let lambda = x * (2.0 * PI) / size - PI;
    let t = PI - y * (2.0 * PI) / size;
    let phi = (t.exp().atan() - PI / 4.0) * 2.0;

    (lambda.to_degrees(), phi.to_degrees())
}

/// Pixel distance between two points at `zoom`
pub fn pixel_distance(p: &impl LngLat, q: &impl LngLat, zoom: f64) -> f64 {
    to_pixel(p, zoom).distance(&to_pixel(q, zoom))
}

/// Rejects zoom levels which cannot produce finite pixel coordinates
pub fn validate_zoom(zoom: f64) -> Result<()> {
    if !zoom.is_finite() || zoom < 0.0 {
        return Err(Error::invalid(
            "zoom",
            format!("{zoom} is not a finite, non-negative zoom level"),
        ));
    }
    if !map_size(zoom).is_finite() {
        return Err(Error::invalid("zoom", format!("{zoom} overflows pixel space")));
    }
    Ok(())
}

/// Projects a longitude/latitude pair, failing on a non-finite result
pub fn project(lng: f64, lat: f64, zoom: f64) -> Result<Pixel> {
    let px = lng_lat_to_pixel(lng, lat, zoom);
    if !px.is_finite() {
        return Err(Error::NonFiniteProjection { lng, lat, zoom });
    }
    Ok(px)
}

/// Projects all points in order, failing on the first non-finite position
pub fn project_all(points: &[GeoPoint], zoom: f64) -> Result<Vec<Pixel>> {
    points
        .iter()
        .map(|p| project(p.lng(), p.lat(), zoom))
        .collect()
}
