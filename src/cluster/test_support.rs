//! Builders shared by the clustering tests

use serde_json::Value;

use super::point::GeoPoint;
use super::projection::to_geo;

/// Point whose projection at `zoom` lands on pixel (x, y)
pub fn point_at_pixel(x: f64, y: f64, zoom: f64, id: impl Into<Value>) -> GeoPoint {
    let (lng, lat) = to_geo(x, y, zoom);
    GeoPoint::new(lng, lat, id)
}

/// Sorted ids of a centroid's members
pub fn member_ids(c: &super::Centroid) -> Vec<String> {
    let mut ids: Vec<String> = c.members().iter().map(GeoPoint::id).collect();
    ids.sort();
    ids
}
