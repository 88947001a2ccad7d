//! Geographic points and the viewport they are filtered by

use serde_json::{Map, Value};

/// Anything with a longitude/latitude position (degrees)
pub trait LngLat {
    fn lng(&self) -> f64;
    fn lat(&self) -> f64;
}

/// GeoPoint represents a geographic coordinate with a property bag
///
/// The coordinate is stored as [longitude, latitude] where:
/// - `[0]` is longitude
/// - `[1]` is latitude
///
/// The point identifier lives in `properties["id"]`.
#[derive(Debug, Clone)]
pub struct GeoPoint {
    pub coordinates: [f64; 2],
    pub properties: Map<String, Value>,
}

/// PointList is a collection of GeoPoints
pub type PointList = Vec<GeoPoint>;

impl GeoPoint {
    #[allow(dead_code)] // Part of public API, points normally come from a file
    pub fn new(lng: f64, lat: f64, id: impl Into<Value>) -> Self {
        let mut properties = Map::new();
        properties.insert("id".to_string(), id.into());
        GeoPoint {
            coordinates: [lng, lat],
            properties,
        }
    }

    /// Human readable identifier taken from the `id` property
    ///
    /// Strings are returned verbatim, any other JSON value is rendered as JSON.
    /// A point without an id yields an empty string.
    pub fn id(&self) -> String {
        match self.properties.get("id") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Longitude within ±180 and latitude strictly inside ±90
    ///
    /// The poles project to infinity, so a pole can never be clustered.
    pub fn has_valid_coordinates(&self) -> bool {
        let [lng, lat] = self.coordinates;
        lng.is_finite() && lat.is_finite() && lng.abs() <= 180.0 && lat.abs() < 90.0
    }
}

impl LngLat for GeoPoint {
    fn lng(&self) -> f64 {
        self.coordinates[0]
    }

    fn lat(&self) -> f64 {
        self.coordinates[1]
    }
}

/// Two points are equal when their coordinates match exactly,
/// regardless of their properties.
impl PartialEq for GeoPoint {
    fn eq(&self, other: &Self) -> bool {
        self.coordinates == other.coordinates
    }
}

/// Northeast/southwest bounding box of the visible map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub ne_lng: f64,
    pub ne_lat: f64,
    pub sw_lng: f64,
    pub sw_lat: f64,
}

impl Viewport {
    pub fn new(ne_lng: f64, ne_lat: f64, sw_lng: f64, sw_lat: f64) -> Self {
        Viewport {
            ne_lng,
            ne_lat,
            sw_lng,
            sw_lat,
        }
    }

    /// Builds a viewport only when all four corner values are present
    pub fn from_parts(
        ne_lng: Option<f64>,
        ne_lat: Option<f64>,
        sw_lng: Option<f64>,
        sw_lat: Option<f64>,
    ) -> Option<Self> {
        Some(Viewport::new(ne_lng?, ne_lat?, sw_lng?, sw_lat?))
    }

    /// Checks if the point lies strictly inside the box
    pub fn contains(&self, p: &impl LngLat) -> bool {
        self.sw_lat < p.lat()
            && p.lat() < self.ne_lat
            && self.sw_lng < p.lng()
            && p.lng() < self.ne_lng
    }

    pub fn north_east(&self) -> (f64, f64) {
        (self.ne_lng, self.ne_lat)
    }

    pub fn south_west(&self) -> (f64, f64) {
        (self.sw_lng, self.sw_lat)
    }
}
