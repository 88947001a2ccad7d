use std::fmt::Write;

use serde::ser::{Serialize, Serializer};

use super::feature::Feature;
use super::point::{GeoPoint, LngLat};

/// Centroid is an aggregate marker standing in for one or more points
///
/// The reported position is an explicitly settable center, initially the
/// coordinates of the first member. Members keep their arrival order.
#[derive(Debug, Clone)]
pub struct Centroid {
    label: String,
    center: [f64; 2],
    members: Vec<GeoPoint>,
    point_list: String,
}

impl Centroid {
    /// Creates a centroid seeded with its first member
    pub fn new(label: impl Into<String>, first: GeoPoint) -> Self {
        let mut centroid = Centroid {
            label: label.into(),
            center: first.coordinates,
            members: Vec::new(),
            point_list: String::new(),
        };
        centroid.add_point(first);
        centroid
    }

    /// Appends a member. Adding the same point twice keeps both copies.
    pub fn add_point(&mut self, p: GeoPoint) {
        // Writing into a String cannot fail
        let _ = write!(self.point_list, "P-{}, ", p.id());
        self.members.push(p);
    }

    pub fn add_points(&mut self, points: impl IntoIterator<Item = GeoPoint>) {
        for p in points {
            self.add_point(p);
        }
    }

    /// Moves every member out, leaving the centroid empty
    ///
    /// Empty centroids are never returned from a clustering run.
    pub(crate) fn drain_members(&mut self) -> Vec<GeoPoint> {
        self.point_list.clear();
        std::mem::take(&mut self.members)
    }

    #[allow(dead_code)] // Part of public API, the center defaults to the first member
    pub fn set_center(&mut self, lng: f64, lat: f64) {
        self.center = [lng, lat];
    }

    pub fn center(&self) -> [f64; 2] {
        self.center
    }

    #[allow(dead_code)]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Marker id, `C-<label>`
    pub fn id(&self) -> String {
        format!("C-{}", self.label)
    }

    #[allow(dead_code)]
    pub fn members(&self) -> &[GeoPoint] {
        &self.members
    }

    /// Always equal to the number of members
    pub fn point_count(&self) -> usize {
        self.members.len()
    }

    /// Concatenation of `P-<id>, ` for every member, in arrival order
    pub fn point_list(&self) -> &str {
        &self.point_list
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl LngLat for Centroid {
    fn lng(&self) -> f64 {
        self.center[0]
    }

    fn lat(&self) -> f64 {
        self.center[1]
    }
}

/// Centroids serialize as GeoJSON point features
impl Serialize for Centroid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Feature::from(self).serialize(serializer)
    }
}
