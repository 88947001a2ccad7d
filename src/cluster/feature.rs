//! GeoJSON shapes exchanged with the map renderer and the point files

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::centroid::Centroid;

/// Output feature for a single centroid
#[derive(Debug, Serialize)]
pub struct Feature<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    geometry: Geometry,
    properties: CentroidProperties<'a>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type", default = "point_type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Serialize)]
struct CentroidProperties<'a> {
    id: String,
    pointcount: usize,
    pointlist: &'a str,
}

fn point_type() -> String {
    "Point".to_string()
}

impl<'a> From<&'a Centroid> for Feature<'a> {
    fn from(c: &'a Centroid) -> Self {
        let [lng, lat] = c.center();
        Feature {
            kind: "Feature",
            geometry: Geometry {
                kind: point_type(),
                coordinates: vec![lng, lat],
            },
            properties: CentroidProperties {
                id: c.id(),
                pointcount: c.point_count(),
                pointlist: c.point_list(),
            },
        }
    }
}

/// Clustering result as sent to the renderer
#[derive(Debug, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    kind: &'static str,
    pub features: Vec<Centroid>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Centroid>) -> Self {
        FeatureCollection {
            kind: "FeatureCollection",
            features,
        }
    }
}

/// Input feature as found in a GeoJSON point file
///
/// Geometry is optional so that a single malformed feature can be skipped
/// instead of failing the whole file.
#[derive(Debug, Deserialize)]
pub struct InputFeature {
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
pub struct InputFeatureCollection {
    pub features: Vec<InputFeature>,
}
