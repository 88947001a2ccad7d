use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::ReaderBuilder;
use log::warn;
use serde_json::{Map, Value};

use crate::cluster::feature::InputFeatureCollection;
use crate::cluster::{GeoPoint, PointList};
use crate::error::Result;

/// Reads a GeoJSON FeatureCollection of Point features
///
/// Features without a two-element coordinate array, or with coordinates off
/// the map, are skipped. A feature without an `id` property gets its
/// position in the file as id.
pub fn read_points_geojson(path: &Path) -> Result<PointList> {
    let reader = BufReader::new(File::open(path)?);
    let collection: InputFeatureCollection = serde_json::from_reader(reader)?;
    Ok(points_from_features(collection))
}

pub(crate) fn points_from_features(collection: InputFeatureCollection) -> PointList {
    let mut points = PointList::with_capacity(collection.features.len());

    for (idx, feature) in collection.features.into_iter().enumerate() {
        let coordinates = match feature.geometry.as_ref().map(|g| g.coordinates.as_slice()) {
            Some(&[lng, lat]) => [lng, lat],
            _ => {
                warn!("Skipping feature {idx}: geometry is not a 2d point");
                continue;
            }
        };

        let mut properties = feature.properties.unwrap_or_default();
        ensure_id(&mut properties, idx);
        let point = GeoPoint {
            coordinates,
            properties,
        };
        if !point.has_valid_coordinates() {
            warn!("Skipping feature {idx}: coordinates {coordinates:?} are off the map");
            continue;
        }
        points.push(point);
    }

    points
}

/// Reads points from a CSV file
///
/// Expected format: `latitude,longitude[,id]` (header row is optional).
/// Rows with fewer than two columns, unparsable coordinates or coordinates
/// off the map are skipped.
pub fn read_points_csv(path: &Path) -> Result<PointList> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut records = Vec::new();
    for result in reader.records() {
        records.push(result?);
    }

    let mut points = PointList::new();
    if records.is_empty() {
        return Ok(points);
    }

    // Determine if first row is header
    let has_header = records[0]
        .get(0)
        .is_none_or(|cell| cell.trim().parse::<f64>().is_err());
    let start_idx = if has_header { 1 } else { 0 };

    for (row, record) in records.iter().enumerate().skip(start_idx) {
        if record.len() < 2 {
            continue;
        }

        let lat = record[0].trim().parse::<f64>();
        let lng = record[1].trim().parse::<f64>();
        let (Ok(lat), Ok(lng)) = (lat, lng) else {
            warn!("Skipping CSV row {row}: unparsable coordinates");
            continue;
        };

        let mut properties = Map::new();
        if let Some(id) = record.get(2).map(str::trim).filter(|id| !id.is_empty()) {
            properties.insert("id".to_string(), Value::from(id));
        }
        ensure_id(&mut properties, row - start_idx);

        let point = GeoPoint {
            coordinates: [lng, lat],
            properties,
        };
        if !point.has_valid_coordinates() {
            warn!("Skipping CSV row {row}: ({lat}, {lng}) is off the map");
            continue;
        }
        points.push(point);
    }

    Ok(points)
}

fn ensure_id(properties: &mut Map<String, Value>, idx: usize) {
    let missing = properties.get("id").is_none_or(Value::is_null);
    if missing {
        properties.insert("id".to_string(), Value::from(idx));
    }
}
