//! Single-pass neighbor merge, registered under the name "dbscan"
//!
//! This is not canonical DBSCAN: there is no minimum point count and no
//! transitive expansion through core points.
//!
//! ```text
//! NeighborMerge(D, eps)
//!    C = 0
//!    for each unassigned point P in D, in input order
//!       NeighborPts = regionQuery(P, eps) restricted to unassigned points
//!       C = next cluster, assign P to C
//!       for each P' in NeighborPts other than P
//!          assign P' to C
//! ```
//!
//! A point r within eps of a neighbor q but not of P never joins P's cluster,
//! so the result depends on the input order. Assigned points are never
//! revisited, so a later point cannot pull an earlier one out of its cluster.

use bitvec::prelude::*;
use log::debug;
use measure_time::debug_time;

use super::centroid::Centroid;
use super::kdtree::new_kd_tree;
use super::point::GeoPoint;
use super::projection::{Pixel, project_all, validate_zoom};
use crate::error::{Error, Result};

/// Clusters points by merging every unassigned neighbor within `eps` pixels
///
/// # Arguments
///
/// * `points` - Points to cluster, consumed in order
/// * `eps` - Clustering radius in pixels (inclusive)
/// * `zoom` - Zoom level of the pixel space
///
/// # Returns
///
/// Centroids in label-creation order; labels are "1", "2", ...
pub fn neighbor_merge(points: Vec<GeoPoint>, eps: f64, zoom: f64) -> Result<Vec<Centroid>> {
    validate_radius("eps", eps)?;
    validate_zoom(zoom)?;
    let n = points.len();
    debug_time!("neighbor merge of {n} points");

    let pixels = project_all(&points, zoom)?;
    let kd_tree = new_kd_tree(pixels);

    let mut assigned = bitvec![0; n];
    // Points are moved out as they join a centroid
    let mut slots: Vec<Option<GeoPoint>> = points.into_iter().map(Some).collect();
    let mut centroids = Vec::new();
    let mut neighbor_pts = Vec::new();
    let mut label = 0usize;

    for i in 0..slots.len() {
        if assigned[i] {
            continue;
        }

        neighbor_pts.clear();
        neighbor_pts = kd_tree.in_range(&kd_tree.pixels[i], eps, neighbor_pts);
        neighbor_pts.retain(|&j| !assigned[j]);
        neighbor_pts.sort_unstable();

        label += 1;
        assigned.set(i, true);
        let Some(first) = slots[i].take() else {
            continue;
        };
        let mut centroid = Centroid::new(label.to_string(), first);

        for &j in &neighbor_pts {
            if j == i || assigned[j] {
                continue;
            }
            assigned.set(j, true);
            if let Some(q) = slots[j].take() {
                centroid.add_point(q);
            }
        }
        centroids.push(centroid);
    }

    debug!(
        "neighbor merge: {} centroids at zoom {zoom} with eps {eps}",
        centroids.len()
    );
    Ok(centroids)
}

/// Simple O(N) way to find positions in the neighbourhood
///
/// This is equivalent to `kd_tree.in_range(p, eps, vec![])` up to ordering.
#[allow(dead_code)] // Part of public API, used to cross-check the tree
pub fn region_query(pixels: &[Pixel], p: &Pixel, eps: f64) -> Vec<usize> {
    pixels
        .iter()
        .enumerate()
        .filter(|(_, q)| q.distance(p) <= eps)
        .map(|(i, _)| i)
        .collect()
}

/// Clustering radii must be finite and strictly positive
pub(crate) fn validate_radius(name: &'static str, radius: f64) -> Result<()> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(Error::invalid(
            name,
            format!("{radius} is not a positive pixel radius"),
        ));
    }
    Ok(())
}
