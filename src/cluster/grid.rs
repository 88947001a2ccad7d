//! Fixed-grid bucketing with a single collision-merge pass, registered
//! under the name "grid"
//!
//! Points are dropped into square cells of `icon_size` pixels anchored at the
//! viewport's west and north edges. Afterwards every occupied cell is checked
//! once against its 8 neighbors and centroids closer than `icon_size` are
//! merged, the larger absorbing the smaller.
//!
//! The merge pass runs once and is not repeated until nothing changes. A cell
//! emptied into a neighbor is not re-examined against that neighbor's other
//! neighbors, so chains of collisions are resolved only as far as one
//! row-major sweep reaches.

use log::debug;
use measure_time::debug_time;

use super::centroid::Centroid;
use super::dbscan::validate_radius;
use super::point::{GeoPoint, Viewport};
use super::projection::{Pixel, pixel_distance, project, validate_zoom};
use crate::error::{Error, Result};

/// Client viewport width in pixels the grid is sized for
///
/// The grid dimensions come from this assumed size rather than from the
/// projected span of the requested viewport.
pub const ASSUMED_VIEWPORT_WIDTH: f64 = 400.0;

/// Client viewport height in pixels the grid is sized for
pub const ASSUMED_VIEWPORT_HEIGHT: f64 = 300.0;

/// Upper bound on `width * height`, reached at an icon size of about 0.35px
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// Neighbor offsets as (row, col), clockwise from NW: NW, N, NE, E, SE, S, SW, W
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Grid of cells, each optionally holding the index of its centroid
#[derive(Debug)]
pub struct GridLayout {
    pub width: usize,
    pub height: usize,
    /// Row-major, `width * height` entries
    pub cells: Vec<Option<usize>>,
    /// Centroids in cell-creation order
    pub centroids: Vec<Centroid>,
}

/// Grid (width, height) for an icon size
///
/// Fails when a dimension would be zero or the grid would exceed
/// [`MAX_GRID_CELLS`].
pub fn grid_dimensions(icon_size: f64) -> Result<(usize, usize)> {
    validate_radius("icon_size", icon_size)?;

    // `as` saturates, so a tiny icon size yields usize::MAX here
    let width = (ASSUMED_VIEWPORT_WIDTH / icon_size).floor() as usize;
    let height = (ASSUMED_VIEWPORT_HEIGHT / icon_size).floor() as usize;
    if width == 0 || height == 0 {
        return Err(Error::invalid(
            "icon_size",
            format!(
                "{icon_size} leaves no room for a grid on a \
                 {ASSUMED_VIEWPORT_WIDTH}x{ASSUMED_VIEWPORT_HEIGHT} viewport"
            ),
        ));
    }
    match width.checked_mul(height) {
        Some(cells) if cells <= MAX_GRID_CELLS => Ok((width, height)),
        _ => Err(Error::invalid(
            "icon_size",
            format!("{icon_size} needs more than {MAX_GRID_CELLS} grid cells"),
        )),
    }
}

impl GridLayout {
    /// Creates an empty grid sized for the assumed client viewport
    pub fn new(icon_size: f64) -> Result<Self> {
        let (width, height) = grid_dimensions(icon_size)?;

        Ok(GridLayout {
            width,
            height,
            cells: vec![None; width * height],
            centroids: Vec::new(),
        })
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Centroid index stored at (row, col), if the cell is occupied
    pub fn cell(&self, row: usize, col: usize) -> Option<usize> {
        self.cells[self.index(row, col)]
    }

    /// Adds a point to the cell, creating its centroid on first use
    pub fn place(&mut self, row: usize, col: usize, p: GeoPoint) {
        let idx = self.index(row, col);
        match self.cells[idx] {
            Some(c) => self.centroids[c].add_point(p),
            None => {
                self.cells[idx] = Some(self.centroids.len());
                self.centroids.push(Centroid::new(format!("{row}-{col}"), p));
            }
        }
    }

    /// Single collision-merge pass over occupied cells in row-major order
    ///
    /// On equal member counts the neighbor absorbs the current cell. That
    /// tie-break is arbitrary but deterministic.
    ///
    /// # Returns
    ///
    /// The number of merges performed
    pub fn merge_collisions(&mut self, icon_size: f64, zoom: f64) -> usize {
        let mut merges = 0;

        for row in 0..self.height {
            for col in 0..self.width {
                let Some(current) = self.cell(row, col) else {
                    continue;
                };

                for (dr, dc) in NEIGHBORS {
                    if self.centroids[current].is_empty() {
                        break;
                    }
                    let (Some(nr), Some(nc)) =
                        (row.checked_add_signed(dr), col.checked_add_signed(dc))
                    else {
                        continue;
                    };
                    if nr >= self.height || nc >= self.width {
                        continue;
                    }
                    let Some(neighbor) = self.cell(nr, nc) else {
                        continue;
                    };
                    if self.centroids[neighbor].is_empty() {
                        continue;
                    }

                    let dist =
                        pixel_distance(&self.centroids[current], &self.centroids[neighbor], zoom);
                    if dist < icon_size {
                        let (into, from) = if self.centroids[current].point_count()
                            > self.centroids[neighbor].point_count()
                        {
                            (current, neighbor)
                        } else {
                            (neighbor, current)
                        };
                        let moved = self.centroids[from].drain_members();
                        self.centroids[into].add_points(moved);
                        merges += 1;
                    }
                }
            }
        }

        merges
    }

    /// Consumes the layout, keeping only centroids that still have members
    pub fn into_centroids(self) -> Vec<Centroid> {
        self.centroids
            .into_iter()
            .filter(|c| !c.is_empty())
            .collect()
    }
}

/// Cell (row, col) of a pixel position, clamped into the grid
pub fn cell_of(
    px: &Pixel,
    origin_x: f64,
    origin_y: f64,
    icon_size: f64,
    width: usize,
    height: usize,
) -> (usize, usize) {
    let clamp = |v: f64, dim: usize| -> usize {
        // `as` saturates, negative values land on 0
        let v = v.floor().max(0.0) as usize;
        v.min(dim - 1)
    };
    let col = clamp((px.0[0] - origin_x) / icon_size, width);
    let row = clamp((px.0[1] - origin_y) / icon_size, height);
    (row, col)
}

/// Buckets points into the grid anchored at the viewport
///
/// The origin is the west edge (SW corner x) and the north edge (NE corner y)
/// of the viewport in pixel space.
pub fn build_grid(
    points: Vec<GeoPoint>,
    icon_size: f64,
    zoom: f64,
    viewport: &Viewport,
) -> Result<GridLayout> {
    validate_zoom(zoom)?;
    let mut layout = GridLayout::new(icon_size)?;

    let (ne_lng, ne_lat) = viewport.north_east();
    let (sw_lng, sw_lat) = viewport.south_west();
    let upper_right = project(ne_lng, ne_lat, zoom)?;
    let lower_left = project(sw_lng, sw_lat, zoom)?;

    for p in points {
        let px = project(p.coordinates[0], p.coordinates[1], zoom)?;
        let (row, col) = cell_of(
            &px,
            lower_left.0[0],
            upper_right.0[1],
            icon_size,
            layout.width,
            layout.height,
        );
        layout.place(row, col, p);
    }

    Ok(layout)
}

/// Clusters points on a fixed grid and merges colliding neighbor cells
///
/// # Arguments
///
/// * `points` - Points to cluster
/// * `icon_size` - Marker size in pixels; cell edge and collision distance
/// * `zoom` - Zoom level of the pixel space
/// * `viewport` - Visible bounding box the grid is anchored to
///
/// # Returns
///
/// Non-empty centroids in cell-creation order, labeled "row-col"
pub fn grid_cluster(
    points: Vec<GeoPoint>,
    icon_size: f64,
    zoom: f64,
    viewport: &Viewport,
) -> Result<Vec<Centroid>> {
    let n = points.len();
    debug_time!("grid clustering of {n} points");

    let mut layout = build_grid(points, icon_size, zoom, viewport)?;
    let occupied = layout.centroids.len();
    let merges = layout.merge_collisions(icon_size, zoom);

    debug!(
        "grid {}x{}: {occupied} occupied cells, {merges} merges",
        layout.width, layout.height
    );
    Ok(layout.into_centroids())
}
