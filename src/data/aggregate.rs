use std::collections::BTreeMap;

use super::model::CollisionDataset;

// ---------------------------------------------------------------------------
// Per-minute histogram
// ---------------------------------------------------------------------------

/// Count the given (hour-filtered) collisions into 60 one-minute buckets.
/// The bucket sum equals `indices.len()`.
pub fn minute_histogram(dataset: &CollisionDataset, indices: &[usize]) -> [u32; 60] {
    let mut buckets = [0u32; 60];
    for &i in indices {
        buckets[dataset.records[i].minute() as usize] += 1;
    }
    buckets
}

// ---------------------------------------------------------------------------
// Coordinate midpoint
// ---------------------------------------------------------------------------

/// Arithmetic mean of (latitude, longitude) over the given collisions.
/// `None` for an empty view: the caller renders an empty state instead.
pub fn midpoint(dataset: &CollisionDataset, indices: &[usize]) -> Option<(f64, f64)> {
    if indices.is_empty() {
        return None;
    }
    let n = indices.len() as f64;
    let (lat_sum, lon_sum) = indices.iter().fold((0.0, 0.0), |(lat, lon), &i| {
        let r = &dataset.records[i];
        (lat + r.latitude, lon + r.longitude)
    });
    Some((lat_sum / n, lon_sum / n))
}

// ---------------------------------------------------------------------------
// Hexagonal density binning
// ---------------------------------------------------------------------------

/// Meters per degree of latitude; longitude is scaled by cos(latitude).
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Hex cell circumradius used by the density overlay, in meters.
pub const HEX_RADIUS_M: f64 = 100.0;

/// A pointy-top hexagonal grid in a local equirectangular projection around
/// an origin. Good enough at city scale; not meant for large extents.
#[derive(Debug, Clone)]
pub struct HexGrid {
    origin_lon: f64,
    origin_lat: f64,
    cos_lat: f64,
    radius_m: f64,
}

impl HexGrid {
    pub fn new(origin_lat: f64, origin_lon: f64, radius_m: f64) -> Self {
        HexGrid {
            origin_lon,
            origin_lat,
            cos_lat: origin_lat.to_radians().cos(),
            radius_m,
        }
    }

    /// Project to meters east/north of the origin.
    fn to_local(&self, lat: f64, lon: f64) -> (f64, f64) {
        let x = (lon - self.origin_lon) * self.cos_lat * METERS_PER_DEGREE;
        let y = (lat - self.origin_lat) * METERS_PER_DEGREE;
        (x, y)
    }

    fn from_local(&self, x: f64, y: f64) -> (f64, f64) {
        let lat = self.origin_lat + y / METERS_PER_DEGREE;
        let lon = self.origin_lon + x / (self.cos_lat * METERS_PER_DEGREE);
        (lat, lon)
    }

    /// Axial coordinates of the cell containing the point.
    pub fn cell_at(&self, lat: f64, lon: f64) -> (i32, i32) {
        let (x, y) = self.to_local(lat, lon);
        let qf = (3f64.sqrt() / 3.0 * x - y / 3.0) / self.radius_m;
        let rf = (2.0 / 3.0 * y) / self.radius_m;
        axial_round(qf, rf)
    }

    /// Cell center as (latitude, longitude).
    pub fn cell_center(&self, q: i32, r: i32) -> (f64, f64) {
        let x = self.radius_m * 3f64.sqrt() * (q as f64 + r as f64 / 2.0);
        let y = self.radius_m * 1.5 * r as f64;
        self.from_local(x, y)
    }

    /// The six corners of a cell as `[longitude, latitude]` plot points.
    pub fn cell_corners(&self, q: i32, r: i32) -> [[f64; 2]; 6] {
        let cx = self.radius_m * 3f64.sqrt() * (q as f64 + r as f64 / 2.0);
        let cy = self.radius_m * 1.5 * r as f64;
        let mut corners = [[0.0; 2]; 6];
        for (i, corner) in corners.iter_mut().enumerate() {
            let angle = (60.0 * i as f64 - 30.0).to_radians();
            let (lat, lon) = self.from_local(
                cx + self.radius_m * angle.cos(),
                cy + self.radius_m * angle.sin(),
            );
            *corner = [lon, lat];
        }
        corners
    }
}

/// Round fractional axial coordinates to the containing cell.
fn axial_round(qf: f64, rf: f64) -> (i32, i32) {
    // Cube rounding: x + y + z = 0, re-derive the axis with the largest error.
    let (xf, zf) = (qf, rf);
    let yf = -xf - zf;
    let (mut x, y, mut z) = (xf.round(), yf.round(), zf.round());
    let (dx, dy, dz) = ((x - xf).abs(), (y - yf).abs(), (z - zf).abs());
    if dx > dy && dx > dz {
        x = -y - z;
    } else if dy <= dz {
        z = -x - y;
    }
    (x as i32, z as i32)
}

/// One occupied cell of the density overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexCell {
    pub q: i32,
    pub r: i32,
    pub count: usize,
}

/// Hex-binned view of a set of collisions.
#[derive(Debug, Clone)]
pub struct HexDensity {
    pub grid: HexGrid,
    /// Occupied cells, lowest count first so dense cells paint last.
    pub cells: Vec<HexCell>,
    pub max_count: usize,
}

/// Bin the given collisions into hexagonal cells of circumradius `radius_m`
/// around the view's coordinate midpoint. `None` for an empty view.
pub fn hex_density(
    dataset: &CollisionDataset,
    indices: &[usize],
    radius_m: f64,
) -> Option<HexDensity> {
    let (mid_lat, mid_lon) = midpoint(dataset, indices)?;
    let grid = HexGrid::new(mid_lat, mid_lon, radius_m);

    let mut counts: BTreeMap<(i32, i32), usize> = BTreeMap::new();
    for &i in indices {
        let r = &dataset.records[i];
        *counts.entry(grid.cell_at(r.latitude, r.longitude)).or_default() += 1;
    }

    let mut cells: Vec<HexCell> = counts
        .into_iter()
        .map(|((q, r), count)| HexCell { q, r, count })
        .collect();
    cells.sort_by_key(|c| (c.count, c.q, c.r));
    let max_count = cells.last().map(|c| c.count).unwrap_or(0);

    Some(HexDensity {
        grid,
        cells,
        max_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CollisionRecord;
    use chrono::NaiveDate;

    fn record(minute: u32, lat: f64, lon: f64) -> CollisionRecord {
        CollisionRecord {
            datetime: NaiveDate::from_ymd_opt(2021, 6, 15)
                .unwrap()
                .and_hms_opt(8, minute, 0)
                .unwrap(),
            latitude: lat,
            longitude: lon,
            persons_injured: 0,
            pedestrians_injured: 0,
            cyclists_injured: 0,
            motorists_injured: 0,
            street: None,
        }
    }

    fn dataset(records: Vec<CollisionRecord>) -> (CollisionDataset, Vec<usize>) {
        let indices = (0..records.len()).collect();
        (CollisionDataset::from_records(records), indices)
    }

    #[test]
    fn histogram_sums_to_view_size() {
        let (ds, indices) = dataset(vec![
            record(0, 40.7, -74.0),
            record(15, 40.7, -74.0),
            record(15, 40.7, -74.0),
            record(59, 40.7, -74.0),
        ]);
        let hist = minute_histogram(&ds, &indices);
        assert_eq!(hist.iter().sum::<u32>() as usize, indices.len());
        assert_eq!(hist[0], 1);
        assert_eq!(hist[15], 2);
        assert_eq!(hist[59], 1);
    }

    #[test]
    fn histogram_of_empty_view_is_all_zero() {
        let (ds, _) = dataset(vec![record(5, 40.7, -74.0)]);
        let hist = minute_histogram(&ds, &[]);
        assert!(hist.iter().all(|&c| c == 0));
    }

    #[test]
    fn midpoint_is_the_coordinate_mean() {
        let (ds, indices) = dataset(vec![record(0, 40.0, -74.0), record(1, 41.0, -73.0)]);
        let (lat, lon) = midpoint(&ds, &indices).unwrap();
        assert!((lat - 40.5).abs() < 1e-9);
        assert!((lon - -73.5).abs() < 1e-9);
    }

    #[test]
    fn midpoint_of_empty_view_is_none() {
        let (ds, _) = dataset(vec![record(0, 40.0, -74.0)]);
        assert_eq!(midpoint(&ds, &[]), None);
    }

    #[test]
    fn hex_density_counts_sum_to_view_size() {
        let (ds, indices) = dataset(vec![
            record(0, 40.7000, -74.0000),
            record(1, 40.7001, -74.0001),
            record(2, 40.7100, -74.0000),
            record(3, 40.7100, -74.0100),
        ]);
        let density = hex_density(&ds, &indices, HEX_RADIUS_M).unwrap();
        let total: usize = density.cells.iter().map(|c| c.count).sum();
        assert_eq!(total, indices.len());
        assert!(density.max_count >= 1);
        assert_eq!(
            density.max_count,
            density.cells.iter().map(|c| c.count).max().unwrap()
        );
    }

    #[test]
    fn coincident_points_share_a_cell_and_distant_points_do_not() {
        // ~11 m apart vs ~1.1 km apart at this latitude.
        let (ds, indices) = dataset(vec![
            record(0, 40.70000, -74.00000),
            record(1, 40.70010, -74.00000),
            record(2, 40.71000, -74.00000),
        ]);
        let density = hex_density(&ds, &indices, HEX_RADIUS_M).unwrap();
        let near = density.grid.cell_at(40.70000, -74.00000);
        assert_eq!(near, density.grid.cell_at(40.70010, -74.00000));
        assert_ne!(near, density.grid.cell_at(40.71000, -74.00000));
    }

    #[test]
    fn hex_density_of_empty_view_is_none() {
        let (ds, _) = dataset(vec![record(0, 40.7, -74.0)]);
        assert!(hex_density(&ds, &[], HEX_RADIUS_M).is_none());
    }

    #[test]
    fn cell_corners_sit_one_radius_from_the_center() {
        let grid = HexGrid::new(40.7, -74.0, 100.0);
        let (center_lat, center_lon) = grid.cell_center(2, -1);
        let (cx, cy) = grid.to_local(center_lat, center_lon);
        for [lon, lat] in grid.cell_corners(2, -1) {
            let (x, y) = grid.to_local(lat, lon);
            let dist = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
            assert!((dist - 100.0).abs() < 1e-6, "corner at {dist} m");
        }
    }

    #[test]
    fn every_point_lands_in_the_cell_reported_for_it() {
        let grid = HexGrid::new(40.7, -74.0, 100.0);
        // Probe a small lattice around the origin.
        for i in -5..=5 {
            for j in -5..=5 {
                let lat = 40.7 + i as f64 * 0.0007;
                let lon = -74.0 + j as f64 * 0.0009;
                let (q, r) = grid.cell_at(lat, lon);
                let (clat, clon) = grid.cell_center(q, r);
                let (x, y) = grid.to_local(lat, lon);
                let (cx, cy) = grid.to_local(clat, clon);
                let dist = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
                // Any point is within the circumradius of its cell center.
                assert!(dist <= 100.0 + 1e-6, "point {dist} m from its cell");
            }
        }
    }
}
