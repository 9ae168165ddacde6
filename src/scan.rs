//! Grid scanning: classify every cell against the sphere.
//!
//! Cells are independent, so the scan is a flat map over candidate index
//! triples. The candidate set is first narrowed per axis to the slab of
//! intervals the sphere can reach at all, which prunes most of a large
//! grid before any corner distances are computed.

use crate::cell::{Cell, IntersectionType};
use crate::error::MosaicError;
use crate::grid::{CartesianGrid, SphericalGrid};
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

macro_rules! maybe_par_into_iter {
    ($collection:expr) => {{
        #[cfg(feature = "parallel")]
        {
            $collection.into_par_iter()
        }
        #[cfg(not(feature = "parallel"))]
        {
            $collection.into_iter()
        }
    }};
}

/// Candidate cell indices whose axis slabs all overlap the sphere.
fn candidate_cells(grid: &CartesianGrid, radius: f64) -> Vec<(usize, usize, usize)> {
    let x_limits = grid.x_grid().bulk_filter_limits(radius);
    let y_limits = grid.y_grid().bulk_filter_limits(radius);
    let z_limits = grid.z_grid().bulk_filter_limits(radius);
    let (Some((x0, x1)), Some((y0, y1)), Some((z0, z1))) = (x_limits, y_limits, z_limits) else {
        log::debug!("sphere of radius {} does not reach the grid", radius);
        return Vec::new();
    };
    log::debug!(
        "candidate slab: x {}..={}, y {}..={}, z {}..={}",
        x0,
        x1,
        y0,
        y1,
        z0,
        z1
    );

    let mut candidates =
        Vec::with_capacity((x1 - x0 + 1) * (y1 - y0 + 1) * (z1 - z0 + 1));
    for iz in z0..=z1 {
        for iy in y0..=y1 {
            for ix in x0..=x1 {
                candidates.push((ix, iy, iz));
            }
        }
    }
    candidates
}

/// Scan the grid and return every cell the sphere intersects.
///
/// Fails on the first cell whose geometry contradicts its corner
/// classification; the error carries the offending indices.
pub fn find_intersecting_cells(
    grid: &CartesianGrid,
    radius: f64,
) -> Result<Vec<Cell>, MosaicError> {
    let candidates = candidate_cells(grid, radius);
    let results: Result<Vec<Option<Cell>>, MosaicError> = maybe_par_into_iter!(candidates)
        .map(|(ix, iy, iz)| Cell::analyze(grid, ix, iy, iz, radius))
        .collect();
    let cells: Vec<Cell> = results?.into_iter().flatten().collect();
    log::info!(
        "scan found {} intersecting cells (radius {})",
        cells.len(),
        radius
    );
    Ok(cells)
}

/// Scan the grid, keeping going past cells that fail to classify.
///
/// Failed cells are logged and returned alongside the successes so a
/// caller can inspect them without losing the rest of the scan.
pub fn find_intersecting_cells_lossy(
    grid: &CartesianGrid,
    radius: f64,
) -> (Vec<Cell>, Vec<MosaicError>) {
    let candidates = candidate_cells(grid, radius);
    let results: Vec<Result<Option<Cell>, MosaicError>> = maybe_par_into_iter!(candidates)
        .map(|(ix, iy, iz)| Cell::analyze(grid, ix, iy, iz, radius))
        .collect();
    partition_results(results)
}

/// Split per-cell outcomes into kept cells and logged failures.
fn partition_results(
    results: Vec<Result<Option<Cell>, MosaicError>>,
) -> (Vec<Cell>, Vec<MosaicError>) {
    let mut cells = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(Some(cell)) => cells.push(cell),
            Ok(None) => {}
            Err(e) => {
                log::warn!("{}", e);
                failures.push(e);
            }
        }
    }
    (cells, failures)
}

/// A Cartesian grid paired with the angular grid of the sphere it is
/// scanned against. The sphere radius comes from the angular grid.
#[derive(Debug, Clone)]
pub struct MosaicGrid {
    cartesian: CartesianGrid,
    spherical: SphericalGrid,
}

impl MosaicGrid {
    pub fn new(cartesian: CartesianGrid, spherical: SphericalGrid) -> Self {
        Self {
            cartesian,
            spherical,
        }
    }

    #[inline]
    pub fn cartesian(&self) -> &CartesianGrid {
        &self.cartesian
    }

    #[inline]
    pub fn spherical(&self) -> &SphericalGrid {
        &self.spherical
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.spherical.radius()
    }

    /// Scan for intersecting cells, failing on the first bad cell.
    pub fn find_intersecting_cells(&self) -> Result<Vec<Cell>, MosaicError> {
        find_intersecting_cells(&self.cartesian, self.radius())
    }

    /// Scan for intersecting cells, collecting per-cell failures instead
    /// of stopping.
    pub fn find_intersecting_cells_lossy(&self) -> (Vec<Cell>, Vec<MosaicError>) {
        find_intersecting_cells_lossy(&self.cartesian, self.radius())
    }
}

/// Per-type counts from a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    counts: [usize; IntersectionType::ALL.len()],
}

impl ScanReport {
    pub fn from_cells(cells: &[Cell]) -> Self {
        let mut report = ScanReport::default();
        for cell in cells {
            let slot = IntersectionType::ALL
                .iter()
                .position(|&k| k == cell.kind())
                .unwrap_or(0);
            report.counts[slot] += 1;
        }
        report
    }

    /// Number of cells of one type.
    pub fn count(&self, kind: IntersectionType) -> usize {
        IntersectionType::ALL
            .iter()
            .position(|&k| k == kind)
            .map(|i| self.counts[i])
            .unwrap_or(0)
    }

    /// Total intersecting cells; always equals the scanned cell count.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (kind, count) in IntersectionType::ALL.iter().zip(self.counts.iter()) {
            writeln!(f, "{:>16}: {}", kind.label(), count)?;
        }
        write!(f, "{:>16}: {}", "total", self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_scan_far_sphere() {
        let grid = CartesianGrid::uniform((5.0, 9.0), (5.0, 9.0), (5.0, 9.0), 5, 5, 5);
        let cells = find_intersecting_cells(&grid, 1.5).unwrap();
        assert!(cells.is_empty());
    }

    #[test]
    fn test_single_cell_scan() {
        let grid = CartesianGrid::uniform((0.0, 2.0), (0.0, 2.0), (0.0, 2.0), 2, 2, 2);
        let cells = find_intersecting_cells(&grid, 1.5).unwrap();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].kind(), IntersectionType::CornerIn);

        let report = ScanReport::from_cells(&cells);
        assert_eq!(report.count(IntersectionType::CornerIn), 1);
        assert_eq!(report.total(), 1);
    }

    #[test]
    fn test_lossy_scan_matches_strict_on_good_input() {
        let grid = CartesianGrid::uniform((-2.0, 2.0), (-2.0, 2.0), (-2.0, 2.0), 5, 5, 5);
        let strict = find_intersecting_cells(&grid, 1.5).unwrap();
        let (lossy, failures) = find_intersecting_cells_lossy(&grid, 1.5);
        assert!(failures.is_empty());
        assert_eq!(strict.len(), lossy.len());
    }

    #[test]
    fn test_lossy_partition_keeps_cells_and_collects_failures() {
        let grid = CartesianGrid::uniform((0.0, 2.0), (0.0, 2.0), (0.0, 2.0), 2, 2, 2);
        let cell = Cell::analyze(&grid, 0, 0, 0, 1.5).unwrap().unwrap();
        let results = vec![
            Ok(Some(cell)),
            Ok(None),
            Err(MosaicError::UnknownTopology {
                inside_corners: 2,
                edge_intersections: 3,
            }
            .in_cell(1, 0, 0)),
        ];
        let (cells, failures) = partition_results(results);
        assert_eq!(cells.len(), 1);
        assert_eq!(failures.len(), 1);
        assert!(matches!(
            failures[0],
            MosaicError::CellFailed { ix: 1, iy: 0, iz: 0, .. }
        ));
    }

    #[test]
    fn test_mosaic_grid_scan() {
        let grid = MosaicGrid::new(
            CartesianGrid::uniform((0.0, 2.0), (0.0, 2.0), (0.0, 2.0), 2, 2, 2),
            SphericalGrid::new(10, 20, 1.5, 0.0, 0.0),
        );
        assert_eq!(grid.radius(), 1.5);
        let cells = grid.find_intersecting_cells().unwrap();
        assert_eq!(cells.len(), 1);
    }

    #[test]
    fn test_report_display_lists_all_types() {
        let report = ScanReport::default();
        let text = format!("{}", report);
        for kind in IntersectionType::ALL {
            assert!(text.contains(kind.label()));
        }
        assert!(text.contains("total"));
    }
}
