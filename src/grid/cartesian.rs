//! A 3D axis-aligned Cartesian grid.

use super::Grid1D;
use glam::DVec3;

/// Three independent 1D grids plus per-axis offsets, defining a lattice of
/// rectangular cells indexed by `(ix, iy, iz)`.
///
/// Cell geometry (corner coordinates) lives in the grid's local frame, which
/// is also the sphere's frame; the offsets only translate global points into
/// that frame for index lookups.
#[derive(Debug, Clone)]
pub struct CartesianGrid {
    x_grid: Grid1D,
    y_grid: Grid1D,
    z_grid: Grid1D,
    offset: DVec3,
}

impl CartesianGrid {
    pub fn new(x_grid: Grid1D, y_grid: Grid1D, z_grid: Grid1D, offset: DVec3) -> Self {
        Self {
            x_grid,
            y_grid,
            z_grid,
            offset,
        }
    }

    /// A uniform grid spanning the given per-axis ranges with the given
    /// point counts and no offset.
    pub fn uniform(
        x_range: (f64, f64),
        y_range: (f64, f64),
        z_range: (f64, f64),
        nx: usize,
        ny: usize,
        nz: usize,
    ) -> Self {
        Self::new(
            Grid1D::uniform(x_range.0, x_range.1, nx),
            Grid1D::uniform(y_range.0, y_range.1, ny),
            Grid1D::uniform(z_range.0, z_range.1, nz),
            DVec3::ZERO,
        )
    }

    #[inline]
    pub fn x_grid(&self) -> &Grid1D {
        &self.x_grid
    }

    #[inline]
    pub fn y_grid(&self) -> &Grid1D {
        &self.y_grid
    }

    #[inline]
    pub fn z_grid(&self) -> &Grid1D {
        &self.z_grid
    }

    #[inline]
    pub fn offset(&self) -> DVec3 {
        self.offset
    }

    /// Number of cells along each axis.
    pub fn num_cells(&self) -> (usize, usize, usize) {
        (
            self.x_grid.num_intervals(),
            self.y_grid.num_intervals(),
            self.z_grid.num_intervals(),
        )
    }

    /// Per-axis interval indices containing a global point, `None` on any
    /// axis where the point is out of range. This is the lookup the
    /// Monte-Carlo point classifier uses.
    pub fn get_indices(&self, point: DVec3) -> [Option<usize>; 3] {
        let local = point - self.offset;
        [
            self.x_grid.locate_interval(local.x),
            self.y_grid.locate_interval(local.y),
            self.z_grid.locate_interval(local.z),
        ]
    }

    /// Global coordinates of the grid point at the given indices.
    ///
    /// # Panics
    /// Panics if any index is out of range.
    pub fn coordinate(&self, ix: usize, iy: usize, iz: usize) -> DVec3 {
        DVec3::new(
            self.x_grid.value_at(ix),
            self.y_grid.value_at(iy),
            self.z_grid.value_at(iz),
        ) + self.offset
    }
}
