//! One-dimensional grids: sorted, not necessarily uniform.

/// A 1D grid of strictly increasing coordinates.
///
/// Points define `num_points() - 1` intervals (cells). Immutable after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid1D {
    pts: Vec<f64>,
}

impl Grid1D {
    /// Build a grid from arbitrary points. The points are sorted; at least
    /// two distinct values are required.
    ///
    /// # Panics
    /// Panics if fewer than two points are given or any two points
    /// coincide. Grid construction is configuration, not runtime input.
    pub fn from_points(points: &[f64]) -> Self {
        assert!(points.len() >= 2, "Grid1D needs at least two points");
        let mut pts = points.to_vec();
        pts.sort_by(|a, b| a.total_cmp(b));
        for w in pts.windows(2) {
            assert!(w[0] < w[1], "Grid1D points must be distinct: {}", w[0]);
        }
        Self { pts }
    }

    /// Build a uniform grid of `n` points spanning `[min, max]`.
    pub fn uniform(min: f64, max: f64, n: usize) -> Self {
        assert!(n >= 2, "Grid1D needs at least two points");
        assert!(min < max, "Grid1D range must be non-empty");
        let step = (max - min) / (n - 1) as f64;
        let pts = (0..n)
            .map(|i| if i == n - 1 { max } else { min + i as f64 * step })
            .collect();
        Self { pts }
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.pts[0]
    }

    #[inline]
    pub fn max(&self) -> f64 {
        *self.pts.last().unwrap()
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.pts.len()
    }

    #[inline]
    pub fn num_intervals(&self) -> usize {
        self.pts.len() - 1
    }

    /// Grid point at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    #[inline]
    pub fn value_at(&self, index: usize) -> f64 {
        self.pts[index]
    }

    /// All grid points.
    #[inline]
    pub fn points(&self) -> &[f64] {
        &self.pts
    }

    /// Average spacing between adjacent points.
    pub fn average_spacing(&self) -> f64 {
        (self.max() - self.min()) / self.num_intervals() as f64
    }

    /// The index `n` with `pts[n] <= value < pts[n+1]`, or `None` when the
    /// value is out of range. A value exactly at the maximum maps to the
    /// last interval.
    pub fn locate_interval(&self, value: f64) -> Option<usize> {
        if value < self.min() || value > self.max() {
            return None;
        }
        let upper = self.pts.partition_point(|&p| p <= value);
        // upper is the count of points <= value, at least 1 here.
        Some((upper - 1).min(self.num_intervals() - 1))
    }

    /// Inclusive range of interval indices whose cells can overlap
    /// `[-radius, radius]`, or `None` when no cell does. Used to bound the
    /// grid scan to the slab the sphere can actually touch.
    pub fn bulk_filter_limits(&self, radius: f64) -> Option<(usize, usize)> {
        let n = self.num_intervals();
        // First interval whose upper point exceeds -radius.
        let lo = self.pts[1..].partition_point(|&p| p <= -radius);
        // One past the last interval whose lower point is below +radius.
        let hi = self.pts[..n].partition_point(|&p| p < radius);
        if lo >= hi {
            None
        } else {
            Some((lo, hi - 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_sorts() {
        let g = Grid1D::from_points(&[3.0, -1.0, 0.5]);
        assert_eq!(g.points(), &[-1.0, 0.5, 3.0]);
        assert_eq!(g.min(), -1.0);
        assert_eq!(g.max(), 3.0);
        assert_eq!(g.num_intervals(), 2);
    }

    #[test]
    #[should_panic]
    fn test_duplicate_points_rejected() {
        Grid1D::from_points(&[0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_uniform_endpoints_exact() {
        let g = Grid1D::uniform(-2.0, 2.0, 6);
        assert_eq!(g.num_points(), 6);
        assert_eq!(g.min(), -2.0);
        assert_eq!(g.max(), 2.0);
        assert!((g.average_spacing() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_locate_interval() {
        let g = Grid1D::from_points(&[0.0, 1.0, 2.5, 4.0]);
        assert_eq!(g.locate_interval(-0.1), None);
        assert_eq!(g.locate_interval(0.0), Some(0));
        assert_eq!(g.locate_interval(0.99), Some(0));
        assert_eq!(g.locate_interval(1.0), Some(1));
        assert_eq!(g.locate_interval(3.2), Some(2));
        // Exactly at max maps into the last interval.
        assert_eq!(g.locate_interval(4.0), Some(2));
        assert_eq!(g.locate_interval(4.1), None);
    }

    #[test]
    fn test_bulk_filter_limits() {
        let g = Grid1D::uniform(-2.0, 2.0, 6); // cells of width 0.8
        // Radius 1.5 touches every cell except none: [-1.5, 1.5] overlaps all 5.
        assert_eq!(g.bulk_filter_limits(1.5), Some((0, 4)));
        // Radius 0.3 only overlaps the middle cell [-0.4, 0.4].
        assert_eq!(g.bulk_filter_limits(0.3), Some((2, 2)));
        // A grid entirely to one side of the sphere.
        let far = Grid1D::from_points(&[5.0, 6.0, 7.0]);
        assert_eq!(far.bulk_filter_limits(1.5), None);
    }
}
