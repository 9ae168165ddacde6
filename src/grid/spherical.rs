//! The angular grid on the sphere.

use super::Grid1D;
use crate::types::wrap_angle;
use std::f64::consts::PI;

/// A 2D angular grid over the sphere: uniform theta in `[0, PI]` and phi in
/// `[-PI, PI]`, a fixed radius, and two rotation angles mapping global
/// directions into the grid's local angular frame.
///
/// The rotations (`alpha` about x, then `beta` about the rotated z) affect
/// only index lookups; the intersection/curve core works in the global
/// frame.
#[derive(Debug, Clone)]
pub struct SphericalGrid {
    theta_grid: Grid1D,
    phi_grid: Grid1D,
    radius: f64,
    alpha: f64,
    beta: f64,
}

impl SphericalGrid {
    /// # Panics
    /// Panics if `radius` is not positive or either count is below 2.
    pub fn new(num_theta: usize, num_phi: usize, radius: f64, alpha: f64, beta: f64) -> Self {
        assert!(radius > 0.0, "sphere radius must be positive");
        Self {
            theta_grid: Grid1D::uniform(0.0, PI, num_theta),
            phi_grid: Grid1D::uniform(-PI, PI, num_phi),
            radius,
            alpha,
            beta,
        }
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    #[inline]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    #[inline]
    pub fn num_theta(&self) -> usize {
        self.theta_grid.num_points()
    }

    #[inline]
    pub fn num_phi(&self) -> usize {
        self.phi_grid.num_points()
    }

    #[inline]
    pub fn theta_spacing(&self) -> f64 {
        self.theta_grid.average_spacing()
    }

    #[inline]
    pub fn phi_spacing(&self) -> f64 {
        self.phi_grid.average_spacing()
    }

    /// Angular interval indices for a global direction, `None` where out of
    /// range (only possible through rounding at the poles/seam).
    pub fn get_indices(&self, theta: f64, phi: f64) -> [Option<usize>; 2] {
        let (theta, phi) = if self.alpha != 0.0 || self.beta != 0.0 {
            self.rotate_global_to_local(theta, phi)
        } else {
            (theta, wrap_angle(phi))
        };
        [
            self.theta_grid.locate_interval(theta),
            self.phi_grid.locate_interval(phi),
        ]
    }

    /// Rotate global spherical coordinates into the grid's local frame:
    /// first about the x-axis by `alpha`, then about the new z-axis by
    /// `beta`.
    fn rotate_global_to_local(&self, theta: f64, phi: f64) -> (f64, f64) {
        let (sin_a, cos_a) = self.alpha.sin_cos();
        let (sin_b, cos_b) = self.beta.sin_cos();

        let x = theta.sin() * phi.cos();
        let y = theta.sin() * phi.sin();
        let z = theta.cos();

        let x1 = x;
        let y1 = z * sin_a + y * cos_a;
        let z1 = z * cos_a - y * sin_a;

        let x2 = x1 * cos_b - y1 * sin_b;
        let y2 = x1 * sin_b + y1 * cos_b;
        let z2 = z1;

        (z2.clamp(-1.0, 1.0).acos(), wrap_angle(y2.atan2(x2)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_indices_unrotated() {
        let grid = SphericalGrid::new(10, 20, 1.0, 0.0, 0.0);
        let [it, ip] = grid.get_indices(PI / 3.0, PI / 4.0);
        assert!(it.is_some() && ip.is_some());
        // theta spacing is PI/9; PI/3 falls in interval 2.
        assert_eq!(it, Some(2));
    }

    #[test]
    fn test_rotation_moves_pole() {
        // With alpha = PI/2 the global north pole rotates to the equator.
        let grid = SphericalGrid::new(19, 20, 1.0, PI / 2.0, 0.0);
        let (theta, _phi) = grid.rotate_global_to_local(0.0, 0.0);
        assert!((theta - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_pole_indices_in_range() {
        let grid = SphericalGrid::new(10, 20, 2.0, 0.0, 0.0);
        let [it, ip] = grid.get_indices(0.0, 0.0);
        assert_eq!(it, Some(0));
        assert!(ip.is_some());
        let [it, _] = grid.get_indices(PI, 0.0);
        assert_eq!(it, Some(8));
    }
}
