//! Pole enclosure detection for boundary loops.
//!
//! Spherical-excess area formulas misbehave for polygons that wrap a
//! coordinate pole, so each cell's boundary loop is checked up front: the
//! unwrapped azimuthal sweep of the full loop is its winding number about
//! the polar axis, and a sweep of +-2 pi means a pole is inside.

use crate::curve::GeneralCurve;
use crate::types::wrap_angle;
use std::f64::consts::PI;

/// Samples per curve for the winding accumulation.
const SAMPLES_PER_CURVE: usize = 100;

/// A theta this close to 0 or pi counts as touching the pole.
const POLE_EPS: f64 = 1e-6;

/// Allowed deviation of the total sweep from +-2 pi.
const WINDING_TOL: f64 = 0.1;

/// Relationship of a boundary loop to the coordinate poles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoleStatus {
    /// The loop stays clear of both poles.
    None,
    NorthEnclosed,
    SouthEnclosed,
    /// The loop passes through the north pole itself.
    NorthOnBoundary,
    SouthOnBoundary,
}

impl PoleStatus {
    /// Whether either pole lies strictly inside the loop.
    #[inline]
    pub fn is_enclosed(self) -> bool {
        matches!(self, PoleStatus::NorthEnclosed | PoleStatus::SouthEnclosed)
    }

    /// Whether the loop touches a pole exactly.
    #[inline]
    pub fn is_on_boundary(self) -> bool {
        matches!(
            self,
            PoleStatus::NorthOnBoundary | PoleStatus::SouthOnBoundary
        )
    }
}

/// Classify a closed loop of boundary curves against the poles.
///
/// Each curve is sampled densely; a sample with theta within [`POLE_EPS`]
/// of 0 or pi short-circuits to the on-boundary result. Otherwise the
/// per-step phi changes, each wrapped into `(-pi, pi]`, are summed over the
/// whole loop; a total within [`WINDING_TOL`] of +-2 pi means a pole is
/// enclosed, and the loop's mean theta picks which one.
pub fn check_pole_enclosure(curves: &[GeneralCurve]) -> PoleStatus {
    if curves.is_empty() {
        return PoleStatus::None;
    }

    let mut total_winding = 0.0;
    let mut theta_sum = 0.0;
    let mut theta_count = 0usize;
    let mut prev_phi: Option<f64> = None;

    for curve in curves {
        for i in 0..=SAMPLES_PER_CURVE {
            let t = i as f64 / SAMPLES_PER_CURVE as f64;
            let sp = curve.theta_phi(t);
            if sp.theta < POLE_EPS {
                return PoleStatus::NorthOnBoundary;
            }
            if sp.theta > PI - POLE_EPS {
                return PoleStatus::SouthOnBoundary;
            }
            theta_sum += sp.theta;
            theta_count += 1;
            if let Some(prev) = prev_phi {
                total_winding += wrap_angle(sp.phi - prev);
            }
            prev_phi = Some(sp.phi);
        }
    }

    // Close the loop back to the first sample.
    let first = curves[0].theta_phi(0.0);
    if let Some(prev) = prev_phi {
        total_winding += wrap_angle(first.phi - prev);
    }

    if (total_winding.abs() - 2.0 * PI).abs() < WINDING_TOL {
        let mean_theta = theta_sum / theta_count as f64;
        if mean_theta < PI / 2.0 {
            PoleStatus::NorthEnclosed
        } else {
            PoleStatus::SouthEnclosed
        }
    } else {
        PoleStatus::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    const R: f64 = 1.5;

    /// A full latitude circle at height `z`, split into four curves on the
    /// same z-normal face.
    fn latitude_loop(z: f64) -> Vec<GeneralCurve> {
        let rho = (R * R - z * z).sqrt();
        let pts: Vec<DVec3> = (0..4)
            .map(|i| {
                let phi = i as f64 * PI / 2.0;
                DVec3::new(rho * phi.cos(), rho * phi.sin(), z)
            })
            .collect();
        (0..4)
            .map(|i| GeneralCurve::new(pts[i], pts[(i + 1) % 4], 1, R).unwrap())
            .collect()
    }

    #[test]
    fn test_latitude_loop_encloses_north_pole() {
        assert_eq!(
            check_pole_enclosure(&latitude_loop(1.2)),
            PoleStatus::NorthEnclosed
        );
    }

    #[test]
    fn test_southern_latitude_loop_encloses_south_pole() {
        assert_eq!(
            check_pole_enclosure(&latitude_loop(-1.2)),
            PoleStatus::SouthEnclosed
        );
    }

    #[test]
    fn test_small_loop_away_from_poles() {
        // A small triangle near the equator around phi = 0.
        let x = 1.2;
        let r = (R * R - x * x).sqrt();
        let a = DVec3::new(x, r, 0.0);
        let b = DVec3::new(x, 0.0, r);
        let c = DVec3::new(x, 0.0, -r);
        let curves = vec![
            GeneralCurve::new(a, b, 5, R).unwrap(),
            GeneralCurve::new(b, c, 5, R).unwrap(),
            GeneralCurve::new(c, a, 5, R).unwrap(),
        ];
        assert_eq!(check_pole_enclosure(&curves), PoleStatus::None);
    }

    #[test]
    fn test_loop_through_pole_reports_on_boundary() {
        // A great circle through both poles on the x = 0 face.
        let a = DVec3::new(0.0, 0.0, R);
        let b = DVec3::new(0.0, R, 0.0);
        let curves = vec![GeneralCurve::new(a, b, 4, R).unwrap()];
        assert_eq!(check_pole_enclosure(&curves), PoleStatus::NorthOnBoundary);
    }
}
