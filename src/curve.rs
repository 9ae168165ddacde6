//! Boundary curves: arcs lying on both the sphere and one cell face.
//!
//! Each face orientation gets its own closed-form parametrization. A face
//! plane cuts the sphere in a circle; walking that circle between the two
//! endpoints gives theta(t) and phi(t), t in [0, 1]:
//!
//! - z-normal face: theta is constant, phi interpolates along the shorter
//!   azimuthal path.
//! - x-normal face: the circle has radius r = sqrt(R^2 - x0^2) in the yz
//!   plane; the auxiliary angle psi = atan2(z, y) interpolates linearly and
//!   theta, phi derive from it.
//! - y-normal face: same with psi = atan2(z, x).
//!
//! Derivatives are centered finite differences over the closed forms, and
//! arc length is either a closed-form circular arc (constant theta, or a
//! great circle through a zero-offset face) or the spherical arc-length
//! integral by Simpson's rule.

use crate::error::MosaicError;
use crate::types::{wrap_angle, PolyVertex, ThetaPhi};
use glam::DVec3;

/// Finite-difference step for theta/phi derivatives.
const DERIV_STEP: f64 = 1e-5;

/// Simpson subdivisions for the arc-length integral.
const SIMPSON_SUBDIVISIONS: usize = 1000;

/// Offsets below this are treated as zero, making the face circle a great
/// circle with a closed-form length.
const GREAT_CIRCLE_EPS: f64 = 1e-12;

/// Per-orientation parametrization state.
#[derive(Debug, Clone, Copy)]
enum FaceParam {
    /// Constant theta; phi interpolates `phi0 + t * dphi`.
    ZNormal { theta: f64, phi0: f64, dphi: f64 },
    /// Constant x = offset; psi = atan2(z, y) interpolates.
    XNormal {
        offset: f64,
        circle_radius: f64,
        psi0: f64,
        dpsi: f64,
    },
    /// Constant y = offset; psi = atan2(z, x) interpolates.
    YNormal {
        offset: f64,
        circle_radius: f64,
        psi0: f64,
        dpsi: f64,
    },
}

/// A curve on the sphere constrained to one planar cell face, running from
/// `p0` to `p1`.
#[derive(Debug, Clone)]
pub struct GeneralCurve {
    face: usize,
    p0: DVec3,
    p1: DVec3,
    sp0: ThetaPhi,
    sp1: ThetaPhi,
    radius: f64,
    param: FaceParam,
    path_length: f64,
}

impl GeneralCurve {
    /// Build the curve between two sphere-surface points on face `face`.
    ///
    /// Both points must actually lie on the sphere (within rounding) and on
    /// a common plane of the given orientation; the constant coordinate is
    /// read off `p0`.
    pub fn new(p0: DVec3, p1: DVec3, face: usize, radius: f64) -> Result<Self, MosaicError> {
        let sp0 = ThetaPhi::from_point(p0);
        let sp1 = ThetaPhi::from_point(p1);

        let param = match face {
            0 | 1 => {
                check_coplanar(p0.z, p1.z, "z")?;
                let theta = (p0.z / radius).clamp(-1.0, 1.0).acos();
                FaceParam::ZNormal {
                    theta,
                    phi0: sp0.phi,
                    dphi: wrap_angle(sp1.phi - sp0.phi),
                }
            }
            4 | 5 => {
                check_coplanar(p0.x, p1.x, "x")?;
                let offset = p0.x;
                let circle_radius = face_circle_radius(radius, offset)?;
                let psi0 = p0.z.atan2(p0.y);
                let psi1 = p1.z.atan2(p1.y);
                FaceParam::XNormal {
                    offset,
                    circle_radius,
                    psi0,
                    dpsi: wrap_angle(psi1 - psi0),
                }
            }
            2 | 3 => {
                check_coplanar(p0.y, p1.y, "y")?;
                let offset = p0.y;
                let circle_radius = face_circle_radius(radius, offset)?;
                let psi0 = p0.z.atan2(p0.x);
                let psi1 = p1.z.atan2(p1.x);
                FaceParam::YNormal {
                    offset,
                    circle_radius,
                    psi0,
                    dpsi: wrap_angle(psi1 - psi0),
                }
            }
            _ => {
                return Err(MosaicError::GeometryInconsistency(format!(
                    "face index {} out of range",
                    face
                )))
            }
        };

        let mut curve = Self {
            face,
            p0,
            p1,
            sp0,
            sp1,
            radius,
            param,
            path_length: 0.0,
        };
        curve.path_length = curve.compute_path_length();
        Ok(curve)
    }

    #[inline]
    pub fn face(&self) -> usize {
        self.face
    }

    #[inline]
    pub fn p0(&self) -> DVec3 {
        self.p0
    }

    #[inline]
    pub fn p1(&self) -> DVec3 {
        self.p1
    }

    #[inline]
    pub fn sp0(&self) -> ThetaPhi {
        self.sp0
    }

    #[inline]
    pub fn sp1(&self) -> ThetaPhi {
        self.sp1
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Cached arc length of the curve.
    #[inline]
    pub fn path_length(&self) -> f64 {
        self.path_length
    }

    /// Spherical coordinates at parameter `t`. Defined for all real `t`;
    /// the curve proper is `t` in `[0, 1]`.
    pub fn theta_phi(&self, t: f64) -> ThetaPhi {
        match self.param {
            FaceParam::ZNormal { theta, phi0, dphi } => {
                ThetaPhi::new(theta, phi0 + t * dphi)
            }
            FaceParam::XNormal {
                offset,
                circle_radius,
                psi0,
                dpsi,
            } => {
                let psi = psi0 + t * dpsi;
                let (sin_psi, cos_psi) = psi.sin_cos();
                let theta = (circle_radius * sin_psi / self.radius)
                    .clamp(-1.0, 1.0)
                    .acos();
                ThetaPhi::new(theta, (circle_radius * cos_psi).atan2(offset))
            }
            FaceParam::YNormal {
                offset,
                circle_radius,
                psi0,
                dpsi,
            } => {
                let psi = psi0 + t * dpsi;
                let (sin_psi, cos_psi) = psi.sin_cos();
                let theta = (circle_radius * sin_psi / self.radius)
                    .clamp(-1.0, 1.0)
                    .acos();
                ThetaPhi::new(theta, offset.atan2(circle_radius * cos_psi))
            }
        }
    }

    /// Cartesian point at parameter `t`.
    #[inline]
    pub fn point(&self, t: f64) -> DVec3 {
        self.theta_phi(t).to_cartesian(self.radius)
    }

    /// `d theta / dt` by a 5-point centered stencil.
    pub fn dtheta_dt(&self, t: f64) -> f64 {
        let h = DERIV_STEP;
        let f = |u: f64| self.theta_phi(u).theta;
        (f(t - 2.0 * h) - 8.0 * f(t - h) + 8.0 * f(t + h) - f(t + 2.0 * h)) / (12.0 * h)
    }

    /// `d phi / dt` by a 5-point centered stencil, with each sample wrapped
    /// relative to `phi(t)` so the branch cut at +-pi cannot corrupt the
    /// differences.
    pub fn dphi_dt(&self, t: f64) -> f64 {
        let h = DERIV_STEP;
        let base = self.theta_phi(t).phi;
        let f = |u: f64| base + wrap_angle(self.theta_phi(u).phi - base);
        (f(t - 2.0 * h) - 8.0 * f(t - h) + 8.0 * f(t + h) - f(t + 2.0 * h)) / (12.0 * h)
    }

    /// Sample the curve into `n` polyline vertices (`n >= 2`), endpoints
    /// included, for handing to a renderer.
    pub fn polyline(&self, n: usize) -> Vec<PolyVertex> {
        let n = n.max(2);
        (0..n)
            .map(|i| {
                let t = i as f64 / (n - 1) as f64;
                PolyVertex::from_point(self.point(t))
            })
            .collect()
    }

    fn compute_path_length(&self) -> f64 {
        match self.param {
            // The curve is a latitude-circle arc.
            FaceParam::ZNormal { theta, dphi, .. } => self.radius * theta.sin() * dphi.abs(),
            FaceParam::XNormal { offset, dpsi, .. }
            | FaceParam::YNormal { offset, dpsi, .. } => {
                if offset.abs() < GREAT_CIRCLE_EPS {
                    // Zero offset makes the face circle a great circle.
                    self.radius * dpsi.abs()
                } else {
                    self.integrate_arc_length()
                }
            }
        }
    }

    /// Simpson's rule over the spherical arc-length integrand
    /// `R sqrt(theta'^2 + sin^2(theta) phi'^2)`.
    fn integrate_arc_length(&self) -> f64 {
        let n = SIMPSON_SUBDIVISIONS;
        let h = 1.0 / n as f64;
        let integrand = |t: f64| {
            let dtheta = self.dtheta_dt(t);
            let dphi = self.dphi_dt(t);
            let sin_theta = self.theta_phi(t).theta.sin();
            self.radius * (dtheta * dtheta + sin_theta * sin_theta * dphi * dphi).sqrt()
        };

        let mut sum = integrand(0.0) + integrand(1.0);
        for i in 1..n {
            let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
            sum += weight * integrand(i as f64 * h);
        }
        sum * h / 3.0
    }
}

fn check_coplanar(c0: f64, c1: f64, axis: &str) -> Result<(), MosaicError> {
    if (c0 - c1).abs() > 1e-9 {
        return Err(MosaicError::GeometryInconsistency(format!(
            "curve endpoints not on a common {}-normal plane: {} vs {}",
            axis, c0, c1
        )));
    }
    Ok(())
}

/// Radius of the circle cut by a plane at distance `offset` from the sphere
/// center.
fn face_circle_radius(radius: f64, offset: f64) -> Result<f64, MosaicError> {
    let r2 = radius * radius - offset * offset;
    if r2 <= 0.0 {
        return Err(MosaicError::DegenerateGeometry(format!(
            "face plane at offset {} does not cut a sphere of radius {}",
            offset, radius
        )));
    }
    Ok(r2.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const R: f64 = 1.5;

    fn assert_on_sphere(curve: &GeneralCurve) {
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            assert!((curve.point(t).length() - R).abs() < 1e-9, "t = {}", t);
        }
    }

    #[test]
    fn test_z_normal_curve_stays_on_plane() {
        let z = 0.9;
        let rho = (R * R - z * z).sqrt();
        let p0 = DVec3::new(rho, 0.0, z);
        let p1 = DVec3::new(0.0, rho, z);
        let curve = GeneralCurve::new(p0, p1, 1, R).unwrap();
        assert_on_sphere(&curve);
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            assert!((curve.point(t).z - z).abs() < 1e-9);
        }
        // Quarter of a latitude circle.
        let expected = R * (z / R).acos().sin() * PI / 2.0;
        assert!((curve.path_length() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_x_normal_curve_stays_on_plane() {
        let x = 0.7;
        let r = (R * R - x * x).sqrt();
        let p0 = DVec3::new(x, r, 0.0);
        let p1 = DVec3::new(x, 0.0, r);
        let curve = GeneralCurve::new(p0, p1, 5, R).unwrap();
        assert_on_sphere(&curve);
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            assert!((curve.point(t).x - x).abs() < 1e-9);
        }
        // The face circle has radius r; a quarter of it has chord length
        // r * pi / 2, and the arc on the sphere is the same curve.
        assert!((curve.path_length() - r * PI / 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_y_normal_endpoints_exact() {
        let y = -0.4;
        let r = (R * R - y * y).sqrt();
        let p0 = DVec3::new(r * 0.6, y, r * 0.8);
        let p1 = DVec3::new(r, y, 0.0);
        let curve = GeneralCurve::new(p0, p1, 2, R).unwrap();
        assert!((curve.point(0.0) - p0).length() < 1e-9);
        assert!((curve.point(1.0) - p1).length() < 1e-9);
        assert_on_sphere(&curve);
    }

    #[test]
    fn test_great_circle_closed_form() {
        // x = 0 face: the cut is a great circle, so a quarter arc has
        // length R * pi / 2 exactly.
        let p0 = DVec3::new(0.0, R, 0.0);
        let p1 = DVec3::new(0.0, 0.0, R);
        let curve = GeneralCurve::new(p0, p1, 4, R).unwrap();
        assert!((curve.path_length() - R * PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_length_invariant_under_reversal() {
        let x = 0.7;
        let r = (R * R - x * x).sqrt();
        let p0 = DVec3::new(x, r * 0.9, r * (1.0 - 0.81f64).sqrt());
        let p1 = DVec3::new(x, 0.0, r);
        let fwd = GeneralCurve::new(p0, p1, 5, R).unwrap();
        let rev = GeneralCurve::new(p1, p0, 5, R).unwrap();
        assert!((fwd.path_length() - rev.path_length()).abs() < 1e-9);
    }

    #[test]
    fn test_phi_wraparound_takes_short_path() {
        // Two points straddling phi = pi on a latitude circle; the short
        // path crosses the seam rather than sweeping nearly 2 pi.
        let z = 0.5;
        let rho = (R * R - z * z).sqrt();
        let phi0 = PI - 0.1;
        let phi1 = -PI + 0.1;
        let p0 = DVec3::new(rho * phi0.cos(), rho * phi0.sin(), z);
        let p1 = DVec3::new(rho * phi1.cos(), rho * phi1.sin(), z);
        let curve = GeneralCurve::new(p0, p1, 0, R).unwrap();
        let theta = (z / R).acos();
        assert!((curve.path_length() - R * theta.sin() * 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_mismatched_plane_rejected() {
        let err = GeneralCurve::new(
            DVec3::new(0.0, 0.0, R),
            DVec3::new(0.0, R, 0.0),
            0,
            R,
        );
        assert!(matches!(err, Err(MosaicError::GeometryInconsistency(_))));
    }

    #[test]
    fn test_polyline_sampling() {
        let z = 0.9;
        let rho = (R * R - z * z).sqrt();
        let curve =
            GeneralCurve::new(DVec3::new(rho, 0.0, z), DVec3::new(0.0, rho, z), 1, R).unwrap();
        let line = curve.polyline(5);
        assert_eq!(line.len(), 5);
        assert!((f64::from(line[0].z) - z).abs() < 1e-6);
        assert!((f64::from(line[4].z) - z).abs() < 1e-6);
    }
}
