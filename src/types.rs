//! Core small types: spherical coordinates and polyline vertices.

use bytemuck::{Pod, Zeroable};
use glam::DVec3;
use std::f64::consts::PI;

/// Wrap an angle into `(-PI, PI]`.
#[inline]
pub(crate) fn wrap_angle(mut a: f64) -> f64 {
    while a > PI {
        a -= 2.0 * PI;
    }
    while a <= -PI {
        a += 2.0 * PI;
    }
    a
}

/// A point on the sphere in spherical coordinates.
///
/// `theta` is the polar angle in `[0, PI]` (0 at the north pole), `phi` the
/// azimuthal angle normalized into `(-PI, PI]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThetaPhi {
    pub theta: f64,
    pub phi: f64,
}

impl ThetaPhi {
    /// Create a spherical coordinate pair. `phi` is normalized into
    /// `(-PI, PI]`; `theta` is expected to be in `[0, PI]`.
    #[inline]
    pub fn new(theta: f64, phi: f64) -> Self {
        debug_assert!((-1e-12..=PI + 1e-12).contains(&theta), "theta = {}", theta);
        Self {
            theta,
            phi: wrap_angle(phi),
        }
    }

    /// Spherical coordinates of a Cartesian point (sphere centered at the
    /// origin). The radius is discarded.
    pub fn from_point(p: DVec3) -> Self {
        let len = p.length();
        let theta = if len > 0.0 {
            (p.z / len).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };
        Self::new(theta, p.y.atan2(p.x))
    }

    /// Convert back to a Cartesian point on a sphere of the given radius.
    pub fn to_cartesian(self, radius: f64) -> DVec3 {
        let sin_theta = self.theta.sin();
        DVec3::new(
            radius * sin_theta * self.phi.cos(),
            radius * sin_theta * self.phi.sin(),
            radius * self.theta.cos(),
        )
    }

    /// Latitude in radians (`PI/2 - theta`).
    #[inline]
    pub fn latitude(self) -> f64 {
        PI / 2.0 - self.theta
    }
}

/// A single polyline vertex for handing curve samples to a renderer.
///
/// `#[repr(C)]` with a stable layout so a `&[PolyVertex]` can be viewed as a
/// flat `&[f32]` buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PolyVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl PolyVertex {
    #[inline]
    pub fn from_point(p: DVec3) -> Self {
        Self {
            x: p.x as f32,
            y: p.y as f32,
            z: p.z as f32,
        }
    }
}

/// View a polyline as a flat `[x0, y0, z0, x1, ...]` float buffer.
#[inline]
pub fn polyline_as_f32(vertices: &[PolyVertex]) -> &[f32] {
    bytemuck::cast_slice(vertices)
}
