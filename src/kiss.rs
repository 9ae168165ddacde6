//! The kiss test: near-tangent cells with no corner or edge crossing.
//!
//! A cell can sit entirely outside the sphere by corner distance yet still
//! be pierced through the interior of one face. The test finds the face
//! nearest the sphere center and asks whether its closest point to the
//! center is inside the sphere.
//!
//! Two closest-point constructions survive here. [`closest_face_point`]
//! projects the center onto the face plane and clamps into the face
//! rectangle; it always yields the true closest point and is what
//! [`kiss_test`] uses. [`projected_face_point`] is the older variant that
//! only accepts projections landing inside the rectangle, kept as a named
//! alternative for callers that want the strict-interior behavior.

use crate::topology::{face_average_distance_squared, face_corners, NUM_FACES};
use glam::DVec3;

/// The axis a face is normal to, from the canonical face numbering.
#[inline]
fn face_axis(face: usize) -> usize {
    match face {
        0 | 1 => 2,
        2 | 3 => 1,
        _ => 0,
    }
}

/// In-plane bounds of an axis-aligned rectangular face, as
/// `(axis_a, min_a, max_a, axis_b, min_b, max_b, normal_axis, plane)`.
fn face_bounds(corners: &[DVec3; 8], face: usize) -> (usize, f64, f64, usize, f64, f64, usize, f64) {
    let quad = face_corners(corners, face);
    let normal_axis = face_axis(face);
    let (axis_a, axis_b) = match normal_axis {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    };
    let a: Vec<f64> = quad.iter().map(|c| c[axis_a]).collect();
    let b: Vec<f64> = quad.iter().map(|c| c[axis_b]).collect();
    let min_a = a.iter().copied().fold(f64::INFINITY, f64::min);
    let max_a = a.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min_b = b.iter().copied().fold(f64::INFINITY, f64::min);
    let max_b = b.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (
        axis_a,
        min_a,
        max_a,
        axis_b,
        min_b,
        max_b,
        normal_axis,
        quad[0][normal_axis],
    )
}

/// Closest point of a cell face to the origin: project the origin onto the
/// face plane, then clamp into the face rectangle.
pub fn closest_face_point(corners: &[DVec3; 8], face: usize) -> DVec3 {
    let (axis_a, min_a, max_a, axis_b, min_b, max_b, normal_axis, plane) =
        face_bounds(corners, face);
    let mut p = DVec3::ZERO;
    p[normal_axis] = plane;
    p[axis_a] = 0.0f64.clamp(min_a, max_a);
    p[axis_b] = 0.0f64.clamp(min_b, max_b);
    p
}

/// Projection of the origin onto the face plane, accepted only when it
/// lands inside the face rectangle. Legacy variant of
/// [`closest_face_point`].
pub fn projected_face_point(corners: &[DVec3; 8], face: usize) -> Option<DVec3> {
    let (_axis_a, min_a, max_a, _axis_b, min_b, max_b, normal_axis, plane) =
        face_bounds(corners, face);
    if !(min_a..=max_a).contains(&0.0) || !(min_b..=max_b).contains(&0.0) {
        return None;
    }
    let mut p = DVec3::ZERO;
    p[normal_axis] = plane;
    Some(p)
}

/// Test an entirely-outside cell for a face kiss.
///
/// Picks the face whose corners are on average nearest the sphere center
/// and returns the face's closest point when that point lies strictly
/// inside the sphere.
pub fn kiss_test(corners: &[DVec3; 8], radius: f64) -> Option<DVec3> {
    let nearest_face = (0..NUM_FACES)
        .min_by(|&a, &b| {
            face_average_distance_squared(corners, a)
                .total_cmp(&face_average_distance_squared(corners, b))
        })
        .unwrap_or(0);
    let closest = closest_face_point(corners, nearest_face);
    (closest.length() < radius).then_some(closest)
}
