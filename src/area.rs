//! Spherical patch area estimation.
//!
//! Two independent estimators over a closed loop of boundary curves:
//!
//! - [`sampled_excess_area`]: sample a fixed number of points per curve
//!   into a spherical polygon and sum per-triangle spherical excess over a
//!   fan triangulation (L'Huilier's theorem per triangle).
//! - [`adaptive_refinement_area`]: start from the curve endpoints and
//!   repeatedly bisect the polygon edges that deviate most from their
//!   geodesics, until the area stops changing. More accurate for the same
//!   work and the default for intersecting cells.

use crate::curve::GeneralCurve;
use glam::DVec3;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Fraction of polygon edges bisected per refinement round.
const REFINE_FRACTION: f64 = 0.2;

/// Relative area change below which refinement stops.
const REFINE_TOL: f64 = 1e-6;

/// Hard cap on refinement polygon size.
const MAX_REFINE_VERTICES: usize = 10_000;

/// `f64` wrapper ordered by `total_cmp` so it can live in a `BinaryHeap`.
#[derive(PartialEq)]
struct OrdF64(f64);

impl Eq for OrdF64 {}

impl PartialOrd for OrdF64 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrdF64 {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Great-circle distance between two unit vectors, in radians.
#[inline]
fn angular_distance(a: DVec3, b: DVec3) -> f64 {
    a.cross(b).length().atan2(a.dot(b))
}

/// Spherical excess of the triangle spanned by three unit vectors, by
/// L'Huilier's theorem. Degenerate triangles contribute zero, never NaN.
pub fn spherical_triangle_excess(a: DVec3, b: DVec3, c: DVec3) -> f64 {
    let sa = angular_distance(b, c);
    let sb = angular_distance(c, a);
    let sc = angular_distance(a, b);
    let s = 0.5 * (sa + sb + sc);

    let product = (s / 2.0).tan()
        * ((s - sa) / 2.0).tan()
        * ((s - sb) / 2.0).tan()
        * ((s - sc) / 2.0).tan();
    if product <= 0.0 || !product.is_finite() {
        return 0.0;
    }
    4.0 * product.sqrt().atan()
}

/// Area of the spherical polygon with the given vertices (normalized
/// internally), by summing orientation-signed excess over a fan of
/// triangles from the first vertex. Fewer than three vertices give zero.
pub fn spherical_polygon_area(vertices: &[DVec3], radius: f64) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let units: Vec<DVec3> = vertices.iter().map(|v| v.normalize()).collect();
    fan_excess(&units).abs() * radius * radius
}

/// Signed excess sum of the fan from `units[0]`. Each triangle carries the
/// sign of its winding (the scalar triple product), so fan triangles that
/// cross a concave stretch of boundary subtract the notch instead of
/// counting it twice. The magnitude of the sum is the polygon area.
fn fan_excess(units: &[DVec3]) -> f64 {
    let mut total = 0.0;
    for i in 1..units.len() - 1 {
        let excess = spherical_triangle_excess(units[0], units[i], units[i + 1]);
        if units[0].dot(units[i].cross(units[i + 1])) < 0.0 {
            total -= excess;
        } else {
            total += excess;
        }
    }
    total
}

/// Estimate the patch area by sampling `samples_per_curve` points along
/// each boundary curve and measuring the resulting spherical polygon.
///
/// Each curve contributes its samples for `t` in `[0, 1)`; the endpoint at
/// `t = 1` coincides with the next curve's start and is skipped.
pub fn sampled_excess_area(
    curves: &[GeneralCurve],
    samples_per_curve: usize,
    radius: f64,
) -> f64 {
    let n = samples_per_curve.max(1);
    let mut vertices = Vec::with_capacity(curves.len() * n);
    for curve in curves {
        for i in 0..n {
            let t = i as f64 / n as f64;
            vertices.push(curve.point(t));
        }
    }
    spherical_polygon_area(&vertices, radius)
}

/// Estimate the patch area by adaptive polygon refinement.
///
/// Starting from the curve endpoints, each round ranks the polygon edges by
/// how far their chord falls short of the geodesic between their endpoints,
/// bisects the worst [`REFINE_FRACTION`] of them at the sphere-projected
/// chord midpoint, and recomputes the area. Stops when the fractional area
/// change drops below [`REFINE_TOL`] or the polygon exceeds
/// [`MAX_REFINE_VERTICES`].
pub fn adaptive_refinement_area(curves: &[GeneralCurve], radius: f64) -> f64 {
    let mut units: Vec<DVec3> = curves.iter().map(|c| c.p0().normalize()).collect();
    if units.len() < 3 {
        return 0.0;
    }

    let mut area = fan_excess(&units);
    loop {
        let n = units.len();
        let mut heap = BinaryHeap::with_capacity(n);
        for i in 0..n {
            let a = units[i];
            let b = units[(i + 1) % n];
            let error = angular_distance(a, b) - (b - a).length();
            heap.push((OrdF64(error), i));
        }

        let rounds = (((n as f64) * REFINE_FRACTION).ceil() as usize).max(1);
        let mut split: Vec<usize> = (0..rounds).filter_map(|_| heap.pop()).map(|(_, i)| i).collect();
        // Insert back-to-front so earlier edge indices stay valid.
        split.sort_unstable();
        for &i in split.iter().rev() {
            let a = units[i];
            let b = units[(i + 1) % n];
            let mid = (a + b).normalize();
            units.insert(i + 1, mid);
        }

        let new_area = fan_excess(&units);
        let change = (new_area - area).abs();
        area = new_area;
        if change <= REFINE_TOL * area.abs().max(REFINE_TOL) {
            break;
        }
        if units.len() > MAX_REFINE_VERTICES {
            break;
        }
    }
    area.abs() * radius * radius
}
