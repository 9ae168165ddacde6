//! Cell edges and their sphere crossings.

use crate::error::MosaicError;
use crate::topology::{EDGE_CORNERS, EDGE_FACES};
use glam::DVec3;

/// A cell edge that crosses the sphere surface.
///
/// Stores the canonical edge index, the two corner positions in canonical
/// order, the two face indices the edge lies on, and the single point where
/// the segment crosses the sphere.
#[derive(Debug, Clone)]
pub struct Edge {
    index: usize,
    p0: DVec3,
    p1: DVec3,
    faces: [usize; 2],
    intersection: DVec3,
}

impl Edge {
    /// Build the edge with canonical index `index` from the cell's corner
    /// positions, computing where it crosses a sphere of radius `radius`
    /// centered at the origin.
    ///
    /// Exactly one endpoint must be strictly inside the sphere and the
    /// other strictly outside; anything else means the caller's corner
    /// classification and the geometry disagree.
    pub fn new(index: usize, corners: &[DVec3; 8], radius: f64) -> Result<Self, MosaicError> {
        let [ca, cb] = EDGE_CORNERS[index];
        let p0 = corners[ca];
        let p1 = corners[cb];
        let intersection = segment_sphere_intersection(p0, p1, radius)?;
        Ok(Self {
            index,
            p0,
            p1,
            faces: EDGE_FACES[index],
            intersection,
        })
    }

    /// Canonical edge index (0-11).
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn p0(&self) -> DVec3 {
        self.p0
    }

    #[inline]
    pub fn p1(&self) -> DVec3 {
        self.p1
    }

    /// The two faces this edge lies on.
    #[inline]
    pub fn faces(&self) -> [usize; 2] {
        self.faces
    }

    /// The point where the edge crosses the sphere.
    #[inline]
    pub fn intersection(&self) -> DVec3 {
        self.intersection
    }

    /// Whether this edge shares a face with another edge.
    #[inline]
    pub fn shares_face_with(&self, other: &Edge) -> bool {
        self.faces
            .iter()
            .any(|f| other.faces.contains(f))
    }

    /// The face this edge shares with another, if any. Two distinct cube
    /// edges lie on at most one common face.
    pub fn common_face(&self, other: &Edge) -> Option<usize> {
        self.faces
            .iter()
            .copied()
            .find(|f| other.faces.contains(f))
    }
}

/// Solve for the unique crossing of segment `p0..p1` with the sphere of
/// radius `radius`, given exactly one endpoint inside.
///
/// The quadratic `|p0 + t (p1 - p0)|^2 = radius^2` has two real roots when
/// the segment pierces the sphere; the crossing between the endpoints is the
/// root nearer the inside endpoint (larger root when `p0` is inside, smaller
/// otherwise).
fn segment_sphere_intersection(p0: DVec3, p1: DVec3, radius: f64) -> Result<DVec3, MosaicError> {
    let r2 = radius * radius;
    let p0_inside = p0.length_squared() < r2;
    let p1_inside = p1.length_squared() < r2;
    if p0_inside == p1_inside {
        return Err(MosaicError::GeometryInconsistency(format!(
            "segment endpoints on the same side of the sphere: |p0| = {}, |p1| = {}, R = {}",
            p0.length(),
            p1.length(),
            radius
        )));
    }

    let d = p1 - p0;
    let a = d.length_squared();
    let b = 2.0 * p0.dot(d);
    let c = p0.length_squared() - r2;
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return Err(MosaicError::GeometryInconsistency(format!(
            "no real sphere crossing (discriminant = {})",
            disc
        )));
    }

    let sqrt_disc = disc.sqrt();
    let t = if p0_inside {
        (-b + sqrt_disc) / (2.0 * a)
    } else {
        (-b - sqrt_disc) / (2.0 * a)
    };
    if !(0.0..=1.0).contains(&t) {
        return Err(MosaicError::GeometryInconsistency(format!(
            "sphere crossing parameter t = {} outside [0, 1]",
            t
        )));
    }
    Ok(p0 + t * d)
}
