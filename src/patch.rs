//! Closed patches on the sphere surface.

use crate::area::{adaptive_refinement_area, sampled_excess_area};
use crate::curve::GeneralCurve;
use crate::error::MosaicError;

/// Endpoint chaining tolerance, in the grid's length units.
const CLOSURE_TOL: f64 = 1e-6;

/// Lattice cell index of a patch: three Cartesian interval indices plus two
/// angular indices. The angular components are carried for callers that
/// also bin by the spherical grid; the geometric core never reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchIndex {
    pub ix: usize,
    pub iy: usize,
    pub iz: usize,
    pub itheta: usize,
    pub iphi: usize,
}

/// An ordered, cyclic list of boundary curves forming a closed loop on the
/// sphere, tied to one lattice cell.
#[derive(Debug, Clone)]
pub struct Patch {
    curves: Vec<GeneralCurve>,
    index: PatchIndex,
    radius: f64,
}

impl Patch {
    /// Build a patch from an ordered curve list, checking that each curve's
    /// end meets the next curve's start (cyclically) within tolerance.
    pub fn new(
        curves: Vec<GeneralCurve>,
        index: PatchIndex,
        radius: f64,
    ) -> Result<Self, MosaicError> {
        if curves.len() < 3 {
            return Err(MosaicError::OpenLoop { curve_index: 0 });
        }
        for i in 0..curves.len() {
            let next = &curves[(i + 1) % curves.len()];
            if (curves[i].p1() - next.p0()).length() > CLOSURE_TOL {
                return Err(MosaicError::OpenLoop { curve_index: i });
            }
        }
        Ok(Self {
            curves,
            index,
            radius,
        })
    }

    #[inline]
    pub fn curves(&self) -> &[GeneralCurve] {
        &self.curves
    }

    #[inline]
    pub fn index(&self) -> PatchIndex {
        self.index
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Total arc length around the patch boundary.
    pub fn perimeter(&self) -> f64 {
        self.curves.iter().map(|c| c.path_length()).sum()
    }

    /// Patch area by adaptive polygon refinement. The default estimator.
    pub fn area(&self) -> f64 {
        adaptive_refinement_area(&self.curves, self.radius)
    }

    /// Patch area by fixed-density boundary sampling and spherical excess.
    pub fn area_sampled(&self, samples_per_curve: usize) -> f64 {
        sampled_excess_area(&self.curves, samples_per_curve, self.radius)
    }
}
