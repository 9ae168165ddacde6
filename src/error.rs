//! Error types for mosaic construction.

use std::fmt;

/// Errors that can occur while classifying cells and building boundary
/// geometry.
///
/// All of these indicate inconsistent input data or an internal bug, not
/// conditions expected at runtime. They are propagated immediately; no
/// retries are attempted anywhere in the crate.
#[derive(Debug, Clone)]
pub enum MosaicError {
    /// A point claimed to be inside/outside the sphere failed a distance
    /// check, or an edge-sphere intersection had no real root or a root
    /// outside the segment. Signals grid/sphere parameters inconsistent
    /// with the caller's corner classification.
    GeometryInconsistency(String),

    /// A cell's (inside corners, intersecting edges) pair matches none of
    /// the nine known topology signatures.
    UnknownTopology {
        inside_corners: usize,
        edge_intersections: usize,
    },

    /// No cyclic ordering of the intersecting edges exists in which
    /// consecutive edges share a face.
    OrderingFailure { num_edges: usize },

    /// Patch curves do not chain into a closed loop within tolerance.
    /// `curve_index` is the first curve whose end fails to meet the next
    /// curve's start.
    OpenLoop { curve_index: usize },

    /// A zero-length normal or otherwise degenerate face was encountered.
    DegenerateGeometry(String),

    /// An error attributed to a specific grid cell during a scan.
    CellFailed {
        ix: usize,
        iy: usize,
        iz: usize,
        source: Box<MosaicError>,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MosaicError::GeometryInconsistency(msg) => {
                write!(f, "geometry inconsistency: {}", msg)
            }
            MosaicError::UnknownTopology {
                inside_corners,
                edge_intersections,
            } => {
                write!(
                    f,
                    "unknown intersection topology: {} inside corners with {} edge intersections",
                    inside_corners, edge_intersections
                )
            }
            MosaicError::OrderingFailure { num_edges } => {
                write!(
                    f,
                    "cannot order {} edges into a closed loop with shared faces",
                    num_edges
                )
            }
            MosaicError::OpenLoop { curve_index } => {
                write!(
                    f,
                    "boundary curves do not close: mismatch after curve {}",
                    curve_index
                )
            }
            MosaicError::DegenerateGeometry(msg) => {
                write!(f, "degenerate geometry: {}", msg)
            }
            MosaicError::CellFailed { ix, iy, iz, source } => {
                write!(f, "cell ({}, {}, {}): {}", ix, iy, iz, source)
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MosaicError::CellFailed { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl MosaicError {
    /// Wrap an error with the indices of the cell it occurred in.
    pub(crate) fn in_cell(self, ix: usize, iy: usize, iz: usize) -> MosaicError {
        MosaicError::CellFailed {
            ix,
            iy,
            iz,
            source: Box::new(self),
        }
    }
}
