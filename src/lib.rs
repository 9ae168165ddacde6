//! Sphere / Cartesian-grid intersection mosaics.
//!
//! This crate classifies how a sphere (centered at the grid origin) meets
//! each cell of a 3D axis-aligned grid, and for every intersecting cell
//! builds the exact boundary separating inside-sphere from outside-sphere
//! volume: ordered edge crossings, curves constrained to both the sphere
//! and one cell face, closed patches, and spherical patch areas.
//!
//! # Example
//!
//! ```
//! use s2_mosaic::{find_intersecting_cells, CartesianGrid, IntersectionType, ScanReport};
//!
//! // One cell spanning [0, 2]^3 against a radius-1.5 sphere: a single
//! // corner (the origin) is inside, so the scan finds one cornerIn cell.
//! let grid = CartesianGrid::uniform((0.0, 2.0), (0.0, 2.0), (0.0, 2.0), 2, 2, 2);
//! let cells = find_intersecting_cells(&grid, 1.5).unwrap();
//!
//! assert_eq!(cells.len(), 1);
//! assert_eq!(cells[0].kind(), IntersectionType::CornerIn);
//! assert_eq!(cells[0].curves().len(), 3);
//!
//! let report = ScanReport::from_cells(&cells);
//! assert_eq!(report.count(IntersectionType::CornerIn), 1);
//! ```

mod area;
mod cell;
mod curve;
mod edge;
mod error;
mod grid;
mod kiss;
mod ordering;
mod patch;
mod pole;
mod scan;
mod types;

// Canonical cube tables, public for callers that index cells directly.
pub mod topology;

pub use area::{
    adaptive_refinement_area, sampled_excess_area, spherical_polygon_area,
    spherical_triangle_excess,
};
pub use cell::{Cell, IntersectionType};
pub use curve::GeneralCurve;
pub use edge::Edge;
pub use error::MosaicError;
pub use grid::{CartesianGrid, Grid1D, SphericalGrid};
pub use kiss::{closest_face_point, kiss_test, projected_face_point};
pub use ordering::order_edges;
pub use patch::{Patch, PatchIndex};
pub use pole::{check_pole_enclosure, PoleStatus};
pub use scan::{find_intersecting_cells, find_intersecting_cells_lossy, MosaicGrid, ScanReport};
pub use types::{polyline_as_f32, PolyVertex, ThetaPhi};
