//! Axis, Cartesian, and spherical grids.

mod axis;
mod cartesian;
mod spherical;

pub use axis::Grid1D;
pub use cartesian::CartesianGrid;
pub use spherical::SphericalGrid;
