//! Per-cell classification and boundary assembly.
//!
//! A cell's relationship to the sphere is fully determined by which of its
//! 8 corners are inside. The (inside corners, crossing edges) pair maps
//! onto one of nine topological intersection types; for the eight
//! non-degenerate types the crossing edges are ordered into a cycle and one
//! boundary curve is built per consecutive edge pair on their shared face.

use crate::curve::GeneralCurve;
use crate::edge::Edge;
use crate::error::MosaicError;
use crate::grid::CartesianGrid;
use crate::kiss::kiss_test;
use crate::ordering::order_edges;
use crate::patch::{Patch, PatchIndex};
use crate::pole::{check_pole_enclosure, PoleStatus};
use crate::topology::{cell_corners, intersecting_edges};
use glam::DVec3;

/// The nine topological ways a sphere can meet a rectangular cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntersectionType {
    /// One corner inside, three crossing edges.
    CornerIn,
    /// One corner outside, three crossing edges.
    CornerOut,
    /// Two adjacent corners inside, four crossing edges.
    DoubleCornerIn,
    /// Two adjacent corners outside, four crossing edges.
    DoubleCornerOut,
    /// One full face inside, four crossing edges.
    FaceCut,
    /// Three corners inside, five crossing edges.
    CornerPull,
    /// Five corners inside, five crossing edges.
    CornerPush,
    /// Four inside corners across six crossing edges.
    SkewCut,
    /// No corner or edge crossing; the sphere pierces a face interior.
    Kiss,
}

impl IntersectionType {
    /// Map an (inside corners, crossing edges) signature onto a type.
    ///
    /// The table is exhaustive: any pair outside it is an error, never
    /// coerced to a nearby type.
    pub fn classify(
        inside_corners: usize,
        edge_intersections: usize,
    ) -> Result<Self, MosaicError> {
        match (inside_corners, edge_intersections) {
            (1, 3) => Ok(IntersectionType::CornerIn),
            (7, 3) => Ok(IntersectionType::CornerOut),
            (2, 4) => Ok(IntersectionType::DoubleCornerIn),
            (6, 4) => Ok(IntersectionType::DoubleCornerOut),
            (4, 4) => Ok(IntersectionType::FaceCut),
            (3, 5) => Ok(IntersectionType::CornerPull),
            (5, 5) => Ok(IntersectionType::CornerPush),
            (4, 6) => Ok(IntersectionType::SkewCut),
            (0 | 8, 0) => Ok(IntersectionType::Kiss),
            _ => Err(MosaicError::UnknownTopology {
                inside_corners,
                edge_intersections,
            }),
        }
    }

    /// Stable display label for reports and tables.
    pub fn label(self) -> &'static str {
        match self {
            IntersectionType::CornerIn => "cornerIn",
            IntersectionType::CornerOut => "cornerOut",
            IntersectionType::DoubleCornerIn => "doubleCornerIn",
            IntersectionType::DoubleCornerOut => "doubleCornerOut",
            IntersectionType::FaceCut => "faceCut",
            IntersectionType::CornerPull => "cornerPull",
            IntersectionType::CornerPush => "cornerPush",
            IntersectionType::SkewCut => "skewCut",
            IntersectionType::Kiss => "kiss",
        }
    }

    /// All nine types, in report order.
    pub const ALL: [IntersectionType; 9] = [
        IntersectionType::CornerIn,
        IntersectionType::CornerOut,
        IntersectionType::DoubleCornerIn,
        IntersectionType::DoubleCornerOut,
        IntersectionType::FaceCut,
        IntersectionType::CornerPull,
        IntersectionType::CornerPush,
        IntersectionType::SkewCut,
        IntersectionType::Kiss,
    ];
}

/// One grid cell the sphere intersects, with its classified type, ordered
/// crossing edges, and boundary curves. Immutable once built.
#[derive(Debug, Clone)]
pub struct Cell {
    ix: usize,
    iy: usize,
    iz: usize,
    corners: [DVec3; 8],
    inside_mask: u8,
    kind: IntersectionType,
    edges: Vec<Edge>,
    curves: Vec<GeneralCurve>,
    pole_status: PoleStatus,
    kiss_point: Option<DVec3>,
    radius: f64,
}

impl Cell {
    /// Analyze one grid cell against a sphere of radius `radius` centered
    /// at the origin.
    ///
    /// Returns `Ok(None)` for cells entirely inside or entirely outside
    /// the sphere (after the kiss test), `Ok(Some(cell))` for any of the
    /// nine intersection types, and an error when the geometry contradicts
    /// the corner classification.
    pub fn analyze(
        grid: &CartesianGrid,
        ix: usize,
        iy: usize,
        iz: usize,
        radius: f64,
    ) -> Result<Option<Cell>, MosaicError> {
        Self::analyze_inner(grid, ix, iy, iz, radius).map_err(|e| e.in_cell(ix, iy, iz))
    }

    fn analyze_inner(
        grid: &CartesianGrid,
        ix: usize,
        iy: usize,
        iz: usize,
        radius: f64,
    ) -> Result<Option<Cell>, MosaicError> {
        let corners = cell_corners(grid, ix, iy, iz);
        let r2 = radius * radius;
        let mut inside_mask = 0u8;
        for (k, c) in corners.iter().enumerate() {
            if c.length_squared() < r2 {
                inside_mask |= 1 << k;
            }
        }

        // Entirely inside: the cell is the convex hull of corners all
        // inside a convex ball, so no face can reach the surface.
        if inside_mask == 0xFF {
            return Ok(None);
        }

        if inside_mask == 0 {
            return Ok(kiss_test(&corners, radius).map(|kiss_point| Cell {
                ix,
                iy,
                iz,
                corners,
                inside_mask,
                kind: IntersectionType::Kiss,
                edges: Vec::new(),
                curves: Vec::new(),
                pole_status: PoleStatus::None,
                kiss_point: Some(kiss_point),
                radius,
            }));
        }

        let edge_indices = intersecting_edges(inside_mask);
        let kind =
            IntersectionType::classify(inside_mask.count_ones() as usize, edge_indices.len())?;

        let edges: Vec<Edge> = edge_indices
            .iter()
            .map(|&e| Edge::new(e, &corners, radius))
            .collect::<Result<_, _>>()?;
        let edges = order_edges(edges)?;

        let mut curves = Vec::with_capacity(edges.len());
        for i in 0..edges.len() {
            let next = &edges[(i + 1) % edges.len()];
            let face = edges[i].common_face(next).ok_or_else(|| {
                MosaicError::GeometryInconsistency(format!(
                    "ordered edges {} and {} share no face",
                    edges[i].index(),
                    next.index()
                ))
            })?;
            curves.push(GeneralCurve::new(
                edges[i].intersection(),
                next.intersection(),
                face,
                radius,
            )?);
        }

        let pole_status = check_pole_enclosure(&curves);

        Ok(Some(Cell {
            ix,
            iy,
            iz,
            corners,
            inside_mask,
            kind,
            edges,
            curves,
            pole_status,
            kiss_point: None,
            radius,
        }))
    }

    /// Grid indices of this cell.
    #[inline]
    pub fn indices(&self) -> (usize, usize, usize) {
        (self.ix, self.iy, self.iz)
    }

    /// The cell's 8 corner positions in canonical order.
    #[inline]
    pub fn corners(&self) -> &[DVec3; 8] {
        &self.corners
    }

    /// Bitmask of inside corners (bit `k` set means corner `k` is inside).
    #[inline]
    pub fn inside_mask(&self) -> u8 {
        self.inside_mask
    }

    #[inline]
    pub fn num_inside_corners(&self) -> usize {
        self.inside_mask.count_ones() as usize
    }

    #[inline]
    pub fn kind(&self) -> IntersectionType {
        self.kind
    }

    /// Crossing edges in boundary-cycle order. Empty for kiss cells.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Ordered boundary curves. Empty for kiss cells.
    #[inline]
    pub fn curves(&self) -> &[GeneralCurve] {
        &self.curves
    }

    #[inline]
    pub fn pole_status(&self) -> PoleStatus {
        self.pole_status
    }

    /// Closest face point, present only for kiss cells.
    #[inline]
    pub fn kiss_point(&self) -> Option<DVec3> {
        self.kiss_point
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Assemble the boundary curves into a validated closed patch. Kiss
    /// cells have no boundary and return `None`.
    pub fn patch(&self, itheta: usize, iphi: usize) -> Result<Option<Patch>, MosaicError> {
        if self.curves.is_empty() {
            return Ok(None);
        }
        let index = PatchIndex {
            ix: self.ix,
            iy: self.iy,
            iz: self.iz,
            itheta,
            iphi,
        };
        Patch::new(self.curves.clone(), index, self.radius).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid1D;
    use std::f64::consts::PI;

    const R: f64 = 1.5;

    fn single_cell_grid(x: (f64, f64), y: (f64, f64), z: (f64, f64)) -> CartesianGrid {
        CartesianGrid::new(
            Grid1D::uniform(x.0, x.1, 2),
            Grid1D::uniform(y.0, y.1, 2),
            Grid1D::uniform(z.0, z.1, 2),
            DVec3::ZERO,
        )
    }

    fn assert_closed(cell: &Cell) {
        let curves = cell.curves();
        for i in 0..curves.len() {
            let next = &curves[(i + 1) % curves.len()];
            assert!(
                (curves[i].p1() - next.p0()).length() < 1e-6,
                "curves {} and {} do not chain",
                i,
                (i + 1) % curves.len()
            );
        }
    }

    #[test]
    fn test_classify_table_exhaustive() {
        assert_eq!(
            IntersectionType::classify(1, 3).unwrap(),
            IntersectionType::CornerIn
        );
        assert_eq!(
            IntersectionType::classify(4, 6).unwrap(),
            IntersectionType::SkewCut
        );
        assert_eq!(
            IntersectionType::classify(0, 0).unwrap(),
            IntersectionType::Kiss
        );
        assert!(matches!(
            IntersectionType::classify(4, 5),
            Err(MosaicError::UnknownTopology { .. })
        ));
        assert!(matches!(
            IntersectionType::classify(2, 3),
            Err(MosaicError::UnknownTopology { .. })
        ));
    }

    #[test]
    fn test_corner_in_octant() {
        // One corner at the origin: the boundary is the octant triangle.
        let grid = single_cell_grid((0.0, 2.0), (0.0, 2.0), (0.0, 2.0));
        let cell = Cell::analyze(&grid, 0, 0, 0, R).unwrap().unwrap();
        assert_eq!(cell.kind(), IntersectionType::CornerIn);
        assert_eq!(cell.num_inside_corners(), 1);
        assert_eq!(cell.edges().len(), 3);
        assert_eq!(cell.curves().len(), 3);
        assert_closed(&cell);

        let patch = cell.patch(0, 0).unwrap().unwrap();
        let curve_sum: f64 = cell.curves().iter().map(|c| c.path_length()).sum();
        assert_eq!(patch.perimeter(), curve_sum);
        assert!((patch.perimeter() - 3.0 * R * PI / 2.0).abs() < 1e-9);
        let exact = PI * R * R / 2.0;
        assert!((patch.area() - exact).abs() / exact < 1e-6);

        // The boundary passes through (0, 0, R): the north pole is on it.
        assert_eq!(cell.pole_status(), PoleStatus::NorthOnBoundary);
    }

    #[test]
    fn test_corner_out() {
        // A unit cell with only the far corner outside the sphere.
        let grid = single_cell_grid((0.0, 1.0), (0.0, 1.0), (0.0, 1.0));
        let cell = Cell::analyze(&grid, 0, 0, 0, R).unwrap().unwrap();
        assert_eq!(cell.kind(), IntersectionType::CornerOut);
        assert_eq!(cell.num_inside_corners(), 7);
        assert_eq!(cell.curves().len(), 3);
        assert_closed(&cell);
    }

    #[test]
    fn test_corner_in_away_from_poles() {
        let grid = single_cell_grid((0.5, 2.0), (0.5, 2.0), (-0.5, 1.4));
        let cell = Cell::analyze(&grid, 0, 0, 0, R).unwrap().unwrap();
        assert_eq!(cell.kind(), IntersectionType::CornerIn);
        assert_eq!(cell.pole_status(), PoleStatus::None);
        assert_closed(&cell);
    }

    #[test]
    fn test_corner_pull_and_push() {
        // Same box, two radii: three corners inside at R = 1.5, five at
        // R = 1.75.
        let grid = single_cell_grid((0.0, 1.2), (0.0, 1.2), (0.0, 1.6));
        let pull = Cell::analyze(&grid, 0, 0, 0, 1.5).unwrap().unwrap();
        assert_eq!(pull.kind(), IntersectionType::CornerPull);
        assert_eq!(pull.curves().len(), 5);
        assert_closed(&pull);

        let push = Cell::analyze(&grid, 0, 0, 0, 1.75).unwrap().unwrap();
        assert_eq!(push.kind(), IntersectionType::CornerPush);
        assert_eq!(push.curves().len(), 5);
        assert_closed(&push);
    }

    #[test]
    fn test_kiss_cell() {
        let grid = single_cell_grid((1.4, 2.4), (-0.5, 0.5), (-0.5, 0.5));
        let cell = Cell::analyze(&grid, 0, 0, 0, R).unwrap().unwrap();
        assert_eq!(cell.kind(), IntersectionType::Kiss);
        assert!(cell.curves().is_empty());
        let kiss = cell.kiss_point().unwrap();
        assert!((kiss - DVec3::new(1.4, 0.0, 0.0)).length() < 1e-12);
        assert!(cell.patch(0, 0).unwrap().is_none());
    }

    #[test]
    fn test_fully_inside_and_outside_skipped() {
        let inside = single_cell_grid((-0.5, 0.5), (-0.5, 0.5), (-0.5, 0.5));
        assert!(Cell::analyze(&inside, 0, 0, 0, R).unwrap().is_none());

        let outside = single_cell_grid((5.0, 6.0), (5.0, 6.0), (5.0, 6.0));
        assert!(Cell::analyze(&outside, 0, 0, 0, R).unwrap().is_none());
    }
}
