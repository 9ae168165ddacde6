//! Canonical cube topology tables.
//!
//! A cell's 8 corners follow a fixed numbering: bit 0 set means the corner
//! sits at the high x coordinate, bit 1 at the high y, bit 2 at the high z:
//!
//! ```text
//! corner 0: (x0, y0, z0)    corner 4: (x0, y0, z1)
//! corner 1: (x1, y0, z0)    corner 5: (x1, y0, z1)
//! corner 2: (x0, y1, z0)    corner 6: (x0, y1, z1)
//! corner 3: (x1, y1, z0)    corner 7: (x1, y1, z1)
//! ```
//!
//! Faces: 0 (z = z0), 1 (z = z1), 2 (y = y0), 3 (y = y1), 4 (x = x0),
//! 5 (x = x1). Edges are numbered 0-11 by their sorted corner pair.
//!
//! Everything here is constant data derived once from that numbering; no
//! runtime state.

use crate::grid::CartesianGrid;
use glam::DVec3;

pub const NUM_CORNERS: usize = 8;
pub const NUM_EDGES: usize = 12;
pub const NUM_FACES: usize = 6;

/// The two corners of each canonical edge, in sorted order.
pub const EDGE_CORNERS: [[usize; 2]; NUM_EDGES] = [
    [0, 1],
    [0, 2],
    [0, 4],
    [1, 3],
    [1, 5],
    [2, 3],
    [2, 6],
    [3, 7],
    [4, 5],
    [4, 6],
    [5, 7],
    [6, 7],
];

/// The four corners of each canonical face, in drawing order.
pub const FACE_CORNERS: [[usize; 4]; NUM_FACES] = [
    [0, 1, 3, 2], // z = z0
    [4, 5, 7, 6], // z = z1
    [0, 1, 5, 4], // y = y0
    [2, 3, 7, 6], // y = y1
    [0, 2, 6, 4], // x = x0
    [1, 3, 7, 5], // x = x1
];

/// The three faces a corner lies on, read straight off the corner bits.
#[inline]
pub const fn corner_faces(corner: usize) -> [usize; 3] {
    [
        if corner & 4 == 0 { 0 } else { 1 },
        if corner & 2 == 0 { 2 } else { 3 },
        if corner & 1 == 0 { 4 } else { 5 },
    ]
}

/// The two faces each edge lies on, derived as the intersection of its two
/// corners' face triples. Every edge lies on exactly two faces; this is
/// checked at compile time by the const evaluator (out-of-bounds write on a
/// third common face, underflow on fewer than two).
pub const EDGE_FACES: [[usize; 2]; NUM_EDGES] = build_edge_faces();

const fn build_edge_faces() -> [[usize; 2]; NUM_EDGES] {
    let mut table = [[0usize; 2]; NUM_EDGES];
    let mut e = 0;
    while e < NUM_EDGES {
        let fa = corner_faces(EDGE_CORNERS[e][0]);
        let fb = corner_faces(EDGE_CORNERS[e][1]);
        let mut found = 0;
        let mut i = 0;
        while i < 3 {
            let mut j = 0;
            while j < 3 {
                if fa[i] == fb[j] {
                    table[e][found] = fa[i];
                    found += 1;
                }
                j += 1;
            }
            i += 1;
        }
        assert!(found == 2);
        e += 1;
    }
    table
}

/// Canonical edge index for a pair of corners, or `None` if the corners are
/// not adjacent.
pub fn edge_index(corner_a: usize, corner_b: usize) -> Option<usize> {
    if corner_a >= NUM_CORNERS || corner_b >= NUM_CORNERS || corner_a == corner_b {
        return None;
    }
    let pair = if corner_a < corner_b {
        [corner_a, corner_b]
    } else {
        [corner_b, corner_a]
    };
    EDGE_CORNERS.iter().position(|&c| c == pair)
}

/// Edges whose two corners differ in inside/outside status for the given
/// inside-corner bitmask.
pub fn intersecting_edges(inside_mask: u8) -> Vec<usize> {
    (0..NUM_EDGES)
        .filter(|&e| {
            let [a, b] = EDGE_CORNERS[e];
            (inside_mask >> a) & 1 != (inside_mask >> b) & 1
        })
        .collect()
}

/// Cartesian coordinates of the 8 corners of cell `(ix, iy, iz)`, in
/// canonical order. Corner coordinates are in the grid's local frame (the
/// frame the sphere is centered in); axis offsets apply only to global
/// point lookups.
pub fn cell_corners(grid: &CartesianGrid, ix: usize, iy: usize, iz: usize) -> [DVec3; 8] {
    let x0 = grid.x_grid().value_at(ix);
    let y0 = grid.y_grid().value_at(iy);
    let z0 = grid.z_grid().value_at(iz);
    let x1 = grid.x_grid().value_at(ix + 1);
    let y1 = grid.y_grid().value_at(iy + 1);
    let z1 = grid.z_grid().value_at(iz + 1);

    let mut corners = [DVec3::ZERO; 8];
    for (k, corner) in corners.iter_mut().enumerate() {
        *corner = DVec3::new(
            if k & 1 == 0 { x0 } else { x1 },
            if k & 2 == 0 { y0 } else { y1 },
            if k & 4 == 0 { z0 } else { z1 },
        );
    }
    corners
}

/// The four corner coordinates of a face, pulled from the cell's corners.
pub fn face_corners(corners: &[DVec3; 8], face: usize) -> [DVec3; 4] {
    let idx = FACE_CORNERS[face];
    [
        corners[idx[0]],
        corners[idx[1]],
        corners[idx[2]],
        corners[idx[3]],
    ]
}

/// Average squared distance of a face's corners from the origin (the sphere
/// center). Used to pick the face nearest the sphere in the kiss test.
pub fn face_average_distance_squared(corners: &[DVec3; 8], face: usize) -> f64 {
    face_corners(corners, face)
        .iter()
        .map(|c| c.length_squared())
        .sum::<f64>()
        / 4.0
}
