//! Cyclic ordering of intersecting edges.
//!
//! The intersecting edges of a cell come out of the topology tables in
//! canonical index order, which is not a walk around the boundary. This
//! module reorders them so that every cyclically adjacent pair shares a
//! face, which is exactly the condition for a boundary curve to exist
//! between their sphere crossings.

use crate::edge::Edge;
use crate::error::MosaicError;

/// Reorder `edges` into a cycle in which consecutive edges (including last
/// back to first) share a cube face.
///
/// Exhaustive depth-first search over every starting edge, with a `used`
/// bitset; at most 6 edges ever take part so the search is tiny. The
/// tie-break is deterministic: the first unused edge in input order that
/// shares a face is tried first.
pub fn order_edges(edges: Vec<Edge>) -> Result<Vec<Edge>, MosaicError> {
    let n = edges.len();
    if n < 3 {
        return Err(MosaicError::OrderingFailure { num_edges: n });
    }

    for start in 0..n {
        let mut order = Vec::with_capacity(n);
        order.push(start);
        let mut used = 1u32 << start;
        if search(&edges, &mut order, &mut used) {
            let mut ordered = Vec::with_capacity(n);
            let mut slots: Vec<Option<Edge>> = edges.into_iter().map(Some).collect();
            for &i in &order {
                // Each index appears exactly once in a successful order.
                ordered.push(slots[i].take().ok_or(MosaicError::OrderingFailure {
                    num_edges: n,
                })?);
            }
            return Ok(ordered);
        }
    }

    Err(MosaicError::OrderingFailure { num_edges: n })
}

fn search(edges: &[Edge], order: &mut Vec<usize>, used: &mut u32) -> bool {
    let n = edges.len();
    if order.len() == n {
        let first = &edges[order[0]];
        let last = &edges[*order.last().unwrap()];
        return last.shares_face_with(first);
    }

    let last = *order.last().unwrap();
    for i in 0..n {
        if *used & (1 << i) != 0 {
            continue;
        }
        if !edges[last].shares_face_with(&edges[i]) {
            continue;
        }
        order.push(i);
        *used |= 1 << i;
        if search(edges, order, used) {
            return true;
        }
        order.pop();
        *used &= !(1 << i);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn unit_cell_corners() -> [DVec3; 8] {
        let mut corners = [DVec3::ZERO; 8];
        for (k, c) in corners.iter_mut().enumerate() {
            *c = DVec3::new(
                if k & 1 == 0 { 0.0 } else { 2.0 },
                if k & 2 == 0 { 0.0 } else { 2.0 },
                if k & 4 == 0 { 0.0 } else { 2.0 },
            );
        }
        corners
    }

    fn assert_cyclic(ordered: &[Edge]) {
        for i in 0..ordered.len() {
            let next = &ordered[(i + 1) % ordered.len()];
            assert!(
                ordered[i].shares_face_with(next),
                "edges {} and {} share no face",
                ordered[i].index(),
                next.index()
            );
        }
    }

    #[test]
    fn test_three_edge_cycle() {
        // Corner 0 inside: edges 0, 1, 2 cross the sphere.
        let corners = unit_cell_corners();
        let edges: Vec<Edge> = [0, 1, 2]
            .iter()
            .map(|&e| Edge::new(e, &corners, 1.5).unwrap())
            .collect();
        let ordered = order_edges(edges).unwrap();
        assert_eq!(ordered.len(), 3);
        assert_cyclic(&ordered);
    }

    #[test]
    fn test_order_independent_of_input_permutation() {
        let corners = unit_cell_corners();
        for perm in [[0usize, 1, 2], [2, 0, 1], [1, 2, 0], [2, 1, 0]] {
            let edges: Vec<Edge> = perm
                .iter()
                .map(|&e| Edge::new(e, &corners, 1.5).unwrap())
                .collect();
            let ordered = order_edges(edges).unwrap();
            assert_cyclic(&ordered);
        }
    }

    #[test]
    fn test_too_few_edges_rejected() {
        let corners = unit_cell_corners();
        let edges = vec![
            Edge::new(0, &corners, 1.5).unwrap(),
            Edge::new(1, &corners, 1.5).unwrap(),
        ];
        assert!(matches!(
            order_edges(edges),
            Err(MosaicError::OrderingFailure { num_edges: 2 })
        ));
    }
}
