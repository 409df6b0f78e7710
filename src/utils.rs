//! Utility functions for lattice-vector lookup and supercell bookkeeping

use ndarray::prelude::*;
use ndarray::*;

/// Find the index of a lattice vector R in the hamR array
#[allow(non_snake_case)]
pub fn find_R<A: Data<Elem = T>, B: Data<Elem = T>, T: std::cmp::PartialEq>(
    hamR: &ArrayBase<A, Ix2>,
    R: &ArrayBase<B, Ix1>,
) -> Option<usize> {
    for (i, row) in hamR.axis_iter(Axis(0)).enumerate() {
        if row == R {
            return Some(i);
        }
    }
    None
}

/// Linear index of the sub-cell `pos` inside a supercell of size `dim`,
/// x runs slowest and z fastest.
#[inline(always)]
pub fn pos_to_idx(pos: [usize; 3], dim: [usize; 3]) -> usize {
    debug_assert!(pos.iter().zip(dim.iter()).all(|(p, d)| p < d));
    (pos[0] * dim[1] + pos[1]) * dim[2] + pos[2]
}

/// For every direction, whether the sub-cell `pos` touches the
/// `[bottom, top]` face of the supercell. With `dim == 1` both are true.
#[inline(always)]
pub fn edge_detect_pos(pos: [usize; 3], dim: [usize; 3]) -> [[bool; 2]; 3] {
    let mut edges = [[false; 2]; 3];
    for i in 0..3 {
        edges[i][0] = pos[i] == 0;
        edges[i][1] = pos[i] + 1 == dim[i];
    }
    edges
}
