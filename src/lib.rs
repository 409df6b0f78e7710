//! This crate describes tight-binding models for Z2 invariant calculations:
//!
//! 1: Build a model from on-site energies and a sparse list of hoppings
//!
//! 2: Evaluate the Bloch Hamiltonian $H(\bm k)$ which is consumed by the Wannier charge centre engine
//!
//! 3: Derive new models by building a supercell, adding the time-reversal partner, or changing the unit cell
//!
pub mod basis;
#[cfg(feature = "linalg")]
pub mod band;
pub mod error;
pub mod generics;
pub mod kpoints;
pub mod math;
pub mod model_struct;
pub mod transform;
pub mod utils;

use ndarray::prelude::*;
use num_complex::Complex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub use crate::basis::BlochTerms;
pub use crate::error::{Result, TbError};
pub use crate::generics::HopAmplitude;
pub use crate::kpoints::gen_kmesh;
pub use crate::model_struct::Size;
pub use crate::transform::Passivation;

/// A single hopping term $\bra{i\bm 0}\hat H\ket{j\bm R}=t$.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Hopping {
    /// Orbital in the home unit cell.
    pub ind_i: usize,
    /// Orbital in the unit cell at `R`.
    pub ind_j: usize,
    /// Lattice vector from the cell of `ind_i` to the cell of `ind_j`.
    pub R: [isize; 3],
    /// The hopping strength.
    pub t: Complex<f64>,
}

impl Hopping {
    /// A hopping from orbital `ind_i` in the home cell to `ind_j` in the cell at `R`, `t` may be real or complex.
    #[allow(non_snake_case)]
    pub fn new<U: HopAmplitude>(ind_i: usize, ind_j: usize, R: [isize; 3], t: U) -> Hopping {
        Hopping {
            ind_i,
            ind_j,
            R,
            t: t.to_complex(),
        }
    }
    /// The Hermitian partner $(j, i, -\bm R, t^*)$.
    pub fn conj(&self) -> Hopping {
        Hopping {
            ind_i: self.ind_j,
            ind_j: self.ind_i,
            R: [-self.R[0], -self.R[1], -self.R[2]],
            t: self.t.conj(),
        }
    }
}

impl<U: HopAmplitude> From<(usize, usize, [isize; 3], U)> for Hopping {
    #[allow(non_snake_case)]
    fn from((ind_i, ind_j, R, t): (usize, usize, [isize; 3], U)) -> Self {
        Hopping::new(ind_i, ind_j, R, t)
    }
}

/// A tight-binding model.
///
/// The model is immutable from the outside except for [`Model::add_hop`];
/// [`Model::supercell`], [`Model::trs`] and [`Model::change_uc`] all return a new model.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Model {
    /// On-site energies of the orbitals.
    on_site: Array1<f64>,
    /// The position of the orbitals in the model. We use fractional coordinates uniformly, an norb$\times$3 matrix.
    orb: Array2<f64>,
    /// The unit cell, lattice vectors are the columns of a 3$\times$3 matrix. `None` means undefined.
    uc: Option<Array2<f64>>,
    /// The hopping terms, including the Hermitian partners if they were requested at construction.
    hop: Vec<Hopping>,
    /// Number of occupied states.
    occ: usize,
    /// $H(\bm k)$ split by lattice vector, rebuilt lazily after every change of `hop`.
    #[serde(skip)]
    bloch: OnceLock<BlochTerms>,
}
