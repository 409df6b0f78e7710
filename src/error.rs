//! src/error.rs
//! This module defines the error type shared by the model construction,
//! Hamiltonian assembly and the structural transforms.
//! Every fallible operation returns a `Result` instead of panicking.

use thiserror::Error;

/// The primary error type for all fallible operations in this library.
#[derive(Error, Debug)]
pub enum TbError {
    // --- Invalid Input and Arguments ---
    #[error("Invalid model configuration: {0}")]
    Configuration(String),

    #[error("Dimension mismatch for '{context}': expected {expected}, got {found}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid supercell size: {0}. Must be >= 1 along every direction.")]
    InvalidSupercellSize(usize),

    #[error("Orbital index {index} is out of range for a model with {norb} orbitals")]
    OrbitalIndexOutOfRange { index: usize, norb: usize },

    // --- Model Consistency ---
    #[error("Internal model inconsistency: {0}. This is a bug.")]
    InternalInvariant(String),

    // --- Linear Algebra ---
    #[cfg(feature = "linalg")]
    #[error("Linear algebra operation failed")]
    Linalg(#[from] ndarray_linalg::error::LinalgError),
}

/// A specialized `Result` type for this library's operations.
pub type Result<T> = std::result::Result<T, TbError>;
