/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the Mie module

use num_complex::Complex64;
use thiserror::Error;

use crate::materials::MaterialError;
use crate::utils::UtilsError;

/// Result type for Mie operations
pub type Result<T> = std::result::Result<T, MieError>;

/// Mie-specific errors
#[derive(Error, Debug)]
pub enum MieError {
    /// Input outside the physical domain
    #[error("Domain error: {0}")]
    Domain(String),

    /// A scattering-coefficient denominator vanished relative to its
    /// numerator, so the division would produce garbage instead of physics
    #[error(
        "degenerate denominator for multipole order {order} \
         (m = {m}, x = {x}, |denominator| = {denominator_norm:.3e})"
    )]
    DegenerateDenominator {
        order: usize,
        m: Complex64,
        x: f64,
        denominator_norm: f64,
    },

    /// Spherical function evaluation failed
    #[error("Bessel evaluation failed: {0}")]
    Bessel(#[from] UtilsError),

    /// Refractive-index lookup failed
    #[error("Material error: {0}")]
    Material(String),
}

impl From<MaterialError> for MieError {
    fn from(err: MaterialError) -> Self {
        MieError::Material(err.to_string())
    }
}
