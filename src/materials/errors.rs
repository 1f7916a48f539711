/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for refractive-index providers

use thiserror::Error;

/// Result type for material lookups
pub type Result<T> = std::result::Result<T, MaterialError>;

/// Errors from refractive-index providers
#[derive(Error, Debug)]
pub enum MaterialError {
    /// The requested wavelength is outside the provider's validity range
    #[error("wavelength {wavelength:e} m is outside the data range [{min:e}, {max:e}] m")]
    OutOfRange { wavelength: f64, min: f64, max: f64 },

    /// The provider was constructed from inconsistent data
    #[error("invalid material data: {0}")]
    Invalid(String),
}
