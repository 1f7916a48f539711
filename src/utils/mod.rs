/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Numerical utilities for Mie calculations
//!
//! This module provides the special-function backend and shared numerical
//! constants used throughout the solver.

pub mod bessel;
pub mod constants;
pub mod errors;

pub use bessel::{spherical_jn_sequence, spherical_yn_sequence, SphericalFunctions};
pub use errors::{Result, UtilsError};

/// Convert a length from nanometers to meters
pub fn nanometers_to_meters(nanometers: f64) -> f64 {
    nanometers * 1e-9
}

/// Convert a length from meters to nanometers
pub fn meters_to_nanometers(meters: f64) -> f64 {
    meters * 1e9
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_length_conversions() {
        let nanometers = 632.8;
        let meters = nanometers_to_meters(nanometers);
        assert_relative_eq!(meters_to_nanometers(meters), nanometers, epsilon = 1e-10);
    }
}
