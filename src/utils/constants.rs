/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Numerical constants shared by the spherical-function and Mie solvers

/// |z| below which spherical Bessel j_n switches to its ascending power series
pub const SERIES_CUTOFF: f64 = 1.0;

/// Relative tolerance at which a power series is considered converged
pub const SERIES_REL_TOL: f64 = 1e-16;

/// Hard cap on power-series terms
pub const SERIES_MAX_TERMS: usize = 60;

/// Significant digits targeted by the backward-recurrence starting order
pub const MILLER_DIGITS: usize = 15;

/// Decimal exponent probed when locating the order at which j_n underflows
pub const UNDERFLOW_DIGITS: usize = 200;

/// Default relative threshold below which a Mie coefficient denominator
/// counts as degenerate
pub const DENOMINATOR_EPSILON: f64 = 1e-12;

/// Default relative tolerance for the series-truncation convergence check
pub const CONVERGENCE_TOLERANCE: f64 = 1e-6;

/// Extra multipole orders added when retrying an unconverged spectrum point
pub const ORDER_BOOST: usize = 20;
