/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Series-truncation rule for the Mie multipole expansion

/// Number of multipole orders to retain for size parameter `x`, using the
/// Wiscombe criterion `N = floor(x + 4 x^(1/3) + 2)`.
///
/// # Arguments
///
/// * `x` - The size parameter, 2 pi radius / wavelength
///
/// # Returns
///
/// The truncation order, always at least 1.
pub fn max_order(x: f64) -> usize {
    let estimate = (x + 4.0 * x.cbrt() + 2.0).floor();
    (estimate as usize).max(1)
}

/// Truncation order with `extra` additional terms, used when a spectrum
/// point fails its convergence check and is retried.
pub fn boosted(x: f64, extra: usize) -> usize {
    max_order(x) + extra
}
