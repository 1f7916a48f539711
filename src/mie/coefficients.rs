/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Lorenz-Mie scattering coefficients for a homogeneous sphere
//!
//! Computes the multipole expansion coefficients a_n, b_n (scattered field)
//! and c_n, d_n (internal field) in the Bohren & Huffman convention,
//! generalized to a complex relative permeability. All spherical-function
//! values come from the stable backend in [`crate::utils::bessel`].

use num_complex::Complex64;

use super::errors::{MieError, Result};
use crate::utils::constants::DENOMINATOR_EPSILON;
use crate::utils::SphericalFunctions;

/// Scattering and internal-field coefficients for one wavelength.
///
/// Vectors are indexed from multipole order 1, so `a[0]` is the electric
/// dipole term. Every solve allocates a fresh set; nothing is reused between
/// wavelengths.
#[derive(Debug, Clone)]
pub struct CoefficientSet {
    /// Electric multipole coefficients of the scattered field
    pub a: Vec<Complex64>,
    /// Magnetic multipole coefficients of the scattered field
    pub b: Vec<Complex64>,
    /// Magnetic multipole coefficients of the internal field
    pub c: Vec<Complex64>,
    /// Electric multipole coefficients of the internal field
    pub d: Vec<Complex64>,
}

impl CoefficientSet {
    /// Number of multipole orders held by this set
    pub fn order_count(&self) -> usize {
        self.a.len()
    }
}

/// Compute the Mie coefficients with the default degeneracy threshold.
///
/// # Arguments
///
/// * `x` - Size parameter, 2 pi radius / wavelength
/// * `m` - Relative refractive index, n_sphere / n_medium
/// * `mu` - Relative permeability of the sphere (1 + 0i for non-magnetic)
/// * `n_max` - Number of multipole orders to compute
///
/// # Returns
///
/// A fresh [`CoefficientSet`], or an error if the inputs are outside the
/// physical domain or a coefficient denominator degenerates.
pub fn compute_coefficients(
    x: f64,
    m: Complex64,
    mu: Complex64,
    n_max: usize,
) -> Result<CoefficientSet> {
    compute_coefficients_with_epsilon(x, m, mu, n_max, DENOMINATOR_EPSILON)
}

/// Compute the Mie coefficients with an explicit relative degeneracy
/// threshold `epsilon` (a denominator is degenerate when its magnitude falls
/// below `epsilon` times the numerator magnitude).
pub fn compute_coefficients_with_epsilon(
    x: f64,
    m: Complex64,
    mu: Complex64,
    n_max: usize,
    epsilon: f64,
) -> Result<CoefficientSet> {
    if !x.is_finite() || x <= 0.0 {
        return Err(MieError::Domain(format!(
            "size parameter must be finite and positive, got {x}"
        )));
    }
    if !m.is_finite() || m.norm() == 0.0 {
        return Err(MieError::Domain(format!(
            "relative refractive index must be finite and nonzero, got {m}"
        )));
    }
    if !mu.is_finite() || mu.norm() == 0.0 {
        return Err(MieError::Domain(format!(
            "relative permeability must be finite and nonzero, got {mu}"
        )));
    }
    if n_max == 0 {
        return Err(MieError::Domain(
            "at least one multipole order is required".to_string(),
        ));
    }

    let z_x = Complex64::new(x, 0.0);
    let at_x = SphericalFunctions::evaluate(n_max, z_x)?;
    let at_mx = SphericalFunctions::evaluate(n_max, m * z_x)?;
    let m_sq = m * m;

    let mut a = Vec::with_capacity(n_max);
    let mut b = Vec::with_capacity(n_max);
    let mut c = Vec::with_capacity(n_max);
    let mut d = Vec::with_capacity(n_max);

    for n in 1..=n_max {
        let jn_x = at_x.jn[n];
        let hn_x = at_x.hn[n];
        let psi_prime_x = at_x.riccati_jn_prime[n];
        let xi_prime_x = at_x.riccati_hn_prime[n];
        let jn_mx = at_mx.jn[n];
        let psi_prime_mx = at_mx.riccati_jn_prime[n];

        let a_num = m_sq * jn_mx * psi_prime_x - mu * jn_x * psi_prime_mx;
        let a_den = m_sq * jn_mx * xi_prime_x - mu * hn_x * psi_prime_mx;
        let b_num = mu * jn_mx * psi_prime_x - jn_x * psi_prime_mx;
        let b_den = mu * jn_mx * xi_prime_x - hn_x * psi_prime_mx;
        let c_num = mu * jn_x * xi_prime_x - mu * hn_x * psi_prime_x;
        let d_num = mu * m * jn_x * xi_prime_x - mu * m * hn_x * psi_prime_x;

        a.push(checked_divide(a_num, a_den, n, m, x, epsilon)?);
        b.push(checked_divide(b_num, b_den, n, m, x, epsilon)?);
        c.push(checked_divide(c_num, b_den, n, m, x, epsilon)?);
        d.push(checked_divide(d_num, a_den, n, m, x, epsilon)?);
    }

    Ok(CoefficientSet { a, b, c, d })
}

/// Divide with the degeneracy guard required for coefficient ratios
fn checked_divide(
    numerator: Complex64,
    denominator: Complex64,
    order: usize,
    m: Complex64,
    x: f64,
    epsilon: f64,
) -> Result<Complex64> {
    if !numerator.is_finite() || !denominator.is_finite() {
        return Err(MieError::Domain(format!(
            "coefficient products overflowed at order {order} (m = {m}, x = {x})"
        )));
    }
    let numerator_norm = numerator.norm();
    let denominator_norm = denominator.norm();
    if denominator_norm < epsilon * numerator_norm
        || (denominator_norm == 0.0 && numerator_norm == 0.0)
    {
        return Err(MieError::DegenerateDenominator {
            order,
            m,
            x,
            denominator_norm,
        });
    }
    Ok(numerator / denominator)
}
