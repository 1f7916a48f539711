/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Spherical Bessel functions of complex argument
//!
//! This module provides the special-function backend for the Mie solver:
//! spherical Bessel functions of the first and second kind, the spherical
//! Hankel function of the first kind, and the Riccati-Bessel derivative
//! terms (z f_n(z))' that enter the scattering coefficients.
//!
//! Upward recurrence for j_n loses all accuracy once the order exceeds |z|,
//! so j_n is evaluated by Miller's backward recurrence with a starting order
//! estimated from the envelope of j_n, following the classic specfun scheme.
//! For |z| below [`SERIES_CUTOFF`](crate::utils::constants::SERIES_CUTOFF)
//! each order is summed from its ascending power series instead; the closed
//! form for j_1 cancels catastrophically as z approaches zero. y_n is the
//! dominant solution of the recurrence and is generated upward from its
//! closed-form seeds.

use num_complex::Complex64;

use super::constants::{
    MILLER_DIGITS, SERIES_CUTOFF, SERIES_MAX_TERMS, SERIES_REL_TOL, UNDERFLOW_DIGITS,
};
use super::errors::{Result, UtilsError};

/// Spherical Bessel, Hankel, and Riccati-Bessel derivative values for a
/// single argument, indexed by order `0..=max_order`.
///
/// `hn` is the spherical Hankel function of the first kind,
/// `h_n = j_n + i y_n`. `riccati_jn_prime[n]` holds `(z j_n(z))'` and
/// `riccati_hn_prime[n]` holds `(z h_n(z))'`.
#[derive(Debug, Clone)]
pub struct SphericalFunctions {
    pub jn: Vec<Complex64>,
    pub yn: Vec<Complex64>,
    pub hn: Vec<Complex64>,
    pub riccati_jn_prime: Vec<Complex64>,
    pub riccati_hn_prime: Vec<Complex64>,
}

impl SphericalFunctions {
    /// Evaluate all function families at `z` for orders `0..=max_order`.
    ///
    /// # Arguments
    ///
    /// * `max_order` - The highest order to evaluate
    /// * `z` - The complex argument; must be finite and nonzero
    ///
    /// # Returns
    ///
    /// The populated value table, or an error if `z` is outside the domain
    /// or an intermediate value overflows.
    pub fn evaluate(max_order: usize, z: Complex64) -> Result<Self> {
        let jn = spherical_jn_sequence(max_order, z)?;
        let yn = spherical_yn_sequence(max_order, z)?;
        let hn: Vec<Complex64> = jn
            .iter()
            .zip(&yn)
            .map(|(j, y)| *j + Complex64::i() * *y)
            .collect();

        // (z f_n(z))' = z f_{n-1}(z) - n f_n(z); at n = 0 the recurrence
        // needs f_{-1}, giving the closed forms cos z and e^{iz}.
        let mut riccati_jn_prime = vec![Complex64::new(0.0, 0.0); max_order + 1];
        let mut riccati_hn_prime = vec![Complex64::new(0.0, 0.0); max_order + 1];
        riccati_jn_prime[0] = z.cos();
        riccati_hn_prime[0] = (Complex64::i() * z).exp();
        for n in 1..=max_order {
            let order = n as f64;
            riccati_jn_prime[n] = z * jn[n - 1] - order * jn[n];
            riccati_hn_prime[n] = z * hn[n - 1] - order * hn[n];
        }

        Ok(SphericalFunctions {
            jn,
            yn,
            hn,
            riccati_jn_prime,
            riccati_hn_prime,
        })
    }

    /// The highest order held by this table
    pub fn max_order(&self) -> usize {
        self.jn.len() - 1
    }
}

/// Spherical Bessel functions of the first kind j_n(z) for orders
/// `0..=max_order`.
///
/// # Arguments
///
/// * `max_order` - The highest order to evaluate
/// * `z` - The complex argument; must be finite and nonzero
///
/// # Returns
///
/// A vector indexed by order. Orders whose values underflow below
/// 10^-200 are returned as zero.
pub fn spherical_jn_sequence(max_order: usize, z: Complex64) -> Result<Vec<Complex64>> {
    check_argument(z)?;
    let mut jn = vec![Complex64::new(0.0, 0.0); max_order + 1];

    if z.norm() < SERIES_CUTOFF {
        for (order, value) in jn.iter_mut().enumerate() {
            *value = jn_series(order, z);
        }
        return Ok(jn);
    }

    let j0 = z.sin() / z;
    jn[0] = j0;
    if max_order == 0 {
        return Ok(jn);
    }
    let j1 = (j0 - z.cos()) / z;
    jn[1] = j1;
    if max_order == 1 {
        return Ok(jn);
    }

    // Miller's backward recurrence: start above the highest requested order,
    // recur downward from an arbitrary seed, then rescale so that order 0
    // (or order 1, whichever is larger in magnitude) matches its closed form.
    let magnitude = z.norm();
    let m1 = msta1(magnitude, UNDERFLOW_DIGITS)?;
    let (highest, start) = if m1 < max_order {
        // Orders above `highest` have underflowed and stay zero.
        (m1, m1)
    } else {
        (max_order, msta2(magnitude, max_order, MILLER_DIGITS)?)
    };

    let mut above2 = Complex64::new(0.0, 0.0);
    let mut above1 = Complex64::new(1.0e-100, 0.0);
    let mut value = above1;
    for k in (0..=start).rev() {
        value = above1 * (2 * k + 3) as f64 / z - above2;
        if k <= highest {
            jn[k] = value;
        }
        above2 = above1;
        above1 = value;
    }
    // `value` is the unnormalized order 0, `above2` the unnormalized order 1.
    let scale = if j0.norm() > j1.norm() {
        j0 / value
    } else {
        j1 / above2
    };
    if !scale.is_finite() {
        return Err(UtilsError::Math(format!(
            "spherical Bessel normalization overflowed at z = {z}"
        )));
    }
    for value in jn.iter_mut().take(highest + 1) {
        *value *= scale;
    }
    Ok(jn)
}

/// Spherical Bessel functions of the second kind y_n(z) for orders
/// `0..=max_order`.
///
/// # Arguments
///
/// * `max_order` - The highest order to evaluate
/// * `z` - The complex argument; must be finite and nonzero
///
/// # Returns
///
/// A vector indexed by order, or a math error if the sequence overflows
/// (y_n grows without bound for orders far above |z|).
pub fn spherical_yn_sequence(max_order: usize, z: Complex64) -> Result<Vec<Complex64>> {
    check_argument(z)?;
    let mut yn = vec![Complex64::new(0.0, 0.0); max_order + 1];
    let y0 = -z.cos() / z;
    yn[0] = y0;
    if max_order == 0 {
        return Ok(yn);
    }
    yn[1] = (y0 - z.sin()) / z;
    for k in 2..=max_order {
        let value = yn[k - 1] * (2 * k - 1) as f64 / z - yn[k - 2];
        if !value.is_finite() {
            return Err(UtilsError::Math(format!(
                "spherical Bessel y_{k} overflowed at z = {z}"
            )));
        }
        yn[k] = value;
    }
    Ok(yn)
}

fn check_argument(z: Complex64) -> Result<()> {
    if !z.is_finite() {
        return Err(UtilsError::Domain(format!(
            "spherical Bessel argument must be finite, got {z}"
        )));
    }
    if z.norm() == 0.0 {
        return Err(UtilsError::Domain(
            "spherical Bessel functions of the second kind diverge at z = 0".to_string(),
        ));
    }
    Ok(())
}

/// j_n(z) from its ascending power series; accurate for |z| < 1
fn jn_series(order: usize, z: Complex64) -> Complex64 {
    // Leading factor z^n / (2n+1)!!
    let mut lead = Complex64::new(1.0, 0.0);
    for k in 1..=order {
        lead = lead * z / (2 * k + 1) as f64;
    }
    let z2_half = z * z * 0.5;
    let mut term = Complex64::new(1.0, 0.0);
    let mut sum = term;
    for k in 1..SERIES_MAX_TERMS {
        term = -term * z2_half / (k * (2 * (order + k) + 1)) as f64;
        sum += term;
        if term.norm() <= SERIES_REL_TOL * sum.norm() {
            break;
        }
    }
    lead * sum
}

/// Magnitude envelope of j_n, in decimal digits
fn envj(n: usize, x: f64) -> f64 {
    let n = n as f64;
    0.5 * (6.28 * n).log10() - n * (1.36 * x / n).log10()
}

/// Order at which j_n(x) falls below 10^-digits, by secant iteration on the
/// envelope
fn msta1(magnitude: f64, digits: usize) -> Result<usize> {
    let target = digits as f64;
    let mut n0 = (1.1 * magnitude) as usize + 1;
    let mut f0 = envj(n0, magnitude) - target;
    let mut n1 = n0 + 5;
    let mut f1 = envj(n1, magnitude) - target;
    for _ in 0..20 {
        let secant = n1 as f64 - (n1 as f64 - n0 as f64) / (1.0 - f0 / f1);
        if !secant.is_finite() || secant < 1.0 {
            break;
        }
        let nn = secant as usize;
        let f = envj(nn, magnitude) - target;
        if nn == n1 {
            return Ok(nn);
        }
        n0 = n1;
        f0 = f1;
        n1 = nn;
        f1 = f;
    }
    Err(UtilsError::Math(
        "backward recurrence start estimate did not converge".to_string(),
    ))
}

/// Starting order for Miller's recurrence so that order `max_order` retains
/// `digits` significant digits
fn msta2(magnitude: f64, max_order: usize, digits: usize) -> Result<usize> {
    let half = 0.5 * digits as f64;
    let ejn = envj(max_order, magnitude);
    let (target, mut n0) = if ejn <= half {
        (digits as f64, (1.1 * magnitude) as usize + 1)
    } else {
        (half + ejn, max_order)
    };
    let mut f0 = envj(n0, magnitude) - target;
    let mut n1 = n0 + 5;
    let mut f1 = envj(n1, magnitude) - target;
    for _ in 0..20 {
        let secant = n1 as f64 - (n1 as f64 - n0 as f64) / (1.0 - f0 / f1);
        if !secant.is_finite() || secant < 1.0 {
            break;
        }
        let nn = secant as usize;
        let f = envj(nn, magnitude) - target;
        if nn == n1 {
            return Ok(nn + 10);
        }
        n0 = n1;
        f0 = f1;
        n1 = nn;
        f1 = f;
    }
    Err(UtilsError::Math(
        "backward recurrence start estimate did not converge".to_string(),
    ))
}
