/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Spectrum assembly over a wavelength grid
//!
//! Each wavelength is a pure function of the inputs: look up the refractive
//! indices, form the size parameter, truncate the series, solve the
//! coefficients, and reduce them to efficiencies and cross sections. The
//! grid fans out over rayon and gathers back in grid order, so results never
//! depend on thread count. A wavelength that fails leaves NaN in the spectral
//! arrays and a structured entry in `failures` instead of aborting the batch.

use num_complex::Complex64;
use rayon::prelude::*;

use super::coefficients::{compute_coefficients_with_epsilon, CoefficientSet};
use super::errors::{MieError, Result};
use super::truncation;
use super::{OpticalState, SphereGeometry, WavelengthGrid};
use crate::materials::RefractiveIndexProvider;
use crate::utils::constants::{CONVERGENCE_TOLERANCE, DENOMINATOR_EPSILON, ORDER_BOOST};

/// Tunable thresholds for the per-wavelength solve
#[derive(Debug, Clone, Copy)]
pub struct SolverSettings {
    /// Relative threshold below which a coefficient denominator is degenerate
    pub denominator_epsilon: f64,
    /// Relative last-order contribution accepted as converged
    pub convergence_tolerance: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            denominator_epsilon: DENOMINATOR_EPSILON,
            convergence_tolerance: CONVERGENCE_TOLERANCE,
        }
    }
}

/// Non-fatal notice that a spectrum point kept its boosted solution without
/// reaching the convergence tolerance
#[derive(Debug, Clone)]
pub struct ConvergenceWarning {
    /// Wavelength of the affected point, in meters
    pub wavelength: f64,
    /// Truncation order of the retained solution
    pub order: usize,
    /// Relative contribution of the last retained order
    pub relative_contribution: f64,
}

/// A wavelength that produced no result
#[derive(Debug)]
pub struct WavelengthFailure {
    /// Position of the wavelength in the grid
    pub index: usize,
    /// The wavelength, in meters
    pub wavelength: f64,
    /// What went wrong
    pub error: MieError,
}

/// Everything computed for one wavelength
#[derive(Debug)]
pub struct SpectrumPoint {
    pub wavelength: f64,
    pub q_ext: f64,
    pub q_sca: f64,
    pub q_abs: f64,
    pub c_ext: f64,
    pub c_sca: f64,
    pub c_abs: f64,
    pub coefficients: CoefficientSet,
    pub warning: Option<ConvergenceWarning>,
}

/// Spectral efficiencies and cross sections over a wavelength grid.
///
/// All vectors are aligned with `wavelengths`. Failed points hold NaN in the
/// six spectral arrays and `None` in `coefficients`; `failures` lists them in
/// grid order. `q_abs` is formed as `q_ext - q_sca` at every point, so the
/// energy balance holds bit-for-bit.
#[derive(Debug)]
pub struct MieSpectrum {
    pub wavelengths: Vec<f64>,
    pub q_ext: Vec<f64>,
    pub q_sca: Vec<f64>,
    pub q_abs: Vec<f64>,
    pub c_ext: Vec<f64>,
    pub c_sca: Vec<f64>,
    pub c_abs: Vec<f64>,
    pub coefficients: Vec<Option<CoefficientSet>>,
    pub warnings: Vec<ConvergenceWarning>,
    pub failures: Vec<WavelengthFailure>,
}

impl MieSpectrum {
    /// Number of grid points
    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    /// True when the grid is empty
    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }

    /// True when every wavelength produced a result
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Compute efficiencies, cross sections, and coefficients for a single
/// wavelength.
///
/// # Arguments
///
/// * `geometry` - The sphere
/// * `state` - Optical constants at this wavelength
/// * `wavelength` - Vacuum wavelength in meters
/// * `settings` - Solver thresholds
///
/// # Returns
///
/// The populated [`SpectrumPoint`], or the first error encountered.
pub fn calculate_point(
    geometry: &SphereGeometry,
    state: &OpticalState,
    wavelength: f64,
    settings: &SolverSettings,
) -> Result<SpectrumPoint> {
    if !wavelength.is_finite() || wavelength <= 0.0 {
        return Err(MieError::Domain(format!(
            "wavelength must be finite and positive, got {wavelength}"
        )));
    }
    let x = geometry.size_parameter(wavelength);
    let m = state.relative_index();
    let n_max = truncation::max_order(x);

    let (coefficients, q_ext, q_sca, warning) =
        solve_with_retry(x, m, state.mu, n_max, wavelength, settings)?;

    let q_abs = q_ext - q_sca;
    let geometric = geometry.geometric_cross_section();
    Ok(SpectrumPoint {
        wavelength,
        q_ext,
        q_sca,
        q_abs,
        c_ext: q_ext * geometric,
        c_sca: q_sca * geometric,
        c_abs: q_abs * geometric,
        coefficients,
        warning,
    })
}

/// Compute the full spectrum over `grid`, in parallel.
///
/// The sphere and medium indices are looked up per wavelength through the
/// injected providers; the medium must come back non-absorbing. Failures and
/// convergence warnings are gathered in grid order and logged at warn level.
pub fn calculate_spectrum(
    geometry: &SphereGeometry,
    grid: &WavelengthGrid,
    sphere: &dyn RefractiveIndexProvider,
    medium: &dyn RefractiveIndexProvider,
    mu: Complex64,
    settings: &SolverSettings,
) -> MieSpectrum {
    let outcomes: Vec<Result<SpectrumPoint>> = grid
        .points()
        .par_iter()
        .map(|&wavelength| {
            let state = optical_state_at(sphere, medium, mu, wavelength)?;
            calculate_point(geometry, &state, wavelength, settings)
        })
        .collect();

    let count = grid.len();
    let mut spectrum = MieSpectrum {
        wavelengths: grid.points().to_vec(),
        q_ext: Vec::with_capacity(count),
        q_sca: Vec::with_capacity(count),
        q_abs: Vec::with_capacity(count),
        c_ext: Vec::with_capacity(count),
        c_sca: Vec::with_capacity(count),
        c_abs: Vec::with_capacity(count),
        coefficients: Vec::with_capacity(count),
        warnings: Vec::new(),
        failures: Vec::new(),
    };

    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(point) => {
                spectrum.q_ext.push(point.q_ext);
                spectrum.q_sca.push(point.q_sca);
                spectrum.q_abs.push(point.q_abs);
                spectrum.c_ext.push(point.c_ext);
                spectrum.c_sca.push(point.c_sca);
                spectrum.c_abs.push(point.c_abs);
                spectrum.coefficients.push(Some(point.coefficients));
                if let Some(warning) = point.warning {
                    log::warn!(
                        "series not converged at {:.4e} m: last-order contribution {:.3e} with {} orders",
                        warning.wavelength,
                        warning.relative_contribution,
                        warning.order
                    );
                    spectrum.warnings.push(warning);
                }
            }
            Err(error) => {
                let wavelength = spectrum.wavelengths[index];
                log::warn!("no result at {wavelength:.4e} m: {error}");
                spectrum.q_ext.push(f64::NAN);
                spectrum.q_sca.push(f64::NAN);
                spectrum.q_abs.push(f64::NAN);
                spectrum.c_ext.push(f64::NAN);
                spectrum.c_sca.push(f64::NAN);
                spectrum.c_abs.push(f64::NAN);
                spectrum.coefficients.push(None);
                spectrum.failures.push(WavelengthFailure {
                    index,
                    wavelength,
                    error,
                });
            }
        }
    }
    spectrum
}

/// Build the optical state for one wavelength from the injected providers
fn optical_state_at(
    sphere: &dyn RefractiveIndexProvider,
    medium: &dyn RefractiveIndexProvider,
    mu: Complex64,
    wavelength: f64,
) -> Result<OpticalState> {
    let n_sphere = sphere.refractive_index(wavelength)?;
    let n_medium = medium.refractive_index(wavelength)?;
    if n_medium.im != 0.0 {
        return Err(MieError::Domain(format!(
            "medium must be non-absorbing, got index {n_medium} at {wavelength:.4e} m"
        )));
    }
    OpticalState::new(n_sphere, n_medium.re, mu)
}

/// Solve at the nominal truncation order; if the last order still carries
/// weight, retry once with extra orders and keep that solution.
fn solve_with_retry(
    x: f64,
    m: Complex64,
    mu: Complex64,
    n_max: usize,
    wavelength: f64,
    settings: &SolverSettings,
) -> Result<(CoefficientSet, f64, f64, Option<ConvergenceWarning>)> {
    let set = compute_coefficients_with_epsilon(x, m, mu, n_max, settings.denominator_epsilon)?;
    let (q_ext, q_sca) = efficiency_sums(x, &set);
    let contribution = last_order_contribution(x, &set, q_ext, q_sca);
    if contribution <= settings.convergence_tolerance {
        return Ok((set, q_ext, q_sca, None));
    }

    let boosted = truncation::boosted(x, ORDER_BOOST);
    let set = compute_coefficients_with_epsilon(x, m, mu, boosted, settings.denominator_epsilon)?;
    let (q_ext, q_sca) = efficiency_sums(x, &set);
    let contribution = last_order_contribution(x, &set, q_ext, q_sca);
    let warning = if contribution <= settings.convergence_tolerance {
        None
    } else {
        Some(ConvergenceWarning {
            wavelength,
            order: boosted,
            relative_contribution: contribution,
        })
    };
    Ok((set, q_ext, q_sca, warning))
}

/// Extinction and scattering efficiencies from a coefficient set
fn efficiency_sums(x: f64, set: &CoefficientSet) -> (f64, f64) {
    let prefactor = 2.0 / (x * x);
    let mut ext = 0.0;
    let mut sca = 0.0;
    for (slot, (a, b)) in set.a.iter().zip(&set.b).enumerate() {
        let weight = (2 * (slot + 1) + 1) as f64;
        ext += weight * (a.re + b.re);
        sca += weight * (a.norm_sqr() + b.norm_sqr());
    }
    (prefactor * ext, prefactor * sca)
}

/// Relative weight of the highest retained order in both efficiency sums
fn last_order_contribution(x: f64, set: &CoefficientSet, q_ext: f64, q_sca: f64) -> f64 {
    let count = set.order_count();
    let a = set.a[count - 1];
    let b = set.b[count - 1];
    let weight = (2 * count + 1) as f64;
    let prefactor = 2.0 / (x * x);
    let ext_term = (prefactor * weight * (a.re + b.re)).abs();
    let sca_term = prefactor * weight * (a.norm_sqr() + b.norm_sqr());
    let ext_rel = if q_ext == 0.0 { 0.0 } else { ext_term / q_ext.abs() };
    let sca_rel = if q_sca == 0.0 { 0.0 } else { sca_term / q_sca.abs() };
    ext_rel.max(sca_rel)
}
