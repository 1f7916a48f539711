/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Mie scattering for a single homogeneous sphere
//!
//! This module implements the Lorenz-Mie solution for plane-wave scattering
//! off a sphere embedded in a non-absorbing medium. The pipeline per
//! wavelength is: size parameter, series truncation, multipole coefficients,
//! efficiency sums, cross sections. Spectra over a grid fan out in parallel
//! and gather in grid order.

mod coefficients;
mod spectrum;
mod truncation;

pub mod errors;

use std::f64::consts::PI;

use num_complex::Complex64;

pub use coefficients::{compute_coefficients, compute_coefficients_with_epsilon, CoefficientSet};
pub use errors::{MieError, Result};
pub use spectrum::{
    calculate_point, calculate_spectrum, ConvergenceWarning, MieSpectrum, SolverSettings,
    SpectrumPoint, WavelengthFailure,
};
pub use truncation::{boosted, max_order};

/// An ordered grid of vacuum wavelengths in meters
#[derive(Debug, Clone, PartialEq)]
pub struct WavelengthGrid {
    points: Vec<f64>,
}

impl WavelengthGrid {
    /// Build a grid from explicit points.
    ///
    /// # Arguments
    ///
    /// * `points` - Wavelengths in meters; finite, positive, strictly
    ///   increasing, at least one
    pub fn from_points(points: Vec<f64>) -> Result<Self> {
        if points.is_empty() {
            return Err(MieError::Domain(
                "wavelength grid must not be empty".to_string(),
            ));
        }
        for &wavelength in &points {
            if !wavelength.is_finite() || wavelength <= 0.0 {
                return Err(MieError::Domain(format!(
                    "wavelengths must be finite and positive, got {wavelength}"
                )));
            }
        }
        for pair in points.windows(2) {
            if pair[1] <= pair[0] {
                return Err(MieError::Domain(format!(
                    "wavelengths must be strictly increasing, got {} after {}",
                    pair[1], pair[0]
                )));
            }
        }
        Ok(Self { points })
    }

    /// Evenly spaced grid from `start` to `stop` inclusive. A count of one
    /// yields the single point `start`.
    pub fn linspace(start: f64, stop: f64, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(MieError::Domain(
                "a wavelength grid needs at least one point".to_string(),
            ));
        }
        if count == 1 {
            return Self::from_points(vec![start]);
        }
        let step = (stop - start) / (count - 1) as f64;
        let mut points = Vec::with_capacity(count);
        for i in 0..count {
            points.push(start + i as f64 * step);
        }
        points[count - 1] = stop;
        Self::from_points(points)
    }

    /// The grid points in meters
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Number of grid points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the grid holds no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The scattering sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereGeometry {
    /// Radius in meters
    pub radius: f64,
}

impl SphereGeometry {
    /// Create a sphere, validating the radius.
    pub fn new(radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(MieError::Domain(format!(
                "sphere radius must be finite and positive, got {radius}"
            )));
        }
        Ok(Self { radius })
    }

    /// Geometric cross section pi r^2, in m^2
    pub fn geometric_cross_section(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// Size parameter 2 pi r / wavelength, with the vacuum wavelength
    pub fn size_parameter(&self, wavelength: f64) -> f64 {
        2.0 * PI * self.radius / wavelength
    }
}

/// Optical constants entering the solve at one wavelength
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpticalState {
    /// Complex refractive index of the sphere, Im >= 0
    pub n_sphere: Complex64,
    /// Real refractive index of the surrounding medium
    pub n_medium: f64,
    /// Relative permeability of the sphere
    pub mu: Complex64,
}

impl OpticalState {
    /// Create a validated optical state.
    ///
    /// # Arguments
    ///
    /// * `n_sphere` - Sphere refractive index; finite, nonzero, Im >= 0
    /// * `n_medium` - Medium refractive index; finite and positive
    /// * `mu` - Relative permeability; finite and nonzero
    pub fn new(n_sphere: Complex64, n_medium: f64, mu: Complex64) -> Result<Self> {
        if !n_sphere.is_finite() || n_sphere.norm() == 0.0 {
            return Err(MieError::Domain(format!(
                "sphere index must be finite and nonzero, got {n_sphere}"
            )));
        }
        if n_sphere.im < 0.0 {
            return Err(MieError::Domain(format!(
                "sphere index must be passive (Im >= 0), got {n_sphere}"
            )));
        }
        if !n_medium.is_finite() || n_medium <= 0.0 {
            return Err(MieError::Domain(format!(
                "medium index must be finite and positive, got {n_medium}"
            )));
        }
        if !mu.is_finite() || mu.norm() == 0.0 {
            return Err(MieError::Domain(format!(
                "relative permeability must be finite and nonzero, got {mu}"
            )));
        }
        Ok(Self {
            n_sphere,
            n_medium,
            mu,
        })
    }

    /// State for a non-magnetic sphere (mu = 1)
    pub fn non_magnetic(n_sphere: Complex64, n_medium: f64) -> Result<Self> {
        Self::new(n_sphere, n_medium, Complex64::new(1.0, 0.0))
    }

    /// Relative refractive index m = n_sphere / n_medium
    pub fn relative_index(&self) -> Complex64 {
        self.n_sphere / self.n_medium
    }
}
