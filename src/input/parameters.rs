/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Simulation parameters and their JSON representation
//!
//! [`MieParameters`] is the serde-facing configuration: everything a run
//! needs, with defaults for a 100 nm dielectric sphere in vacuum scanned
//! over the visible range. Complex quantities appear in JSON as
//! `{ "re": ..., "im": ... }`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::errors::{InputError, Result};
use crate::materials::{ConstantIndex, RefractiveIndexProvider, SellmeierIndex, TabulatedIndex};
use crate::mie::{SolverSettings, SphereGeometry, WavelengthGrid};
use crate::MieSimulation;

/// A complex number in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComplexParameter {
    pub re: f64,
    #[serde(default)]
    pub im: f64,
}

impl ComplexParameter {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    pub fn to_complex(self) -> Complex64 {
        Complex64::new(self.re, self.im)
    }
}

impl From<Complex64> for ComplexParameter {
    fn from(value: Complex64) -> Self {
        Self {
            re: value.re,
            im: value.im,
        }
    }
}

/// An evenly spaced wavelength scan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct WavelengthRange {
    /// First wavelength in meters
    pub start: f64,
    /// Last wavelength in meters
    pub stop: f64,
    /// Number of grid points
    pub count: usize,
}

impl Default for WavelengthRange {
    fn default() -> Self {
        Self {
            start: 400e-9,
            stop: 800e-9,
            count: 10,
        }
    }
}

/// The sphere material model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum MaterialSpec {
    /// Wavelength-independent complex index
    Constant { index: ComplexParameter },
    /// Three-term Sellmeier equation; `c` in m^2, `range` in meters
    Sellmeier {
        b: [f64; 3],
        c: [f64; 3],
        range: [f64; 2],
    },
    /// Tabulated (wavelength, n, k) samples with linear interpolation
    Tabulated {
        wavelengths: Vec<f64>,
        n: Vec<f64>,
        k: Vec<f64>,
    },
    /// Built-in fused silica (Malitson)
    FusedSilica,
}

impl Default for MaterialSpec {
    fn default() -> Self {
        MaterialSpec::Constant {
            index: ComplexParameter::new(1.5, 0.0),
        }
    }
}

/// Everything a simulation run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct MieParameters {
    /// Sphere radius in meters
    pub radius: f64,
    /// Wavelength scan
    pub wavelengths: WavelengthRange,
    /// Sphere material
    pub sphere_material: MaterialSpec,
    /// Real refractive index of the surrounding medium
    pub medium_index: f64,
    /// Relative permeability of the sphere
    pub relative_permeability: ComplexParameter,
    /// Override for the degenerate-denominator threshold
    pub denominator_epsilon: Option<f64>,
    /// Override for the multipole convergence tolerance
    pub convergence_tolerance: Option<f64>,
}

impl Default for MieParameters {
    fn default() -> Self {
        Self {
            radius: 100e-9,
            wavelengths: WavelengthRange::default(),
            sphere_material: MaterialSpec::default(),
            medium_index: 1.0,
            relative_permeability: ComplexParameter::new(1.0, 0.0),
            denominator_epsilon: None,
            convergence_tolerance: None,
        }
    }
}

impl MieParameters {
    /// Load parameters from a JSON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a JSON configuration file
    ///
    /// # Returns
    ///
    /// The parsed parameters, not yet validated
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let parameters = serde_json::from_reader(reader)?;
        Ok(parameters)
    }

    /// Check every field against its physical constraints.
    pub fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(InputError::Invalid(format!(
                "radius must be finite and positive, got {}",
                self.radius
            )));
        }
        let range = &self.wavelengths;
        if range.count == 0 {
            return Err(InputError::Invalid(
                "wavelengths.count must be at least 1".to_string(),
            ));
        }
        if !range.start.is_finite() || range.start <= 0.0 {
            return Err(InputError::Invalid(format!(
                "wavelengths.start must be finite and positive, got {}",
                range.start
            )));
        }
        if range.count > 1 && (!range.stop.is_finite() || range.stop <= range.start) {
            return Err(InputError::Invalid(format!(
                "wavelengths.stop must exceed start, got {} <= {}",
                range.stop, range.start
            )));
        }
        if !self.medium_index.is_finite() || self.medium_index <= 0.0 {
            return Err(InputError::Invalid(format!(
                "medium_index must be finite and positive, got {}",
                self.medium_index
            )));
        }
        let mu = self.relative_permeability.to_complex();
        if !mu.is_finite() || mu.norm() == 0.0 {
            return Err(InputError::Invalid(format!(
                "relative_permeability must be finite and nonzero, got {mu}"
            )));
        }
        if let MaterialSpec::Constant { index } = &self.sphere_material {
            let index = index.to_complex();
            if !index.is_finite() || index.norm() == 0.0 {
                return Err(InputError::Invalid(format!(
                    "sphere index must be finite and nonzero, got {index}"
                )));
            }
            if index.im < 0.0 {
                return Err(InputError::Invalid(format!(
                    "sphere index must be passive (im >= 0), got {index}"
                )));
            }
        }
        for (label, value) in [
            ("denominator_epsilon", self.denominator_epsilon),
            ("convergence_tolerance", self.convergence_tolerance),
        ] {
            if let Some(value) = value {
                if !value.is_finite() || value <= 0.0 {
                    return Err(InputError::Invalid(format!(
                        "{label} must be finite and positive, got {value}"
                    )));
                }
            }
        }
        // Material models carrying embedded data validate on construction
        self.build_sphere_provider().map(|_| ())
    }

    /// Instantiate the sphere material.
    pub fn build_sphere_provider(&self) -> Result<Box<dyn RefractiveIndexProvider>> {
        let provider: Box<dyn RefractiveIndexProvider> = match &self.sphere_material {
            MaterialSpec::Constant { index } => Box::new(ConstantIndex::new(index.to_complex())),
            MaterialSpec::Sellmeier { b, c, range } => Box::new(
                SellmeierIndex::new("sellmeier", *b, *c, (range[0], range[1]))
                    .map_err(|err| InputError::Invalid(err.to_string()))?,
            ),
            MaterialSpec::Tabulated { wavelengths, n, k } => Box::new(
                TabulatedIndex::new("tabulated", wavelengths.clone(), n.clone(), k.clone())
                    .map_err(|err| InputError::Invalid(err.to_string()))?,
            ),
            MaterialSpec::FusedSilica => Box::new(SellmeierIndex::fused_silica()),
        };
        Ok(provider)
    }

    /// Solver thresholds with any configured overrides applied
    pub fn solver_settings(&self) -> SolverSettings {
        let mut settings = SolverSettings::default();
        if let Some(epsilon) = self.denominator_epsilon {
            settings.denominator_epsilon = epsilon;
        }
        if let Some(tolerance) = self.convergence_tolerance {
            settings.convergence_tolerance = tolerance;
        }
        settings
    }

    /// Validate and assemble a runnable simulation.
    pub fn build_simulation(&self) -> Result<MieSimulation> {
        self.validate()?;
        let geometry = SphereGeometry::new(self.radius)?;
        let grid = WavelengthGrid::linspace(
            self.wavelengths.start,
            self.wavelengths.stop,
            self.wavelengths.count,
        )?;
        let sphere = self.build_sphere_provider()?;
        let medium = Box::new(ConstantIndex::new(Complex64::new(self.medium_index, 0.0)));
        let simulation = MieSimulation::from_parts(geometry, grid, sphere, medium)
            .with_permeability(self.relative_permeability.to_complex())
            .with_settings(self.solver_settings());
        Ok(simulation)
    }
}
