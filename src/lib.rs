/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! # mie-rs
//!
//! A Rust implementation of Lorenz-Mie theory for light scattering by a
//! homogeneous sphere.
//!
//! Given a sphere radius, a wavelength grid and refractive index models
//! for the sphere and its host medium, the crate computes the multipole
//! expansion coefficients and the extinction, scattering and absorption
//! efficiencies and cross sections at every wavelength.
//!
//! ## Example
//!
//! ```
//! use mie_rs::input::MieParameters;
//!
//! let parameters = MieParameters::default();
//! let simulation = parameters.build_simulation()?;
//! let spectrum = simulation.run();
//! assert_eq!(spectrum.len(), 10);
//! # Ok::<(), mie_rs::input::InputError>(())
//! ```

pub mod cli;
pub mod input;
pub mod materials;
pub mod mie;
pub mod utils;

use num_complex::Complex64;

use crate::input::{MieParameters, Result as InputResult};
use crate::materials::RefractiveIndexProvider;
use crate::mie::{calculate_spectrum, MieSpectrum, SolverSettings, SphereGeometry, WavelengthGrid};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

/// A fully assembled scattering calculation
///
/// Holds the sphere geometry, the wavelength grid, the material models
/// and the solver thresholds. Construction validates everything, so
/// [`MieSimulation::run`] itself cannot fail; per-wavelength problems
/// are reported inside the returned [`MieSpectrum`].
pub struct MieSimulation {
    geometry: SphereGeometry,
    grid: WavelengthGrid,
    sphere: Box<dyn RefractiveIndexProvider>,
    medium: Box<dyn RefractiveIndexProvider>,
    mu: Complex64,
    settings: SolverSettings,
}

impl MieSimulation {
    /// Build a simulation from validated parameters.
    pub fn new(parameters: &MieParameters) -> InputResult<Self> {
        parameters.build_simulation()
    }

    /// Assemble a simulation from already constructed pieces.
    ///
    /// The permeability defaults to 1 and the solver thresholds to
    /// their documented defaults; use [`MieSimulation::with_permeability`]
    /// and [`MieSimulation::with_settings`] to override them.
    pub fn from_parts(
        geometry: SphereGeometry,
        grid: WavelengthGrid,
        sphere: Box<dyn RefractiveIndexProvider>,
        medium: Box<dyn RefractiveIndexProvider>,
    ) -> Self {
        Self {
            geometry,
            grid,
            sphere,
            medium,
            mu: Complex64::new(1.0, 0.0),
            settings: SolverSettings::default(),
        }
    }

    /// Set the relative permeability of the sphere.
    pub fn with_permeability(mut self, mu: Complex64) -> Self {
        self.mu = mu;
        self
    }

    /// Override the solver thresholds.
    pub fn with_settings(mut self, settings: SolverSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The sphere geometry
    pub fn geometry(&self) -> &SphereGeometry {
        &self.geometry
    }

    /// The wavelengths the spectrum will be evaluated at
    pub fn wavelengths(&self) -> &[f64] {
        self.grid.points()
    }

    /// Compute the spectrum over the whole wavelength grid.
    pub fn run(&self) -> MieSpectrum {
        calculate_spectrum(
            &self.geometry,
            &self.grid,
            self.sphere.as_ref(),
            self.medium.as_ref(),
            self.mu,
            &self.settings,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::ConstantIndex;

    #[test]
    fn test_default_parameters_run() {
        let parameters = MieParameters::default();
        let simulation = MieSimulation::new(&parameters).unwrap();
        let spectrum = simulation.run();
        assert_eq!(spectrum.len(), 10);
        assert!(spectrum.is_complete());
    }

    #[test]
    fn test_from_parts_run() {
        let geometry = SphereGeometry::new(50e-9).unwrap();
        let grid = WavelengthGrid::linspace(500e-9, 600e-9, 3).unwrap();
        let sphere = Box::new(ConstantIndex::new(Complex64::new(1.4, 0.0)));
        let medium = Box::new(ConstantIndex::new(Complex64::new(1.0, 0.0)));
        let simulation = MieSimulation::from_parts(geometry, grid, sphere, medium);
        let spectrum = simulation.run();
        assert_eq!(spectrum.len(), 3);
        assert!(spectrum.failures.is_empty());
    }
}
