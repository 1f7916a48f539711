/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Example spectrum with a dispersive sphere material
//!
//! This example sweeps a fused silica sphere through the visible range
//! using the built-in Sellmeier model, so the sphere index varies with
//! wavelength instead of being a single constant.

use mie_rs::materials::{ConstantIndex, RefractiveIndexProvider, SellmeierIndex};
use mie_rs::mie::{SphereGeometry, WavelengthGrid};
use mie_rs::utils::meters_to_nanometers;
use mie_rs::MieSimulation;
use num_complex::Complex64;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let silica = SellmeierIndex::fused_silica();

    // Show the dispersion the solver will see
    println!("Fused silica refractive index (Malitson Sellmeier fit):");
    for &wavelength in &[400e-9, 600e-9, 800e-9] {
        let index = silica.refractive_index(wavelength)?;
        println!(
            "  n({:.0} nm) = {:.6}",
            meters_to_nanometers(wavelength),
            index.re
        );
    }

    let geometry = SphereGeometry::new(250e-9)?;
    let grid = WavelengthGrid::linspace(400e-9, 800e-9, 41)?;
    let medium = Box::new(ConstantIndex::new(Complex64::new(1.0, 0.0)));

    let simulation = MieSimulation::from_parts(geometry, grid, Box::new(silica), medium);

    println!("\nComputing spectrum for a 250 nm fused silica sphere in air");
    let spectrum = simulation.run();

    // Report the interference-structure maximum over the scan
    let mut peak_wavelength = spectrum.wavelengths[0];
    let mut peak_q_ext = spectrum.q_ext[0];
    for i in 1..spectrum.len() {
        if spectrum.q_ext[i] > peak_q_ext {
            peak_q_ext = spectrum.q_ext[i];
            peak_wavelength = spectrum.wavelengths[i];
        }
    }

    println!(
        "Peak Q_ext = {:.4} at {:.1} nm over {} wavelengths",
        peak_q_ext,
        meters_to_nanometers(peak_wavelength),
        spectrum.len()
    );

    Ok(())
}
