/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Example extinction spectrum of a dielectric sphere
//!
//! This example computes the visible-range extinction, scattering and
//! absorption efficiencies of a 100 nm glass sphere in water using the
//! mie-rs library.

use mie_rs::materials::ConstantIndex;
use mie_rs::mie::{SphereGeometry, WavelengthGrid};
use mie_rs::utils::meters_to_nanometers;
use mie_rs::MieSimulation;
use num_complex::Complex64;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // A 100 nm radius glass sphere in water
    let geometry = SphereGeometry::new(100e-9)?;
    let grid = WavelengthGrid::linspace(400e-9, 800e-9, 21)?;
    let sphere = Box::new(ConstantIndex::new(Complex64::new(1.52, 0.0)));
    let medium = Box::new(ConstantIndex::new(Complex64::new(1.33, 0.0)));

    let simulation = MieSimulation::from_parts(geometry, grid, sphere, medium);

    println!("Computing Mie spectrum for a 100 nm glass sphere in water");
    let spectrum = simulation.run();

    println!("\n{:>12} {:>12} {:>12} {:>12}", "lambda (nm)", "Q_ext", "Q_sca", "Q_abs");
    for i in 0..spectrum.len() {
        println!(
            "{:>12.1} {:>12.6} {:>12.6} {:>12.6}",
            meters_to_nanometers(spectrum.wavelengths[i]),
            spectrum.q_ext[i],
            spectrum.q_sca[i],
            spectrum.q_abs[i],
        );
    }

    // A lossless sphere scatters everything it removes from the beam
    let max_abs = spectrum
        .q_abs
        .iter()
        .fold(0.0_f64, |max, &q| max.max(q.abs()));
    println!("\nLargest |Q_abs| across the scan: {:.3e}", max_abs);

    Ok(())
}
