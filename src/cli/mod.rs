/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Command line interface
//!
//! Run spectra from JSON parameter files:
//! ```sh
//! mie-rs run job.json
//! mie-rs run --radius 75e-9 --format json
//! mie-rs validate job.json
//! ```
//!
//! Failed wavelengths appear as `NaN` in CSV output and `null` in JSON
//! output, with the reasons listed under `failures`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::input::{ComplexParameter, MaterialSpec, MieParameters};
use crate::mie::MieSpectrum;
use crate::utils::meters_to_nanometers;

#[derive(Parser)]
#[command(name = "mie-rs")]
#[command(about = "Mie scattering spectra for homogeneous spheres")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute a spectrum and write it as CSV or JSON
    Run(RunArgs),
    /// Check a parameter file without running the simulation
    Validate {
        /// Path to the JSON parameter file
        config: PathBuf,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Path to a JSON parameter file; built-in defaults apply when omitted
    config: Option<PathBuf>,
    /// Sphere radius in meters
    #[arg(long)]
    radius: Option<f64>,
    /// First wavelength in meters
    #[arg(long)]
    wavelength_start: Option<f64>,
    /// Last wavelength in meters
    #[arg(long)]
    wavelength_stop: Option<f64>,
    /// Number of wavelength points
    #[arg(long)]
    wavelength_count: Option<usize>,
    /// Real part of a constant sphere index; replaces the configured material
    #[arg(long)]
    sphere_n: Option<f64>,
    /// Imaginary part of a constant sphere index; replaces the configured material
    #[arg(long)]
    sphere_k: Option<f64>,
    /// Refractive index of the surrounding medium
    #[arg(long)]
    medium_n: Option<f64>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

/// Parse the command line and execute the selected command.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run_spectrum(args),
        Command::Validate { config } => {
            let parameters = MieParameters::from_file(&config)
                .with_context(|| format!("failed to read {}", config.display()))?;
            parameters.validate()?;
            println!("Parameters are valid: {}", config.display());
            Ok(())
        }
    }
}

fn run_spectrum(args: RunArgs) -> anyhow::Result<()> {
    let mut parameters = match &args.config {
        Some(path) => MieParameters::from_file(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => MieParameters::default(),
    };
    apply_overrides(&mut parameters, &args);

    let simulation = parameters.build_simulation()?;
    log::info!(
        "computing {} wavelengths for a {:.1} nm sphere",
        simulation.wavelengths().len(),
        meters_to_nanometers(simulation.geometry().radius)
    );
    let spectrum = simulation.run();
    if !spectrum.is_complete() {
        log::warn!(
            "{} of {} wavelengths failed",
            spectrum.failures.len(),
            spectrum.len()
        );
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_spectrum(&mut writer, &spectrum, args.format)?;
            writer.flush()?;
            println!("Spectrum written to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_spectrum(&mut writer, &spectrum, args.format)?;
        }
    }
    Ok(())
}

fn apply_overrides(parameters: &mut MieParameters, args: &RunArgs) {
    if let Some(radius) = args.radius {
        parameters.radius = radius;
    }
    if let Some(start) = args.wavelength_start {
        parameters.wavelengths.start = start;
    }
    if let Some(stop) = args.wavelength_stop {
        parameters.wavelengths.stop = stop;
    }
    if let Some(count) = args.wavelength_count {
        parameters.wavelengths.count = count;
    }
    if args.sphere_n.is_some() || args.sphere_k.is_some() {
        let mut index = match &parameters.sphere_material {
            MaterialSpec::Constant { index } => *index,
            _ => ComplexParameter::new(1.5, 0.0),
        };
        if let Some(n) = args.sphere_n {
            index.re = n;
        }
        if let Some(k) = args.sphere_k {
            index.im = k;
        }
        parameters.sphere_material = MaterialSpec::Constant { index };
    }
    if let Some(n) = args.medium_n {
        parameters.medium_index = n;
    }
}

fn write_spectrum<W: Write>(
    writer: &mut W,
    spectrum: &MieSpectrum,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Csv => write_csv(writer, spectrum)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, &spectrum_to_json(spectrum))?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

/// Write the spectrum as CSV, one row per wavelength.
pub fn write_csv<W: Write>(writer: &mut W, spectrum: &MieSpectrum) -> io::Result<()> {
    writeln!(
        writer,
        "wavelength_m,q_ext,q_sca,q_abs,c_ext_m2,c_sca_m2,c_abs_m2"
    )?;
    for i in 0..spectrum.len() {
        writeln!(
            writer,
            "{:.6e},{:.6e},{:.6e},{:.6e},{:.6e},{:.6e},{:.6e}",
            spectrum.wavelengths[i],
            spectrum.q_ext[i],
            spectrum.q_sca[i],
            spectrum.q_abs[i],
            spectrum.c_ext[i],
            spectrum.c_sca[i],
            spectrum.c_abs[i],
        )?;
    }
    Ok(())
}

/// Convert the spectrum to a JSON document.
///
/// Non-finite slots from failed wavelengths serialize as `null`.
pub fn spectrum_to_json(spectrum: &MieSpectrum) -> serde_json::Value {
    let failures: Vec<serde_json::Value> = spectrum
        .failures
        .iter()
        .map(|failure| {
            serde_json::json!({
                "index": failure.index,
                "wavelength_m": failure.wavelength,
                "error": failure.error.to_string(),
            })
        })
        .collect();
    let warnings: Vec<serde_json::Value> = spectrum
        .warnings
        .iter()
        .map(|warning| {
            serde_json::json!({
                "wavelength_m": warning.wavelength,
                "order": warning.order,
                "relative_contribution": warning.relative_contribution,
            })
        })
        .collect();
    serde_json::json!({
        "wavelength_m": spectrum.wavelengths,
        "q_ext": spectrum.q_ext,
        "q_sca": spectrum.q_sca,
        "q_abs": spectrum.q_abs,
        "c_ext_m2": spectrum.c_ext,
        "c_sca_m2": spectrum.c_sca,
        "c_abs_m2": spectrum.c_abs,
        "failures": failures,
        "warnings": warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_spectrum() -> MieSpectrum {
        let parameters = MieParameters {
            wavelengths: crate::input::WavelengthRange {
                start: 500e-9,
                stop: 600e-9,
                count: 3,
            },
            ..Default::default()
        };
        parameters.build_simulation().unwrap().run()
    }

    #[test]
    fn test_csv_layout() {
        let spectrum = small_spectrum();
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &spectrum).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "wavelength_m,q_ext,q_sca,q_abs,c_ext_m2,c_sca_m2,c_abs_m2"
        );
        for line in &lines[1..] {
            assert_eq!(line.split(',').count(), 7);
        }
    }

    #[test]
    fn test_json_document_shape() {
        let spectrum = small_spectrum();
        let document = spectrum_to_json(&spectrum);
        assert_eq!(document["wavelength_m"].as_array().unwrap().len(), 3);
        assert_eq!(document["q_ext"].as_array().unwrap().len(), 3);
        assert!(document["failures"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_run_arguments_parse() {
        let cli = Cli::try_parse_from([
            "mie-rs",
            "run",
            "--radius",
            "75e-9",
            "--sphere-n",
            "1.4",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.radius, Some(75e-9));
                assert_eq!(args.sphere_n, Some(1.4));
                assert_eq!(args.format, OutputFormat::Json);
                assert!(args.config.is_none());
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_overrides_replace_material() {
        let mut parameters = MieParameters::default();
        let args = RunArgs {
            config: None,
            radius: None,
            wavelength_start: None,
            wavelength_stop: None,
            wavelength_count: None,
            sphere_n: None,
            sphere_k: Some(0.3),
            medium_n: Some(1.33),
            format: OutputFormat::Csv,
            output: None,
        };
        apply_overrides(&mut parameters, &args);
        assert_eq!(
            parameters.sphere_material,
            MaterialSpec::Constant {
                index: ComplexParameter::new(1.5, 0.3),
            }
        );
        assert_eq!(parameters.medium_index, 1.33);
    }
}
