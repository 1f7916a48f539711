/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use num_complex::Complex64;

use mie_rs::input::{InputError, MaterialSpec, MieParameters};
use mie_rs::materials::RefractiveIndexProvider;
use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

/// Test helper to write a temporary parameter file
fn create_parameter_file(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("job.json");
    let mut file = File::create(&file_path).unwrap();
    writeln!(file, "{}", content).unwrap();
    (dir, file_path)
}

#[test]
fn test_load_full_parameter_file() {
    let content = r#"{
    "radius": 2.5e-7,
    "wavelengths": { "start": 4.5e-7, "stop": 7.5e-7, "count": 31 },
    "sphere_material": { "model": "constant", "index": { "re": 1.33, "im": 0.002 } },
    "medium_index": 1.0,
    "relative_permeability": { "re": 1.0 },
    "convergence_tolerance": 1e-7
}"#;
    let (_dir, file_path) = create_parameter_file(content);
    let parameters = MieParameters::from_file(&file_path).unwrap();

    assert_eq!(parameters.radius, 2.5e-7);
    assert_eq!(parameters.wavelengths.count, 31);
    assert_eq!(
        parameters.sphere_material,
        MaterialSpec::Constant {
            index: mie_rs::input::ComplexParameter::new(1.33, 0.002),
        }
    );
    // Omitted "im" falls back to zero
    assert_eq!(parameters.relative_permeability.im, 0.0);
    assert_eq!(parameters.convergence_tolerance, Some(1e-7));
    assert_eq!(parameters.denominator_epsilon, None);
    assert!(parameters.validate().is_ok());
}

#[test]
fn test_loaded_parameters_run_end_to_end() {
    let content = r#"{
    "radius": 1.0e-7,
    "wavelengths": { "start": 5.0e-7, "stop": 6.0e-7, "count": 4 },
    "sphere_material": { "model": "fused_silica" }
}"#;
    let (_dir, file_path) = create_parameter_file(content);
    let parameters = MieParameters::from_file(&file_path).unwrap();
    let spectrum = parameters.build_simulation().unwrap().run();
    assert_eq!(spectrum.len(), 4);
    assert!(spectrum.is_complete());
}

#[test]
fn test_missing_file_is_an_io_error() {
    let result = MieParameters::from_file("does/not/exist.json");
    assert!(matches!(result, Err(InputError::Io(_))));
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    let (_dir, file_path) = create_parameter_file("{ \"radius\": ");
    let result = MieParameters::from_file(&file_path);
    assert!(matches!(result, Err(InputError::Json(_))));
}

#[test]
fn test_unknown_top_level_field_is_rejected() {
    let (_dir, file_path) = create_parameter_file(r#"{ "radius_nm": 100 }"#);
    let result = MieParameters::from_file(&file_path);
    assert!(matches!(result, Err(InputError::Json(_))));
}

#[test]
fn test_material_models_deserialize_by_tag() {
    let silica: MaterialSpec = serde_json::from_str(r#"{ "model": "fused_silica" }"#).unwrap();
    assert_eq!(silica, MaterialSpec::FusedSilica);

    let tabulated: MaterialSpec = serde_json::from_str(
        r#"{
        "model": "tabulated",
        "wavelengths": [4.0e-7, 8.0e-7],
        "n": [1.6, 1.55],
        "k": [0.01, 0.0]
    }"#,
    )
    .unwrap();
    match &tabulated {
        MaterialSpec::Tabulated { wavelengths, .. } => assert_eq!(wavelengths.len(), 2),
        other => panic!("expected tabulated model, got {other:?}"),
    }

    let sellmeier: MaterialSpec = serde_json::from_str(
        r#"{
        "model": "sellmeier",
        "b": [0.6961663, 0.4079426, 0.8974794],
        "c": [4.67914825849e-15, 1.351206307396e-14, 9.79340025379e-11],
        "range": [2.1e-7, 6.7e-6]
    }"#,
    )
    .unwrap();
    assert!(matches!(sellmeier, MaterialSpec::Sellmeier { .. }));
}

#[test]
fn test_tabulated_parameters_build_an_interpolating_provider() {
    let parameters = MieParameters {
        sphere_material: MaterialSpec::Tabulated {
            wavelengths: vec![400e-9, 800e-9],
            n: vec![1.6, 1.5],
            k: vec![0.0, 0.0],
        },
        ..Default::default()
    };
    let provider = parameters.build_sphere_provider().unwrap();
    assert_eq!(provider.name(), "tabulated");
    let index = provider.refractive_index(600e-9).unwrap();
    assert!((index - Complex64::new(1.55, 0.0)).norm() < 1e-12);
}

#[test]
fn test_validation_errors_name_the_offending_field() {
    let mut parameters = MieParameters::default();
    parameters.wavelengths.count = 0;
    let message = parameters.validate().unwrap_err().to_string();
    assert!(message.contains("count"), "unexpected message: {message}");

    let mut parameters = MieParameters::default();
    parameters.radius = f64::NAN;
    let message = parameters.validate().unwrap_err().to_string();
    assert!(message.contains("radius"), "unexpected message: {message}");
}

#[test]
fn test_invalid_material_data_fails_validation() {
    let parameters = MieParameters {
        sphere_material: MaterialSpec::Tabulated {
            wavelengths: vec![400e-9, 800e-9],
            n: vec![1.5],
            k: vec![0.0],
        },
        ..Default::default()
    };
    assert!(matches!(parameters.validate(), Err(InputError::Invalid(_))));
}
