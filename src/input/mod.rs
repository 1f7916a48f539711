/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Configuration input handling
//!
//! This module reads simulation parameters from JSON files, validates
//! them and turns them into runnable simulations.

pub mod errors;

mod parameters;

pub use errors::{InputError, Result};
pub use parameters::{ComplexParameter, MaterialSpec, MieParameters, WavelengthRange};
