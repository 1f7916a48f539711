/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for parameter loading and validation

use std::io;

use thiserror::Error;

use crate::mie::MieError;

/// Result type for input operations
pub type Result<T> = std::result::Result<T, InputError>;

/// Errors that can occur while loading or validating parameters
#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid parameter: {0}")]
    Invalid(String),
}

impl From<MieError> for InputError {
    fn from(err: MieError) -> Self {
        InputError::Invalid(err.to_string())
    }
}
