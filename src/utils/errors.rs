/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the utils module

use thiserror::Error;

/// Errors that can occur in numerical utility routines
#[derive(Error, Debug)]
pub enum UtilsError {
    /// Argument outside the domain of a function
    #[error("Domain error: {0}")]
    Domain(String),

    /// Math-related errors (overflow, failed recurrences)
    #[error("Math error: {0}")]
    Math(String),
}

/// A specialized Result type for utils operations
pub type Result<T> = std::result::Result<T, UtilsError>;
