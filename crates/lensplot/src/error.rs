//! Error types for Lensplot operations.
//!
//! This module provides the main error type [`LensplotError`] which wraps
//! the conditions that can stop a diagram from being produced. Problems with
//! the counts themselves are never errors: they are repaired during
//! reconciliation and reported as diagnostics.

use std::io;

use thiserror::Error;

/// The main error type for Lensplot operations.
///
/// # Source Variants
///
/// The `Input` variant keeps the JSON text that failed to parse, so the
/// reported line and column can be shown against it.
#[derive(Debug, Error)]
pub enum LensplotError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid input: {err}")]
    Input { err: serde_json::Error, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for LensplotError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl LensplotError {
    /// Create a new `Input` error with the associated source text.
    pub fn new_input_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Input {
            err,
            src: src.into(),
        }
    }
}
