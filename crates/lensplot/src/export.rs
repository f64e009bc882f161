//! Export functionality for Lensplot diagrams.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! converting laid-out diagrams into output formats. It is the final stage in
//! the Lensplot pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Counts (JSON)
//!     ↓ reconcile
//! Reconciled sets and intersections
//!     ↓ layout
//! Diagram
//!     ↓ export (this module)
//! Output text
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//! - [`json`] - The [`Diagram`] itself as pretty-printed JSON
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering and serialization
//! failures. [`Error`] converts into [`LensplotError::Export`] at the crate
//! boundary.
//!
//! [`LensplotError::Export`]: crate::LensplotError::Export

pub mod json;
/// SVG export backend.
pub mod svg;

use lensplot_core::diagram::Diagram;

/// Abstraction for diagram export backends.
///
/// Implementors convert a [`Diagram`] into the text of a specific output
/// format.
pub trait Exporter {
    /// Exports a diagram to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the diagram cannot be converted to the
    /// target format, or [`Error::Json`] if serialization fails.
    fn export_diagram(&mut self, diagram: &Diagram) -> Result<String, Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// A JSON serialization failure.
    Json(serde_json::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
