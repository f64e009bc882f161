//! Lensplot Core Types and Definitions
//!
//! This crate provides the foundational types for Lensplot, the
//! area-proportional set diagram engine. It includes:
//!
//! - **Model**: Canonical set and intersection specifications ([`model`] module)
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Circle**: Pure circle math used by the layout planner ([`circle`] module)
//! - **Outline**: Arc-based region outlines for lenses and triples ([`outline`] module)
//! - **Diagram**: The layout result handed to presentation adapters ([`diagram`] module)

pub mod circle;
pub mod diagram;
pub mod geometry;
pub mod model;
pub mod outline;
