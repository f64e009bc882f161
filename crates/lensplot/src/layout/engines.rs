//! Placement engine factory module
//!
//! This module provides a system for selecting and using different placement
//! engines based on the configured [`LayoutEngine`]. Engines only decide where
//! circle centres go; radii come from the [`LayoutProblem`] and regions are
//! derived afterwards, so every engine produces the same `Diagram` shape.
//!
//! The module uses a builder pattern for creating and configuring engines.

mod heuristic;
mod refined;

use std::collections::HashMap;

use lensplot_core::geometry::Point;

use super::{LayoutEngine, problem::LayoutProblem};

/// Trait defining the interface for placement engines
pub trait PlacementEngine {
    /// Calculate a centre for every node of `problem`, in node order.
    ///
    /// Positions are relative to an arbitrary origin; role-placed sets are
    /// put on the origin itself.
    fn place(&self, problem: &LayoutProblem) -> Vec<Point>;
}

/// Builder for creating and configuring placement engines.
#[derive(Default)]
pub struct EngineBuilder {
    // Cache for reusing engines with the same configuration
    engines: HashMap<LayoutEngine, Box<dyn PlacementEngine>>,

    // Configuration options
    mild_overlap: f64,
    intersect_bias: f64,
    refine_iterations: usize,
}

impl EngineBuilder {
    /// Create a new engine builder with default engine cache and configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fraction by which unconstrained neighbours overlap
    pub fn with_mild_overlap(mut self, mild_overlap: f64) -> Self {
        self.mild_overlap = mild_overlap;
        self
    }

    /// Set how strongly `intersectsWith` hints pull sets together on a ring
    pub fn with_intersect_bias(mut self, bias: f64) -> Self {
        self.intersect_bias = bias;
        self
    }

    /// Set the upper bound on refinement steps
    pub fn with_refine_iterations(mut self, iterations: usize) -> Self {
        self.refine_iterations = iterations;
        self
    }

    /// Get an engine of the specified type with configured options
    pub fn engine(&mut self, engine_type: LayoutEngine) -> &dyn PlacementEngine {
        let engine = self.engines.entry(engine_type).or_insert_with(|| {
            let mut heuristic = heuristic::Heuristic::new();
            heuristic.set_mild_overlap(self.mild_overlap);
            heuristic.set_intersect_bias(self.intersect_bias);

            let engine: Box<dyn PlacementEngine> = match engine_type {
                LayoutEngine::Heuristic => Box::new(heuristic),
                LayoutEngine::Refined => {
                    let mut e = refined::Refined::new(heuristic);
                    e.set_max_iterations(self.refine_iterations);
                    Box::new(e)
                }
            };
            engine
        });
        // Dereference to avoid returning reference to temporary
        &**engine
    }
}
