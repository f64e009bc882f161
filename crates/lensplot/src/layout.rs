//! Layout planning for Lensplot diagrams.
//!
//! The planner turns reconciled counts into a [`Diagram`] in four steps:
//!
//! ```text
//! Reconciled
//!     ↓ problem   radii and pairwise distance targets
//!     ↓ place     PlacementEngine (heuristic or refined)
//!     ↓ fit       uniform scale and translation onto the canvas
//!     ↓ regions   pairwise lenses and triple regions
//! Diagram
//! ```
//!
//! Planning never fails; empty input yields an empty [`Diagram`].

mod engines;
mod problem;
mod regions;

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use lensplot_core::{
    circle::{Circle, scale_for_canvas},
    diagram::{CircleLayout, Diagram},
    geometry::Size,
};
use lensplot_reconcile::Reconciled;

use crate::config::LayoutConfig;
use engines::EngineBuilder;
use problem::LayoutProblem;

/// Available placement engines.
///
/// The names match external configuration strings (snake_case).
///
/// # Variants
///
/// - `Heuristic` - Fixed arrangements chosen by input shape (default)
/// - `Refined` - The heuristic arrangement improved by gradient descent
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutEngine {
    /// Heuristic placement engine (default)
    #[default]
    Heuristic,
    /// Heuristic placement refined against the pairwise targets
    Refined,
}

impl FromStr for LayoutEngine {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heuristic" => Ok(Self::Heuristic),
            "refined" => Ok(Self::Refined),
            _ => Err("Unsupported layout engine"),
        }
    }
}

impl From<LayoutEngine> for &'static str {
    fn from(val: LayoutEngine) -> Self {
        match val {
            LayoutEngine::Heuristic => "heuristic",
            LayoutEngine::Refined => "refined",
        }
    }
}

impl Display for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Computes diagrams for one layout configuration.
pub struct Planner {
    config: LayoutConfig,
    engines: EngineBuilder,
}

impl Planner {
    /// Create a planner with engines configured from `config`.
    pub fn new(config: LayoutConfig) -> Self {
        let engines = EngineBuilder::new()
            .with_mild_overlap(config.mild_overlap())
            .with_intersect_bias(config.intersect_bias())
            .with_refine_iterations(config.refine_iterations());
        Self { config, engines }
    }

    /// Lay out `reconciled` on the configured canvas.
    pub fn plan(&mut self, reconciled: &Reconciled) -> Diagram {
        let canvas = Size::new(self.config.width(), self.config.height());
        if reconciled.is_empty() {
            info!("No sets to lay out; producing an empty diagram");
            return Diagram::empty(canvas);
        }

        let max_size = reconciled
            .sets()
            .iter()
            .map(|set| set.size())
            .fold(0.0, f64::max);
        let scale = scale_for_canvas(
            canvas.width(),
            canvas.height(),
            max_size,
            self.config.fill_fraction(),
        );

        let problem = LayoutProblem::new(reconciled, scale, self.config.margin());
        let engine_kind = self.config.engine();
        let positions = self.engines.engine(engine_kind).place(&problem);
        info!(
            engine:% = engine_kind,
            sets = problem.len(),
            scale = scale;
            "Circles placed"
        );

        let circles: Vec<Circle> = problem
            .nodes()
            .iter()
            .zip(&positions)
            .map(|(node, &center)| Circle::new(center, node.radius()))
            .collect();
        let (circles, factor) = self.fit(circles, canvas);
        let scale = scale * factor;

        let circles: Vec<CircleLayout> = problem
            .nodes()
            .iter()
            .zip(circles)
            .map(|(node, circle)| CircleLayout::new(node.name(), circle))
            .collect();
        trace!(circles:?; "Fitted circles");

        let pairwise = regions::pairwise_regions(
            &circles,
            reconciled,
            scale,
            self.config.estimated_overlap_fraction(),
        );
        let triples =
            regions::triple_regions(&circles, reconciled, scale, self.config.triple_reduction());
        debug!(
            pairwise_regions = pairwise.len(),
            triple_regions = triples.len();
            "Regions derived"
        );

        Diagram::new(canvas, scale, circles, pairwise, triples)
    }

    /// Scales the arrangement down to fit inside the padded canvas and
    /// centres it. Returns the circles and the applied scale factor.
    fn fit(&self, circles: Vec<Circle>, canvas: Size) -> (Vec<Circle>, f64) {
        let bounds = circles
            .iter()
            .map(Circle::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds));
        let Some(bounds) = bounds else {
            return (circles, 1.0);
        };

        if !self.config.fit_to_canvas() {
            let offset = canvas.center();
            let circles = circles.iter().map(|c| c.translate(offset)).collect();
            return (circles, 1.0);
        }

        let padding = self.config.padding();
        let available = Size::new(
            (canvas.width() - 2.0 * padding).max(0.0),
            (canvas.height() - 2.0 * padding).max(0.0),
        );
        let mut factor: f64 = 1.0;
        if bounds.width() > 0.0 {
            factor = factor.min(available.width() / bounds.width());
        }
        if bounds.height() > 0.0 {
            factor = factor.min(available.height() / bounds.height());
        }
        if factor < 1.0 {
            debug!(factor = factor; "Scaling arrangement down to fit the canvas");
        }

        let center = bounds.center().scale(factor);
        let offset = canvas.center().sub_point(center);
        let circles = circles
            .iter()
            .map(|circle| circle.scale(factor).translate(offset))
            .collect();
        (circles, factor)
    }
}

/// Lay out `reconciled` with `config`.
pub fn plan(reconciled: &Reconciled, config: &LayoutConfig) -> Diagram {
    Planner::new(config.clone()).plan(reconciled)
}
