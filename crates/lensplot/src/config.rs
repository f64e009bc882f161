//! Configuration types for Lensplot diagram layout and rendering.
//!
//! This module provides configuration structures that control how counts are
//! reconciled, how circles are placed and how the result is styled. All
//! types implement [`serde::Deserialize`] for loading from TOML files; every
//! field is optional and falls back to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Canvas size, [`LayoutEngine`] and placement constants.
//! - [`ReconcileConfig`] - Gap inference policy.
//! - [`StyleConfig`] - Colors, fonts and the unit shown in tooltips.
//!
//! # Example
//!
//! ```
//! # use lensplot::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().width(), 600.0);
//! assert!(config.style().palette().is_ok());
//! ```

use serde::Deserialize;

pub use lensplot_reconcile::ReconcileConfig;

use crate::{color::Color, layout::LayoutEngine};

/// Colors cycled through for set circles.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#06B6D4", "#8B5A2B", "#84CC16", "#8B5CF6", "#3B82F6", "#6366F1", "#EC4899", "#10B981",
    "#F59E0B", "#EF4444",
];

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Reconciliation configuration section.
    #[serde(default)]
    reconcile: ReconcileConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, reconcile: ReconcileConfig, style: StyleConfig) -> Self {
        Self {
            layout,
            reconcile,
            style,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the reconciliation configuration.
    pub fn reconcile(&self) -> &ReconcileConfig {
        &self.reconcile
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the layout configuration for in-place overrides.
    pub fn layout_mut(&mut self) -> &mut LayoutConfig {
        &mut self.layout
    }
}

/// Canvas and placement settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Placement strategy.
    engine: LayoutEngine,

    /// Canvas width.
    width: f64,

    /// Canvas height.
    height: f64,

    /// Share of the smaller canvas half-dimension taken by the largest circle.
    fill_fraction: f64,

    /// Gap between circles that must not overlap.
    margin: f64,

    /// Space kept free along the canvas edges when fitting.
    padding: f64,

    /// Fraction of the touching distance by which unconstrained neighbours overlap.
    mild_overlap: f64,

    /// How far a set moves toward its nearest `intersectsWith` neighbour on a ring, 0 to 1.
    intersect_bias: f64,

    /// Triple fallback radius as a fraction of the radius its size implies.
    triple_reduction: f64,

    /// Estimated share of the smaller set for drawn overlaps without a count.
    estimated_overlap_fraction: f64,

    /// Scale the arrangement down when it would leave the canvas.
    fit_to_canvas: bool,

    /// Upper bound on refinement steps for the `refined` engine.
    refine_iterations: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            engine: LayoutEngine::default(),
            width: 600.0,
            height: 600.0,
            fill_fraction: 0.9,
            margin: 10.0,
            padding: 10.0,
            mild_overlap: 0.15,
            intersect_bias: 0.5,
            triple_reduction: 0.4,
            estimated_overlap_fraction: 0.3,
            fit_to_canvas: true,
            refine_iterations: 200,
        }
    }
}

impl LayoutConfig {
    /// Replaces the placement strategy.
    pub fn with_engine(mut self, engine: LayoutEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Replaces the canvas size.
    pub fn with_canvas(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Enables or disables scaling the arrangement into the canvas.
    pub fn with_fit_to_canvas(mut self, fit: bool) -> Self {
        self.fit_to_canvas = fit;
        self
    }

    /// Sets the placement strategy in place.
    pub fn set_engine(&mut self, engine: LayoutEngine) {
        self.engine = engine;
    }

    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn fill_fraction(&self) -> f64 {
        self.fill_fraction
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    pub fn mild_overlap(&self) -> f64 {
        self.mild_overlap
    }

    pub fn intersect_bias(&self) -> f64 {
        self.intersect_bias
    }

    pub fn triple_reduction(&self) -> f64 {
        self.triple_reduction
    }

    pub fn estimated_overlap_fraction(&self) -> f64 {
        self.estimated_overlap_fraction
    }

    pub fn fit_to_canvas(&self) -> bool {
        self.fit_to_canvas
    }

    pub fn refine_iterations(&self) -> usize {
        self.refine_iterations
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Colors are kept as strings and parsed on access so a bad value is
/// reported when rendering, together with the offending text.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Background color; transparent when unset.
    background_color: Option<String>,

    /// Colors cycled through for set circles.
    palette: Vec<String>,

    /// Fill of pairwise regions.
    region_color: String,

    /// Fill of triple regions.
    triple_color: String,

    /// Outline of triple regions.
    triple_stroke_color: String,

    /// Unit appended to region tooltips, e.g. "users".
    unit_label: String,

    font_family: String,

    /// Label font size in canvas units.
    font_size: f64,

    /// Fill of set labels.
    label_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            region_color: "#7C3AED".to_string(),
            triple_color: "#5B21B6".to_string(),
            triple_stroke_color: "#4C1D95".to_string(),
            unit_label: "users".to_string(),
            font_family: "Inter, Arial, sans-serif".to_string(),
            font_size: 14.0,
            label_color: "#1F2937".to_string(),
        }
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid {field} in config: {err}"))
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(|color| parse_color("background color", color))
            .transpose()
    }

    /// Returns the parsed palette. An empty palette falls back to the default one.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first color that cannot be parsed.
    pub fn palette(&self) -> Result<Vec<Color>, String> {
        if self.palette.is_empty() {
            return DEFAULT_PALETTE
                .iter()
                .map(|color| parse_color("palette color", color))
                .collect();
        }
        self.palette
            .iter()
            .map(|color| parse_color("palette color", color))
            .collect()
    }

    /// Returns the parsed pairwise region color.
    pub fn region_color(&self) -> Result<Color, String> {
        parse_color("region color", &self.region_color)
    }

    /// Returns the parsed triple region color.
    pub fn triple_color(&self) -> Result<Color, String> {
        parse_color("triple color", &self.triple_color)
    }

    /// Returns the parsed triple region outline color.
    pub fn triple_stroke_color(&self) -> Result<Color, String> {
        parse_color("triple stroke color", &self.triple_stroke_color)
    }

    pub fn unit_label(&self) -> &str {
        &self.unit_label
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Returns the parsed label color.
    pub fn label_color(&self) -> Result<Color, String> {
        parse_color("label color", &self.label_color)
    }
}

#[cfg(test)]
mod tests {
    use lensplot_reconcile::InferencePolicy;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.layout().engine(), LayoutEngine::Heuristic);
        assert_eq!(config.layout().fill_fraction(), 0.9);
        assert_eq!(config.layout().estimated_overlap_fraction(), 0.3);
        assert_eq!(config.reconcile().inference(), InferencePolicy::SizeOrder);
        assert_eq!(config.style().palette().unwrap().len(), 10);
        assert_eq!(config.style().unit_label(), "users");
        assert!(config.style().background_color().unwrap().is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [layout]
            engine = "refined"
            width = 800

            [reconcile]
            inference = "hints-only"

            [style]
            background_color = "white"
            unit_label = "sessions"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.layout().engine(), LayoutEngine::Refined);
        assert_eq!(config.layout().width(), 800.0);
        assert_eq!(config.layout().height(), 600.0);
        assert_eq!(config.reconcile().inference(), InferencePolicy::HintsOnly);
        assert!(config.style().background_color().unwrap().is_some());
        assert_eq!(config.style().unit_label(), "sessions");
    }

    #[test]
    fn test_invalid_palette_color_is_reported() {
        let config: AppConfig = toml::from_str(
            r##"
            [style]
            palette = ["#06B6D4", "nope"]
            "##,
        )
        .expect("valid config");

        let err = config.style().palette().unwrap_err();
        assert!(err.contains("nope"), "{err}");
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let config: AppConfig = toml::from_str("[style]\npalette = []\n").expect("valid config");
        assert_eq!(config.style().palette().unwrap().len(), DEFAULT_PALETTE.len());
    }
}
