//! Lensplot - Area-proportional Venn and Euler diagrams from set counts.
//!
//! Reconciliation, layout, and rendering for diagrams whose circle areas
//! stand for set sizes and whose overlaps approximate intersection sizes.
//! Input is a JSON mapping of labels such as `A`, `B` and `A_AND_B` to
//! counts, optionally with per-set hints.

pub mod color;
pub mod config;
pub mod emphasis;
pub mod tooltip;

mod error;
mod export;
mod layout;

pub use lensplot_core::{circle, diagram, geometry, model};
pub use lensplot_reconcile::{InferencePolicy, Input, Reconciled, error::Diagnostic};

pub use error::LensplotError;
pub use layout::LayoutEngine;

use log::{debug, info, trace};

use config::AppConfig;
use diagram::Diagram;
use emphasis::{Emphasis, Focus};
use export::Exporter;

/// Builder for reconciling, laying out and rendering Lensplot diagrams.
///
/// This provides an API for processing counts through the reconciliation,
/// layout, and rendering stages.
///
/// # Examples
///
/// ```rust,no_run
/// use lensplot::{DiagramBuilder, config::AppConfig, emphasis::Emphasis};
///
/// let source = r#"{"Event_1": 1200, "Event_2": 900, "Event_1_AND_Event_2": 700}"#;
///
/// // With custom config
/// let config = AppConfig::default();
/// let builder = DiagramBuilder::new(config);
///
/// // Parse and reconcile the counts
/// let input = builder.parse(source).expect("Failed to parse");
/// let reconciled = builder.reconcile(&input);
///
/// // Lay out and render to SVG
/// let diagram = builder.layout(&reconciled);
/// let svg = builder
///     .render_svg(&diagram, &reconciled, &Emphasis::none())
///     .expect("Failed to render");
///
/// // Or use default config
/// let builder = DiagramBuilder::default();
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout, reconciliation
    ///   and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// The configuration this builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse JSON source into raw counts and hints.
    ///
    /// Both the flat form (`{"A": 10, "A_AND_B": 2}`) and the structured form
    /// (`{"counts": {...}, "hints": {...}}`) are accepted.
    ///
    /// # Arguments
    ///
    /// * `source` - JSON text
    ///
    /// # Errors
    ///
    /// Returns `LensplotError::Input` if the text is not valid JSON or does
    /// not have either shape.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use lensplot::DiagramBuilder;
    ///
    /// let builder = DiagramBuilder::default();
    /// let input = builder.parse(r#"{"A": 10, "B": 5, "A_AND_B": 2}"#)
    ///     .expect("Failed to parse counts");
    /// ```
    pub fn parse(&self, source: &str) -> Result<Input, LensplotError> {
        info!("Parsing counts");

        let input: Input = serde_json::from_str(source)
            .map_err(|err| LensplotError::new_input_error(err, source))?;

        debug!(labels = input.counts().len(), hinted_sets = input.hints().len(); "Counts parsed");
        trace!(input:?; "Parsed input");

        Ok(input)
    }

    /// Reconcile raw counts into admissible sets and intersections.
    ///
    /// Reconciliation never fails; every repair is recorded in
    /// [`Reconciled::diagnostics`].
    pub fn reconcile(&self, input: &Input) -> Reconciled {
        let reconciled = lensplot_reconcile::reconcile(input, self.config.reconcile().clone());
        info!(
            sets = reconciled.sets().len(),
            intersections = reconciled.intersections().len(),
            diagnostics = reconciled.diagnostics().len();
            "Counts reconciled"
        );
        reconciled
    }

    /// Lay out reconciled counts on the configured canvas.
    ///
    /// Empty input yields an empty [`Diagram`].
    pub fn layout(&self, reconciled: &Reconciled) -> Diagram {
        let diagram = layout::plan(reconciled, self.config.layout());
        info!(
            circles = diagram.circles().len(),
            pairwise_regions = diagram.pairwise_regions().len(),
            triple_regions = diagram.triple_regions().len();
            "Layout calculated"
        );
        diagram
    }

    /// Compute the emphasis for a selected or hovered set.
    ///
    /// A focus naming an unknown set yields no emphasis.
    pub fn emphasize(&self, reconciled: &Reconciled, focus: Option<Focus>) -> Emphasis {
        Emphasis::compute(reconciled, focus)
    }

    /// Render a diagram to an SVG string.
    ///
    /// # Arguments
    ///
    /// * `diagram` - The laid-out diagram
    /// * `reconciled` - The counts the diagram was laid out from, used for tooltips
    /// * `emphasis` - Selection or hover styling
    ///
    /// # Errors
    ///
    /// Returns `LensplotError::Export` if a configured style color is invalid.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use lensplot::{DiagramBuilder, emphasis::Focus};
    ///
    /// let builder = DiagramBuilder::default();
    /// let input = builder.parse(r#"{"A": 10, "B": 5}"#).expect("Failed to parse");
    /// let reconciled = builder.reconcile(&input);
    /// let diagram = builder.layout(&reconciled);
    ///
    /// let emphasis = builder.emphasize(&reconciled, Some(Focus::Selected("A".to_string())));
    /// let svg = builder.render_svg(&diagram, &reconciled, &emphasis)
    ///     .expect("Failed to render diagram");
    ///
    /// println!("{}", svg);
    /// ```
    pub fn render_svg(
        &self,
        diagram: &Diagram,
        reconciled: &Reconciled,
        emphasis: &Emphasis,
    ) -> Result<String, LensplotError> {
        let mut svg_exporter = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .with_reconciled(reconciled)
            .with_emphasis(emphasis)
            .build()?;

        let svg_string = svg_exporter.export_diagram(diagram)?;

        info!("SVG rendered successfully");
        Ok(svg_string)
    }

    /// Serialize a diagram to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `LensplotError::Export` if serialization fails.
    pub fn render_json(&self, diagram: &Diagram) -> Result<String, LensplotError> {
        let json = export::json::Json.export_diagram(diagram)?;
        info!("JSON rendered successfully");
        Ok(json)
    }
}
