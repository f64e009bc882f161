//! SVG export backend.
//!
//! [`SvgBuilder`] resolves the configured style once and produces an [`Svg`]
//! exporter. The document is assembled in layers, bottom to top: background,
//! set circles, pairwise regions, triple regions, connection lines, labels.

mod circles;
mod regions;

use indexmap::IndexMap;
use log::{debug, info};
use svg::{Document, node::element as svg_element};

use lensplot_core::{diagram::Diagram, model::SetSpec};
use lensplot_reconcile::Reconciled;

use crate::{
    color::Color,
    config::StyleConfig,
    emphasis::Emphasis,
    export::{self, Exporter},
};

/// Builder for [`Svg`] exporters.
///
/// The style, sets and emphasis are optional; unset parts fall back to the
/// default style, name-only tooltips and no emphasis.
#[derive(Debug, Default)]
pub struct SvgBuilder {
    style: StyleConfig,
    sets: Vec<SetSpec>,
    emphasis: Emphasis,
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the style configuration for the SVG.
    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    /// Sets whose sizes and hints feed the tooltips.
    pub fn with_reconciled(mut self, reconciled: &Reconciled) -> Self {
        self.sets = reconciled.sets().to_vec();
        self
    }

    /// Set the emphasis applied to circles and regions.
    pub fn with_emphasis(mut self, emphasis: &Emphasis) -> Self {
        self.emphasis = emphasis.clone();
        self
    }

    /// Resolve every configured color and build the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if a configured color is invalid.
    pub fn build(self) -> Result<Svg, export::Error> {
        let style = &self.style;
        let palette = style.palette().map_err(export::Error::Render)?;

        Ok(Svg {
            background: style.background_color().map_err(export::Error::Render)?,
            palette,
            region_color: style.region_color().map_err(export::Error::Render)?,
            triple_color: style.triple_color().map_err(export::Error::Render)?,
            triple_stroke_color: style.triple_stroke_color().map_err(export::Error::Render)?,
            label_color: style.label_color().map_err(export::Error::Render)?,
            font_family: style.font_family().to_string(),
            font_size: style.font_size(),
            unit_label: style.unit_label().to_string(),
            sets: self
                .sets
                .into_iter()
                .map(|set| (set.name().to_string(), set))
                .collect(),
            emphasis: self.emphasis,
        })
    }
}

/// SVG exporter with resolved colors.
#[derive(Debug)]
pub struct Svg {
    background: Option<Color>,
    palette: Vec<Color>,
    region_color: Color,
    triple_color: Color,
    triple_stroke_color: Color,
    label_color: Color,
    font_family: String,
    font_size: f64,
    unit_label: String,
    sets: IndexMap<String, SetSpec>,
    emphasis: Emphasis,
}

impl Svg {
    /// Palette color for the circle at `index` in declaration order.
    fn color_for(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return Color::default();
        }
        self.palette[index % self.palette.len()]
    }

    /// Renders the complete diagram to an SVG document.
    pub fn render_diagram(&self, diagram: &Diagram) -> Document {
        let (width, height) = (diagram.width(), diagram.height());
        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        if let Some(background) = &self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", background),
            );
        }

        doc.add(self.render_circles(diagram))
            .add(self.render_pairwise_regions(diagram))
            .add(self.render_triple_regions(diagram))
            .add(self.render_connections(diagram))
            .add(self.render_labels(diagram))
    }
}

impl Exporter for Svg {
    fn export_diagram(&mut self, diagram: &Diagram) -> Result<String, export::Error> {
        info!(
            circles = diagram.circles().len(),
            pairwise_regions = diagram.pairwise_regions().len(),
            triple_regions = diagram.triple_regions().len();
            "Rendering SVG"
        );
        let doc = self.render_diagram(diagram);
        debug!("SVG document rendered");

        Ok(doc.to_string())
    }
}
