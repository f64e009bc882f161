//! SVG rendering for pairwise and triple overlap regions.

use svg::node::element as svg_element;

use lensplot_core::diagram::{Diagram, IntersectionRegion};

use super::Svg;
use crate::{color::Color, tooltip};

/// Fill opacity of pairwise regions, normal and emphasized.
const PAIR_OPACITY: (f64, f64) = (0.65, 0.8);
const PAIR_STROKE_WIDTH: f64 = 1.5;

/// Fill opacity of triple regions, normal and emphasized.
const TRIPLE_OPACITY: (f64, f64) = (0.75, 0.9);
const TRIPLE_STROKE_WIDTH: f64 = 2.0;

/// Paint for one region.
struct RegionPaint {
    fill: Color,
    stroke: Color,
    opacity: f64,
    stroke_width: f64,
}

impl Svg {
    pub(super) fn render_pairwise_regions(&self, diagram: &Diagram) -> svg_element::Group {
        diagram.pairwise_regions().iter().fold(
            svg_element::Group::new().set("class", "pairwise-regions"),
            |group, region| {
                let paint = RegionPaint {
                    fill: self.region_color,
                    stroke: self.region_color,
                    opacity: self.region_opacity(region, PAIR_OPACITY),
                    stroke_width: PAIR_STROKE_WIDTH,
                };
                self.add_region(group, region, &paint)
            },
        )
    }

    pub(super) fn render_triple_regions(&self, diagram: &Diagram) -> svg_element::Group {
        diagram.triple_regions().iter().fold(
            svg_element::Group::new().set("class", "triple-regions"),
            |group, region| {
                let paint = RegionPaint {
                    fill: self.triple_color,
                    stroke: self.triple_stroke_color,
                    opacity: self.region_opacity(region, TRIPLE_OPACITY),
                    stroke_width: TRIPLE_STROKE_WIDTH,
                };
                self.add_region(group, region, &paint)
            },
        )
    }

    fn region_opacity(
        &self,
        region: &IntersectionRegion,
        (normal, emphasized): (f64, f64),
    ) -> f64 {
        if self.emphasis.is_region_emphasized(region.members()) {
            emphasized
        } else {
            normal
        }
    }

    /// Draws the exact outline when there is one, the fallback circle otherwise.
    fn add_region(
        &self,
        group: svg_element::Group,
        region: &IntersectionRegion,
        paint: &RegionPaint,
    ) -> svg_element::Group {
        let title = svg_element::Title::new(tooltip::region_tooltip(region, &self.unit_label));

        match region.outline() {
            Some(outline) => group.add(
                svg_element::Path::new()
                    .set("d", outline.to_path_data())
                    .set("fill", paint.fill)
                    .set("fill-opacity", paint.opacity)
                    .set("stroke", paint.stroke)
                    .set("stroke-width", paint.stroke_width)
                    .add(title),
            ),
            None => {
                let fallback = region.fallback();
                group.add(
                    svg_element::Circle::new()
                        .set("cx", fallback.center().x())
                        .set("cy", fallback.center().y())
                        .set("r", fallback.radius())
                        .set("fill", paint.fill)
                        .set("fill-opacity", paint.opacity)
                        .set("stroke", paint.stroke)
                        .set("stroke-width", paint.stroke_width)
                        .add(title),
                )
            }
        }
    }
}
