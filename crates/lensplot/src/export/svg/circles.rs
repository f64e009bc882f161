//! SVG rendering for set circles, their labels and connection lines.

use std::cmp::Ordering;

use svg::node::element as svg_element;

use lensplot_core::diagram::{CircleLayout, Diagram};

use super::Svg;
use crate::{emphasis::EmphasisLevel, tooltip};

/// Attributes of a dashed line from a selected set to a related one.
const CONNECTION_STROKE_WIDTH: f64 = 2.0;
const CONNECTION_DASHARRAY: &str = "5,5";
const CONNECTION_OPACITY: f64 = 0.6;

impl Svg {
    /// Renders one circle per set, largest first so nested sets stay on top.
    pub(super) fn render_circles(&self, diagram: &Diagram) -> svg_element::Group {
        let mut ordered: Vec<(usize, &CircleLayout)> =
            diagram.circles().iter().enumerate().collect();
        ordered.sort_by(|(_, a), (_, b)| {
            b.radius()
                .partial_cmp(&a.radius())
                .unwrap_or(Ordering::Equal)
        });

        ordered.into_iter().fold(
            svg_element::Group::new().set("class", "sets"),
            |group, (index, layout)| group.add(self.render_circle(index, layout)),
        )
    }

    fn render_circle(&self, index: usize, layout: &CircleLayout) -> svg_element::Circle {
        let level = self.emphasis.level(layout.set_name());
        let color = self.color_for(index);

        let title = match self.sets.get(layout.set_name()) {
            Some(set) => tooltip::set_tooltip(set),
            None => layout.set_name().to_string(),
        };

        svg_element::Circle::new()
            .set("cx", layout.center().x())
            .set("cy", layout.center().y())
            .set("r", layout.radius() * level.radius_factor())
            .set("fill", color)
            .set("fill-opacity", level.fill_opacity())
            .set("stroke", color)
            .set("stroke-width", level.stroke_width())
            .add(svg_element::Title::new(title))
    }

    /// Renders the dashed lines from the selected set to its related sets.
    pub(super) fn render_connections(&self, diagram: &Diagram) -> svg_element::Group {
        let mut group = svg_element::Group::new().set("class", "connections");

        for (from, to) in self.emphasis.connections() {
            let (Some(start), Some(end)) = (diagram.circle(from), diagram.circle(to)) else {
                continue;
            };
            let index = diagram
                .circles()
                .iter()
                .position(|circle| circle.set_name() == from)
                .unwrap_or_default();

            group = group.add(
                svg_element::Line::new()
                    .set("x1", start.center().x())
                    .set("y1", start.center().y())
                    .set("x2", end.center().x())
                    .set("y2", end.center().y())
                    .set("stroke", self.color_for(index))
                    .set("stroke-width", CONNECTION_STROKE_WIDTH)
                    .set("stroke-dasharray", CONNECTION_DASHARRAY)
                    .set("opacity", CONNECTION_OPACITY),
            );
        }

        group
    }

    /// Renders set names at the circle centres. A circle enclosing another
    /// one carries its label near its top edge instead.
    pub(super) fn render_labels(&self, diagram: &Diagram) -> svg_element::Group {
        diagram.circles().iter().fold(
            svg_element::Group::new()
                .set("class", "labels")
                .set("font-family", self.font_family.as_str())
                .set("font-size", self.font_size)
                .set("fill", self.label_color)
                .set("text-anchor", "middle")
                .set("dominant-baseline", "middle"),
            |group, layout| {
                let mut y = layout.center().y();
                if encloses_another(layout, diagram.circles()) {
                    y = y - layout.radius() + 1.5 * self.font_size;
                }
                let mut text = svg_element::Text::new(layout.set_name())
                    .set("x", layout.center().x())
                    .set("y", y);
                if self.emphasis.level(layout.set_name()) == EmphasisLevel::Selected {
                    text = text.set("font-weight", "bold");
                }
                group.add(text)
            },
        )
    }
}

fn encloses_another(layout: &CircleLayout, circles: &[CircleLayout]) -> bool {
    circles.iter().any(|other| {
        other.set_name() != layout.set_name()
            && other.radius() < layout.radius()
            && layout.center().distance(other.center()) + other.radius() <= layout.radius()
    })
}
