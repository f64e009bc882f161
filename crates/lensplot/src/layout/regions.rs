//! Derivation of pairwise and triple overlap regions from placed circles.

use std::f64::consts::PI;

use log::debug;

use lensplot_core::{
    circle::{Circle, overlap_area, radius_from_area},
    diagram::{CircleLayout, IntersectionRegion},
    geometry::Point,
    model::Members,
    outline::{lens_outline, triple_outline},
};
use lensplot_reconcile::Reconciled;

/// Converts a canvas area back to data units.
fn to_data_units(area: f64, scale: f64) -> f64 {
    if scale > 0.0 {
        area / (PI * scale * scale)
    } else {
        0.0
    }
}

/// One region for every pair of circles that actually overlap.
///
/// Regions carry the reconciled intersection size when there is one, and
/// `estimated_fraction` of the smaller set otherwise.
pub fn pairwise_regions(
    circles: &[CircleLayout],
    reconciled: &Reconciled,
    scale: f64,
    estimated_fraction: f64,
) -> Vec<IntersectionRegion> {
    let mut regions = Vec::new();

    for (index, first) in circles.iter().enumerate() {
        for second in &circles[index + 1..] {
            let (a, b) = (first.circle(), second.circle());
            let (r1, r2) = (a.radius(), b.radius());
            let d = a.center().distance(b.center());
            if r1 <= 0.0 || r2 <= 0.0 || d >= r1 + r2 {
                continue;
            }

            let members = Members::new([first.set_name(), second.set_name()]);
            let approximate_size = match reconciled.intersection(&members) {
                Some(intersection) => intersection.size(),
                None => {
                    let smaller = [first.set_name(), second.set_name()]
                        .iter()
                        .filter_map(|name| reconciled.set(name))
                        .map(|set| set.size())
                        .fold(f64::INFINITY, f64::min);
                    let estimate = if smaller.is_finite() {
                        smaller * estimated_fraction
                    } else {
                        0.0
                    };
                    debug!(members:% = members, estimate = estimate; "Estimated overlap size");
                    estimate
                }
            };

            let (outline, fallback) = if d <= (r1 - r2).abs() {
                (None, if r1 <= r2 { a } else { b })
            } else {
                (lens_outline(&a, &b), lens_fallback(&a, &b, d))
            };

            regions.push(IntersectionRegion::new(
                members,
                approximate_size,
                to_data_units(overlap_area(r1, r2, d), scale),
                outline,
                fallback,
            ));
        }
    }

    regions
}

/// Largest circle on the centre line that fits the lens between `a` and `b`.
fn lens_fallback(a: &Circle, b: &Circle, d: f64) -> Circle {
    let (r1, r2) = (a.radius(), b.radius());
    let direction = b.center().sub_point(a.center()).scale(1.0 / d);
    let center = a.center().add_point(direction.scale((d - r2 + r1) / 2.0));
    Circle::new(center, (r1 + r2 - d) / 2.0)
}

/// One region for every reconciled 3-member intersection whose sets were placed.
pub fn triple_regions(
    circles: &[CircleLayout],
    reconciled: &Reconciled,
    scale: f64,
    reduction: f64,
) -> Vec<IntersectionRegion> {
    reconciled
        .intersections()
        .iter()
        .filter(|intersection| intersection.is_triple())
        .filter_map(|intersection| {
            let members: Vec<Circle> = intersection
                .members()
                .iter()
                .filter_map(|name| circles.iter().find(|c| c.set_name() == name))
                .map(CircleLayout::circle)
                .collect();
            let [a, b, c]: [Circle; 3] = members.try_into().ok()?;

            let centroid = Point::new(
                (a.center().x() + b.center().x() + c.center().x()) / 3.0,
                (a.center().y() + b.center().y() + c.center().y()) / 3.0,
            );
            let smallest = a.radius().min(b.radius()).min(c.radius());
            let radius = (radius_from_area(intersection.size(), scale) * reduction).min(smallest);
            let fallback = Circle::new(centroid, radius);

            let outline = triple_outline(&[a, b, c]);
            let drawn_area = outline
                .as_ref()
                .map(|path| path.area())
                .unwrap_or_else(|| fallback.area());

            Some(IntersectionRegion::new(
                intersection.members().clone(),
                intersection.size(),
                to_data_units(drawn_area, scale),
                outline,
                fallback,
            ))
        })
        .collect()
}
