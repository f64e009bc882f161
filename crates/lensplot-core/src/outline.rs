//! Arc-polygon outlines for overlap regions.
//!
//! An [`ArcPath`] is a closed boundary made of circular arcs, expressed with
//! the same parameters as an SVG elliptical arc command so presentation
//! adapters can emit it directly. Two constructions are provided:
//!
//! - [`lens_outline`] - the region shared by two partially overlapping circles
//! - [`triple_outline`] - the region shared by three circles
//!
//! Both return `None` whenever the region is not a proper arc polygon
//! (disjoint or nested circles, a degenerate vertex set); callers then fall
//! back to an approximating circle.

use std::f64::consts::{PI, TAU};

use serde::Serialize;

use crate::{
    circle::{Circle, intersection_points},
    geometry::Point,
};

/// A circular arc ending at `end`; its start is the previous point of the
/// enclosing [`ArcPath`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Arc {
    radius: f64,
    large_arc: bool,
    sweep: bool,
    end: Point,
}

impl Arc {
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// SVG `large-arc-flag`: the arc spans more than half the circle.
    pub fn large_arc(&self) -> bool {
        self.large_arc
    }

    /// SVG `sweep-flag`: the arc runs in the direction of increasing angle.
    pub fn sweep(&self) -> bool {
        self.sweep
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Central angle spanned by the arc when it starts at `start`.
    fn central_angle(&self, start: Point) -> f64 {
        let chord = start.distance(self.end);
        let base = 2.0 * (chord / (2.0 * self.radius)).min(1.0).asin();
        if self.large_arc { TAU - base } else { base }
    }
}

/// A closed boundary starting at `start` and following `arcs` back to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcPath {
    start: Point,
    arcs: Vec<Arc>,
}

impl ArcPath {
    pub fn start(&self) -> Point {
        self.start
    }

    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    /// Moves every point of the path by `offset`.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            start: self.start.add_point(offset),
            arcs: self
                .arcs
                .iter()
                .map(|arc| Arc {
                    end: arc.end.add_point(offset),
                    ..*arc
                })
                .collect(),
        }
    }

    /// Renders the path as SVG path data (`M … A … Z`).
    ///
    /// # Examples
    ///
    /// ```
    /// # use lensplot_core::{circle::Circle, geometry::Point, outline::lens_outline};
    /// let a = Circle::new(Point::new(0.0, 0.0), 5.0);
    /// let b = Circle::new(Point::new(8.0, 0.0), 5.0);
    /// let lens = lens_outline(&a, &b).unwrap();
    /// assert!(lens.to_path_data().starts_with("M 4 "));
    /// assert!(lens.to_path_data().ends_with(" Z"));
    /// ```
    pub fn to_path_data(&self) -> String {
        let mut data = format!("M {} {}", self.start.x(), self.start.y());
        for arc in &self.arcs {
            data.push_str(&format!(
                " A {r} {r} 0 {} {} {} {}",
                u8::from(arc.large_arc),
                u8::from(arc.sweep),
                arc.end.x(),
                arc.end.y(),
                r = arc.radius,
            ));
        }
        data.push_str(" Z");
        data
    }

    /// Enclosed area.
    ///
    /// Assumes the outline is convex with every arc bulging outwards, which
    /// holds for intersections of discs: the area is the polygon through the
    /// arc endpoints plus one circular segment per arc.
    pub fn area(&self) -> f64 {
        let mut polygon = 0.0;
        let mut segments = 0.0;
        let mut previous = self.start;
        for arc in &self.arcs {
            polygon += previous.x() * arc.end.y() - arc.end.x() * previous.y();
            let theta = arc.central_angle(previous);
            segments += arc.radius * arc.radius / 2.0 * (theta - theta.sin());
            previous = arc.end;
        }
        polygon.abs() / 2.0 + segments
    }
}

fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

/// Builds the arc of `circle` from `start` to `end` that passes through the
/// direction `via` (an angle measured from the circle's centre).
fn arc_through(circle: &Circle, start: Point, end: Point, via: f64) -> Arc {
    let center = circle.center();
    let start_angle = center.angle_to(start);
    let span = normalize_angle(center.angle_to(end) - start_angle);
    let via_offset = normalize_angle(via - start_angle);

    let (sweep, theta) = if via_offset < span {
        (true, span)
    } else {
        (false, TAU - span)
    };

    Arc {
        radius: circle.radius(),
        large_arc: theta > PI,
        sweep,
        end,
    }
}

/// Outline of the lens shared by two partially overlapping circles.
///
/// Returns `None` when the circles are disjoint, tangent or nested.
pub fn lens_outline(a: &Circle, b: &Circle) -> Option<ArcPath> {
    let (p1, p2) = intersection_points(a.center(), a.radius(), b.center(), b.radius())?;

    // Each boundary piece is the part of one circle lying inside the other,
    // which always contains the point facing the other centre.
    let first = arc_through(a, p1, p2, a.center().angle_to(b.center()));
    let second = arc_through(b, p2, p1, b.center().angle_to(a.center()));

    Some(ArcPath {
        start: p1,
        arcs: vec![first, second],
    })
}

#[derive(Debug, Clone, Copy)]
struct Vertex {
    point: Point,
    circles: [usize; 2],
}

impl Vertex {
    fn shared_circles(&self, other: &Vertex) -> impl Iterator<Item = usize> + '_ {
        let other = other.circles;
        self.circles
            .into_iter()
            .filter(move |index| other.contains(index))
    }
}

/// Outline of the region shared by three circles.
///
/// The vertices are the pairwise boundary crossings lying inside the third
/// disc. Between two consecutive vertices the boundary follows the arc of a
/// circle through both whose midpoint lies inside all three discs.
///
/// Returns `None` when the three discs do not share a proper arc polygon,
/// e.g. when one disc lies entirely inside the others.
pub fn triple_outline(circles: &[Circle; 3]) -> Option<ArcPath> {
    let scale = circles
        .iter()
        .map(Circle::radius)
        .fold(1.0_f64, f64::max);
    let tolerance = scale * 1e-9;

    let mut vertices: Vec<Vertex> = Vec::new();
    for (i, j, k) in [(0, 1, 2), (0, 2, 1), (1, 2, 0)] {
        let (a, b) = (circles[i], circles[j]);
        let Some((p1, p2)) = intersection_points(a.center(), a.radius(), b.center(), b.radius())
        else {
            continue;
        };
        for point in [p1, p2] {
            let duplicate = vertices
                .iter()
                .any(|vertex| vertex.point.distance(point) <= tolerance * 1e3);
            if circles[k].contains(point, tolerance) && !duplicate {
                vertices.push(Vertex {
                    point,
                    circles: [i, j],
                });
            }
        }
    }

    if vertices.len() == 2 && vertices[0].circles == vertices[1].circles {
        // The third disc covers the whole lens of the other two.
        let [i, j] = vertices[0].circles;
        return lens_outline(&circles[i], &circles[j]);
    }
    if vertices.len() < 3 {
        return None;
    }

    let centroid = vertices
        .iter()
        .fold(Point::default(), |acc, vertex| acc.add_point(vertex.point))
        .scale(1.0 / vertices.len() as f64);
    vertices.sort_by(|a, b| {
        centroid
            .angle_to(a.point)
            .total_cmp(&centroid.angle_to(b.point))
    });

    let inside_all = |point: Point| circles.iter().all(|c| c.contains(point, tolerance * 1e3));

    let mut arcs = Vec::with_capacity(vertices.len());
    for (index, from) in vertices.iter().enumerate() {
        let to = &vertices[(index + 1) % vertices.len()];
        let arc = from.shared_circles(to).find_map(|circle_index| {
            let circle = &circles[circle_index];
            let center = circle.center();
            let start_angle = center.angle_to(from.point);
            let span = normalize_angle(center.angle_to(to.point) - start_angle);
            [start_angle + span / 2.0, start_angle + span / 2.0 + PI]
                .into_iter()
                .find(|via| inside_all(center.add_point(Point::from_polar(circle.radius(), *via))))
                .map(|via| arc_through(circle, from.point, to.point, via))
        })?;
        arcs.push(arc);
    }

    Some(ArcPath {
        start: vertices[0].point,
        arcs,
    })
}
