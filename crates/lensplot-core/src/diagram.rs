//! The computed layout.
//!
//! A [`Diagram`] is created fresh for every layout run and is never
//! persisted. Coordinates are canvas units with the origin at the top-left
//! corner of a `width × height` canvas.

use serde::Serialize;

use crate::{
    circle::Circle,
    geometry::{Bounds, Point, Size},
    model::Members,
    outline::ArcPath,
};

/// Position and radius of one set's circle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleLayout {
    set_name: String,
    center_x: f64,
    center_y: f64,
    radius: f64,
}

impl CircleLayout {
    pub fn new(set_name: impl Into<String>, circle: Circle) -> Self {
        Self {
            set_name: set_name.into(),
            center_x: circle.center().x(),
            center_y: circle.center().y(),
            radius: circle.radius(),
        }
    }

    pub fn set_name(&self) -> &str {
        &self.set_name
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.center(), self.radius)
    }
}

/// A drawn overlap between 2 or 3 circles.
///
/// `outline` is the exact boundary when one can be derived; `fallback` is
/// always present and is what adapters draw otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntersectionRegion {
    members: Members,
    approximate_size: f64,
    rendered_size: f64,
    outline: Option<ArcPath>,
    fallback: Circle,
}

impl IntersectionRegion {
    pub fn new(
        members: Members,
        approximate_size: f64,
        rendered_size: f64,
        outline: Option<ArcPath>,
        fallback: Circle,
    ) -> Self {
        Self {
            members,
            approximate_size,
            rendered_size,
            outline,
            fallback,
        }
    }

    pub fn members(&self) -> &Members {
        &self.members
    }

    /// Size the region stands for: the reconciled intersection size, or an
    /// estimate when none was given.
    pub fn approximate_size(&self) -> f64 {
        self.approximate_size
    }

    /// Area actually drawn, converted back to data units.
    pub fn rendered_size(&self) -> f64 {
        self.rendered_size
    }

    pub fn outline(&self) -> Option<&ArcPath> {
        self.outline.as_ref()
    }

    pub fn fallback(&self) -> Circle {
        self.fallback
    }

    /// Point used to anchor labels and tooltips.
    pub fn anchor(&self) -> Point {
        self.fallback.center()
    }
}

/// The complete layout handed to presentation adapters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    width: f64,
    height: f64,
    scale: f64,
    circles: Vec<CircleLayout>,
    pairwise_regions: Vec<IntersectionRegion>,
    triple_regions: Vec<IntersectionRegion>,
}

impl Diagram {
    pub fn new(
        canvas: Size,
        scale: f64,
        circles: Vec<CircleLayout>,
        pairwise_regions: Vec<IntersectionRegion>,
        triple_regions: Vec<IntersectionRegion>,
    ) -> Self {
        Self {
            width: canvas.width(),
            height: canvas.height(),
            scale,
            circles,
            pairwise_regions,
            triple_regions,
        }
    }

    /// A diagram with no circles and no regions.
    pub fn empty(canvas: Size) -> Self {
        Self::new(canvas, 0.0, Vec::new(), Vec::new(), Vec::new())
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn canvas(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Canvas units per square root of a data unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn circles(&self) -> &[CircleLayout] {
        &self.circles
    }

    pub fn pairwise_regions(&self) -> &[IntersectionRegion] {
        &self.pairwise_regions
    }

    pub fn triple_regions(&self) -> &[IntersectionRegion] {
        &self.triple_regions
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }

    /// Finds the circle drawn for `set_name`.
    pub fn circle(&self, set_name: &str) -> Option<&CircleLayout> {
        self.circles
            .iter()
            .find(|circle| circle.set_name() == set_name)
    }

    /// Bounding box of every circle, or `None` for an empty diagram.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut circles = self.circles.iter().map(|layout| layout.circle().bounds());
        let first = circles.next()?;
        Some(circles.fold(first, |acc, bounds| acc.merge(&bounds)))
    }
}
