//! Circle math for area-proportional diagrams.
//!
//! Everything here is a pure function of its arguments. Radii and distances
//! are canvas units; sizes are data units and are mapped to radii through a
//! single `scale` factor so that circle area stays proportional to set size.
//!
//! # Overview
//!
//! - [`Circle`] - A positioned circle
//! - [`radius_from_area`] / [`scale_for_canvas`] - Data size to canvas radius
//! - [`overlap_area`] - Area of the lens shared by two circles
//! - [`distance_for_overlap`] - The inverse problem, solved by bisection
//! - [`intersection_points`] - Where two circle boundaries cross

use std::f64::consts::PI;

use log::debug;
use serde::Serialize;

use crate::geometry::{Bounds, Point};

/// Upper bound on bisection steps in [`distance_for_overlap`].
pub const MAX_ITERATIONS: usize = 40;

/// Relative tolerance at which [`distance_for_overlap`] stops early.
pub const RELATIVE_TOLERANCE: f64 = 1e-3;

/// A circle positioned in diagram space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Circle {
    center: Point,
    radius: f64,
}

impl Circle {
    /// Creates a circle. Negative or non-finite radii are stored as zero.
    pub fn new(center: Point, radius: f64) -> Self {
        let radius = if radius.is_finite() && radius > 0.0 {
            radius
        } else {
            0.0
        };
        Self { center, radius }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Area of the disc in canvas units.
    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// Returns true when `point` lies inside the disc, allowing `tolerance`
    /// beyond the boundary.
    pub fn contains(&self, point: Point, tolerance: f64) -> bool {
        self.center.distance(point) <= self.radius + tolerance
    }

    /// Axis-aligned bounding box of the disc.
    pub fn bounds(&self) -> Bounds {
        Bounds::around_circle(self.center, self.radius)
    }

    /// Returns the same circle moved by `offset`.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            center: self.center.add_point(offset),
            radius: self.radius,
        }
    }

    /// Scales both the centre position (relative to the origin) and the radius.
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.center.scale(factor), self.radius * factor)
    }

    /// Overlap area with another circle.
    pub fn overlap_with(&self, other: &Circle) -> f64 {
        overlap_area(
            self.radius,
            other.radius,
            self.center.distance(other.center),
        )
    }
}

/// Radius of the circle whose area is proportional to `size`.
///
/// Returns `sqrt(size) * scale`, or zero when either `size` is not a positive
/// finite number.
///
/// # Examples
///
/// ```
/// # use lensplot_core::circle::radius_from_area;
/// assert_eq!(radius_from_area(100.0, 2.0), 20.0);
/// assert_eq!(radius_from_area(-5.0, 2.0), 0.0);
/// assert_eq!(radius_from_area(f64::NAN, 2.0), 0.0);
/// ```
pub fn radius_from_area(size: f64, scale: f64) -> f64 {
    if !size.is_finite() || size <= 0.0 || !scale.is_finite() || scale <= 0.0 {
        return 0.0;
    }
    size.sqrt() * scale
}

/// Scale factor that lets the largest set fill `fill` of the smaller canvas
/// half-dimension.
///
/// Returns zero when `max_size` is not positive.
pub fn scale_for_canvas(width: f64, height: f64, max_size: f64, fill: f64) -> f64 {
    if !max_size.is_finite() || max_size <= 0.0 {
        return 0.0;
    }
    width.min(height) / 2.0 / max_size.sqrt() * fill
}

/// Area of the region shared by two circles of radii `r1`, `r2` whose centres
/// are `d` apart.
///
/// When one circle sits inside the other the result is the area of the
/// smaller one; when they do not touch it is zero.
pub fn overlap_area(r1: f64, r2: f64, d: f64) -> f64 {
    if r1 <= 0.0 || r2 <= 0.0 {
        return 0.0;
    }
    let d = d.abs();
    let min_r = r1.min(r2);
    let max_area = PI * min_r * min_r;

    if d >= r1 + r2 {
        return 0.0;
    }
    if d <= (r1 - r2).abs() {
        return max_area;
    }

    let cos1 = ((d * d + r1 * r1 - r2 * r2) / (2.0 * d * r1)).clamp(-1.0, 1.0);
    let cos2 = ((d * d + r2 * r2 - r1 * r1) / (2.0 * d * r2)).clamp(-1.0, 1.0);
    let kite = (-d + r1 + r2) * (d + r1 - r2) * (d - r1 + r2) * (d + r1 + r2);

    let area = r1 * r1 * cos1.acos() + r2 * r2 * cos2.acos() - 0.5 * kite.max(0.0).sqrt();
    area.clamp(0.0, max_area)
}

/// Centre distance at which two circles share `target` area.
///
/// The target is clamped to `[0, π·min(r1, r2)²]`: a non-positive target
/// yields the touching distance `r1 + r2` and a target at or above the
/// maximum yields `|r1 - r2|` (the smaller circle fully contained).
/// Otherwise the distance is found by bisection, stopping after
/// [`MAX_ITERATIONS`] steps or once the overlap is within
/// [`RELATIVE_TOLERANCE`] of the target.
///
/// # Examples
///
/// ```
/// # use lensplot_core::circle::{distance_for_overlap, overlap_area};
/// let d = distance_for_overlap(10.0, 8.0, 50.0);
/// let area = overlap_area(10.0, 8.0, d);
/// assert!((area - 50.0).abs() / 50.0 < 1e-3);
/// ```
pub fn distance_for_overlap(r1: f64, r2: f64, target: f64) -> f64 {
    let touching = r1 + r2;
    let nested = (r1 - r2).abs();
    if r1 <= 0.0 || r2 <= 0.0 {
        return touching.max(0.0);
    }

    let max_area = PI * r1.min(r2).powi(2);
    if !target.is_finite() || target <= 0.0 {
        return touching;
    }
    if target >= max_area {
        if target > max_area * (1.0 + RELATIVE_TOLERANCE) {
            debug!(target, max_area; "Overlap target exceeds smaller circle, clamping");
        }
        return nested;
    }

    // Overlap area decreases monotonically as the distance grows.
    let mut low = nested;
    let mut high = touching;
    let mut mid = (low + high) / 2.0;
    for _ in 0..MAX_ITERATIONS {
        mid = (low + high) / 2.0;
        let area = overlap_area(r1, r2, mid);
        if (area - target).abs() <= target * RELATIVE_TOLERANCE {
            break;
        }
        if area > target {
            low = mid;
        } else {
            high = mid;
        }
    }
    mid
}

/// The two points where the boundaries of two circles cross.
///
/// Returns `None` when the circles are disjoint, tangent, nested or
/// concentric.
pub fn intersection_points(c1: Point, r1: f64, c2: Point, r2: f64) -> Option<(Point, Point)> {
    let d = c1.distance(c2);
    if d <= 0.0 || d >= r1 + r2 || d <= (r1 - r2).abs() {
        return None;
    }

    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let h_squared = r1 * r1 - a * a;
    if h_squared <= 0.0 {
        return None;
    }
    let h = h_squared.sqrt();

    let delta = c2.sub_point(c1);
    let base = c1.add_point(delta.scale(a / d));
    let offset = Point::new(h * delta.y() / d, -h * delta.x() / d);

    Some((base.add_point(offset), base.sub_point(offset)))
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn radius_strategy() -> impl Strategy<Value = f64> {
        1.0f64..500.0
    }

    // ===================
    // Property Test Functions
    // ===================

    fn check_radius_is_monotonic(a: f64, b: f64, scale: f64) -> Result<(), TestCaseError> {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        let r_small = radius_from_area(small, scale);
        let r_large = radius_from_area(large, scale);

        prop_assert!(r_small >= 0.0);
        prop_assert!(r_small <= r_large);
        Ok(())
    }

    fn check_overlap_is_bounded(r1: f64, r2: f64, d: f64) -> Result<(), TestCaseError> {
        let area = overlap_area(r1, r2, d);
        let max_area = PI * r1.min(r2).powi(2);

        prop_assert!(area >= 0.0);
        prop_assert!(area <= max_area * (1.0 + 1e-12));
        Ok(())
    }

    fn check_overlap_round_trip(r1: f64, r2: f64, fraction: f64) -> Result<(), TestCaseError> {
        let target = PI * r1.min(r2).powi(2) * fraction;
        let d = distance_for_overlap(r1, r2, target);
        let area = overlap_area(r1, r2, d);

        prop_assert!(
            (area - target).abs() <= target * 2e-3,
            "target {target}, got {area} at d = {d}"
        );
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn radius_is_monotonic(a in 0.0f64..1e6, b in 0.0f64..1e6, scale in 0.01f64..10.0) {
            check_radius_is_monotonic(a, b, scale)?;
        }

        #[test]
        fn overlap_is_bounded(r1 in radius_strategy(), r2 in radius_strategy(), d in 0.0f64..1200.0) {
            check_overlap_is_bounded(r1, r2, d)?;
        }

        #[test]
        fn overlap_round_trip(r1 in radius_strategy(), r2 in radius_strategy(), fraction in 0.01f64..0.99) {
            check_overlap_round_trip(r1, r2, fraction)?;
        }
    }
}
