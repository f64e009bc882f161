//! Heuristic placement engine
//!
//! This module places circles with a fixed strategy chosen by the shape of
//! the input:
//!
//! - role-placed sets (`outer` / `inner`) are centred on the origin
//! - a single free set is attached to the role-placed set it overlaps
//! - two free sets sit on the horizontal axis at their target distance
//! - three free sets form a triangle, one on top and two below
//! - four or more free sets form a regular ring

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use log::debug;

use lensplot_core::geometry::Point;

use crate::layout::{
    engines::PlacementEngine,
    problem::{LayoutProblem, Relation},
};

/// Longest triangle side as a fraction of the other two, keeping the
/// triangle non-degenerate.
const TRIANGLE_SLACK: f64 = 0.999;

/// Heuristic placement engine implementation that implements the PlacementEngine trait
#[derive(Debug, Clone)]
pub struct Heuristic {
    mild_overlap: f64,
    intersect_bias: f64,
}

impl Heuristic {
    /// Create a new heuristic placement engine
    pub fn new() -> Self {
        Self {
            mild_overlap: 0.15,
            intersect_bias: 0.5,
        }
    }

    /// Set the fraction by which unconstrained neighbours overlap
    pub fn set_mild_overlap(&mut self, mild_overlap: f64) -> &mut Self {
        self.mild_overlap = mild_overlap.clamp(0.0, 1.0);
        self
    }

    /// Set how far a set moves toward its nearest `intersectsWith` neighbour
    pub fn set_intersect_bias(&mut self, bias: f64) -> &mut Self {
        self.intersect_bias = bias.clamp(0.0, 1.0);
        self
    }

    /// Places one free set next to the role-placed sets.
    fn place_single(&self, problem: &LayoutProblem, free: usize, anchored: &[usize]) -> Point {
        let attached = anchored.iter().find_map(|&anchor| {
            problem
                .target(free, anchor)
                .filter(|target| target.relation() != Relation::Disjoint)
                .map(|target| target.distance())
        });

        if let Some(distance) = attached {
            return Point::new(distance, 0.0);
        }
        if anchored.is_empty() {
            return Point::default();
        }

        let widest = anchored
            .iter()
            .map(|&anchor| problem.nodes()[anchor].radius())
            .fold(0.0, f64::max);
        Point::new(
            widest + problem.nodes()[free].radius() + problem.margin(),
            0.0,
        )
    }

    /// Places two free sets on the horizontal axis, centred on the origin.
    fn place_pair(&self, problem: &LayoutProblem, a: usize, b: usize) -> [Point; 2] {
        let ra = problem.nodes()[a].radius();
        let rb = problem.nodes()[b].radius();
        let distance = problem
            .target(a, b)
            .map(|target| target.distance())
            .unwrap_or(ra + rb + problem.margin());

        let xa = -(distance + rb - ra) / 2.0;
        [Point::new(xa, 0.0), Point::new(xa + distance, 0.0)]
    }

    /// Places three free sets on a triangle whose sides are the pair targets.
    ///
    /// `a` goes on top, `b` and `c` below it; the triangle is centred on its
    /// centroid.
    fn place_triangle(&self, problem: &LayoutProblem, [a, b, c]: [usize; 3]) -> [Point; 3] {
        let mut sides = [
            problem.distance_or_default(a, b, self.mild_overlap),
            problem.distance_or_default(a, c, self.mild_overlap),
            problem.distance_or_default(b, c, self.mild_overlap),
        ];

        let total: f64 = sides.iter().sum();
        if let Some(longest) = (0..3).max_by(|&i, &j| sides[i].total_cmp(&sides[j])) {
            let others = total - sides[longest];
            if sides[longest] > TRIANGLE_SLACK * others {
                debug!(
                    side = sides[longest],
                    limit = TRIANGLE_SLACK * others;
                    "Pair targets violate the triangle inequality; shortening longest side"
                );
                sides[longest] = TRIANGLE_SLACK * others;
            }
        }
        let [d_ab, d_ac, d_bc] = sides;

        let pb = Point::new(0.0, 0.0);
        let pc = Point::new(d_bc, 0.0);
        let pa = if d_bc <= f64::EPSILON {
            Point::new(0.0, -d_ab)
        } else {
            let x = (d_ab * d_ab - d_ac * d_ac + d_bc * d_bc) / (2.0 * d_bc);
            let y = -(d_ab * d_ab - x * x).max(0.0).sqrt();
            Point::new(x, y)
        };

        let centroid = Point::new(
            (pa.x() + pb.x() + pc.x()) / 3.0,
            (pa.y() + pb.y() + pc.y()) / 3.0,
        );
        [pa, pb, pc].map(|point| point.sub_point(centroid))
    }

    /// Places four or more free sets on a regular ring around the origin.
    fn place_ring(&self, problem: &LayoutProblem, free: &[usize], anchored: &[usize]) -> Vec<Point> {
        let count = free.len();
        let step = TAU / count as f64;

        let chord_sum: f64 = (0..count)
            .map(|k| problem.distance_or_default(free[k], free[(k + 1) % count], self.mild_overlap))
            .sum();
        let mut ring_radius = chord_sum / count as f64 / (2.0 * (PI / count as f64).sin());

        // Sets contained in a role-placed set must stay inside it.
        for &f in free {
            for &anchor in anchored {
                let contained = problem
                    .target(f, anchor)
                    .is_some_and(|target| target.relation() == Relation::Contained);
                let (r_anchor, r_free) = (
                    problem.nodes()[anchor].radius(),
                    problem.nodes()[f].radius(),
                );
                if contained && r_anchor >= r_free {
                    ring_radius = ring_radius.min(r_anchor - r_free);
                }
            }
        }

        let angles: Vec<f64> = (0..count).map(|k| k as f64 * step - FRAC_PI_2).collect();
        let biased: Vec<f64> = (0..count)
            .map(|k| {
                let nearest = problem.nodes()[free[k]]
                    .intersects_with()
                    .iter()
                    .filter_map(|neighbour| free.iter().position(|f| f == neighbour))
                    .map(|m| circular_difference(angles[k], angles[m]))
                    .min_by(|x, y| x.abs().total_cmp(&y.abs()));
                match nearest {
                    Some(diff) => angles[k] + self.intersect_bias * diff / 2.0,
                    None => angles[k],
                }
            })
            .collect();

        debug!(sets = count, ring_radius = ring_radius; "Ring arrangement");
        biased
            .into_iter()
            .map(|angle| Point::from_polar(ring_radius, angle))
            .collect()
    }

    /// Pulls the free sets toward the origin until every set contained in a
    /// role-placed set lies inside it.
    ///
    /// The whole free arrangement is scaled by one factor so the relative
    /// placement is kept.
    fn keep_inside_anchors(
        &self,
        problem: &LayoutProblem,
        free: &[usize],
        anchored: &[usize],
        positions: &mut [Point],
    ) {
        let mut factor: f64 = 1.0;
        for &f in free {
            let reach = positions[f].hypot();
            let r_free = problem.nodes()[f].radius();
            for &anchor in anchored {
                let contained = problem
                    .target(f, anchor)
                    .is_some_and(|target| target.relation() == Relation::Contained);
                let r_anchor = problem.nodes()[anchor].radius();
                if contained && r_anchor >= r_free && reach + r_free > r_anchor && reach > 0.0 {
                    factor = factor.min((r_anchor - r_free) / reach);
                }
            }
        }

        if factor < 1.0 {
            debug!(factor = factor; "Pulling free sets inside their containing sets");
            for &f in free {
                positions[f] = positions[f].scale(factor);
            }
        }
    }
}

impl Default for Heuristic {
    fn default() -> Self {
        Self::new()
    }
}

/// Signed angle from `from` to `to`, wrapped into `(-π, π]`.
fn circular_difference(from: f64, to: f64) -> f64 {
    let diff = (to - from).rem_euclid(TAU);
    if diff > PI { diff - TAU } else { diff }
}

impl PlacementEngine for Heuristic {
    fn place(&self, problem: &LayoutProblem) -> Vec<Point> {
        let mut positions = vec![Point::default(); problem.len()];
        let free = problem.free_indices();
        let anchored = problem.anchored_indices();

        match *free.as_slice() {
            [] => {}
            [only] => positions[only] = self.place_single(problem, only, &anchored),
            [a, b] => {
                let [pa, pb] = self.place_pair(problem, a, b);
                positions[a] = pa;
                positions[b] = pb;
            }
            [a, b, c] => {
                let [pa, pb, pc] = self.place_triangle(problem, [a, b, c]);
                positions[a] = pa;
                positions[b] = pb;
                positions[c] = pc;
            }
            _ => {
                for (&index, point) in free.iter().zip(self.place_ring(problem, &free, &anchored)) {
                    positions[index] = point;
                }
            }
        }
        self.keep_inside_anchors(problem, &free, &anchored, &mut positions);

        debug!(
            free = free.len(),
            anchored = anchored.len();
            "Heuristic placement finished"
        );
        positions
    }
}
