//! Translation of reconciled counts into a geometric placement problem.
//!
//! Every set becomes a [`SetNode`] with a radius; every pair with a known
//! intersection becomes a [`PairTarget`]: the centre distance at which the
//! two circles share the right amount of area.

use std::{collections::HashMap, f64::consts::PI};

use log::trace;

use lensplot_core::{
    circle::{distance_for_overlap, radius_from_area},
    geometry::Point,
    model::Role,
};
use lensplot_reconcile::Reconciled;

/// One set to be placed.
#[derive(Debug, Clone)]
pub struct SetNode {
    name: String,
    size: f64,
    radius: f64,
    role: Option<Role>,
    intersects_with: Vec<usize>,
}

impl SetNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Indices of the nodes named in this set's `intersectsWith` hint.
    pub fn intersects_with(&self) -> &[usize] {
        &self.intersects_with
    }

    /// Role-placed sets sit on the origin and are never moved.
    pub fn is_anchored(&self) -> bool {
        self.role.is_some()
    }
}

/// How two circles should relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Must not overlap.
    Disjoint,
    /// The smaller lies inside the larger.
    Contained,
    /// Overlap by a given area.
    Partial,
}

/// Desired centre distance between two circles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairTarget {
    distance: f64,
    relation: Relation,
}

impl PairTarget {
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// Squared violation of this target at centre distance `d`.
    ///
    /// Disjoint targets only penalize being too close, contained targets only
    /// penalize being too far apart.
    pub fn violation(&self, d: f64) -> f64 {
        let error = d - self.distance;
        match self.relation {
            Relation::Disjoint if error >= 0.0 => 0.0,
            Relation::Contained if error <= 0.0 => 0.0,
            _ => error * error,
        }
    }
}

/// Sets, radii and pairwise distance targets for one diagram.
#[derive(Debug, Clone)]
pub struct LayoutProblem {
    nodes: Vec<SetNode>,
    targets: HashMap<(usize, usize), PairTarget>,
    margin: f64,
}

impl LayoutProblem {
    /// Builds the problem for `reconciled` with `scale` canvas units per
    /// square root of a data unit. Disjoint circles are kept `margin` apart.
    pub fn new(reconciled: &Reconciled, scale: f64, margin: f64) -> Self {
        let sets = reconciled.sets();
        let index: HashMap<&str, usize> = sets
            .iter()
            .enumerate()
            .map(|(i, set)| (set.name(), i))
            .collect();

        let nodes: Vec<SetNode> = sets
            .iter()
            .map(|set| SetNode {
                name: set.name().to_string(),
                size: set.size(),
                radius: radius_from_area(set.size(), scale),
                role: set.hints().role(),
                intersects_with: set
                    .hints()
                    .intersects_with()
                    .iter()
                    .filter_map(|name| index.get(name.as_str()).copied())
                    .collect(),
            })
            .collect();

        let mut targets = HashMap::new();
        for intersection in reconciled.intersections().iter().filter(|i| i.is_pair()) {
            let mut members = intersection.members().iter();
            let (Some(a), Some(b)) = (members.next(), members.next()) else {
                continue;
            };
            let (Some(&i), Some(&j)) = (index.get(a), index.get(b)) else {
                continue;
            };
            let key = (i.min(j), i.max(j));
            let target = pair_target(&nodes[i], &nodes[j], intersection.size(), scale, margin);
            trace!(
                set_a = a,
                set_b = b,
                distance = target.distance,
                relation:? = target.relation;
                "Pair target"
            );
            targets.insert(key, target);
        }

        Self {
            nodes,
            targets,
            margin,
        }
    }

    pub fn nodes(&self) -> &[SetNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Target between nodes `i` and `j`, in either order.
    pub fn target(&self, i: usize, j: usize) -> Option<PairTarget> {
        self.targets.get(&(i.min(j), i.max(j))).copied()
    }

    /// Iterates over every `(i, j, target)` with `i < j`.
    pub fn targets(&self) -> impl Iterator<Item = (usize, usize, PairTarget)> + '_ {
        self.targets.iter().map(|(&(i, j), &target)| (i, j, target))
    }

    /// Indices of nodes without a role, in declaration order.
    pub fn free_indices(&self) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&i| !self.nodes[i].is_anchored())
            .collect()
    }

    /// Indices of role-placed nodes, in declaration order.
    pub fn anchored_indices(&self) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&i| self.nodes[i].is_anchored())
            .collect()
    }

    /// Centre distance for a pair without a target: mild overlap.
    pub fn default_distance(&self, i: usize, j: usize, mild_overlap: f64) -> f64 {
        (self.nodes[i].radius + self.nodes[j].radius) * (1.0 - mild_overlap)
    }

    /// The target distance when one exists, otherwise mild overlap.
    pub fn distance_or_default(&self, i: usize, j: usize, mild_overlap: f64) -> f64 {
        self.target(i, j)
            .map(|target| target.distance())
            .unwrap_or_else(|| self.default_distance(i, j, mild_overlap))
    }

    /// Sum of squared target violations for the given centres.
    pub fn loss(&self, positions: &[Point]) -> f64 {
        self.targets()
            .map(|(i, j, target)| target.violation(positions[i].distance(positions[j])))
            .sum()
    }
}

fn pair_target(a: &SetNode, b: &SetNode, size: f64, scale: f64, margin: f64) -> PairTarget {
    let (r1, r2) = (a.radius, b.radius);
    let smaller = a.size.min(b.size);

    if size <= 0.0 || r1 <= 0.0 || r2 <= 0.0 {
        PairTarget {
            distance: r1 + r2 + margin,
            relation: Relation::Disjoint,
        }
    } else if size >= smaller {
        PairTarget {
            distance: (r1 - r2).abs(),
            relation: Relation::Contained,
        }
    } else {
        PairTarget {
            distance: distance_for_overlap(r1, r2, PI * scale * scale * size),
            relation: Relation::Partial,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use lensplot_core::{circle::overlap_area, model::SetHints};
    use lensplot_reconcile::{Input, ReconcileConfig, reconcile};

    use super::*;

    fn problem(input: Input) -> LayoutProblem {
        LayoutProblem::new(&reconcile(&input, ReconcileConfig::default()), 1.0, 10.0)
    }

    #[test]
    fn test_partial_target_matches_overlap() {
        let problem = problem(
            Input::new()
                .with_count("A", 1200.0)
                .with_count("B", 900.0)
                .with_count("A_AND_B", 700.0),
        );

        let target = problem.target(1, 0).expect("pair target");
        assert_eq!(target.relation(), Relation::Partial);

        let [a, b] = [&problem.nodes()[0], &problem.nodes()[1]];
        let area = overlap_area(a.radius(), b.radius(), target.distance());
        assert_approx_eq!(f64, area / PI, 700.0, epsilon = 5.0);
    }

    #[test]
    fn test_containment_target() {
        let problem = problem(
            Input::new()
                .with_count("A", 100.0)
                .with_count("B", 25.0)
                .with_count("A_AND_B", 25.0),
        );

        let target = problem.target(0, 1).expect("pair target");
        assert_eq!(target.relation(), Relation::Contained);
        assert_approx_eq!(f64, target.distance(), 5.0);
    }

    #[test]
    fn test_zero_intersection_is_disjoint() {
        let problem = problem(
            Input::new()
                .with_count("A", 100.0)
                .with_count("B", 25.0)
                .with_count("A_AND_B", 0.0),
        );

        let target = problem.target(0, 1).expect("pair target");
        assert_eq!(target.relation(), Relation::Disjoint);
        assert_approx_eq!(f64, target.distance(), 25.0);
    }

    #[test]
    fn test_roles_and_hints_are_indexed() {
        let input = Input::new()
            .with_count("Outer", 100.0)
            .with_count("X", 10.0)
            .with_count("Y", 20.0)
            .with_hints("Outer", SetHints::new().with_role(Role::Outer))
            .with_hints("X", SetHints::new().with_intersects_with(["Y"]));
        let problem = problem(input);

        assert_eq!(problem.anchored_indices(), [0]);
        assert_eq!(problem.free_indices(), [1, 2]);
        assert_eq!(problem.nodes()[1].intersects_with(), [2]);
    }

    #[test]
    fn test_violation_is_one_sided() {
        let disjoint = PairTarget {
            distance: 10.0,
            relation: Relation::Disjoint,
        };
        assert_eq!(disjoint.violation(12.0), 0.0);
        assert_eq!(disjoint.violation(8.0), 4.0);

        let contained = PairTarget {
            distance: 10.0,
            relation: Relation::Contained,
        };
        assert_eq!(contained.violation(8.0), 0.0);
        assert_eq!(contained.violation(13.0), 9.0);
    }
}
