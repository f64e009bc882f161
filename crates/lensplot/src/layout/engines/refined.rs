//! Refined placement engine
//!
//! Starts from the [`Heuristic`] placement and moves the free sets by a
//! bounded gradient descent on the pairwise distance targets. Role-placed
//! sets never move. The result is whichever of the two placements violates
//! the targets less, so refinement can only improve on the heuristic.

use log::{debug, trace};

use lensplot_core::geometry::Point;

use super::heuristic::Heuristic;
use crate::layout::{engines::PlacementEngine, problem::LayoutProblem};

/// Fraction of each violation corrected per step, shared between the
/// constraints touching a set.
const STEP: f64 = 0.25;

/// Loss below which the placement counts as exact, relative to the squared
/// target distances.
const RELATIVE_TOLERANCE: f64 = 1e-10;

/// Direction used to separate coincident centres.
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Gradient refinement engine implementation that implements the PlacementEngine trait
#[derive(Debug, Clone)]
pub struct Refined {
    start: Heuristic,
    max_iterations: usize,
}

impl Refined {
    /// Create a new refined engine starting from the given heuristic placement
    pub fn new(start: Heuristic) -> Self {
        Self {
            start,
            max_iterations: 200,
        }
    }

    /// Set the upper bound on descent steps
    pub fn set_max_iterations(&mut self, iterations: usize) -> &mut Self {
        self.max_iterations = iterations;
        self
    }

    /// Runs one Jacobi step: every free set moves by the averaged correction
    /// of the targets it takes part in.
    fn step(&self, problem: &LayoutProblem, positions: &[Point]) -> Vec<Point> {
        let mut moves = vec![Point::default(); positions.len()];
        let mut counts = vec![0usize; positions.len()];

        for (i, j, target) in problem.targets() {
            let d = positions[i].distance(positions[j]);
            if target.violation(d) == 0.0 {
                continue;
            }

            let direction = if d > f64::EPSILON {
                positions[i].sub_point(positions[j]).scale(1.0 / d)
            } else {
                Point::from_polar(1.0, (i + j) as f64 * GOLDEN_ANGLE)
            };
            // Positive error pulls the pair together.
            let error = d - target.distance();
            let correction = direction.scale(error);

            moves[i] = moves[i].sub_point(correction);
            moves[j] = moves[j].add_point(correction);
            counts[i] += 1;
            counts[j] += 1;
        }

        positions
            .iter()
            .enumerate()
            .map(|(index, &point)| {
                if problem.nodes()[index].is_anchored() || counts[index] == 0 {
                    point
                } else {
                    point.add_point(moves[index].scale(STEP / counts[index] as f64))
                }
            })
            .collect()
    }
}

impl PlacementEngine for Refined {
    fn place(&self, problem: &LayoutProblem) -> Vec<Point> {
        let initial = self.start.place(problem);
        let initial_loss = problem.loss(&initial);

        let scale: f64 = problem
            .targets()
            .map(|(_, _, target)| target.distance() * target.distance())
            .sum();
        let tolerance = RELATIVE_TOLERANCE * scale.max(1.0);

        let mut positions = initial.clone();
        let mut loss = initial_loss;
        let mut iterations = 0;
        while iterations < self.max_iterations && loss > tolerance {
            positions = self.step(problem, &positions);
            loss = problem.loss(&positions);
            iterations += 1;
            trace!(iteration = iterations, loss = loss; "Refinement step");
        }

        debug!(
            iterations = iterations,
            initial_loss = initial_loss,
            final_loss = loss;
            "Refinement finished"
        );

        if loss <= initial_loss && positions.iter().all(|point| point.is_finite()) {
            positions
        } else {
            initial
        }
    }
}

#[cfg(test)]
mod tests {
    use lensplot_core::model::{Role, SetHints};
    use lensplot_reconcile::{InferencePolicy, Input, ReconcileConfig, reconcile};

    use super::*;

    fn problem(input: &Input) -> LayoutProblem {
        LayoutProblem::new(
            &reconcile(input, ReconcileConfig::new(InferencePolicy::SizeOrder)),
            1.0,
            10.0,
        )
    }

    /// Four sets with inconsistent ring targets.
    fn four_sets() -> Input {
        Input::new()
            .with_count("A", 1000.0)
            .with_count("B", 800.0)
            .with_count("C", 600.0)
            .with_count("D", 400.0)
            .with_count("A_AND_B", 300.0)
            .with_count("A_AND_C", 50.0)
            .with_count("A_AND_D", 200.0)
            .with_count("B_AND_C", 250.0)
            .with_count("B_AND_D", 0.0)
            .with_count("C_AND_D", 100.0)
    }

    #[test]
    fn test_refinement_never_worse_than_heuristic() {
        let problem = problem(&four_sets());

        let heuristic = Heuristic::new().place(&problem);
        let refined = Refined::new(Heuristic::new()).place(&problem);

        assert!(problem.loss(&refined) <= problem.loss(&heuristic));
    }

    #[test]
    fn test_refinement_improves_ring() {
        let problem = problem(&four_sets());

        let heuristic = Heuristic::new().place(&problem);
        let refined = Refined::new(Heuristic::new()).place(&problem);

        assert!(problem.loss(&refined) < problem.loss(&heuristic));
    }

    #[test]
    fn test_zero_iterations_returns_heuristic() {
        let problem = problem(&four_sets());

        let mut engine = Refined::new(Heuristic::new());
        engine.set_max_iterations(0);

        assert_eq!(engine.place(&problem), Heuristic::new().place(&problem));
    }

    #[test]
    fn test_anchored_sets_do_not_move() {
        let input = Input::new()
            .with_count("All", 5000.0)
            .with_count("X", 900.0)
            .with_count("Y", 800.0)
            .with_count("X_AND_Y", 200.0)
            .with_hints("All", SetHints::new().with_role(Role::Outer));
        let problem = problem(&input);

        let positions = Refined::new(Heuristic::new()).place(&problem);
        assert_eq!(positions[0], Point::default());
    }
}
