//! Scenario and property tests for the reconciliation pipeline.

use lensplot_core::model::{IntersectionSpec, Members, Provenance, Role, SetHints, SetSpec};

use crate::{
    InferencePolicy, Input, ReconcileConfig, Reconciled, Reconciler, error::ErrorCode, reconcile,
};

fn counts(pairs: &[(&str, f64)]) -> Input {
    pairs.iter().map(|(label, count)| (*label, *count)).collect()
}

fn codes(reconciled: &Reconciled) -> Vec<ErrorCode> {
    reconciled
        .diagnostics()
        .iter()
        .filter_map(|diagnostic| diagnostic.code())
        .collect()
}

#[test]
fn test_explicit_pair_is_kept() {
    let reconciled = reconcile(
        &counts(&[
            ("Event_1", 1200.0),
            ("Event_2", 900.0),
            ("Event_1_AND_Event_2", 700.0),
        ]),
        ReconcileConfig::default(),
    );

    let pair = reconciled
        .intersection(&Members::new(["Event_1", "Event_2"]))
        .expect("explicit pair");
    assert_eq!(pair.size(), 700.0);
    assert_eq!(pair.provenance(), Provenance::Observed);
    assert!(reconciled.diagnostics().is_empty());
}

#[test]
fn test_oversized_intersection_is_clamped() {
    let reconciled = reconcile(
        &counts(&[("A", 100.0), ("B", 50.0), ("A_AND_B", 9999.0)]),
        ReconcileConfig::default(),
    );

    assert_eq!(reconciled.intersections().len(), 1);
    assert_eq!(reconciled.intersections()[0].size(), 50.0);
    assert_eq!(codes(&reconciled), [ErrorCode::E300]);
    assert!(reconciled.diagnostics()[0].severity().is_warning());
}

#[test]
fn test_containment_hint_infers_subset() {
    let input = counts(&[("Event_1", 1200.0), ("Event_2", 900.0)])
        .with_hints("Event_1", SetHints::new().with_role(Role::Outer))
        .with_hints("Event_2", SetHints::new().with_role(Role::Inner));

    for policy in [InferencePolicy::SizeOrder, InferencePolicy::HintsOnly] {
        let reconciled = reconcile(&input, ReconcileConfig::new(policy));

        let pair = reconciled
            .intersection(&Members::new(["Event_1", "Event_2"]))
            .expect("inferred pair");
        assert_eq!(pair.size(), 900.0);
        assert_eq!(pair.provenance(), Provenance::Inferred);
        assert_eq!(codes(&reconciled), [ErrorCode::E200]);
    }
}

#[test]
fn test_never_policy_keeps_pairs_independent() {
    let reconciled = reconcile(
        &counts(&[("Event_1", 1200.0), ("Event_2", 900.0)]),
        ReconcileConfig::new(InferencePolicy::Never),
    );

    assert!(reconciled.intersections().is_empty());
    assert!(reconciled.diagnostics().is_empty());
}

#[test]
fn test_empty_input() {
    let reconciled = reconcile(&Input::new(), ReconcileConfig::default());
    assert!(reconciled.is_empty());
    assert!(reconciled.intersections().is_empty());
}

#[test]
fn test_malformed_and_duplicate_labels_are_dropped() {
    let reconciled = reconcile(
        &counts(&[("A", 10.0), ("A_AND_", 3.0), ("A_AND_A", 2.0)]),
        ReconcileConfig::default(),
    );

    assert_eq!(reconciled.sets().len(), 1);
    assert!(reconciled.intersections().is_empty());
    assert_eq!(codes(&reconciled), [ErrorCode::E001, ErrorCode::E002]);
    assert_eq!(reconciled.diagnostics()[0].subjects(), ["A_AND_"]);
}

#[test]
fn test_set_only_in_composite_labels_is_dropped() {
    let reconciled = reconcile(
        &counts(&[("A", 10.0), ("A_AND_Ghost", 3.0), ("A_AND_B_AND_Ghost", 1.0)]),
        ReconcileConfig::new(InferencePolicy::Never),
    );

    assert_eq!(reconciled.sets().len(), 1);
    assert!(reconciled.intersections().is_empty());
    // Ghost is reported once; B, which also lacks a count, once.
    assert_eq!(
        codes(&reconciled),
        [ErrorCode::E102, ErrorCode::E102],
        "{:?}",
        reconciled.diagnostics()
    );
}

#[test]
fn test_four_way_intersection_is_dropped() {
    let reconciled = reconcile(
        &counts(&[
            ("A", 10.0),
            ("B", 10.0),
            ("C", 10.0),
            ("D", 10.0),
            ("A_AND_B_AND_C_AND_D", 1.0),
        ]),
        ReconcileConfig::new(InferencePolicy::Never),
    );

    assert!(reconciled.intersections().is_empty());
    assert_eq!(codes(&reconciled), [ErrorCode::E003]);
}

#[test]
fn test_negative_and_non_finite_counts() {
    let reconciler = Reconciler::new(ReconcileConfig::new(InferencePolicy::Never));
    let reconciled = reconciler.reconcile_specs(
        vec![
            SetSpec::new("A", -5.0),
            SetSpec::new("B", f64::NAN),
            SetSpec::new("C", 7.0),
        ],
        vec![IntersectionSpec::new(Members::new(["A", "C"]), f64::INFINITY)],
    );

    let names: Vec<&str> = reconciled.sets().iter().map(SetSpec::name).collect();
    assert_eq!(names, ["A", "C"]);
    assert_eq!(reconciled.sets()[0].size(), 0.0);
    assert!(reconciled.intersections().is_empty());
    assert_eq!(
        codes(&reconciled),
        [ErrorCode::E100, ErrorCode::E101, ErrorCode::E101]
    );
}

#[test]
fn test_triple_clamped_to_smallest_pair() {
    let reconciled = reconcile(
        &counts(&[
            ("A", 1200.0),
            ("B", 900.0),
            ("C", 700.0),
            ("A_AND_B", 600.0),
            ("A_AND_C", 500.0),
            ("B_AND_C", 400.0),
            ("A_AND_B_AND_C", 450.0),
        ]),
        ReconcileConfig::default(),
    );

    let triple = reconciled
        .intersection(&Members::new(["A", "B", "C"]))
        .expect("triple kept");
    assert_eq!(triple.size(), 400.0);
    assert_eq!(codes(&reconciled), [ErrorCode::E301]);
}

#[test]
fn test_hint_cleanup() {
    let input = counts(&[("A", 10.0), ("B", 5.0), ("A_AND_B", 2.0)])
        .with_hints(
            "A",
            SetHints::new()
                .with_related_to(["B", "Nobody"])
                .with_intersects_with(["B"]),
        )
        .with_hints("Missing", SetHints::new().with_role(Role::Inner));

    let reconciled = reconcile(&input, ReconcileConfig::default());

    let a = reconciled.set("A").expect("set A");
    assert_eq!(a.hints().related_to(), ["B"]);
    assert_eq!(a.hints().intersects_with(), ["B"]);
    assert_eq!(codes(&reconciled), [ErrorCode::E400, ErrorCode::E401]);
}

#[test]
fn test_equal_sizes_reported_not_inferred() {
    let reconciled = reconcile(
        &counts(&[("A", 500.0), ("B", 500.0)]),
        ReconcileConfig::default(),
    );

    assert!(reconciled.intersections().is_empty());
    assert_eq!(codes(&reconciled), [ErrorCode::E201]);
    assert!(reconciled.diagnostics()[0].severity().is_note());
}

#[test]
fn test_reconcile_is_idempotent_on_sample() {
    let input = counts(&[
        ("Event_1", 1200.0),
        ("Event_2", 900.0),
        ("Event_1_AND_Event_2", 700.0),
        ("Event_3", 500.0),
        ("Event_3_AND_Event_1", 9000.0),
    ]);
    let reconciler = Reconciler::default();

    let first = reconciler.reconcile(&input);
    let (sets, intersections) = first.clone().into_parts();
    let second = reconciler.reconcile_specs(sets, intersections);

    assert_eq!(first.sets(), second.sets());
    assert_eq!(first.intersections(), second.intersections());
    assert!(second.diagnostics().is_empty());
}

mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    const NAMES: [&str; 4] = ["A", "B", "C", "D"];

    fn raw_input_strategy() -> impl Strategy<Value = Input> {
        let sets = proptest::collection::vec(-10.0f64..1000.0, NAMES.len());
        let pairs = proptest::collection::vec(proptest::option::of(-10.0f64..2000.0), 6);
        let triple = proptest::option::of(0.0f64..2000.0);

        (sets, pairs, triple).prop_map(|(sets, pairs, triple)| {
            let mut input = Input::new();
            for (name, size) in NAMES.iter().zip(sets) {
                input = input.with_count(*name, size);
            }
            let mut index = 0;
            for (i, a) in NAMES.iter().enumerate() {
                for b in &NAMES[i + 1..] {
                    if let Some(size) = pairs[index] {
                        input = input.with_count(format!("{a}_AND_{b}"), size);
                    }
                    index += 1;
                }
            }
            if let Some(size) = triple {
                input = input.with_count("A_AND_B_AND_C", size);
            }
            input
        })
    }

    fn policy_strategy() -> impl Strategy<Value = InferencePolicy> {
        prop_oneof![
            Just(InferencePolicy::SizeOrder),
            Just(InferencePolicy::HintsOnly),
            Just(InferencePolicy::Never),
        ]
    }

    // ===================
    // Property Test Functions
    // ===================

    fn check_intersections_fit_members(
        input: &Input,
        policy: InferencePolicy,
    ) -> Result<(), TestCaseError> {
        let reconciled = reconcile(input, ReconcileConfig::new(policy));

        for intersection in reconciled.intersections() {
            prop_assert!(intersection.size() >= 0.0);
            for member in intersection.members().iter() {
                let set = reconciled.set(member);
                prop_assert!(set.is_some(), "member {member} must be a reconciled set");
                if let Some(set) = set {
                    prop_assert!(intersection.size() <= set.size());
                }
            }
        }
        for set in reconciled.sets() {
            prop_assert!(set.size() >= 0.0);
        }
        Ok(())
    }

    fn check_idempotent(input: &Input, policy: InferencePolicy) -> Result<(), TestCaseError> {
        let reconciler = Reconciler::new(ReconcileConfig::new(policy));
        let first = reconciler.reconcile(input);
        let (sets, intersections) = first.clone().into_parts();
        let second = reconciler.reconcile_specs(sets, intersections);

        prop_assert_eq!(first.sets(), second.sets());
        prop_assert_eq!(first.intersections(), second.intersections());
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn intersections_fit_members(input in raw_input_strategy(), policy in policy_strategy()) {
            check_intersections_fit_members(&input, policy)?;
        }

        #[test]
        fn reconcile_is_idempotent(input in raw_input_strategy(), policy in policy_strategy()) {
            check_idempotent(&input, policy)?;
        }
    }
}
