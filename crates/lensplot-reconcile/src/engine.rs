//! The reconciliation pipeline.
//!
//! ```text
//! Input (label → count, hints)
//!     ↓ extract      split labels, attach hints
//!     ↓ canonicalize dedupe, clamp negatives
//!     ↓ filter       undefined sizes, cardinality, dangling references
//!     ↓ infer        fill missing pairs per InferencePolicy
//!     ↓ clamp        size ≤ min(member sizes), triple ≤ its pairs
//! Reconciled
//! ```

use std::collections::HashSet;

use log::{debug, info};
use serde::Deserialize;

use lensplot_core::model::{self, IntersectionSpec, Members, SetSpec};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    infer::{self, InferencePolicy},
    input::Input,
    label::{self, LabelError},
};

/// Configuration for the reconciliation stage.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ReconcileConfig {
    /// Gap inference policy for pairs without a count.
    #[serde(default)]
    inference: InferencePolicy,
}

impl ReconcileConfig {
    pub fn new(inference: InferencePolicy) -> Self {
        Self { inference }
    }

    pub fn inference(&self) -> InferencePolicy {
        self.inference
    }
}

/// Validated, geometrically admissible sets and intersections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciled {
    sets: Vec<SetSpec>,
    intersections: Vec<IntersectionSpec>,
    diagnostics: Vec<Diagnostic>,
}

impl Reconciled {
    pub fn sets(&self) -> &[SetSpec] {
        &self.sets
    }

    pub fn intersections(&self) -> &[IntersectionSpec] {
        &self.intersections
    }

    /// Every repair and decision, in the order it was made.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn set(&self, name: &str) -> Option<&SetSpec> {
        self.sets.iter().find(|set| set.name() == name)
    }

    pub fn intersection(&self, members: &Members) -> Option<&IntersectionSpec> {
        self.intersections
            .iter()
            .find(|intersection| intersection.members() == members)
    }

    /// Returns the tuples without diagnostics.
    pub fn into_parts(self) -> (Vec<SetSpec>, Vec<IntersectionSpec>) {
        (self.sets, self.intersections)
    }
}

/// Turns raw counts into [`Reconciled`] tuples. Never fails.
#[derive(Debug, Default, Clone)]
pub struct Reconciler {
    config: ReconcileConfig,
}

impl Reconciler {
    pub fn new(config: ReconcileConfig) -> Self {
        Self { config }
    }

    /// Reconciles a label → count mapping with optional hints.
    pub fn reconcile(&self, input: &Input) -> Reconciled {
        info!(labels = input.counts().len(), hints = input.hints().len(); "Reconciling counts");
        let mut collector = DiagnosticCollector::new();

        let (sets, intersections) = extract(input, &mut collector);
        self.run(sets, intersections, collector)
    }

    /// Reconciles already structured tuples.
    ///
    /// Reconciling the output of a previous run yields the same tuples.
    pub fn reconcile_specs(
        &self,
        sets: Vec<SetSpec>,
        intersections: Vec<IntersectionSpec>,
    ) -> Reconciled {
        info!(sets = sets.len(), intersections = intersections.len(); "Reconciling tuples");
        self.run(sets, intersections, DiagnosticCollector::new())
    }

    fn run(
        &self,
        sets: Vec<SetSpec>,
        intersections: Vec<IntersectionSpec>,
        mut collector: DiagnosticCollector,
    ) -> Reconciled {
        report_negative_counts(&sets, &intersections, &mut collector);
        let (sets, intersections) = model::canonicalize(sets, intersections);

        let mut sets = filter_sets(sets, &mut collector);
        let mut intersections = filter_intersections(&sets, intersections, &mut collector);
        clean_hint_references(&mut sets, &mut collector);

        infer::infer_missing_pairs(
            self.config.inference(),
            &sets,
            &mut intersections,
            &mut collector,
        );
        clamp_to_members(&sets, &mut intersections, &mut collector);
        clamp_triples_to_pairs(&mut intersections, &mut collector);

        let diagnostics = collector.finish();
        debug!(
            sets = sets.len(),
            intersections = intersections.len(),
            diagnostics = diagnostics.len();
            "Reconciliation finished"
        );

        Reconciled {
            sets,
            intersections,
            diagnostics,
        }
    }
}

/// Splits labels into sets and intersections and attaches hints.
fn extract(
    input: &Input,
    collector: &mut DiagnosticCollector,
) -> (Vec<SetSpec>, Vec<IntersectionSpec>) {
    let mut sets = Vec::new();
    let mut intersections = Vec::new();

    for (source, &count) in input.counts() {
        let names = match label::parse_label(source) {
            Ok(names) => names,
            Err(err) => {
                let code = match err {
                    LabelError::DuplicateMember { .. } => ErrorCode::E002,
                    LabelError::Empty | LabelError::Malformed(_) => ErrorCode::E001,
                };
                collector.emit(
                    Diagnostic::warning(format!("{err}; dropped"))
                        .with_code(code)
                        .with_subject(source.as_str())
                        .with_help("use a set name or 2 to 3 set names joined by `_AND_`"),
                );
                continue;
            }
        };

        match names.as_slice() {
            [name] => sets.push(SetSpec::new(name.as_str(), count)),
            _ => intersections.push(IntersectionSpec::new(Members::new(names), count)),
        }
    }

    for (name, hints) in input.hints() {
        match sets.iter_mut().find(|set| set.name() == name.trim()) {
            Some(set) => *set.hints_mut() = hints.clone(),
            None => collector.emit(
                Diagnostic::warning(format!("hints given for `{name}`, which has no count; ignored"))
                    .with_code(ErrorCode::E400)
                    .with_subject(name.as_str()),
            ),
        }
    }

    (sets, intersections)
}

fn report_negative_counts(
    sets: &[SetSpec],
    intersections: &[IntersectionSpec],
    collector: &mut DiagnosticCollector,
) {
    let negative_sets = sets
        .iter()
        .filter(|set| set.size() < 0.0)
        .map(|set| (set.name().to_string(), set.size()));
    let negative_intersections = intersections
        .iter()
        .filter(|intersection| intersection.size() < 0.0)
        .map(|intersection| (intersection.members().label(), intersection.size()));

    for (subject, size) in negative_sets.chain(negative_intersections) {
        collector.emit(
            Diagnostic::warning(format!("`{subject}` has negative count {size}; clamped to 0"))
                .with_code(ErrorCode::E100)
                .with_subject(subject),
        );
    }
}

fn filter_sets(sets: Vec<SetSpec>, collector: &mut DiagnosticCollector) -> Vec<SetSpec> {
    sets.into_iter()
        .filter(|set| {
            let finite = set.size().is_finite();
            if !finite {
                collector.emit(
                    Diagnostic::warning(format!(
                        "set `{}` has non-finite count {}; dropped",
                        set.name(),
                        set.size()
                    ))
                    .with_code(ErrorCode::E101)
                    .with_subject(set.name()),
                );
            }
            finite
        })
        .collect()
}

fn filter_intersections(
    sets: &[SetSpec],
    intersections: Vec<IntersectionSpec>,
    collector: &mut DiagnosticCollector,
) -> Vec<IntersectionSpec> {
    let known: HashSet<&str> = sets.iter().map(SetSpec::name).collect();
    let mut reported_missing: HashSet<String> = HashSet::new();

    intersections
        .into_iter()
        .filter(|intersection| {
            let members = intersection.members();
            let label = members.label();

            if !(2..=3).contains(&members.len()) {
                collector.emit(
                    Diagnostic::warning(format!(
                        "`{label}` has {} members; only 2- and 3-way intersections are drawn",
                        members.len()
                    ))
                    .with_code(ErrorCode::E003)
                    .with_subject(label),
                );
                return false;
            }

            if !intersection.size().is_finite() {
                collector.emit(
                    Diagnostic::warning(format!(
                        "`{label}` has non-finite count {}; dropped",
                        intersection.size()
                    ))
                    .with_code(ErrorCode::E101)
                    .with_subject(label),
                );
                return false;
            }

            let missing: Vec<&str> = members.iter().filter(|name| !known.contains(name)).collect();
            if missing.is_empty() {
                return true;
            }
            for name in missing {
                if reported_missing.insert(name.to_string()) {
                    collector.emit(
                        Diagnostic::warning(format!(
                            "set `{name}` has no count; intersections that reference it are dropped"
                        ))
                        .with_code(ErrorCode::E102)
                        .with_subject(name)
                        .with_subject(label.as_str())
                        .with_help(format!("add a `{name}` count to keep them")),
                    );
                }
            }
            false
        })
        .collect()
}

fn clean_hint_references(sets: &mut [SetSpec], collector: &mut DiagnosticCollector) {
    let known: HashSet<String> = sets.iter().map(|set| set.name().to_string()).collect();

    for set in sets.iter_mut() {
        let owner = set.name().to_string();
        let dropped = set
            .hints_mut()
            .retain_references(|name| known.contains(name) && name != owner);
        for name in dropped {
            collector.emit(
                Diagnostic::warning(format!(
                    "hint on `{owner}` references `{name}`, which is not another known set; removed"
                ))
                .with_code(ErrorCode::E401)
                .with_subject(owner.as_str())
                .with_subject(name),
            );
        }
    }
}

fn min_member_size<'a>(sets: &'a [SetSpec], members: &Members) -> Option<&'a SetSpec> {
    sets.iter()
        .filter(|set| members.contains(set.name()))
        .min_by(|a, b| a.size().total_cmp(&b.size()))
}

fn clamp_to_members(
    sets: &[SetSpec],
    intersections: &mut [IntersectionSpec],
    collector: &mut DiagnosticCollector,
) {
    for intersection in intersections.iter_mut() {
        let Some(smallest) = min_member_size(sets, intersection.members()) else {
            continue;
        };
        if intersection.size() <= smallest.size() {
            continue;
        }

        collector.emit(
            Diagnostic::warning(format!(
                "intersection `{}` ({}) exceeds smallest member `{}` ({}); clamped to {}",
                intersection.members(),
                intersection.size(),
                smallest.name(),
                smallest.size(),
                smallest.size()
            ))
            .with_code(ErrorCode::E300)
            .with_subject(intersection.members().label())
            .with_help("intersection sizes cannot be larger than any member set"),
        );
        *intersection = intersection.clone().with_size(smallest.size());
    }
}

fn clamp_triples_to_pairs(
    intersections: &mut [IntersectionSpec],
    collector: &mut DiagnosticCollector,
) {
    let pairs: Vec<(Members, f64)> = intersections
        .iter()
        .filter(|intersection| intersection.is_pair())
        .map(|intersection| (intersection.members().clone(), intersection.size()))
        .collect();

    for triple in intersections.iter_mut().filter(|i| i.is_triple()) {
        let bound = triple
            .members()
            .pairs()
            .iter()
            .filter_map(|pair| {
                pairs
                    .iter()
                    .find(|(members, _)| members == pair)
                    .map(|(members, size)| (members.clone(), *size))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1));

        let Some((pair, size)) = bound else {
            continue;
        };
        if triple.size() <= size {
            continue;
        }

        collector.emit(
            Diagnostic::warning(format!(
                "triple `{}` ({}) exceeds pairwise intersection `{pair}` ({size}); clamped to {size}",
                triple.members(),
                triple.size()
            ))
            .with_code(ErrorCode::E301)
            .with_subject(triple.members().label())
            .with_subject(pair.label()),
        );
        *triple = triple.clone().with_size(size);
    }
}
