//! Gap inference for pairs without an explicit intersection.

use std::{fmt, str::FromStr};

use log::debug;
use serde::Deserialize;

use lensplot_core::model::{IntersectionSpec, Members, Role, SetSpec};

use crate::error::{Diagnostic, DiagnosticCollector, ErrorCode};

/// How missing pairwise intersections are filled in.
///
/// - `SizeOrder` - Assume the smaller set is a subset of the larger one,
///   unless both sizes are equal or the pair is declared as a partial overlap
///   through `intersectsWith` (default)
/// - `HintsOnly` - Infer only where `role` hints declare inner ⊂ outer
/// - `Never` - Treat unspecified pairs as independent
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InferencePolicy {
    #[default]
    SizeOrder,
    HintsOnly,
    Never,
}

impl FromStr for InferencePolicy {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "size-order" => Ok(Self::SizeOrder),
            "hints-only" => Ok(Self::HintsOnly),
            "never" => Ok(Self::Never),
            _ => Err("Unsupported inference policy"),
        }
    }
}

impl From<InferencePolicy> for &'static str {
    fn from(val: InferencePolicy) -> Self {
        match val {
            InferencePolicy::SizeOrder => "size-order",
            InferencePolicy::HintsOnly => "hints-only",
            InferencePolicy::Never => "never",
        }
    }
}

impl fmt::Display for InferencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Returns `(inner, outer)` when the role hints nest one set in the other.
fn nested_by_role<'a>(a: &'a SetSpec, b: &'a SetSpec) -> Option<(&'a SetSpec, &'a SetSpec)> {
    match (a.hints().role(), b.hints().role()) {
        (Some(Role::Inner), Some(Role::Outer)) => Some((a, b)),
        (Some(Role::Outer), Some(Role::Inner)) => Some((b, a)),
        _ => None,
    }
}

fn declares_overlap(a: &SetSpec, b: &SetSpec) -> bool {
    a.hints().intersects_with().iter().any(|name| name == b.name())
        || b.hints().intersects_with().iter().any(|name| name == a.name())
}

/// Appends an inferred intersection for every unordered pair of `sets` that
/// `intersections` does not cover, as allowed by `policy`.
pub(crate) fn infer_missing_pairs(
    policy: InferencePolicy,
    sets: &[SetSpec],
    intersections: &mut Vec<IntersectionSpec>,
    collector: &mut DiagnosticCollector,
) {
    if policy == InferencePolicy::Never {
        return;
    }

    let mut inferred = Vec::new();
    for (index, a) in sets.iter().enumerate() {
        for b in &sets[index + 1..] {
            let members = Members::new([a.name(), b.name()]);
            if intersections
                .iter()
                .any(|intersection| intersection.members() == &members)
            {
                continue;
            }

            if let Some((inner, outer)) = nested_by_role(a, b) {
                if inner.size() > 0.0 {
                    collector.emit(
                        Diagnostic::note(format!(
                            "inferred `{members}` = {} from roles: `{}` inside `{}`",
                            inner.size(),
                            inner.name(),
                            outer.name()
                        ))
                        .with_code(ErrorCode::E200)
                        .with_subject(members.label()),
                    );
                    inferred.push(IntersectionSpec::inferred(members, inner.size()));
                }
                continue;
            }

            if policy == InferencePolicy::HintsOnly {
                continue;
            }

            if declares_overlap(a, b) {
                collector.emit(
                    Diagnostic::note(format!(
                        "`{members}` is declared as a partial overlap but has no count; not inferred"
                    ))
                    .with_code(ErrorCode::E202)
                    .with_subject(members.label())
                    .with_help(format!("add a `{}` count to draw the overlap", members.label())),
                );
                continue;
            }

            if a.size() == b.size() {
                if a.size() > 0.0 {
                    collector.emit(
                        Diagnostic::note(format!(
                            "`{}` and `{}` have equal sizes; containment is ambiguous and not inferred",
                            a.name(),
                            b.name()
                        ))
                        .with_code(ErrorCode::E201)
                        .with_subject(members.label())
                        .with_help("give one set `role: inner` and the other `role: outer`"),
                    );
                }
                continue;
            }

            let smaller = a.size().min(b.size());
            if smaller > 0.0 {
                collector.emit(
                    Diagnostic::note(format!(
                        "inferred `{members}` = {smaller} assuming the smaller set is a subset"
                    ))
                    .with_code(ErrorCode::E200)
                    .with_subject(members.label()),
                );
                inferred.push(IntersectionSpec::inferred(members, smaller));
            }
        }
    }

    debug!(policy:% = policy, inferred = inferred.len(); "Gap inference finished");
    intersections.extend(inferred);
}
