//! Canonical set and intersection model.
//!
//! These types are the contract between the reconciliation stage and the
//! layout planner. A [`SetSpec`] names one group and its size; an
//! [`IntersectionSpec`] records how many items 2 or 3 groups share.
//! [`canonicalize`] turns raw, possibly repetitive input into a list where
//! every name and every member combination appears once.

use std::fmt;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

/// Structural role of a set in a nested arrangement.
///
/// Sets with a role are drawn concentric: an `inner` set sits strictly
/// inside the `outer` one instead of partially overlapping it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Outer,
    Inner,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Outer => write!(f, "outer"),
            Role::Inner => write!(f, "inner"),
        }
    }
}

/// Optional relationship hints attached to a set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SetHints {
    role: Option<Role>,
    related_to: Vec<String>,
    intersects_with: Vec<String>,
}

impl SetHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_related_to<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related_to = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_intersects_with<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.intersects_with = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Informational links, used for highlighting only.
    pub fn related_to(&self) -> &[String] {
        &self.related_to
    }

    /// Sets this one is expected to partially overlap.
    pub fn intersects_with(&self) -> &[String] {
        &self.intersects_with
    }

    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.related_to.is_empty() && self.intersects_with.is_empty()
    }

    /// Drops every reference for which `keep` returns false and returns the
    /// dropped names, `relatedTo` first.
    pub fn retain_references<F>(&mut self, mut keep: F) -> Vec<String>
    where
        F: FnMut(&str) -> bool,
    {
        let mut dropped = Vec::new();
        for list in [&mut self.related_to, &mut self.intersects_with] {
            list.retain(|name| {
                let retained = keep(name);
                if !retained {
                    dropped.push(name.clone());
                }
                retained
            });
        }
        dropped
    }
}

/// A named group and its size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetSpec {
    name: String,
    size: f64,
    #[serde(skip_serializing_if = "SetHints::is_empty")]
    hints: SetHints,
}

impl SetSpec {
    pub fn new(name: impl Into<String>, size: f64) -> Self {
        Self {
            name: name.into(),
            size,
            hints: SetHints::default(),
        }
    }

    pub fn with_hints(mut self, hints: SetHints) -> Self {
        self.hints = hints;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn hints(&self) -> &SetHints {
        &self.hints
    }

    pub fn hints_mut(&mut self) -> &mut SetHints {
        &mut self.hints
    }
}

/// Sorted, duplicate-free list of set names identifying an intersection.
///
/// # Examples
///
/// ```
/// # use lensplot_core::model::Members;
/// let members = Members::new(["B", "A", "B"]);
/// assert_eq!(members.len(), 2);
/// assert_eq!(members.to_string(), "A ∩ B");
/// assert_eq!(members.label(), "A_AND_B");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Members(Vec<String>);

impl Members {
    /// Separator used in composite input labels.
    pub const SEPARATOR: &'static str = "_AND_";

    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        names.dedup();
        Self(names)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|member| member == name)
    }

    /// The composite input label for these members, e.g. `A_AND_B`.
    pub fn label(&self) -> String {
        self.0.join(Self::SEPARATOR)
    }

    /// Every 2-member subset, in sorted order.
    pub fn pairs(&self) -> Vec<Members> {
        let mut pairs = Vec::new();
        for (index, first) in self.0.iter().enumerate() {
            for second in &self.0[index + 1..] {
                pairs.push(Members(vec![first.clone(), second.clone()]));
            }
        }
        pairs
    }
}

impl fmt::Display for Members {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" ∩ "))
    }
}

/// Where an intersection size came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Supplied by the input.
    Observed,
    /// Synthesised by gap inference.
    Inferred,
}

/// How many items a combination of sets shares.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntersectionSpec {
    members: Members,
    size: f64,
    provenance: Provenance,
}

impl IntersectionSpec {
    /// Creates an observed intersection.
    pub fn new(members: Members, size: f64) -> Self {
        Self {
            members,
            size,
            provenance: Provenance::Observed,
        }
    }

    /// Creates an intersection synthesised by inference.
    pub fn inferred(members: Members, size: f64) -> Self {
        Self {
            members,
            size,
            provenance: Provenance::Inferred,
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn members(&self) -> &Members {
        &self.members
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn is_pair(&self) -> bool {
        self.members.len() == 2
    }

    pub fn is_triple(&self) -> bool {
        self.members.len() == 3
    }
}

fn clamp_negative(size: f64) -> f64 {
    // NaN passes through so later stages can report it.
    if size < 0.0 { 0.0 } else { size }
}

/// Deduplicates and normalises raw sets and intersections.
///
/// - A repeated set name keeps the position of its first occurrence and
///   the value of its last.
/// - Intersections are keyed by their sorted member list with the same rule.
/// - Negative sizes become zero.
pub fn canonicalize<S, I>(raw_sets: S, raw_intersections: I) -> (Vec<SetSpec>, Vec<IntersectionSpec>)
where
    S: IntoIterator<Item = SetSpec>,
    I: IntoIterator<Item = IntersectionSpec>,
{
    let mut sets: IndexMap<String, SetSpec> = IndexMap::new();
    for mut set in raw_sets {
        set.size = clamp_negative(set.size);
        sets.insert(set.name.clone(), set);
    }

    let mut intersections: IndexMap<Members, IntersectionSpec> = IndexMap::new();
    for mut intersection in raw_intersections {
        intersection.size = clamp_negative(intersection.size);
        intersections.insert(intersection.members.clone(), intersection);
    }

    debug!(sets = sets.len(), intersections = intersections.len(); "Canonicalized input");

    (
        sets.into_values().collect(),
        intersections.into_values().collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_members_sorted_and_deduplicated() {
        let members = Members::new(["C", "A", "B", "A"]);
        assert_eq!(members.as_slice(), ["A", "B", "C"]);
        assert!(members.contains("B"));
        assert!(!members.contains("D"));
    }

    #[test]
    fn test_members_pairs() {
        let pairs = Members::new(["C", "A", "B"]).pairs();
        assert_eq!(
            pairs,
            vec![
                Members::new(["A", "B"]),
                Members::new(["A", "C"]),
                Members::new(["B", "C"]),
            ]
        );
    }

    #[test]
    fn test_canonicalize_first_position_last_value() {
        let (sets, _) = canonicalize(
            vec![
                SetSpec::new("A", 10.0),
                SetSpec::new("B", 5.0),
                SetSpec::new("A", 20.0),
            ],
            Vec::new(),
        );

        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].name(), "A");
        assert_eq!(sets[0].size(), 20.0);
        assert_eq!(sets[1].name(), "B");
    }

    #[test]
    fn test_canonicalize_merges_intersections_by_members() {
        let (_, intersections) = canonicalize(
            Vec::new(),
            vec![
                IntersectionSpec::new(Members::new(["B", "A"]), 3.0),
                IntersectionSpec::new(Members::new(["A", "B"]), 4.0),
            ],
        );

        assert_eq!(intersections.len(), 1);
        assert_eq!(intersections[0].size(), 4.0);
    }

    #[test]
    fn test_canonicalize_clamps_negative_keeps_nan() {
        let (sets, _) = canonicalize(
            vec![SetSpec::new("A", -4.0), SetSpec::new("B", f64::NAN)],
            Vec::new(),
        );

        assert_eq!(sets[0].size(), 0.0);
        assert!(sets[1].size().is_nan());
    }

    #[test]
    fn test_hints_retain_references() {
        let mut hints = SetHints::new()
            .with_related_to(["A", "Ghost"])
            .with_intersects_with(["Phantom", "B"]);

        let dropped = hints.retain_references(|name| name == "A" || name == "B");

        assert_eq!(dropped, vec!["Ghost".to_string(), "Phantom".to_string()]);
        assert_eq!(hints.related_to(), ["A"]);
        assert_eq!(hints.intersects_with(), ["B"]);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Outer.to_string(), "outer");
        assert_eq!(Role::Inner.to_string(), "inner");
    }
}
