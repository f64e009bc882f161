//! View-state emphasis for selected and hovered sets.
//!
//! Emphasis is computed from the reconciled sets and their hints only; it
//! never touches geometry. Adapters look up an [`EmphasisLevel`] per circle
//! and apply its opacity, stroke width and radius factor.

use std::collections::HashMap;

use log::debug;

use lensplot_core::model::{Members, Provenance};
use lensplot_reconcile::Reconciled;

/// The set a user is interacting with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    /// The set was clicked.
    Selected(String),
    /// The pointer is over the set.
    Hovered(String),
}

impl Focus {
    /// Name of the focused set.
    pub fn name(&self) -> &str {
        match self {
            Focus::Selected(name) | Focus::Hovered(name) => name,
        }
    }
}

/// How strongly a circle is emphasized, strongest first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EmphasisLevel {
    Selected,
    Hovered,
    /// Related to or intersecting with the hovered set.
    Highlighted,
    /// Declared or observed to overlap the selected set.
    Intersecting,
    /// Listed in the selected set's `relatedTo` hint.
    Related,
    #[default]
    Normal,
}

impl EmphasisLevel {
    pub fn fill_opacity(self) -> f64 {
        match self {
            EmphasisLevel::Selected => 0.4,
            EmphasisLevel::Hovered => 0.85,
            EmphasisLevel::Highlighted => 0.35,
            EmphasisLevel::Intersecting => 0.3,
            EmphasisLevel::Related | EmphasisLevel::Normal => 0.25,
        }
    }

    pub fn stroke_width(self) -> f64 {
        match self {
            EmphasisLevel::Selected => 3.0,
            EmphasisLevel::Highlighted => 2.5,
            _ => 2.0,
        }
    }

    /// Multiplier applied to the drawn radius; geometry is unchanged.
    pub fn radius_factor(self) -> f64 {
        match self {
            EmphasisLevel::Hovered => 1.1,
            _ => 1.0,
        }
    }
}

/// Per-set emphasis for one focus state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Emphasis {
    focus: Option<Focus>,
    levels: HashMap<String, EmphasisLevel>,
    connections: Vec<(String, String)>,
}

impl Emphasis {
    /// No focus: every set is [`EmphasisLevel::Normal`].
    pub fn none() -> Self {
        Self::default()
    }

    /// Classifies every set of `reconciled` for `focus`.
    ///
    /// A focus naming an unknown set yields [`Emphasis::none`].
    pub fn compute(reconciled: &Reconciled, focus: Option<Focus>) -> Self {
        let Some(focus) = focus else {
            return Self::none();
        };
        let Some(focused) = reconciled.set(focus.name()) else {
            debug!(set = focus.name(); "Focused set is unknown; no emphasis applied");
            return Self::none();
        };

        let mut levels = HashMap::new();
        let mut connections = Vec::new();
        let hints = focused.hints();

        match &focus {
            Focus::Hovered(name) => {
                for other in hints.related_to().iter().chain(hints.intersects_with()) {
                    levels.insert(other.clone(), EmphasisLevel::Highlighted);
                }
                levels.insert(name.clone(), EmphasisLevel::Hovered);
            }
            Focus::Selected(name) => {
                for other in hints.related_to() {
                    levels.insert(other.clone(), EmphasisLevel::Related);
                    connections.push((name.clone(), other.clone()));
                }

                let observed = reconciled
                    .intersections()
                    .iter()
                    .filter(|intersection| {
                        intersection.is_pair()
                            && intersection.provenance() == Provenance::Observed
                            && intersection.size() > 0.0
                            && intersection.members().contains(name)
                    })
                    .flat_map(|intersection| intersection.members().iter())
                    .filter(|member| *member != name.as_str())
                    .map(str::to_string);
                for other in hints.intersects_with().iter().cloned().chain(observed) {
                    levels.insert(other, EmphasisLevel::Intersecting);
                }
                levels.insert(name.clone(), EmphasisLevel::Selected);
            }
        }

        debug!(
            focus:? = focus,
            emphasized = levels.len(),
            connections = connections.len();
            "Emphasis computed"
        );
        Self {
            focus: Some(focus),
            levels,
            connections,
        }
    }

    pub fn focus(&self) -> Option<&Focus> {
        self.focus.as_ref()
    }

    /// Level for the set named `name`.
    pub fn level(&self, name: &str) -> EmphasisLevel {
        self.levels.get(name).copied().unwrap_or_default()
    }

    /// Dashed connections from the selected set to its related sets.
    pub fn connections(&self) -> &[(String, String)] {
        &self.connections
    }

    /// Returns true when a region involves the focused set.
    pub fn is_region_emphasized(&self, members: &Members) -> bool {
        self.focus
            .as_ref()
            .is_some_and(|focus| members.contains(focus.name()))
    }
}

#[cfg(test)]
mod tests {
    use lensplot_core::model::SetHints;
    use lensplot_reconcile::{InferencePolicy, Input, ReconcileConfig, reconcile};

    use super::*;

    fn segments() -> Reconciled {
        let input = Input::new()
            .with_count("S1", 100.0)
            .with_count("S2", 80.0)
            .with_count("S3", 60.0)
            .with_count("S4", 40.0)
            .with_count("S2_AND_S4", 10.0)
            .with_hints(
                "S2",
                SetHints::new()
                    .with_related_to(["S1"])
                    .with_intersects_with(["S3"]),
            );
        reconcile(&input, ReconcileConfig::new(InferencePolicy::Never))
    }

    #[test]
    fn test_no_focus_is_normal() {
        let emphasis = Emphasis::compute(&segments(), None);

        assert_eq!(emphasis.level("S1"), EmphasisLevel::Normal);
        assert!(emphasis.connections().is_empty());
        assert_eq!(emphasis, Emphasis::none());
    }

    #[test]
    fn test_selection_classifies_sets() {
        let emphasis = Emphasis::compute(&segments(), Some(Focus::Selected("S2".to_string())));

        assert_eq!(emphasis.level("S2"), EmphasisLevel::Selected);
        assert_eq!(emphasis.level("S1"), EmphasisLevel::Related);
        assert_eq!(emphasis.level("S3"), EmphasisLevel::Intersecting);
        assert_eq!(emphasis.level("S4"), EmphasisLevel::Intersecting);
        assert_eq!(
            emphasis.connections(),
            [("S2".to_string(), "S1".to_string())]
        );
    }

    #[test]
    fn test_hover_highlights_hinted_sets() {
        let emphasis = Emphasis::compute(&segments(), Some(Focus::Hovered("S2".to_string())));

        assert_eq!(emphasis.level("S2"), EmphasisLevel::Hovered);
        assert_eq!(emphasis.level("S1"), EmphasisLevel::Highlighted);
        assert_eq!(emphasis.level("S3"), EmphasisLevel::Highlighted);
        assert_eq!(emphasis.level("S4"), EmphasisLevel::Normal);
        assert!(emphasis.connections().is_empty());
        assert_eq!(EmphasisLevel::Hovered.radius_factor(), 1.1);
    }

    #[test]
    fn test_unknown_focus_is_ignored() {
        let emphasis = Emphasis::compute(&segments(), Some(Focus::Selected("Nope".to_string())));
        assert_eq!(emphasis, Emphasis::none());
    }

    #[test]
    fn test_region_emphasis_follows_focus() {
        let emphasis = Emphasis::compute(&segments(), Some(Focus::Selected("S2".to_string())));

        assert!(emphasis.is_region_emphasized(&Members::new(["S2", "S4"])));
        assert!(!emphasis.is_region_emphasized(&Members::new(["S1", "S3"])));
    }
}
