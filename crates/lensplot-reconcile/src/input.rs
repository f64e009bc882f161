//! Raw counts as supplied by callers.

use indexmap::IndexMap;
use serde::Deserialize;

use lensplot_core::model::SetHints;

/// Label → count mapping plus optional per-set hints.
///
/// Deserialises from either a flat JSON object of counts or an object with
/// `counts` and `hints` members:
///
/// ```
/// # use lensplot_reconcile::Input;
/// let flat: Input = serde_json::from_str(r#"{"A": 10, "B": 5, "A_AND_B": 2}"#).unwrap();
/// assert_eq!(flat.counts().len(), 3);
///
/// let structured: Input = serde_json::from_str(
///     r#"{"counts": {"A": 10, "B": 5}, "hints": {"B": {"role": "inner"}}}"#,
/// )
/// .unwrap();
/// assert_eq!(structured.hints().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawInput")]
pub struct Input {
    counts: IndexMap<String, f64>,
    hints: IndexMap<String, SetHints>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInput {
    Structured {
        counts: IndexMap<String, f64>,
        #[serde(default)]
        hints: IndexMap<String, SetHints>,
    },
    Flat(IndexMap<String, f64>),
}

impl From<RawInput> for Input {
    fn from(raw: RawInput) -> Self {
        match raw {
            RawInput::Structured { counts, hints } => Self { counts, hints },
            RawInput::Flat(counts) => Self {
                counts,
                hints: IndexMap::new(),
            },
        }
    }
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the count for `label`.
    pub fn with_count(mut self, label: impl Into<String>, count: f64) -> Self {
        self.counts.insert(label.into(), count);
        self
    }

    /// Adds or replaces the hints for `set`.
    pub fn with_hints(mut self, set: impl Into<String>, hints: SetHints) -> Self {
        self.hints.insert(set.into(), hints);
        self
    }

    /// Counts keyed by label, in declaration order.
    pub fn counts(&self) -> &IndexMap<String, f64> {
        &self.counts
    }

    /// Hints keyed by set name, in declaration order.
    pub fn hints(&self) -> &IndexMap<String, SetHints> {
        &self.hints
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Input {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Self {
            counts: iter
                .into_iter()
                .map(|(label, count)| (label.into(), count))
                .collect(),
            hints: IndexMap::new(),
        }
    }
}
