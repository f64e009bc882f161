//! # Lensplot Reconcile
//!
//! Turns raw set and intersection counts into a validated, geometrically
//! admissible list of tuples for the Lensplot layout planner.
//!
//! Input labels are either a bare set name or 2 to 3 names joined by
//! `_AND_`. Reconciliation never fails: malformed or infeasible input is
//! dropped or clamped and every such decision is reported as a
//! [`error::Diagnostic`].
//!
//! ## Usage
//!
//! ```
//! # use lensplot_reconcile::{reconcile, Input, ReconcileConfig};
//! let input: Input = [
//!     ("Event_1", 1200.0),
//!     ("Event_2", 900.0),
//!     ("Event_1_AND_Event_2", 700.0),
//! ]
//! .into_iter()
//! .collect();
//!
//! let reconciled = reconcile(&input, ReconcileConfig::default());
//! assert_eq!(reconciled.sets().len(), 2);
//! assert_eq!(reconciled.intersections()[0].size(), 700.0);
//! assert!(reconciled.diagnostics().is_empty());
//! ```

mod engine;
pub mod error;
mod infer;
mod input;
mod label;
#[cfg(test)]
mod reconcile_tests;

pub use engine::{ReconcileConfig, Reconciled, Reconciler};
pub use infer::InferencePolicy;
pub use input::Input;
pub use label::{LabelError, parse_label};

/// Reconcile `input` with the given configuration.
///
/// This is a shorthand for [`Reconciler::new`] followed by
/// [`Reconciler::reconcile`]. The pipeline runs these steps:
///
/// 1. **Extract** - Split composite labels and attach hints
/// 2. **Canonicalize** - Deduplicate names and clamp negative counts
/// 3. **Filter** - Drop undefined sizes, unsupported cardinalities and
///    dangling references
/// 4. **Infer** - Fill missing pairs as allowed by the [`InferencePolicy`]
/// 5. **Clamp** - Cap every intersection at its smallest member and every
///    triple at its smallest known pair
pub fn reconcile(input: &Input, config: ReconcileConfig) -> Reconciled {
    Reconciler::new(config).reconcile(input)
}
