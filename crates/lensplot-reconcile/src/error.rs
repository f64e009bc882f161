//! Diagnostics reported while reconciling counts.
//!
//! Reconciliation never fails: malformed labels, infeasible sizes and
//! dangling hints are repaired or dropped, and every such decision is
//! recorded as a [`Diagnostic`]. The system provides:
//! - Error codes for documentation and searchability
//! - The names of the sets each diagnostic is about
//! - Severity levels
//! - A collector for accumulating diagnostics across reconciliation steps
//!
//! # Example
//!
//! ```
//! # use lensplot_reconcile::error::{Diagnostic, ErrorCode};
//! let diag = Diagnostic::warning("intersection `A ∩ B` exceeds its smallest member")
//!     .with_code(ErrorCode::E300)
//!     .with_subject("A_AND_B")
//!     .with_help("intersection sizes cannot be larger than any member set");
//!
//! assert_eq!(
//!     diag.to_string(),
//!     "warning[E300]: intersection `A ∩ B` exceeds its smallest member"
//! );
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use severity::Severity;
