//! Error codes for the reconciliation diagnostics.
//!
//! Codes are organized by reconciliation step:
//! - `E0xx` - Label errors
//! - `E1xx` - Count errors
//! - `E2xx` - Inference decisions
//! - `E3xx` - Feasibility repairs
//! - `E4xx` - Hint errors

use std::fmt;

/// Codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Label Errors (E0xx)
    // =========================================================================
    /// Malformed composite label.
    ///
    /// A label has an empty member or a dangling `_AND_` separator.
    E001,

    /// Duplicate member in a composite label.
    ///
    /// A composite label names the same set more than once, e.g. `A_AND_A`.
    E002,

    /// Unsupported intersection cardinality.
    ///
    /// Only 2- and 3-way intersections can be drawn.
    E003,

    // =========================================================================
    // Count Errors (E1xx)
    // =========================================================================
    /// Negative count clamped to zero.
    E100,

    /// Non-finite count dropped.
    E101,

    /// Set without a count.
    ///
    /// A name appears only inside composite labels, so it has no size and
    /// every intersection that references it is dropped.
    E102,

    // =========================================================================
    // Inference (E2xx)
    // =========================================================================
    /// Intersection inferred from set sizes or roles.
    E200,

    /// Containment left undecided.
    ///
    /// Two sets have equal sizes and no role hint tells which one contains
    /// the other.
    E201,

    /// Declared overlap without a count.
    ///
    /// The pair is listed through `intersectsWith`, so containment is not
    /// assumed.
    E202,

    // =========================================================================
    // Feasibility (E3xx)
    // =========================================================================
    /// Intersection larger than its smallest member, clamped.
    E300,

    /// Triple intersection larger than one of its pairwise intersections,
    /// clamped.
    E301,

    // =========================================================================
    // Hints (E4xx)
    // =========================================================================
    /// Hints given for a set that has no count.
    E400,

    /// A hint references a set that does not exist.
    E401,
}

impl ErrorCode {
    /// Returns the error code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E400 => "E400",
            ErrorCode::E401 => "E401",
        }
    }

    /// Returns a short description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            // Label errors
            ErrorCode::E001 => "malformed label",
            ErrorCode::E002 => "duplicate label member",
            ErrorCode::E003 => "unsupported intersection cardinality",
            // Count errors
            ErrorCode::E100 => "negative count",
            ErrorCode::E101 => "non-finite count",
            ErrorCode::E102 => "set without count",
            // Inference
            ErrorCode::E200 => "inferred intersection",
            ErrorCode::E201 => "ambiguous containment",
            ErrorCode::E202 => "declared overlap without count",
            // Feasibility
            ErrorCode::E300 => "intersection exceeds member",
            ErrorCode::E301 => "triple exceeds pairwise intersection",
            // Hints
            ErrorCode::E400 => "hint for unknown set",
            ErrorCode::E401 => "hint references unknown set",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
