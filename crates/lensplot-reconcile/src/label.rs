//! Composite label grammar.
//!
//! ```text
//! label := name ("_AND_" name)*
//! name  := any text without "_AND_", not blank
//! ```
//!
//! Names are trimmed of surrounding whitespace.

use thiserror::Error;
use winnow::{
    Parser as _,
    combinator::{eof, not, preceded, repeat, separated, terminated},
    error::{ContextError, ErrMode},
    token::any,
};

use lensplot_core::model::Members;

type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Why a label could not be split into member names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("label is empty")]
    Empty,

    #[error("label `{0}` has an empty member or a dangling separator")]
    Malformed(String),

    #[error("label `{label}` names `{member}` more than once")]
    DuplicateMember { label: String, member: String },
}

fn name<'s>(input: &mut &'s str) -> IResult<&'s str> {
    repeat(1.., preceded(not(Members::SEPARATOR), any))
        .map(|()| ())
        .take()
        .verify(|text: &str| !text.trim().is_empty())
        .parse_next(input)
}

fn label<'s>(input: &mut &'s str) -> IResult<Vec<&'s str>> {
    terminated(separated(1.., name, Members::SEPARATOR), eof).parse_next(input)
}

/// Splits a label into its member names, in declaration order.
///
/// A bare set name yields a single member.
///
/// # Examples
///
/// ```
/// # use lensplot_reconcile::parse_label;
/// assert_eq!(parse_label("Event_1").unwrap(), ["Event_1"]);
/// assert_eq!(
///     parse_label("Event_1_AND_Event_2").unwrap(),
///     ["Event_1", "Event_2"]
/// );
/// assert!(parse_label("Event_1_AND_").is_err());
/// ```
pub fn parse_label(source: &str) -> Result<Vec<String>, LabelError> {
    if source.trim().is_empty() {
        return Err(LabelError::Empty);
    }

    let mut input = source;
    let names = label(&mut input).map_err(|_| LabelError::Malformed(source.to_string()))?;

    let mut members: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.trim();
        if members.iter().any(|member| member == name) {
            return Err(LabelError::DuplicateMember {
                label: source.to_string(),
                member: name.to_string(),
            });
        }
        members.push(name.to_string());
    }
    Ok(members)
}
