//! Error types for value parsing.

use thiserror::Error;

/// Errors raised while tokenizing a single declaration value.
///
/// These are scoped to one declaration; callers report them and move on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Maximum function nesting depth ({depth}) exceeded at offset {offset}")]
    NestingTooDeep { depth: usize, offset: usize },
}
