//! Tokenizer for CSS property values.
//!
//! Turns a single declaration value into a [`ValueTree`]. Built on `nom` for the
//! leaf tokens. Tokenizing is lossless: serializing the tree gives back the
//! input byte for byte, including unterminated strings, comments and functions.

mod grammar;
mod lexer;

pub use grammar::{parse, ParserOptions};

use cssurl_core::{ParseError, ValueTree};

/// Parse a declaration value with default options.
///
/// # Example
///
/// ```
/// use cssurl_parser::parse_value;
///
/// let tree = parse_value("url(a.png) no-repeat").unwrap();
/// assert_eq!(tree.to_string(), "url(a.png) no-repeat");
/// ```
pub fn parse_value(input: &str) -> Result<ValueTree, ParseError> {
    parse(input, &ParserOptions::default())
}

/// Parse a declaration value with explicit options.
pub fn parse_value_with(input: &str, options: &ParserOptions) -> Result<ValueTree, ParseError> {
    parse(input, options)
}
