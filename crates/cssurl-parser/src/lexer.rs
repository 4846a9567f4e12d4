//! Leaf tokens of CSS values.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while, take_while1},
    character::complete::{anychar, char, one_of},
    combinator::{map, opt, recognize, rest},
    multi::{many0, many1},
    sequence::{pair, preceded, terminated},
    IResult,
};

/// CSS whitespace.
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c')
}

/// Characters that separate arguments.
pub fn is_div(c: char) -> bool {
    matches!(c, ',' | '/' | ':')
}

fn is_word_char(c: char) -> bool {
    !is_space(c) && !is_div(c) && !matches!(c, '"' | '\'' | '(' | ')' | '\\')
}

/// One or more whitespace characters.
pub fn whitespace(input: &str) -> IResult<&str, &str> {
    take_while1(is_space)(input)
}

/// Zero or more whitespace characters.
pub fn opt_whitespace(input: &str) -> IResult<&str, &str> {
    take_while(is_space)(input)
}

/// A backslash and the character it escapes. A trailing lone backslash is accepted.
pub fn escape(input: &str) -> IResult<&str, &str> {
    recognize(pair(char('\\'), opt(anychar)))(input)
}

/// Unquoted literal text, escapes included.
pub fn word(input: &str) -> IResult<&str, &str> {
    recognize(many1(alt((escape, take_while1(is_word_char)))))(input)
}

/// `/* body */`. Returns the body and whether the comment is unterminated.
pub fn comment(input: &str) -> IResult<&str, (&str, bool)> {
    preceded(
        tag("/*"),
        alt((
            map(terminated(take_until("*/"), tag("*/")), |body| (body, false)),
            map(rest, |body| (body, true)),
        )),
    )(input)
}

/// A quoted string. Returns the quote, the raw body and whether it is unterminated.
pub fn quoted_string(input: &str) -> IResult<&str, (char, &str, bool)> {
    let (input, quote) = one_of("\"'")(input)?;
    let (input, body) = recognize(many0(alt((
        escape,
        take_while1(move |c: char| c != quote && c != '\\'),
    ))))(input)?;
    let (input, close) = opt(char(quote))(input)?;
    Ok((input, (quote, body, close.is_none())))
}

/// Body of an unquoted `url(...)`, up to but excluding the closing parenthesis.
pub fn unquoted_url(input: &str) -> IResult<&str, &str> {
    recognize(many0(alt((
        escape,
        take_while1(|c: char| c != ')' && c != '\\'),
    ))))(input)
}
