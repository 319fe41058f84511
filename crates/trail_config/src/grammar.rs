//! One route per line:
//!
//! ```text
//! name "template" [@host] [@prefix=VALUE] [:var=PATTERN] [key=VALUE]...
//! ```

use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, take_while1};
use nom::character::complete::{char, one_of, space0, space1};
use nom::combinator::{eof, map, peek, recognize, rest, value};
use nom::multi::{fold_many0, many0};
use nom::sequence::{delimited, preceded, separated_pair, terminated, tuple};
use nom::IResult;

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct Entry {
    pub name: String,
    pub template: String,
    pub options: Vec<RouteOption>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum RouteOption {
    Host,
    Prefix(String),
    Constraint(String, String),
    Default(String, String),
}

/// `None` for blank and comment-only lines.
pub(crate) fn line(input: &str) -> IResult<&str, Option<Entry>> {
    let (input, _) = space0(input)?;
    if input.is_empty() || input.starts_with('#') {
        return Ok(("", None));
    }

    let (input, entry) = entry(input)?;
    let (input, _) = alt((
        value((), tuple((space0, eof))),
        value((), tuple((space1, char('#'), rest))),
    ))(input)?;
    Ok((input, Some(entry)))
}

fn entry(input: &str) -> IResult<&str, Entry> {
    map(
        tuple((
            name,
            preceded(space1, quoted),
            many0(preceded(space1, option)),
        )),
        |(name, template, options)| Entry {
            name: name.to_string(),
            template,
            options,
        },
    )(input)
}

fn name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))(input)
}

fn ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)
}

fn option(input: &str) -> IResult<&str, RouteOption> {
    alt((
        map(preceded(tag("@prefix="), text), RouteOption::Prefix),
        value(
            RouteOption::Host,
            terminated(tag("@host"), peek(alt((space1, eof)))),
        ),
        map(
            preceded(char(':'), separated_pair(ident, char('='), text)),
            |(name, pattern)| RouteOption::Constraint(name.to_string(), pattern),
        ),
        map(separated_pair(ident, char('='), text), |(key, value)| {
            RouteOption::Default(key.to_string(), value)
        }),
    ))(input)
}

fn text(input: &str) -> IResult<&str, String> {
    alt((quoted, map(bare, str::to_string)))(input)
}

fn bare(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && c != '"')(input)
}

/// Double quoted, `\"` and `\\` are the only escapes.
fn quoted(input: &str) -> IResult<&str, String> {
    delimited(
        char('"'),
        fold_many0(
            alt((is_not("\"\\"), preceded(char('\\'), recognize(one_of("\"\\"))))),
            String::new,
            |mut acc, piece| {
                acc.push_str(piece);
                acc
            },
        ),
        char('"'),
    )(input)
}
