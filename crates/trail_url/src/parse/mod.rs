//! https://datatracker.ietf.org/doc/html/rfc3986

use crate::encode::m_pchar;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while, take_while1};
use nom::combinator::{map, opt, recognize, rest};
use nom::multi::{fold_many0, many0, separated_list0};
use nom::sequence::{preceded, terminated};
use nom::IResult;
use std::borrow::Cow;

mod hex;

/// Unnormalized pieces of a uri reference. Segments are already decoded.
#[derive(Debug)]
pub struct RawUri<'a> {
    pub scheme: Option<&'a str>,
    pub authority: Option<&'a str>,
    pub absolute: bool,
    pub segments: Vec<String>,
    pub query: Option<&'a str>,
}

pub fn uri_reference(i: &str) -> IResult<&str, RawUri> {
    let (i, scheme) = opt(terminated(scheme, tag("://")))(i)?;
    let (i, authority) = match scheme {
        Some(_) => map(authority, Some)(i)?,
        None => opt(preceded(tag("//"), authority))(i)?,
    };

    let (i, absolute) = map(opt(tag("/")), |slash| slash.is_some())(i)?;
    let (i, segments) = separated_list0(tag("/"), segment)(i)?;

    let (i, query) = opt(preceded(tag("?"), query))(i)?;
    let (i, _fragment) = opt(preceded(tag("#"), rest))(i)?;

    Ok((
        i,
        RawUri {
            scheme,
            authority,
            absolute,
            segments,
            query,
        },
    ))
}

fn scheme(i: &str) -> IResult<&str, &str> {
    recognize(preceded(
        take_while1(|c: char| c.is_ascii_alphabetic()),
        take_while(|c: char| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
    ))(i)
}

fn authority(i: &str) -> IResult<&str, &str> {
    take_while(|c: char| m_pchar(c) || matches!(c, '[' | ']' | '%'))(i)
}

fn segment(i: &str) -> IResult<&str, String> {
    fold_many0(piece, String::new, |mut acc, piece| {
        acc.push_str(&piece);
        acc
    })(i)
}

fn piece(i: &str) -> IResult<&str, Cow<str>> {
    alt((
        map(take_while1(path_char), Cow::Borrowed),
        map(hex::decode_run, Cow::Owned),
    ))(i)
}

fn query(i: &str) -> IResult<&str, &str> {
    recognize(many0(alt((
        take_while1(|c: char| path_char(c) || matches!(c, '/' | '?')),
        hex::escaped,
    ))))(i)
}

/// Raw unicode is tolerated in paths, it is re-encoded on output.
fn path_char(c: char) -> bool {
    m_pchar(c) || (!c.is_ascii() && !c.is_whitespace() && !c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_components() {
        let (rest, raw) = uri_reference("http://example.com/a/b?x=1#top").unwrap();
        assert_eq!(rest, "");
        assert_eq!(raw.scheme, Some("http"));
        assert_eq!(raw.authority, Some("example.com"));
        assert!(raw.absolute);
        assert_eq!(raw.segments, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(raw.query, Some("x=1"));
    }

    #[test]
    fn keeps_empty_segments() {
        let (_, raw) = uri_reference("/a//b/").unwrap();
        assert_eq!(
            raw.segments,
            vec!["a".to_string(), String::new(), "b".to_string(), String::new()]
        );
    }

    #[test]
    fn colon_in_path_is_not_a_scheme() {
        let (rest, raw) = uri_reference("page:2/x").unwrap();
        assert_eq!(rest, "");
        assert_eq!(raw.scheme, None);
        assert!(!raw.absolute);
        assert_eq!(raw.segments, vec!["page:2".to_string(), "x".to_string()]);
    }

    #[test]
    fn stops_at_invalid_character() {
        let (rest, _) = uri_reference("/hello world").unwrap();
        assert_eq!(rest, " world");
    }
}
