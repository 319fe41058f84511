use nom::bytes::complete::{tag, take_while_m_n};
use nom::combinator::{map_res, recognize};
use nom::error::{Error, ErrorKind};
use nom::multi::many1;
use nom::IResult;

fn from_hex(input: &str) -> Result<u8, std::num::ParseIntError> {
    u8::from_str_radix(input, 16)
}

/// A single `%XX` escape.
fn pct_byte(i: &str) -> IResult<&str, u8> {
    let (i, _) = tag("%")(i)?;
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()), from_hex)(i)
}

/// Decodes a run of escapes. Bytes that are not UTF-8 fail hard so the
/// caller can tell them apart from plain syntax errors.
pub fn decode_run(i: &str) -> IResult<&str, String> {
    let (rest, bytes) = many1(pct_byte)(i)?;
    match String::from_utf8(bytes) {
        Ok(decoded) => Ok((rest, decoded)),
        Err(_) => Err(nom::Err::Failure(Error::new(i, ErrorKind::Char))),
    }
}

/// Validates a run of escapes and keeps it encoded.
pub fn escaped(i: &str) -> IResult<&str, &str> {
    recognize(many1(pct_byte))(i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_multibyte_run() {
        assert_eq!(decode_run("%C3%B6rld"), Ok(("rld", String::from("ö"))));
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert!(matches!(decode_run("%FF"), Err(nom::Err::Failure(_))));
    }

    #[test]
    fn short_escape_is_a_soft_error() {
        assert!(matches!(escaped("%4"), Err(nom::Err::Error(_))));
        assert_eq!(escaped("%41%42x"), Ok(("x", "%41%42")));
    }
}
