/// Writes `input` into `buffer`, keeping a path readable: separators and
/// pchar stay literal, everything else is percent-encoded.
pub fn encode_path(input: &str, buffer: &mut String) {
    hex_encode(input, |c| c == '/' || m_pchar(c), buffer)
}

/// Encodes a single query key or value. Only unreserved characters survive.
pub fn encode_component(input: &str) -> String {
    let mut buffer = String::with_capacity(input.len());
    hex_encode(input, m_unreserved, &mut buffer);
    buffer
}

/// Joins pairs into `k=v&k2=v2`, encoding both sides.
pub fn query_string<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut buffer = String::new();
    for (key, value) in pairs {
        if !buffer.is_empty() {
            buffer.push('&');
        }
        hex_encode(key.as_ref(), m_unreserved, &mut buffer);
        buffer.push('=');
        hex_encode(value.as_ref(), m_unreserved, &mut buffer);
    }
    buffer
}

fn hex_encode(input: &str, filter: impl Fn(char) -> bool, buffer: &mut String) {
    if input.chars().all(&filter) {
        buffer.push_str(input);
        return;
    }

    buffer.reserve(input.len());
    let mut utf8 = [0u8; 4];
    for c in input.chars() {
        if filter(c) {
            buffer.push(c);
            continue;
        }
        for byte in c.encode_utf8(&mut utf8).bytes() {
            buffer.push('%');
            buffer.push(as_hex_digit(byte >> 4));
            buffer.push(as_hex_digit(byte & 0xF));
        }
    }
}

fn as_hex_digit(nibble: u8) -> char {
    char::from(b"0123456789ABCDEF"[usize::from(nibble & 0xF)])
}

#[inline]
pub(crate) fn m_pchar(c: char) -> bool {
    match c {
        _ if m_unreserved(c) | m_sub_delims(c) => true,
        ':' | '@' => true,
        _ => false,
    }
}

#[inline]
pub(crate) fn m_unreserved(c: char) -> bool {
    match c {
        _ if c.is_ascii_alphanumeric() => true,
        '-' | '.' | '_' | '~' => true,
        _ => false,
    }
}

#[inline]
fn m_sub_delims(c: char) -> bool {
    matches!(
        c,
        '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '='
    )
}

/*
    pchar         = unreserved / pct-encoded / sub-delims / ":" / "@"

    unreserved    = ALPHA / DIGIT / "-" / "." / "_" / "~"
    pct-encoded   = "%" HEXDIG HEXDIG
    sub-delims    = "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="
*/
