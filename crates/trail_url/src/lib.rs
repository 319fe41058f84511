//! Uri value consumed and produced by the route matcher.
//!
//! Parsing is implemented according to https://www.ietf.org/rfc/rfc3986.txt:
//! path segments are percent-decoded and dot segments are resolved, the query
//! is validated but kept verbatim, fragments are dropped.

mod encode;
mod parse;
#[cfg(test)]
mod tests;

pub use encode::{encode_component, encode_path, query_string};

use std::fmt;
use std::str::FromStr;

/// What a route needs from a request uri.
///
/// `with_query` never mutates, it hands back a new value.
pub trait UriLike: Sized {
    fn path(&self) -> &str;
    fn host(&self) -> &str;
    fn with_query(&self, query: &str) -> Self;
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum UriError {
    #[error("invalid uri, unexpected input at byte {offset}")]
    Invalid { offset: usize },
    #[error("percent-encoded bytes at byte {offset} are not valid utf-8")]
    Encoding { offset: usize },
    #[error("invalid port {0:?}")]
    Port(String),
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct Uri {
    scheme: Option<String>,
    host: String,
    port: Option<u16>,
    path: String,
    query: Option<String>,
}

enum CheckResult {
    Empty,
    Pop,
    Ok,
}

impl Uri {
    pub fn parse(input: &str) -> Result<Self, UriError> {
        let offset = |rest: &str| input.len() - rest.len();

        let (rest, raw) = parse::uri_reference(input).map_err(|err| match err {
            nom::Err::Failure(e) => UriError::Encoding {
                offset: offset(e.input),
            },
            nom::Err::Error(e) => UriError::Invalid {
                offset: offset(e.input),
            },
            nom::Err::Incomplete(_) => UriError::Invalid {
                offset: input.len(),
            },
        })?;
        if !rest.is_empty() {
            return Err(UriError::Invalid {
                offset: offset(rest),
            });
        }

        let (host, port) = match raw.authority {
            Some(authority) => split_authority(authority)?,
            None => (String::new(), None),
        };

        let mut segments: Vec<String> = Vec::with_capacity(raw.segments.len());
        for segment in raw.segments {
            match check_segment(&segment) {
                CheckResult::Empty => (),
                CheckResult::Pop => drop(segments.pop()),
                CheckResult::Ok => segments.push(segment),
            }
        }

        let mut path = String::new();
        if raw.absolute || raw.authority.is_some() {
            path.push('/');
        }
        path.push_str(&segments.join("/"));

        Ok(Self {
            scheme: raw.scheme.map(str::to_string),
            host,
            port,
            path,
            query: raw.query.filter(|q| !q.is_empty()).map(str::to_string),
        })
    }

    /// A host-less uri, the path is taken as is.
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_host(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }
}

impl UriLike for Uri {
    fn path(&self) -> &str {
        &self.path
    }

    fn host(&self) -> &str {
        &self.host
    }

    fn with_query(&self, query: &str) -> Self {
        Self {
            query: (!query.is_empty()).then(|| query.to_string()),
            ..self.clone()
        }
    }
}

impl FromStr for Uri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{}:", scheme)?;
        }
        if !self.host.is_empty() {
            write!(f, "//{}", self.host)?;
            if let Some(port) = self.port {
                write!(f, ":{}", port)?;
            }
            if !self.path.is_empty() && !self.path.starts_with('/') {
                f.write_str("/")?;
            }
        }

        let mut buffer = String::with_capacity(self.path.len());
        encode_path(&self.path, &mut buffer);
        f.write_str(&buffer)?;

        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        Ok(())
    }
}

fn check_segment(seg: &str) -> CheckResult {
    if seg.is_empty() || seg == "." {
        CheckResult::Empty
    } else if seg == ".." {
        CheckResult::Pop
    } else {
        CheckResult::Ok
    }
}

fn split_authority(authority: &str) -> Result<(String, Option<u16>), UriError> {
    let host_port = authority
        .rsplit_once('@')
        .map(|(_userinfo, rest)| rest)
        .unwrap_or(authority);

    // ipv6 literals carry colons of their own
    let split_at = match host_port.rfind(']') {
        Some(end) => host_port[end..].find(':').map(|i| end + i),
        None => host_port.rfind(':'),
    };

    match split_at {
        Some(i) => {
            let port = &host_port[i + 1..];
            let port = if port.is_empty() {
                None
            } else {
                Some(
                    port.parse::<u16>()
                        .map_err(|_| UriError::Port(port.to_string()))?,
                )
            };
            Ok((host_port[..i].to_string(), port))
        }
        None => Ok((host_port.to_string(), None)),
    }
}
