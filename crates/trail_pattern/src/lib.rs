//! Route templates compiled once, then used to match request uris and to
//! build uris back from variable values.
//!
//! ```text
//! /<controller>[/<action>[/<id:\d+>]]
//! ```
//!
//! `<name>` declares a variable matching one path segment, `<name:pattern>`
//! constrains it with a regular expression, and `[...]` marks a segment
//! that may be missing. Optional segments nest.

mod build;
mod error;
mod params;
mod route;
mod template;
mod value;


pub use error::{BuildError, PatternError};
pub use params::Params;
pub use route::{CompiledRoute, RouteBuilder};
pub use value::{Coercion, Stringified, Value};

pub use trail_url::{Uri, UriLike};

pub const SEPARATOR: char = '/';

/// Used for variables without a constraint: exactly one non-empty segment.
pub const DEFAULT_CONSTRAINT: &str = "[^/]+";
