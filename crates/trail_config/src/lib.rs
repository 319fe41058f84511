//! Route definition files.
//!
//! ```text
//! # comment
//! default  "/<controller>[/<action>[/<id>]]"  controller=welcome action=index
//! api      "/<resource>[/<id:\d+>]"           @prefix=/api
//! tenant   "<tenant>.example.com/<page>"      @host  page=home
//! docs     "/docs/<path>"                     :path=.+
//! ```
//!
//! `@host` matches host and path, `@prefix=` sets the path prefix,
//! `:name=` constrains a variable and `key=` gives a default. Values are bare
//! words or double quoted strings.

mod grammar;

#[cfg(test)]
mod tests;

use grammar::RouteOption;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use trail_pattern::{Params, RouteBuilder};
use trail_routing::{RouteBuildError, RouteCache, RouteTable};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Routes(#[from] RouteBuildError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteDefinition {
    pub name: String,
    pub template: String,
    pub prefix: String,
    pub match_host: bool,
    pub constraints: Vec<(String, String)>,
    pub defaults: Params,
    /// 1-based line the route was defined on
    pub line: usize,
}

impl RouteDefinition {
    pub fn route(&self) -> RouteBuilder {
        self.constraints.iter().fold(
            RouteBuilder::new(self.template.as_str())
                .prefix(self.prefix.as_str())
                .match_host(self.match_host),
            |route, (name, pattern)| route.constraint(name.as_str(), pattern.as_str()),
        )
    }
}

pub fn parse_routes(source: &str) -> Result<Vec<RouteDefinition>, ConfigError> {
    let mut definitions = Vec::new();

    for (index, text) in source.lines().enumerate() {
        let line = index + 1;
        let entry = match grammar::line(text) {
            Ok((_, entry)) => entry,
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                return Err(syntax_error(text, e.input, line))
            }
            Err(nom::Err::Incomplete(_)) => return Err(syntax_error(text, "", line)),
        };

        if let Some(entry) = entry {
            let mut definition = RouteDefinition {
                name: entry.name,
                template: entry.template,
                prefix: String::new(),
                match_host: false,
                constraints: Vec::new(),
                defaults: Params::new(),
                line,
            };
            for option in entry.options {
                match option {
                    RouteOption::Host => definition.match_host = true,
                    RouteOption::Prefix(prefix) => definition.prefix = prefix,
                    RouteOption::Constraint(name, pattern) => {
                        definition.constraints.push((name, pattern))
                    }
                    RouteOption::Default(key, value) => {
                        definition.defaults.insert(key, Some(value))
                    }
                }
            }
            definitions.push(definition);
        }
    }

    Ok(definitions)
}

/// `rest` is the unparsed tail of `text`.
fn syntax_error(text: &str, rest: &str, line: usize) -> ConfigError {
    let offset = text.len() - rest.len();
    let message = match rest.chars().next() {
        Some(c) => format!("unexpected {:?}", c),
        None => String::from("unexpected end of line"),
    };

    ConfigError::Syntax {
        line,
        column: text[..offset].chars().count() + 1,
        message,
    }
}

pub fn load_routes(path: impl AsRef<Path>) -> Result<Vec<RouteDefinition>, ConfigError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let definitions = parse_routes(&source)?;
    debug!(path = %path.display(), routes = definitions.len(), "loaded route file");
    Ok(definitions)
}

pub fn into_table(
    definitions: impl IntoIterator<Item = RouteDefinition>,
    cache: Option<&RouteCache>,
) -> Result<RouteTable, ConfigError> {
    let mut builder = RouteTable::builder();
    if let Some(cache) = cache {
        builder = builder.with_cache(cache.clone());
    }

    for definition in definitions {
        let route = definition.route();
        builder = builder.route_with(definition.name, route, definition.defaults);
    }
    Ok(builder.build()?)
}
