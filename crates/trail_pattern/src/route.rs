use crate::template::{self, Node};
use crate::{Params, PatternError, SEPARATOR};
use ahash::{AHashMap, AHashSet};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::{debug, trace};
use trail_url::UriLike;

/// Everything a route is compiled from.
///
/// Two equal builders always compile to equivalent routes, which makes the
/// builder usable as a cache key.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct RouteBuilder {
    template: String,
    prefix: String,
    match_host: bool,
    constraints: BTreeMap<String, String>,
}

impl RouteBuilder {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            prefix: String::new(),
            match_host: false,
            constraints: BTreeMap::new(),
        }
    }

    /// Literal path prefix, stripped before matching and prepended when
    /// building. Ignored in host mode.
    ///
    /// The prefix is only stripped when it ends at a segment boundary:
    /// `/api` is removed from `/api` and `/api/users` but not from
    /// `/apiv2/users`, which is matched unchanged.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn match_host(mut self, match_host: bool) -> Self {
        self.match_host = match_host;
        self
    }

    /// Overrides the inline sub-pattern of `name`.
    pub fn constraint(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.constraints.insert(name.into(), pattern.into());
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn compile(&self) -> Result<CompiledRoute, PatternError> {
        let nodes = template::parse(&self.template)?;
        let variable_names = template::variable_names(&nodes);

        let mut constraints = AHashMap::new();
        template::inline_constraints(&nodes, &mut constraints);
        for (name, pattern) in &self.constraints {
            if !variable_names.contains(name) {
                return Err(PatternError::UnknownConstraint { name: name.clone() });
            }
            if !pattern.is_empty() {
                constraints.insert(name.clone(), pattern.clone());
            }
        }

        let mut expression = String::from("^");
        template::write_regex(
            &template::anchored(&nodes),
            &constraints,
            &mut AHashSet::new(),
            &mut expression,
        );
        expression.push('$');

        let regex = RegexBuilder::new(&expression)
            .case_insensitive(true)
            .unicode(true)
            .build()?;

        debug!(
            template = %self.template,
            pattern = %expression,
            match_host = self.match_host,
            "compiled route"
        );

        Ok(CompiledRoute {
            prefix: self.prefix.trim_end_matches(SEPARATOR).to_string(),
            match_host: self.match_host,
            regex,
            generation_template: template::generation_template(&nodes),
            variable_names,
            nodes,
        })
    }
}

/// A template compiled for matching and building. Immutable, share it
/// behind an `Arc`.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    pub(crate) prefix: String,
    pub(crate) match_host: bool,
    pub(crate) regex: Regex,
    pub(crate) generation_template: String,
    pub(crate) variable_names: Vec<String>,
    pub(crate) nodes: Vec<Node>,
}

impl CompiledRoute {
    pub fn compile(
        prefix: &str,
        template: &str,
        match_host: bool,
    ) -> Result<Self, PatternError> {
        Self::builder(template)
            .prefix(prefix)
            .match_host(match_host)
            .compile()
    }

    pub fn builder(template: impl Into<String>) -> RouteBuilder {
        RouteBuilder::new(template)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn match_host(&self) -> bool {
        self.match_host
    }

    /// The anchored matching expression.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn generation_template(&self) -> &str {
        &self.generation_template
    }

    pub fn variable_names(&self) -> &[String] {
        &self.variable_names
    }

    /// The string the expression is applied to, without edge separators.
    pub fn target<U: UriLike>(&self, uri: &U) -> String {
        let path = uri.path();
        let path: Cow<str> = if path.starts_with(SEPARATOR) {
            Cow::Borrowed(path)
        } else {
            Cow::Owned(format!("{}{}", SEPARATOR, path))
        };

        let target: Cow<str> = if self.match_host {
            Cow::Owned(format!("{}{}", uri.host(), path))
        } else {
            Cow::Borrowed(self.strip_prefix(&path))
        };
        target.trim_matches(SEPARATOR).to_string()
    }

    /// Removes the prefix if it ends at a segment boundary of `path`.
    fn strip_prefix<'p>(&self, path: &'p str) -> &'p str {
        let prefix = self.prefix.trim_start_matches(SEPARATOR);
        if prefix.is_empty() {
            return path;
        }

        let relative = path.trim_start_matches(SEPARATOR);
        match relative.strip_prefix(prefix) {
            Some(rest) if rest.is_empty() || rest.starts_with(SEPARATOR) => rest,
            _ => path,
        }
    }

    /// Matches `uri` against the route. Declared variables that did not
    /// participate are `None` unless `defaults` provides a value; captures
    /// always win over defaults.
    pub fn matches<U: UriLike>(&self, uri: &U, defaults: &Params) -> Option<Params> {
        let target = self.target(uri);
        let subject = if target.is_empty() {
            target
        } else {
            format!("{}{}", SEPARATOR, target)
        };

        let captures = self.regex.captures(&subject);
        trace!(
            subject = %subject,
            pattern = %self.regex.as_str(),
            matched = captures.is_some(),
            "match attempt"
        );
        let captures = captures?;

        let mut params: Params = self
            .variable_names
            .iter()
            .map(|name| (name.as_str(), None::<String>))
            .collect();
        params.extend_from(defaults);
        for name in &self.variable_names {
            if let Some(capture) = captures.name(name) {
                params.insert(name.as_str(), Some(capture.as_str().to_string()));
            }
        }
        Some(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use trail_url::Uri;

    #[test]
    fn prefix_is_stripped_at_segment_boundary() {
        let route = CompiledRoute::compile("/api/", "/<resource>", false).unwrap();
        assert_eq!(route.prefix(), "/api");
        assert_eq!(route.target(&Uri::from_path("/api/users")), "users");
        assert_eq!(route.target(&Uri::from_path("api/users/")), "users");
        assert_eq!(route.target(&Uri::from_path("/api")), "");
        assert_eq!(route.target(&Uri::from_path("/apiv2/users")), "apiv2/users");
        assert_eq!(route.target(&Uri::from_path("/other")), "other");
    }

    #[test]
    fn host_target_ignores_prefix() {
        let route = CompiledRoute::compile("/api", "<sub>.example.com/<page>", true).unwrap();
        let uri = Uri::with_host("docs.example.com", "/api/intro");
        assert_eq!(route.target(&uri), "docs.example.com/api/intro");
    }

    #[test]
    fn explicit_constraint_overrides_inline() {
        let route = RouteBuilder::new("/<id:\\d+>")
            .constraint("id", "[a-z]+")
            .compile()
            .unwrap();
        assert_eq!(route.pattern(), "^/(?P<id>[a-z]+)$");
    }

    #[test]
    fn empty_explicit_constraint_keeps_inline() {
        let route = RouteBuilder::new("/<id:\\d+>")
            .constraint("id", "")
            .compile()
            .unwrap();
        assert_eq!(route.pattern(), "^/(?P<id>\\d+)$");
    }

    #[test]
    fn constraint_for_unknown_variable() {
        let err = RouteBuilder::new("/<id>")
            .constraint("slug", ".+")
            .compile()
            .unwrap_err();
        assert_eq!(
            err,
            PatternError::UnknownConstraint {
                name: "slug".into()
            }
        );
    }

    #[test]
    fn invalid_constraint_expression() {
        let err = CompiledRoute::compile("", "/<id:)>", false);
        assert!(matches!(err, Err(PatternError::Regex(_))));
    }

    #[test]
    fn equal_builders_hash_equal() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let hash = |b: &RouteBuilder| {
            let mut hasher = DefaultHasher::new();
            b.hash(&mut hasher);
            hasher.finish()
        };
        let a = RouteBuilder::new("/<a>").constraint("a", "x").prefix("/p");
        let b = RouteBuilder::new("/<a>").prefix("/p").constraint("a", "x");
        assert_eq!(a, b);
        assert_eq!(hash(&a), hash(&b));
    }
}
