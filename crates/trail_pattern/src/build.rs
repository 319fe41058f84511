use crate::template::Node;
use crate::value::{Coercion, Stringified, Value};
use crate::{BuildError, CompiledRoute, SEPARATOR};
use ahash::AHashMap;
use tracing::warn;
use trail_url::{query_string, Uri, UriLike};

impl CompiledRoute {
    /// Builds a uri from `values`, coercing values without a textual form
    /// to the empty string.
    pub fn build<I, K, V>(&self, values: I) -> Result<Uri, BuildError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.build_with(values, Coercion::Lenient)
    }

    /// Builds a uri from `values`.
    ///
    /// Declared variables are substituted into the template. An optional
    /// segment is dropped when its substituted text is empty or only
    /// separators, otherwise it is kept literals and all.
    /// Every other value becomes a query parameter, in the order given.
    /// Later duplicates replace earlier ones.
    pub fn build_with<I, K, V>(&self, values: I, coercion: Coercion) -> Result<Uri, BuildError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut path_values: AHashMap<String, Value> = AHashMap::new();
        let mut query: Vec<(String, Value)> = Vec::new();
        for (name, value) in values {
            let (name, value) = (name.into(), value.into());
            if self.variable_names.contains(&name) {
                path_values.insert(name, value);
            } else if let Some(slot) = query.iter_mut().find(|(k, _)| *k == name) {
                slot.1 = value;
            } else {
                query.push((name, value));
            }
        }

        let mut texts = AHashMap::with_capacity(path_values.len());
        for name in &self.variable_names {
            if let Some(value) = path_values.get(name) {
                if let Some(text) = coerce(name, value, coercion)? {
                    texts.insert(name.as_str(), text);
                }
            }
        }

        let mut path = String::new();
        substitute(&self.nodes, &texts, &mut path);
        let path = path.trim_matches(SEPARATOR);

        let uri = if self.match_host {
            match path.split_once(SEPARATOR) {
                Some((host, path)) => Uri::with_host(host, path),
                None => Uri::with_host(path, ""),
            }
        } else {
            Uri::from_path(join_prefix(&self.prefix, path))
        };

        let mut pairs = Vec::with_capacity(query.len());
        for (name, value) in &query {
            match value {
                Value::List(items) => {
                    for item in items {
                        if let Some(text) = coerce(name, item, coercion)? {
                            pairs.push((name.as_str(), text));
                        }
                    }
                }
                _ => {
                    if let Some(text) = coerce(name, value, coercion)? {
                        pairs.push((name.as_str(), text));
                    }
                }
            }
        }

        let query = query_string(pairs);
        Ok(if query.is_empty() {
            uri
        } else {
            uri.with_query(&query)
        })
    }
}

fn coerce(name: &str, value: &Value, coercion: Coercion) -> Result<Option<String>, BuildError> {
    match value.to_text() {
        Stringified::Absent => Ok(None),
        Stringified::Text(text) => Ok(Some(text)),
        Stringified::Unrepresentable(kind) => match coercion {
            Coercion::Strict => Err(BuildError::Unrepresentable {
                name: name.to_string(),
                kind,
            }),
            Coercion::Lenient => {
                warn!(
                    variable = name,
                    kind,
                    "value has no textual form, using an empty string"
                );
                Ok(Some(String::new()))
            }
        },
    }
}

fn substitute(nodes: &[Node], texts: &AHashMap<&str, String>, out: &mut String) {
    for node in nodes {
        match node {
            Node::Literal(text) => out.push_str(text),
            Node::Variable(p) => {
                if let Some(text) = texts.get(p.name.as_str()) {
                    out.push_str(text);
                }
            }
            Node::Optional(children) => {
                let mut segment = String::new();
                substitute(children, texts, &mut segment);
                if !segment.trim_matches(SEPARATOR).is_empty() {
                    out.push_str(&segment);
                }
            }
        }
    }
}

fn join_prefix(prefix: &str, path: &str) -> String {
    let prefix = prefix.trim_matches(SEPARATOR);
    match (prefix.is_empty(), path.is_empty()) {
        (true, _) => path.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{}{}{}", prefix, SEPARATOR, path),
    }
}
