use ahash::AHashMap;
use std::collections::hash_map;
use std::iter::FromIterator;

/// Variables produced by a successful match, also used for route defaults.
///
/// A name mapped to `None` is declared but absent; this is distinct from a
/// segment that matched the empty string (`Some("")`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(AHashMap<String, Option<String>>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chaining form of [`Params::insert`] with a present value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, Some(value.into()));
        self
    }

    pub fn with_absent(mut self, name: impl Into<String>) -> Self {
        self.insert(name, None);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        self.0.insert(name.into(), value);
    }

    /// The value of `name`, `None` both when it is absent and when it is
    /// not known at all. See [`Params::contains`].
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|v| v.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn is_absent(&self, name: &str) -> bool {
        matches!(self.0.get(name), Some(None))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Overlays every entry of `other`, replacing what is already present.
    pub(crate) fn extend_from(&mut self, other: &Params) {
        for (name, value) in &other.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, Option<V>)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.map(Into::into)))
                .collect(),
        )
    }
}

impl IntoIterator for Params {
    type Item = (String, Option<String>);
    type IntoIter = hash_map::IntoIter<String, Option<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
