use crate::builder::RouteTableBuilder;
use ahash::AHashMap;
use std::sync::Arc;
use tracing::trace;
use trail_pattern::{BuildError, Coercion, CompiledRoute, Params, Uri, UriLike, Value};

/// Routes tried in the order they were added.
#[derive(Debug, Clone)]
pub struct RouteTable {
    pub(crate) routes: Vec<NamedRoute>,
    pub(crate) by_name: AHashMap<String, usize>,
}

#[derive(Debug, Clone)]
pub struct NamedRoute {
    pub(crate) name: String,
    pub(crate) route: Arc<CompiledRoute>,
    pub(crate) defaults: Params,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RouteMatch {
    pub name: String,
    pub params: Params,
}

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("no route named {0:?}")]
    UnknownRoute(String),
    #[error(transparent)]
    Build(#[from] BuildError),
}

impl NamedRoute {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn route(&self) -> &Arc<CompiledRoute> {
        &self.route
    }

    pub fn defaults(&self) -> &Params {
        &self.defaults
    }
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    /// The first route matching `uri`.
    pub fn resolve<U: UriLike>(&self, uri: &U) -> Option<RouteMatch> {
        let found = self.routes.iter().find_map(|named| {
            named
                .route
                .matches(uri, &named.defaults)
                .map(|params| RouteMatch {
                    name: named.name.clone(),
                    params,
                })
        });
        trace!(
            path = uri.path(),
            route = found.as_ref().map(|m| m.name.as_str()),
            "resolved"
        );
        found
    }

    pub fn url_for<I, K, V>(&self, name: &str, values: I) -> Result<Uri, RouteError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.url_for_with(name, values, Coercion::Lenient)
    }

    pub fn url_for_with<I, K, V>(
        &self,
        name: &str,
        values: I,
        coercion: Coercion,
    ) -> Result<Uri, RouteError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let named = self
            .get(name)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;
        Ok(named.route.build_with(values, coercion)?)
    }

    pub fn get(&self, name: &str) -> Option<&NamedRoute> {
        self.by_name.get(name).map(|&index| &self.routes[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedRoute> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
