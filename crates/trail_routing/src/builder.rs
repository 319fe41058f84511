use crate::cache::RouteCache;
use crate::table::{NamedRoute, RouteTable};
use ahash::AHashMap;
use std::sync::Arc;
use tracing::debug;
use trail_pattern::{Params, PatternError, RouteBuilder};

pub struct RouteTableBuilder {
    routes: Vec<(String, RouteBuilder, Params)>,
    cache: Option<RouteCache>,
}

#[derive(Debug, thiserror::Error)]
pub enum RouteBuildError {
    #[error("route {0:?} is defined more than once")]
    DuplicateName(String),
    #[error("route {name:?} does not compile: {source}")]
    Pattern {
        name: String,
        #[source]
        source: PatternError,
    },
}

impl RouteTableBuilder {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            cache: None,
        }
    }

    pub fn route(self, name: impl Into<String>, route: RouteBuilder) -> Self {
        self.route_with(name, route, Params::new())
    }

    /// Adds a route whose matches are overlaid on `defaults`.
    pub fn route_with(
        mut self,
        name: impl Into<String>,
        route: RouteBuilder,
        defaults: Params,
    ) -> Self {
        self.routes.push((name.into(), route, defaults));
        self
    }

    /// Compiles through `cache`, sharing routes between tables built from
    /// the same definitions.
    pub fn with_cache(mut self, cache: RouteCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn build(self) -> Result<RouteTable, RouteBuildError> {
        let Self { routes, cache } = self;
        let mut by_name = AHashMap::with_capacity(routes.len());
        let mut named = Vec::with_capacity(routes.len());

        for (index, (name, route, defaults)) in routes.into_iter().enumerate() {
            if by_name.contains_key(&name) {
                return Err(RouteBuildError::DuplicateName(name));
            }

            let compiled = match &cache {
                Some(cache) => cache.get_or_compile(&route),
                None => route.compile().map(Arc::new),
            };
            let compiled = match compiled {
                Ok(compiled) => compiled,
                Err(source) => return Err(RouteBuildError::Pattern { name, source }),
            };

            by_name.insert(name.clone(), index);
            named.push(NamedRoute {
                name,
                route: compiled,
                defaults,
            });
        }

        debug!(routes = named.len(), "built route table");
        Ok(RouteTable {
            routes: named,
            by_name,
        })
    }
}

impl Default for RouteTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}
