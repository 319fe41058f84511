use dashmap::DashMap;
use std::sync::Arc;
use trail_pattern::{CompiledRoute, PatternError, RouteBuilder};

/// Fast concurrent hashmap
type Fchm<K, V> = DashMap<K, V, fxhash::FxBuildHasher>;

/// Compiled routes keyed by everything they were compiled from. Clones
/// share the same storage.
#[derive(Debug, Clone, Default)]
pub struct RouteCache(Arc<Fchm<RouteBuilder, Arc<CompiledRoute>>>);

impl RouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compilation happens outside of any shard lock, so two threads may
    /// compile the same route; the first one to insert wins and both get
    /// that value.
    pub fn get_or_compile(&self, route: &RouteBuilder) -> Result<Arc<CompiledRoute>, PatternError> {
        if let Some(hit) = self.0.get(route) {
            return Ok(Arc::clone(hit.value()));
        }

        let compiled = Arc::new(route.compile()?);
        let entry = self.0.entry(route.clone()).or_insert(compiled);
        Ok(Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&self) {
        self.0.clear()
    }
}
