// crates/gamedata_cache/src/context.rs
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

use gamedata_core::Index;

use crate::cache::TemplateCache;

// The trait allows us to treat shards for different type pairs generically.
trait Shard: Send + Sync {
    fn clear(&mut self);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<I, V> Shard for TemplateCache<I, V>
where
    I: Index + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn clear(&mut self) {
        TemplateCache::clear(self);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Directory of every template-cache shard, plus the template-sharing
/// policy. Passed explicitly to the construction paths that need it; there
/// are no hidden statics.
pub struct CacheContext {
    // Map (index type, payload type) -> shard
    shards: HashMap<TypeId, Box<dyn Shard>>,
    sharing_enabled: bool,
}

impl CacheContext {
    pub fn new() -> Self {
        Self {
            shards: HashMap::new(),
            sharing_enabled: true,
        }
    }

    /// Whether new instances bind shared cache-owned templates (true) or own
    /// a private copy (false). Read once per construction; flipping it never
    /// rebinds existing instances.
    pub fn sharing_enabled(&self) -> bool {
        self.sharing_enabled
    }

    pub fn set_sharing_enabled(&mut self, enabled: bool) {
        self.sharing_enabled = enabled;
    }

    /// The shard for the `(I, V)` pair, created and recorded in the
    /// directory on first use. Insert-if-absent, so repeated calls are
    /// idempotent.
    pub fn shard<I, V>(&mut self) -> &mut TemplateCache<I, V>
    where
        I: Index + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        let key = TypeId::of::<(I, V)>();
        self.shards
            .entry(key)
            .or_insert_with(|| Box::new(TemplateCache::<I, V>::new()))
            .as_any_mut()
            .downcast_mut::<TemplateCache<I, V>>()
            .unwrap_or_else(|| {
                panic!(
                    "shard storage type mismatch for ({}, {})",
                    type_name::<I>(),
                    type_name::<V>(),
                )
            })
    }

    /// The shard for the `(I, V)` pair, if it was ever touched. Never
    /// creates one.
    pub fn try_shard<I, V>(&self) -> Option<&TemplateCache<I, V>>
    where
        I: Index + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        self.shards
            .get(&TypeId::of::<(I, V)>())
            .and_then(|shard| shard.as_any().downcast_ref::<TemplateCache<I, V>>())
    }

    /// Clears every shard, then forgets them all. Shards are re-created and
    /// re-recorded on their next use.
    pub fn clear_all(&mut self) {
        for shard in self.shards.values_mut() {
            shard.clear();
        }
        let dropped = self.shards.len();
        self.shards.clear();
        tracing::debug!("cleared {dropped} template cache shard(s)");
    }

    /// Number of shards currently recorded in the directory.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }
}

impl Default for CacheContext {
    fn default() -> Self {
        Self::new()
    }
}
