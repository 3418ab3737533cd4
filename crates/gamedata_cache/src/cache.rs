// crates/gamedata_cache/src/cache.rs
use gamedata_core::{Index, Registry};

use crate::definition::{SharedDefinition, TemplateDefinition};

/// One cache shard: the canonical template definitions for a single concrete
/// (index type, payload type) pair.
pub struct TemplateCache<I: Index, V> {
    definitions: Registry<SharedDefinition<I, V>>,
}

impl<I: Index, V: Clone> TemplateCache<I, V> {
    pub fn new() -> Self {
        Self {
            definitions: Registry::new(),
        }
    }

    /// Installs or replaces the canonical template for `index`. Replacement
    /// goes through the shared handle, so every existing holder observes it.
    /// Always succeeds.
    pub fn register_template(&mut self, index: I, template: &V) {
        if let Some(definition) = self.definitions.try_get(&index) {
            definition.set_template(template);
        } else {
            self.definitions
                .put(SharedDefinition::new(TemplateDefinition::new(
                    index, template,
                )));
        }
    }

    /// A copy of the stored template, if any.
    pub fn try_get_template(&mut self, index: &I) -> Option<V> {
        self.definitions.try_get(index).map(SharedDefinition::template)
    }

    /// Instance construction binds against this; not part of the surface
    /// exposed to entities.
    pub(crate) fn try_get_definition(&mut self, index: &I) -> Option<&SharedDefinition<I, V>> {
        self.definitions.try_get(index)
    }

    pub fn clear(&mut self) {
        self.definitions.clear();
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<I: Index, V: Clone> Default for TemplateCache<I, V> {
    fn default() -> Self {
        Self::new()
    }
}
