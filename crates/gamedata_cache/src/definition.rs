// crates/gamedata_cache/src/definition.rs
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use gamedata_core::{Index, Indexed};

/// One canonical `(index, template)` payload.
///
/// The template is always stored as a copy of the caller's value, so a
/// handle held by the caller can never mutate cache-internal state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TemplateDefinition<I, V> {
    index: I,
    template: V,
}

impl<I, V: Clone> TemplateDefinition<I, V> {
    pub fn new(index: I, template: &V) -> Self {
        Self {
            index,
            template: template.clone(),
        }
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    pub fn template(&self) -> &V {
        &self.template
    }

    /// Replaces the stored payload with a copy of `template`.
    pub fn set_template(&mut self, template: &V) {
        self.template = template.clone();
    }
}

/// A definition handle shared between a cache shard and every instance bound
/// to it. Template updates through any handle are visible through all.
pub struct SharedDefinition<I, V>(Arc<RwLock<TemplateDefinition<I, V>>>);

impl<I, V: Clone> SharedDefinition<I, V> {
    pub(crate) fn new(definition: TemplateDefinition<I, V>) -> Self {
        Self(Arc::new(RwLock::new(definition)))
    }

    /// A copy of the current payload.
    pub fn template(&self) -> V {
        self.0.read().template.clone()
    }

    pub(crate) fn set_template(&self, template: &V) {
        self.0.write().set_template(template);
    }
}

impl<I, V> Clone for SharedDefinition<I, V> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<I: Index, V> Indexed for SharedDefinition<I, V> {
    type Index = I;

    fn index(&self) -> I {
        self.0.read().index.clone()
    }
}

impl<I: fmt::Debug, V: fmt::Debug> fmt::Debug for SharedDefinition<I, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedDefinition")
            .field(&*self.0.read())
            .finish()
    }
}
