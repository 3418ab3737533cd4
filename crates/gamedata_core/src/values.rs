// crates/gamedata_core/src/values.rs
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::diagnostics::DiagnosticSink;
use crate::error::RegistryError;
use crate::indexed::{Index, Indexed, Key};
use crate::registry::Registry;

/// One entity paired with an associated value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry<E, V> {
    pub entity: E,
    pub value: V,
}

impl<E: Indexed, V> Indexed for Entry<E, V> {
    type Index = E::Index;

    fn index(&self) -> E::Index {
        self.entity.index()
    }
}

/// An ordered table of `(entity, value)` pairs, unique by the entity's
/// index. Reuses `Registry`'s uniqueness, duplicate-discard and lazy-rebuild
/// mechanics over the pairs; only the pair sequence is serialized.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueTable<E: Indexed, V> {
    inner: Registry<Entry<E, V>>,
}

impl<E: Indexed, V> ValueTable<E, V> {
    pub fn new() -> Self {
        Self {
            inner: Registry::new(),
        }
    }

    /// Wraps an already-populated pair sequence; the map is stale until the
    /// first operation that consults it.
    pub fn from_pairs<T: IntoIterator<Item = (E, V)>>(pairs: T) -> Self {
        Self {
            inner: Registry::from_entries(
                pairs
                    .into_iter()
                    .map(|(entity, value)| Entry { entity, value }),
            ),
        }
    }

    pub fn set_sink(&mut self, sink: Arc<dyn DiagnosticSink>) {
        self.inner.set_sink(sink);
    }

    /// Associates `value` with a not-yet-present entity.
    pub fn add(&mut self, entity: E, value: V) -> Result<(), RegistryError<E::Index>> {
        self.inner.add(Entry { entity, value })
    }

    /// Create-or-update, keyed through the entity itself.
    pub fn insert(&mut self, entity: E, value: V) {
        self.inner.put(Entry { entity, value });
    }

    /// Update-in-place for an existing association. A brand-new index must go
    /// through `add` or `insert`; this path refuses it.
    pub fn set_value(&mut self, index: &E::Index, value: V) -> Result<(), RegistryError<E::Index>> {
        match self.inner.try_get_mut(index) {
            Some(entry) => {
                entry.value = value;
                Ok(())
            }
            None => Err(RegistryError::NotFound(index.clone())),
        }
    }

    pub fn value(&mut self, index: &E::Index) -> Result<&V, RegistryError<E::Index>> {
        self.inner.get(index).map(|entry| &entry.value)
    }

    pub fn try_value(&mut self, index: &E::Index) -> Option<&V> {
        self.inner.try_get(index).map(|entry| &entry.value)
    }

    pub fn try_value_for(&mut self, entity: &E) -> Option<&V> {
        self.try_value(&entity.index())
    }

    pub fn entity(&mut self, index: &E::Index) -> Result<&E, RegistryError<E::Index>> {
        self.inner.get(index).map(|entry| &entry.entity)
    }

    pub fn try_entity(&mut self, index: &E::Index) -> Option<&E> {
        self.inner.try_get(index).map(|entry| &entry.entity)
    }

    pub fn remove(&mut self, index: &E::Index) {
        self.inner.remove(index);
    }

    pub fn remove_entity(&mut self, entity: &E) {
        self.inner.remove(&entity.index());
    }

    pub fn contains_index(&mut self, index: &E::Index) -> bool {
        self.inner.contains_index(index)
    }

    pub fn contains_entity(&mut self, entity: &E) -> bool {
        self.inner.contains_index(&entity.index())
    }

    /// Number of slots, including any vacated by duplicate resolution.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&E, &V)> {
        self.inner.iter().map(|entry| (&entry.entity, &entry.value))
    }

    pub fn entities(&self) -> impl Iterator<Item = &E> {
        self.inner.iter().map(|entry| &entry.entity)
    }

    pub fn indices(&self) -> impl Iterator<Item = E::Index> + '_ {
        self.inner.iter().map(Indexed::index)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.inner.iter().map(|entry| &entry.value)
    }
}

impl<E: Indexed, V> Default for ValueTable<E, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Value table keyed by bare indices; `Key` supplies the entity shell.
pub type KeyedTable<I, V> = ValueTable<Key<I>, V>;

impl<I: Index, V> ValueTable<Key<I>, V> {
    /// `add` sugar for bare-index tables.
    pub fn add_key(&mut self, index: I, value: V) -> Result<(), RegistryError<I>> {
        self.add(Key(index), value)
    }
}
