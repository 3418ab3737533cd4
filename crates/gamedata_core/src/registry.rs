// crates/gamedata_core/src/registry.rs
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::diagnostics::{default_sink, DiagnosticSink};
use crate::error::RegistryError;
use crate::indexed::Indexed;

/// Counts of map rebuilds. Lets callers (and tests) verify that a removal
/// only reconciles the tail instead of rescanning the whole sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RebuildStats {
    pub full: usize,
    pub partial: usize,
}

/// An ordered collection of entities, unique by index.
///
/// Only the entry sequence is serialized. The index -> position map is
/// derived state: absent after deserialization and rebuilt lazily by the
/// first operation that consults it. Duplicates discovered during a rebuild
/// are resolved by vacating the later slot (the sequence keeps a `None`
/// there, so later positions stay stable) and emitting one diagnostic.
#[derive(Serialize, Deserialize)]
pub struct Registry<E: Indexed> {
    entries: Vec<Option<E>>,

    #[serde(skip)]
    positions: HashMap<E::Index, usize>,
    #[serde(skip)]
    initialised: bool,
    #[serde(skip, default = "default_sink")]
    sink: Arc<dyn DiagnosticSink>,
    #[serde(skip)]
    stats: RebuildStats,
}

impl<E: Indexed> Registry<E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
            // An empty map is trivially correct; nothing to rebuild.
            initialised: true,
            sink: default_sink(),
            stats: RebuildStats::default(),
        }
    }

    /// Wraps an already-populated sequence. The map is stale until the first
    /// operation that consults it, mirroring what deserialization produces.
    pub fn from_entries<T: IntoIterator<Item = E>>(entries: T) -> Self {
        let mut registry = Self::new();
        registry.entries = entries.into_iter().map(Some).collect();
        registry.initialised = false;
        registry
    }

    /// Replaces the diagnostic sink. Tests inject a recording sink here.
    pub fn set_sink(&mut self, sink: Arc<dyn DiagnosticSink>) {
        self.sink = sink;
    }

    /// Appends an entity. Fails if its index is already present.
    pub fn add(&mut self, entity: E) -> Result<(), RegistryError<E::Index>> {
        self.ensure_initialised();
        let index = entity.index();
        if index != E::Index::default() && self.positions.contains_key(&index) {
            return Err(RegistryError::DuplicateIndex(index));
        }
        self.push(entity, index);
        Ok(())
    }

    /// Add-or-overwrite keyed by the entity's own index. An overwrite keeps
    /// the entry's position in the sequence.
    pub fn put(&mut self, entity: E) {
        self.ensure_initialised();
        let index = entity.index();
        match self.positions.get(&index) {
            Some(&position) => self.entries[position] = Some(entity),
            None => self.push(entity, index),
        }
    }

    /// Like `put`, but refuses an entity whose index disagrees with `index`.
    pub fn set(&mut self, index: E::Index, entity: E) -> Result<(), RegistryError<E::Index>> {
        let actual = entity.index();
        if actual != index {
            return Err(RegistryError::IndexMismatch {
                expected: index,
                actual,
            });
        }
        self.put(entity);
        Ok(())
    }

    pub fn get(&mut self, index: &E::Index) -> Result<&E, RegistryError<E::Index>> {
        self.try_get(index)
            .ok_or_else(|| RegistryError::NotFound(index.clone()))
    }

    pub fn try_get(&mut self, index: &E::Index) -> Option<&E> {
        self.ensure_initialised();
        let position = *self.positions.get(index)?;
        self.entries.get(position)?.as_ref()
    }

    pub(crate) fn try_get_mut(&mut self, index: &E::Index) -> Option<&mut E> {
        self.ensure_initialised();
        let position = *self.positions.get(index)?;
        self.entries.get_mut(position)?.as_mut()
    }

    /// Removes the entry for `index`, shifting everything after it. Earlier
    /// map slots stay valid; only the tail is reconciled, so the cost is
    /// proportional to the tail length. Removing an absent index is a no-op
    /// with a diagnostic.
    pub fn remove(&mut self, index: &E::Index) {
        self.ensure_initialised();
        let Some(position) = self.positions.remove(index) else {
            self.sink
                .warn(&format!("index `{index:?}` not found in registry"));
            return;
        };
        self.entries.remove(position);
        self.rebuild(position);
    }

    pub fn contains_index(&mut self, index: &E::Index) -> bool {
        self.ensure_initialised();
        self.positions.contains_key(index)
    }

    pub fn contains_entity(&mut self, entity: &E) -> bool {
        self.contains_index(&entity.index())
    }

    /// Number of slots in the sequence, including any vacated by duplicate
    /// resolution.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.positions.clear();
        self.initialised = true;
    }

    /// Occupied entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.iter().filter_map(Option::as_ref)
    }

    /// Indices of occupied entries in insertion order.
    pub fn indices(&self) -> impl Iterator<Item = E::Index> + '_ {
        self.iter().map(Indexed::index)
    }

    /// Raw slot view for a host serialization layer. Only this sequence is
    /// ever persisted; the position map is derived from it.
    pub fn entries(&self) -> &[Option<E>] {
        &self.entries
    }

    /// Accepts a sequence a host rewrote wholesale. The map is stale
    /// afterwards and rebuilds on the next access.
    pub fn set_entries(&mut self, entries: Vec<Option<E>>) {
        self.entries = entries;
        self.invalidate();
    }

    /// Marks the map stale; the next operation that consults it rebuilds
    /// from scratch.
    pub fn invalidate(&mut self) {
        self.positions.clear();
        self.initialised = false;
    }

    pub fn rebuild_stats(&self) -> RebuildStats {
        self.stats
    }

    fn push(&mut self, entity: E, index: E::Index) {
        self.entries.push(Some(entity));
        if index != E::Index::default() {
            self.positions.insert(index, self.entries.len() - 1);
        }
    }

    fn ensure_initialised(&mut self) {
        if self.initialised {
            return;
        }
        self.initialised = true;
        self.rebuild(0);
    }

    /// Reconciles the map with the sequence from `start` onwards. From zero
    /// the map is discarded and rebuilt; from a later position only the
    /// shifted tail is touched.
    fn rebuild(&mut self, start: usize) {
        if self.entries.is_empty() {
            self.positions.clear();
            return;
        }

        if start == 0 {
            self.positions.clear();
            self.stats.full += 1;
        } else {
            self.stats.partial += 1;
        }

        for position in start..self.entries.len() {
            let Some(index) = self.entries[position].as_ref().map(Indexed::index) else {
                continue;
            };

            // Sentinel: an unset index never takes part in uniqueness tracking.
            if index == E::Index::default() {
                continue;
            }

            if start != 0 {
                self.positions.remove(&index);
            }

            if self.positions.contains_key(&index) {
                // The earlier entry wins; vacate this slot and keep going.
                self.entries[position] = None;
                self.sink.warn(&format!(
                    "discarded entry with duplicate index `{index:?}` at position {position}"
                ));
            } else {
                self.positions.insert(index, position);
            }
        }
    }
}

impl<E: Indexed> Default for Registry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Indexed + Clone> Clone for Registry<E> {
    /// Copy semantics: clones the sequence and rebuilds a fresh map. The two
    /// registries share no mutable state afterwards.
    fn clone(&self) -> Self {
        let mut copy = Self {
            entries: self.entries.clone(),
            positions: HashMap::new(),
            initialised: false,
            sink: Arc::clone(&self.sink),
            stats: RebuildStats::default(),
        };
        copy.ensure_initialised();
        copy
    }
}

impl<E: Indexed + fmt::Debug> fmt::Debug for Registry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("entries", &self.entries)
            .field("initialised", &self.initialised)
            .finish_non_exhaustive()
    }
}
