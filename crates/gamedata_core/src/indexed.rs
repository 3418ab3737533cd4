// crates/gamedata_core/src/indexed.rs
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Everything a registry needs from an index type. Blanket-implemented;
/// never implement this by hand.
pub trait Index: Clone + Eq + Hash + Default + Debug {}

impl<T: Clone + Eq + Hash + Default + Debug> Index for T {}

/// Capability contract: an entity exposes a comparable identity value.
///
/// The default value of the index type is the "unset" sentinel. Entries
/// carrying it are kept in a registry's sequence but never enter its lookup
/// map and never take part in duplicate detection.
pub trait Indexed {
    type Index: Index;

    fn index(&self) -> Self::Index;
}

/// A unit entity that is nothing but its index, for enum- or scalar-keyed
/// tables that have no bespoke entity type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key<I>(pub I);

impl<I: Index> Indexed for Key<I> {
    type Index = I;

    fn index(&self) -> I {
        self.0.clone()
    }
}
