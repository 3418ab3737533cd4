// crates/gamedata_core/src/error.rs
use thiserror::Error;

/// Failures surfaced by `Registry` and `ValueTable` operations.
///
/// Corruption discovered during a rebuild is not represented here: it is
/// resolved in place (discard + diagnostic) and never reaches the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError<I> {
    /// An entry with this index already exists.
    #[error("index `{0:?}` already exists")]
    DuplicateIndex(I),

    /// `set` was handed an entity whose own index disagrees with the key.
    #[error("index mismatch: `{expected:?}` != `{actual:?}`")]
    IndexMismatch { expected: I, actual: I },

    /// No entry with this index. Recoverable via the `try_*` counterpart.
    #[error("index `{0:?}` not found")]
    NotFound(I),
}
