// crates/gamedata_core/src/lib.rs

pub mod diagnostics;
pub mod error;
pub mod indexed;
pub mod registry;
pub mod values;

// Re-export the working set so consumers don't have to spell out modules
pub use diagnostics::{DiagnosticSink, LogSink, MemorySink};
pub use error::RegistryError;
pub use indexed::{Index, Indexed, Key};
pub use registry::{RebuildStats, Registry};
pub use values::{Entry, KeyedTable, ValueTable};
