// crates/gamedata_core/src/diagnostics.rs
use std::sync::{Arc, Mutex};

/// Where collections report non-fatal conditions: a duplicate discarded
/// during a rebuild, a removal of an absent index. Injectable so tests can
/// capture messages instead of scraping a log stream.
pub trait DiagnosticSink: Send + Sync {
    fn warn(&self, message: &str);
}

/// Default sink; forwards to `tracing`.
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// Records every warning it receives, in order.
#[derive(Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl DiagnosticSink for MemorySink {
    fn warn(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub(crate) fn default_sink() -> Arc<dyn DiagnosticSink> {
    Arc::new(LogSink)
}
