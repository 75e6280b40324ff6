//! File sink registry
//!
//! Maps a logger's sender id to its rotating file writer. The registry has
//! its own mutex, independent of the task queue lock, so registering or
//! unregistering a sink never contends with record submission.

use crate::sinks::rotating_file::RotatingFileWriter;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared mapping from sender id to rotating file writer.
///
/// Writers are held behind `Arc`: the owning logger facade and this registry
/// share the handle, and the underlying file closes only when the last holder
/// drops it. A worker that looked a writer up keeps its clone alive even if
/// the logger unregisters mid-write.
#[derive(Default)]
pub struct SinkRegistry {
    sinks: Mutex<HashMap<u64, Arc<RotatingFileWriter>>>,
}

impl SinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the writer registered under `id`
    pub fn register(&self, id: u64, writer: Arc<RotatingFileWriter>) {
        self.sinks.lock().insert(id, writer);
    }

    /// Remove the writer registered under `id`, if any
    pub fn unregister(&self, id: u64) {
        self.sinks.lock().remove(&id);
    }

    /// Look up the writer for `id`, cloning the shared handle.
    ///
    /// A miss means the logger unregistered concurrently; callers skip the
    /// file write for that task.
    pub fn lookup(&self, id: u64) -> Option<Arc<RotatingFileWriter>> {
        self.sinks.lock().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.sinks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.lock().is_empty()
    }
}
