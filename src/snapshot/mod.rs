//! Snapshot capture of produced outcomes.
//!
//! When snapshot capture is enabled, every value or error a stand-in
//! produces is serialized to JSON and handed to a [`SnapshotSink`]. The
//! built-in sink is [`SnapshotRecorder`], which keeps snapshots in memory for
//! the test to inspect.
//!
//! A recorder can be installed as the current thread's sink. Builders created
//! while it is installed pick it up automatically.
//!
//! ```rust
//! use client_mock::snapshot::{self, SnapshotRecorder};
//!
//! let recorder = SnapshotRecorder::new();
//! {
//!     let _guard = recorder.install();
//!     assert!(snapshot::current().is_some());
//! }
//! assert!(snapshot::current().is_none());
//! ```

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

/// Whether a snapshot records a success or a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotOutcome {
    /// The request completed with a value.
    Resolved,
    /// The request failed with an error.
    Rejected,
}

/// A captured outcome.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    /// Service the method belongs to.
    pub service: &'static str,
    /// Method that produced the outcome.
    pub method: &'static str,
    /// Success or failure.
    pub outcome: SnapshotOutcome,
    /// The serialized value or error.
    pub value: serde_json::Value,
}

/// Receives snapshots of produced outcomes.
pub trait SnapshotSink: Send + Sync {
    /// Store one snapshot.
    fn capture(&self, snapshot: Snapshot);
}

/// In-memory [`SnapshotSink`].
///
/// Clones share the same storage.
#[derive(Clone, Default)]
pub struct SnapshotRecorder {
    snapshots: Arc<Mutex<Vec<Snapshot>>>,
}

impl SnapshotRecorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All snapshots captured so far, in capture order.
    #[must_use]
    pub fn snapshots(&self) -> Vec<Snapshot> {
        self.snapshots.lock().clone()
    }

    /// Snapshots captured for one method.
    #[must_use]
    pub fn for_method(&self, method: &str) -> Vec<Snapshot> {
        self.snapshots
            .lock()
            .iter()
            .filter(|s| s.method == method)
            .cloned()
            .collect()
    }

    /// Number of captured snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.lock().len()
    }

    /// Whether nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make this recorder the current thread's sink until the guard drops.
    ///
    /// Guards nest: dropping one restores whatever sink was current before.
    #[must_use = "the recorder is uninstalled when the guard is dropped"]
    pub fn install(&self) -> SnapshotGuard {
        let sink: Arc<dyn SnapshotSink> = Arc::new(self.clone());
        let previous = CURRENT.with(|current| current.borrow_mut().replace(sink));
        SnapshotGuard { previous }
    }
}

impl SnapshotSink for SnapshotRecorder {
    fn capture(&self, snapshot: Snapshot) {
        self.snapshots.lock().push(snapshot);
    }
}

impl fmt::Debug for SnapshotRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotRecorder")
            .field("snapshots", &*self.snapshots.lock())
            .finish()
    }
}

thread_local! {
    static CURRENT: RefCell<Option<Arc<dyn SnapshotSink>>> = const { RefCell::new(None) };
}

/// The sink installed on the current thread, if any.
#[must_use]
pub fn current() -> Option<Arc<dyn SnapshotSink>> {
    CURRENT.with(|current| current.borrow().clone())
}

/// Restores the previously installed sink when dropped.
pub struct SnapshotGuard {
    previous: Option<Arc<dyn SnapshotSink>>,
}

impl Drop for SnapshotGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT.with(|current| *current.borrow_mut() = previous);
    }
}

impl fmt::Debug for SnapshotGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotGuard")
            .field("restores_previous", &self.previous.is_some())
            .finish()
    }
}

/// Capture settings resolved for one stand-in.
#[derive(Clone, Default)]
pub(crate) struct Capture {
    pub(crate) service: &'static str,
    pub(crate) method: &'static str,
    pub(crate) enabled: bool,
    pub(crate) sink: Option<Arc<dyn SnapshotSink>>,
}

impl Capture {
    /// Forward `value` to the sink if capture applies.
    ///
    /// `override_` is the per-response setting; it wins over the builder's.
    pub(crate) fn record<V: Serialize>(
        &self,
        outcome: SnapshotOutcome,
        value: &V,
        override_: Option<bool>,
    ) {
        if !override_.unwrap_or(self.enabled) {
            return;
        }
        let Some(sink) = &self.sink else {
            return;
        };
        match serde_json::to_value(value) {
            Ok(value) => sink.capture(Snapshot {
                service: self.service,
                method: self.method,
                outcome,
                value,
            }),
            Err(err) => tracing::warn!(
                service = self.service,
                method = self.method,
                error = %err,
                "skipping snapshot of unserializable value"
            ),
        }
    }
}

impl fmt::Debug for Capture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capture")
            .field("service", &self.service)
            .field("method", &self.method)
            .field("enabled", &self.enabled)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}
