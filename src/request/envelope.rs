//! Turns a scheduled entry into a [`Request`].

use serde::Serialize;

use super::Request;
use crate::mock::ResponseEntry;
use crate::snapshot::{Capture, SnapshotOutcome};

/// Produce the outcome for one call and wrap it in a request.
///
/// Producers run here, at call time. Capture happens before the request is
/// returned and never changes it.
pub(crate) fn shape<T>(entry: &ResponseEntry<T>, capture: &Capture) -> Request<T>
where
    T: Clone + Serialize,
{
    match entry {
        ResponseEntry::Resolve(response) => {
            let value = response.source().produce();
            capture.record(SnapshotOutcome::Resolved, &value, response.snapshot_override());
            Request::resolved(capture.method, value)
        }
        ResponseEntry::Reject(response) => {
            let error = response.source().produce();
            capture.record(SnapshotOutcome::Rejected, &error, response.snapshot_override());
            Request::rejected(capture.method, error)
        }
    }
}
