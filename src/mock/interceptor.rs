//! The stand-in installed for one method on one instance.

use std::fmt;

use parking_lot::Mutex;
use serde::Serialize;

use super::schedule::{Cardinality, ResponseEntry, ResponseQueue};
use super::spy::{Invocation, InvocationLog};
use crate::request::{shape, Request};
use crate::snapshot::Capture;

/// Replaces a method: records each call and answers from its script.
///
/// Obtained from [`MethodTable::install`](super::MethodTable) through the
/// builder, or from [`MethodConfigurator::interceptor`](crate::MethodConfigurator::interceptor).
pub struct Interceptor<I, O> {
    service: &'static str,
    method: &'static str,
    queue: Mutex<ResponseQueue<O>>,
    invocations: InvocationLog<I>,
    capture: Capture,
}

impl<I, O> Interceptor<I, O>
where
    I: Clone + Send + Sync + 'static,
    O: Clone + Serialize + Send + Sync + 'static,
{
    pub(crate) fn new(capture: Capture) -> Self {
        Self {
            service: capture.service,
            method: capture.method,
            queue: Mutex::new(ResponseQueue::new()),
            invocations: InvocationLog::new(),
            capture,
        }
    }

    /// Handle one call to the mocked method.
    ///
    /// Returns `None` when the script is exhausted and no default is set.
    pub fn call(&self, args: I) -> Option<Request<O>> {
        self.invocations.record(args);
        // The lock is released before producers run.
        let entry = self.queue.lock().next();
        match entry {
            Some(entry) => {
                let outcome = match entry {
                    ResponseEntry::Resolve(_) => "resolve",
                    ResponseEntry::Reject(_) => "reject",
                };
                tracing::trace!(
                    service = self.service,
                    method = self.method,
                    outcome,
                    "answering from script"
                );
                Some(shape(&entry, &self.capture))
            }
            None => {
                tracing::debug!(
                    service = self.service,
                    method = self.method,
                    "script exhausted, call falls through"
                );
                None
            }
        }
    }

    pub(crate) fn schedule(&self, cardinality: Cardinality, entry: ResponseEntry<O>) {
        self.queue.lock().schedule(cardinality, entry);
    }
}

impl<I, O> Interceptor<I, O> {
    /// Name of the intercepted method.
    #[must_use]
    pub fn method(&self) -> &'static str {
        self.method
    }

    /// Number of calls so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.invocations.call_count()
    }

    /// Check if the method was called at least once.
    #[must_use]
    pub fn was_called(&self) -> bool {
        self.invocations.was_called()
    }

    /// Check if the method was called exactly N times.
    #[must_use]
    pub fn was_called_times(&self, n: usize) -> bool {
        self.invocations.was_called_times(n)
    }

    /// Check if any call was made with `expected`.
    pub fn was_called_with(&self, expected: &I) -> bool
    where
        I: PartialEq,
    {
        self.invocations.was_called_with(expected)
    }

    /// One-shot responses not yet consumed.
    #[must_use]
    pub fn pending_once(&self) -> usize {
        self.queue.lock().pending_once()
    }

    /// Whether a standing default response is set.
    #[must_use]
    pub fn has_fallback(&self) -> bool {
        self.queue.lock().has_always()
    }
}

impl<I: Clone, O> Interceptor<I, O> {
    /// All recorded calls.
    #[must_use]
    pub fn calls(&self) -> Vec<Invocation<I>> {
        self.invocations.calls()
    }

    /// The Nth call (0-indexed).
    #[must_use]
    pub fn nth_call(&self, n: usize) -> Option<Invocation<I>> {
        self.invocations.nth_call(n)
    }

    /// The most recent call.
    #[must_use]
    pub fn last_call(&self) -> Option<Invocation<I>> {
        self.invocations.last_call()
    }
}

impl<I: fmt::Debug, O: fmt::Debug> fmt::Debug for Interceptor<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interceptor")
            .field("service", &self.service)
            .field("method", &self.method)
            .field("queue", &*self.queue.lock())
            .field("invocations", &self.invocations)
            .finish()
    }
}
