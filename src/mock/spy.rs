// Allow must_use_candidate since log accessors are used for their assertions
#![allow(clippy::must_use_candidate)]

//! Invocation logs for observing calls to stand-ins and constructors.
//!
//! [`InvocationLog`] is append-only: the library pushes one [`Invocation`] per
//! call and tests read the history back.
//!
//! # Example
//!
//! ```rust
//! use client_mock::mock::InvocationLog;
//!
//! let log = InvocationLog::new();
//! log.record("bar-baz");
//! log.record("qux");
//!
//! assert_eq!(log.call_count(), 2);
//! assert_eq!(log.nth_call(1).unwrap().args, "qux");
//! assert!(log.was_called_with(&"bar-baz"));
//! ```

use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::Mutex;

/// A single recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<A> {
    /// The arguments passed to the call.
    pub args: A,
    /// Zero-based position of this call in the log.
    pub index: usize,
}

/// Append-only record of calls and their arguments.
///
/// Clones share the same history.
pub struct InvocationLog<A> {
    calls: Arc<Mutex<Vec<Invocation<A>>>>,
}

impl<A> InvocationLog<A> {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Append a call with the given arguments.
    pub fn record(&self, args: A) {
        let mut calls = self.calls.lock();
        let index = calls.len();
        calls.push(Invocation { args, index });
    }

    /// Get the number of recorded calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Check if any call was recorded.
    #[must_use]
    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }

    /// Check if exactly N calls were recorded.
    #[must_use]
    pub fn was_called_times(&self, n: usize) -> bool {
        self.call_count() == n
    }

    /// Check if any call was made with the given arguments.
    pub fn was_called_with(&self, expected: &A) -> bool
    where
        A: PartialEq,
    {
        self.calls.lock().iter().any(|c| &c.args == expected)
    }
}

impl<A: Clone> InvocationLog<A> {
    /// Get all recorded calls.
    pub fn calls(&self) -> Vec<Invocation<A>> {
        self.calls.lock().clone()
    }

    /// Get the arguments of every recorded call, in call order.
    pub fn args(&self) -> Vec<A> {
        self.calls.lock().iter().map(|c| c.args.clone()).collect()
    }

    /// Get the Nth call (0-indexed).
    pub fn nth_call(&self, n: usize) -> Option<Invocation<A>> {
        self.calls.lock().get(n).cloned()
    }

    /// Get the most recent call.
    pub fn last_call(&self) -> Option<Invocation<A>> {
        self.calls.lock().last().cloned()
    }
}

impl<A> Default for InvocationLog<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for InvocationLog<A> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<A: Debug> Debug for InvocationLog<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let calls = self.calls.lock();
        f.debug_struct("InvocationLog")
            .field("call_count", &calls.len())
            .field("calls", &*calls)
            .finish()
    }
}
