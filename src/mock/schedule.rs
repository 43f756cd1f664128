//! Response scheduling for stand-ins.
//!
//! Every stand-in owns a [`ResponseQueue`]: an ordered list of one-shot
//! entries consumed first-in first-out, plus at most one standing default
//! that answers whenever the one-shot list is empty.
//!
//! # Example
//!
//! ```rust
//! use client_mock::mock::{ResponseEntry, ResponseQueue};
//!
//! let mut queue = ResponseQueue::<&str>::new();
//! queue.set_always(ResponseEntry::resolve("fallback"));
//! queue.append_once(ResponseEntry::resolve("first"));
//! queue.append_once(ResponseEntry::reject("boom"));
//!
//! assert!(queue.next().is_some()); // "first"
//! assert!(queue.next().is_some()); // "boom"
//! assert_eq!(queue.pending_once(), 0);
//! assert!(queue.next().is_some()); // "fallback", every time from now on
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use crate::error::ServiceError;

/// Where a response value comes from.
pub enum Source<T> {
    /// A fixed value, cloned for each call.
    Literal(T),
    /// A zero-argument function invoked at call time.
    Producer(Arc<dyn Fn() -> T + Send + Sync>),
}

impl<T: Clone> Source<T> {
    /// Produce the concrete value for one call.
    ///
    /// Producers run again on every call.
    pub fn produce(&self) -> T {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Producer(f) => f(),
        }
    }
}

impl<T: Clone> Clone for Source<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Literal(value) => Self::Literal(value.clone()),
            Self::Producer(f) => Self::Producer(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Source<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

/// One scripted value together with its capture override.
///
/// Any value converts into a literal response, so `resolve(value)` and
/// `resolve(Response::from_fn(..))` both work. Text converts into a
/// rejection response carrying a [`ServiceError`].
///
/// # Example
///
/// ```rust
/// use client_mock::mock::Response;
///
/// let fixed: Response<u32> = 7.into();
/// let live = Response::from_fn(|| 7_u32).snapshot(false);
///
/// assert_eq!(fixed.snapshot_override(), None);
/// assert_eq!(live.snapshot_override(), Some(false));
/// ```
pub struct Response<T> {
    source: Source<T>,
    snapshot: Option<bool>,
}

impl<T> Response<T> {
    /// A response that returns a fixed value.
    #[must_use]
    pub fn value(value: T) -> Self {
        Self {
            source: Source::Literal(value),
            snapshot: None,
        }
    }

    /// A response whose value is produced by `f` on every call.
    #[must_use]
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            source: Source::Producer(Arc::new(f)),
            snapshot: None,
        }
    }

    /// Override the builder's snapshot policy for this response.
    #[must_use]
    pub fn snapshot(mut self, enabled: bool) -> Self {
        self.snapshot = Some(enabled);
        self
    }

    /// The per-response snapshot override, if one was set.
    #[must_use]
    pub fn snapshot_override(&self) -> Option<bool> {
        self.snapshot
    }

    /// The value source.
    #[must_use]
    pub fn source(&self) -> &Source<T> {
        &self.source
    }
}

impl<T: Clone> Clone for Response<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            snapshot: self.snapshot,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Response<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("source", &self.source)
            .field("snapshot", &self.snapshot)
            .finish()
    }
}

impl<T> From<T> for Response<T> {
    fn from(value: T) -> Self {
        Self::value(value)
    }
}

impl From<&str> for Response<ServiceError> {
    fn from(message: &str) -> Self {
        Self::value(ServiceError::new(message))
    }
}

impl From<String> for Response<ServiceError> {
    fn from(message: String) -> Self {
        Self::value(ServiceError::new(message))
    }
}

/// A scripted outcome: success with a value or failure with an error.
pub enum ResponseEntry<T> {
    /// Complete the request successfully.
    Resolve(Response<T>),
    /// Fail the request.
    Reject(Response<ServiceError>),
}

impl<T> ResponseEntry<T> {
    /// A success entry.
    #[must_use]
    pub fn resolve(response: impl Into<Response<T>>) -> Self {
        Self::Resolve(response.into())
    }

    /// A failure entry.
    #[must_use]
    pub fn reject(response: impl Into<Response<ServiceError>>) -> Self {
        Self::Reject(response.into())
    }

    /// The per-response snapshot override, if one was set.
    #[must_use]
    pub fn snapshot_override(&self) -> Option<bool> {
        match self {
            Self::Resolve(r) => r.snapshot_override(),
            Self::Reject(r) => r.snapshot_override(),
        }
    }
}

impl<T: Clone> Clone for ResponseEntry<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Resolve(r) => Self::Resolve(r.clone()),
            Self::Reject(r) => Self::Reject(r.clone()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ResponseEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolve(r) => f.debug_tuple("Resolve").field(r).finish(),
            Self::Reject(r) => f.debug_tuple("Reject").field(r).finish(),
        }
    }
}

/// How many times an entry answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cardinality {
    /// Answer every call once no one-shot entry is pending.
    Always,
    /// Answer exactly one call, in definition order.
    Once,
}

/// The per-method script of responses.
pub struct ResponseQueue<T> {
    once: VecDeque<ResponseEntry<T>>,
    always: Option<ResponseEntry<T>>,
}

impl<T: Clone> ResponseQueue<T> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            once: VecDeque::new(),
            always: None,
        }
    }

    /// Schedule an entry with the given cardinality.
    pub fn schedule(&mut self, cardinality: Cardinality, entry: ResponseEntry<T>) {
        match cardinality {
            Cardinality::Always => self.set_always(entry),
            Cardinality::Once => self.append_once(entry),
        }
    }

    /// Replace the standing default.
    pub fn set_always(&mut self, entry: ResponseEntry<T>) {
        self.always = Some(entry);
    }

    /// Push a one-shot entry to the back of the queue.
    pub fn append_once(&mut self, entry: ResponseEntry<T>) {
        self.once.push_back(entry);
    }

    /// Pick the entry for the next call.
    ///
    /// One-shot entries are consumed front to back. The standing default is
    /// only consulted once they are exhausted and is never consumed.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<ResponseEntry<T>> {
        self.once.pop_front().or_else(|| self.always.clone())
    }
}

impl<T> ResponseQueue<T> {
    /// Number of one-shot entries not yet consumed.
    #[must_use]
    pub fn pending_once(&self) -> usize {
        self.once.len()
    }

    /// Whether a standing default is set.
    #[must_use]
    pub fn has_always(&self) -> bool {
        self.always.is_some()
    }
}

impl<T: Clone> Default for ResponseQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ResponseQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseQueue")
            .field("once", &self.once)
            .field("always", &self.always)
            .finish()
    }
}
