//! Request objects returned by stand-ins.
//!
//! A mocked method returns a [`Request`] shaped like a real SDK request:
//!
//! - [`Request::promise`] - the finalization step, a future of the outcome
//! - [`Request::send`] - callback-style completion
//! - [`Request::on`] / [`Request::listen`] - event registration passthrough
//!
//! The outcome is computed when the method is called. The returned future is
//! already complete and only exists to match the calling convention.
//!
//! # Example
//!
//! ```rust
//! use client_mock::request::Request;
//! use client_mock::ServiceError;
//!
//! let request = Request::resolved("get_secret_value", 42);
//! assert_eq!(request.into_result(), Ok(42));
//!
//! let request = Request::<i32>::rejected("get_secret_value", ServiceError::new("nope"));
//! assert!(request.into_result().is_err());
//! ```

mod envelope;

pub(crate) use envelope::shape;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::future::FusedFuture;

use crate::error::ServiceError;

/// The outcome of a request.
pub type Outcome<T> = Result<T, ServiceError>;

/// A request produced by a stand-in.
pub struct Request<T> {
    method: &'static str,
    outcome: Outcome<T>,
    events: Vec<String>,
}

impl<T> Request<T> {
    /// A request that completes with `value`.
    #[must_use]
    pub fn resolved(method: &'static str, value: T) -> Self {
        Self::from_outcome(method, Ok(value))
    }

    /// A request that fails with `error`.
    #[must_use]
    pub fn rejected(method: &'static str, error: ServiceError) -> Self {
        Self::from_outcome(method, Err(error))
    }

    fn from_outcome(method: &'static str, outcome: Outcome<T>) -> Self {
        Self {
            method,
            outcome,
            events: Vec::new(),
        }
    }

    /// Name of the method that produced this request.
    #[must_use]
    pub fn method(&self) -> &'static str {
        self.method
    }

    /// Whether the request will complete successfully.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Register a listener for `event`.
    ///
    /// The callback runs immediately, exactly once, before this returns.
    pub fn on<F>(&mut self, event: &str, callback: F)
    where
        F: FnOnce(),
    {
        self.listen(event);
        callback();
    }

    /// Register `event` without a callback. Nothing runs.
    pub fn listen(&mut self, event: &str) {
        tracing::trace!(method = self.method, event, "event registered");
        self.events.push(event.to_owned());
    }

    /// Event names registered so far, in registration order.
    #[must_use]
    pub fn events(&self) -> &[String] {
        &self.events
    }

    /// Finalize the request into a future of its outcome.
    #[must_use]
    pub fn promise(self) -> Promise<T> {
        Promise {
            outcome: Some(self.outcome),
        }
    }

    /// Finalize the request by handing its outcome to `callback`.
    ///
    /// The callback runs before this returns.
    pub fn send<F>(self, callback: F)
    where
        F: FnOnce(Outcome<T>),
    {
        callback(self.outcome);
    }

    /// Take the outcome without going through a future.
    pub fn into_result(self) -> Outcome<T> {
        self.outcome
    }
}

impl<T: fmt::Debug> fmt::Debug for Request<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("outcome", &self.outcome)
            .field("events", &self.events)
            .finish()
    }
}

/// Future returned by [`Request::promise`].
///
/// Ready on the first poll.
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Promise<T> {
    outcome: Option<Outcome<T>>,
}

// The outcome is never pinned.
impl<T> Unpin for Promise<T> {}

impl<T> Future for Promise<T> {
    type Output = Outcome<T>;

    fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.outcome.take() {
            Some(outcome) => Poll::Ready(outcome),
            None => panic!("Promise polled after completion"),
        }
    }
}

impl<T> FusedFuture for Promise<T> {
    fn is_terminated(&self) -> bool {
        self.outcome.is_none()
    }
}

impl<T: fmt::Debug> fmt::Debug for Promise<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promise")
            .field("outcome", &self.outcome)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    #[test]
    fn test_promise_ready_on_first_poll() {
        let promise = Request::resolved("scan", vec!["a"]).promise();
        assert_eq!(promise.now_or_never(), Some(Ok(vec!["a"])));
    }

    #[test]
    fn test_promise_carries_rejection() {
        let promise = Request::<()>::rejected("scan", ServiceError::new("foo-baz")).promise();
        match promise.now_or_never() {
            Some(Err(err)) => assert_eq!(err.message(), "foo-baz"),
            other => panic!("expected a rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_promise_is_fused_after_completion() {
        let mut promise = Request::resolved("scan", 1).promise();
        assert!(!promise.is_terminated());

        let outcome = futures::executor::block_on(&mut promise);
        assert_eq!(outcome, Ok(1));
        assert!(promise.is_terminated());
    }

    #[test]
    fn test_on_invokes_callback_once_synchronously() {
        let mut request = Request::resolved("scan", ());
        let mut hits = 0;

        request.on("validate", || hits += 1);

        assert_eq!(hits, 1);
        assert_eq!(request.events(), ["validate".to_string()]);
    }

    #[test]
    fn test_listen_without_callback_is_noop() {
        let mut request = Request::resolved("scan", ());
        request.listen("validate");
        request.listen("complete");

        assert_eq!(request.events().len(), 2);
        assert_eq!(request.into_result(), Ok(()));
    }

    #[test]
    fn test_send_hands_outcome_to_callback() {
        let mut seen = None;
        Request::<u8>::rejected("scan", ServiceError::new("bad")).send(|outcome| seen = Some(outcome));

        assert_eq!(seen, Some(Err(ServiceError::new("bad"))));
    }
}
