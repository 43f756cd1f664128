//! Assertions on the `Option<Request<T>>` a mocked method returns.
//!
//! - [`settle`] - Take the outcome of a call, if it produced a request
//! - [`assert_resolved!`] - Assert a call produced a successful request
//! - [`assert_rejected!`] - Assert a call produced a failed request
//! - [`assert_fell_through!`] - Assert a call had no scripted answer

use crate::request::{Outcome, Request};

/// Take the outcome of a mocked call.
///
/// Returns `None` when the call fell through.
///
/// # Example
///
/// ```rust
/// use client_mock::assertions::settle;
/// use client_mock::request::Request;
///
/// assert_eq!(settle(Some(Request::resolved("scan", 3))), Some(Ok(3)));
/// assert_eq!(settle::<u8>(None), None);
/// ```
pub fn settle<T>(call: Option<Request<T>>) -> Option<Outcome<T>> {
    call.map(Request::into_result)
}

/// Assert that a mocked call produced a request that completes with a value.
///
/// Accepts the `Option<Request<T>>` a mocked method returns and yields the
/// value.
///
/// # Panics
///
/// Panics if the call fell through (`None`) or the request fails.
///
/// # Example
///
/// ```rust
/// use client_mock::assert_resolved;
/// use client_mock::request::Request;
///
/// let call = Some(Request::resolved("scan", 3));
/// assert_eq!(assert_resolved!(call), 3);
/// ```
#[macro_export]
macro_rules! assert_resolved {
    ($call:expr) => {{
        match $crate::assertions::settle($call) {
            ::std::option::Option::Some(::std::result::Result::Ok(value)) => value,
            ::std::option::Option::Some(::std::result::Result::Err(err)) => panic!(
                "assertion failed: expected request to resolve, but it was rejected with {:?}",
                err
            ),
            ::std::option::Option::None => {
                panic!("assertion failed: expected a request, but the call fell through")
            }
        }
    }};
}

/// Assert that a mocked call produced a request that fails.
///
/// Yields the [`ServiceError`](crate::ServiceError).
///
/// # Panics
///
/// Panics if the call fell through (`None`) or the request succeeds.
///
/// # Example
///
/// ```rust
/// use client_mock::assert_rejected;
/// use client_mock::request::Request;
/// use client_mock::ServiceError;
///
/// let call = Some(Request::<u8>::rejected("scan", ServiceError::new("foo-baz")));
/// assert_eq!(assert_rejected!(call).message(), "foo-baz");
/// ```
#[macro_export]
macro_rules! assert_rejected {
    ($call:expr) => {{
        match $crate::assertions::settle($call) {
            ::std::option::Option::Some(::std::result::Result::Err(err)) => err,
            ::std::option::Option::Some(::std::result::Result::Ok(value)) => panic!(
                "assertion failed: expected request to be rejected, but it resolved to {:?}",
                value
            ),
            ::std::option::Option::None => {
                panic!("assertion failed: expected a request, but the call fell through")
            }
        }
    }};
}

/// Assert that a mocked call had no scripted answer.
///
/// # Panics
///
/// Panics if the call produced a request.
///
/// # Example
///
/// ```rust
/// use client_mock::assert_fell_through;
/// use client_mock::request::Request;
///
/// let call: Option<Request<u8>> = None;
/// assert_fell_through!(call);
/// ```
#[macro_export]
macro_rules! assert_fell_through {
    ($call:expr) => {{
        if let ::std::option::Option::Some(request) = $call {
            panic!(
                "assertion failed: expected the call to fall through, but `{}` answered with {:?}",
                request.method(),
                request.into_result()
            );
        }
    }};
}
