//! Assertions for mocked calls.
//!
//! Mocked methods return `Option<Request<T>>`. A request is settled the
//! moment it is returned, so these helpers read its outcome directly.
//!
//! ```rust
//! use client_mock::{assert_fell_through, assert_rejected, assert_resolved};
//! use client_mock::request::Request;
//! use client_mock::ServiceError;
//!
//! assert_eq!(assert_resolved!(Some(Request::resolved("scan", 1))), 1);
//!
//! let err = assert_rejected!(Some(Request::<u8>::rejected("scan", ServiceError::new("x"))));
//! assert_eq!(err.message(), "x");
//!
//! assert_fell_through!(None::<Request<u8>>);
//! ```

mod call;

pub use call::settle;
