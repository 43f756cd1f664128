//! # client-mock
//!
//! > Scriptable test doubles for request-style service clients
//!
//! **client-mock** replaces methods on a service client with stand-ins that
//! answer from a script, records how they were called, and hands back
//! request objects shaped like the real ones.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use client_mock::prelude::*;
//!
//! #[client_mock::test]
//! async fn reads_the_secret() {
//!     let m = on(Target::<SecretsManager>::of_type())
//!         .mock(SecretsManager::GET_SECRET_VALUE)
//!         .resolve(GetSecretValueResponse::with_secret("foo-bar"));
//!
//!     let sm = m.and().constructor().create_default();
//!     let res = sm.get_secret_value(request).unwrap().promise().await;
//!
//!     assert_eq!(res.unwrap().secret_string.as_deref(), Some("foo-bar"));
//!     assert_eq!(m.call_count(), 1);
//! }
//! ```
//!
//! ## Features
//!
//! - **Standing and one-shot responses** - `resolve`/`reject` answer every
//!   call, `resolve_once`/`reject_once` answer one call each, in order
//! - **Lazy values** - [`Response::from_fn`](mock::Response::from_fn) runs on
//!   every call
//! - **Per-instance isolation** - stand-ins live in the instance's
//!   [`MethodTable`](mock::MethodTable)
//! - **Call assertions** - call counts, arguments, constructor configs
//! - **Snapshot capture** - produced values are serialized to a
//!   [`SnapshotSink`](snapshot::SnapshotSink)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assertions;
pub mod builder;
pub mod error;
pub mod mock;
pub mod request;
pub mod service;
pub mod snapshot;

/// Prelude for convenient imports
///
/// ```rust
/// use client_mock::prelude::*;
/// ```
pub mod prelude {
    pub use crate::builder::{on, on_with, Builder, MethodConfigurator, MockOptions};
    pub use crate::error::{Error, ServiceError};
    pub use crate::mock::{MethodTable, Response};
    pub use crate::request::{Promise, Request};
    pub use crate::service::{Method, Service, ServiceConstructor, ServiceFactory, Target};
    pub use crate::snapshot::SnapshotRecorder;
    pub use crate::{assert_fell_through, assert_rejected, assert_resolved};
}

// Re-exports
pub use builder::{on, on_with, Builder, MethodConfigurator, MockOptions};
pub use error::{Error, Result, ServiceError};
pub use service::{Method, Service, Target};
pub use snapshot::SnapshotRecorder;

// Re-export the test macro when macros feature is enabled
#[cfg(feature = "macros")]
pub use client_mock_macros::test;
