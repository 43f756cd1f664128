//! Stand-ins, their scripts and their call logs.
//!
//! This module provides the pieces behind [`on`](crate::on):
//!
//! - [`MethodTable`] - per-instance table of installed stand-ins
//! - [`Interceptor`] - the stand-in for one method
//! - [`ResponseQueue`] - one-shot and standing responses for a stand-in
//! - [`InvocationLog`] - append-only record of calls and arguments
//!
//! # Scripting Responses
//!
//! ```rust
//! use client_mock::mock::{Cardinality, ResponseEntry, ResponseQueue};
//!
//! let mut queue = ResponseQueue::<u32>::new();
//! queue.schedule(Cardinality::Once, ResponseEntry::resolve(1));
//! queue.schedule(Cardinality::Always, ResponseEntry::resolve(2));
//!
//! assert_eq!(queue.pending_once(), 1);
//! assert!(queue.has_always());
//! ```

mod interceptor;
mod schedule;
mod spy;
mod table;

pub use interceptor::Interceptor;
pub use schedule::{Cardinality, Response, ResponseEntry, ResponseQueue, Source};
pub use spy::{Invocation, InvocationLog};
pub use table::MethodTable;
