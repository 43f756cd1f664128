//! Per-instance stand-in tables.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use super::interceptor::Interceptor;
use crate::error::{Error, Result};
use crate::request::Request;
use crate::service::Method;
use crate::snapshot::Capture;

struct Binding {
    service: &'static str,
    interceptor: Arc<dyn Any + Send + Sync>,
}

/// The stand-ins installed on one service instance.
///
/// A service embeds a `MethodTable` and routes each interceptable method
/// through [`dispatch`](Self::dispatch). Tables are never shared between
/// instances, so mocking one instance leaves every other instance alone.
#[derive(Default)]
pub struct MethodTable {
    bindings: Mutex<HashMap<&'static str, Arc<Binding>>>,
}

impl MethodTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a fresh stand-in for `method`, replacing any previous one.
    pub(crate) fn install<I, O>(&self, method: Method<I, O>, capture: Capture) -> Arc<Interceptor<I, O>>
    where
        I: Clone + Send + Sync + 'static,
        O: Clone + Serialize + Send + Sync + 'static,
    {
        let service = capture.service;
        let interceptor = Arc::new(Interceptor::new(capture));
        let binding = Arc::new(Binding {
            service,
            interceptor: interceptor.clone(),
        });
        let replaced = self.bindings.lock().insert(method.name(), binding);
        if replaced.is_some() {
            tracing::debug!(service, method = method.name(), "replaced existing stand-in");
        } else {
            tracing::debug!(service, method = method.name(), "installed stand-in");
        }
        interceptor
    }

    /// The stand-in installed for `method`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MethodTypeMismatch`] if a stand-in exists under the
    /// same name with different request or response types.
    pub fn interceptor<I, O>(&self, method: &Method<I, O>) -> Result<Option<Arc<Interceptor<I, O>>>>
    where
        I: Send + Sync + 'static,
        O: Send + Sync + 'static,
    {
        let Some(binding) = self.bindings.lock().get(method.name()).cloned() else {
            return Ok(None);
        };
        Arc::clone(&binding.interceptor)
            .downcast::<Interceptor<I, O>>()
            .map(Some)
            .map_err(|_| Error::method_type_mismatch(binding.service, method.name()))
    }

    /// Route a call to the stand-in for `method`.
    ///
    /// Returns `None` when no stand-in is installed or its script is
    /// exhausted.
    ///
    /// # Panics
    ///
    /// Panics if the stand-in was installed with different request or
    /// response types. The builder rejects those at setup, so this only
    /// happens when a service dispatches through a descriptor it does not
    /// declare in [`Service::METHODS`](crate::Service::METHODS).
    pub fn dispatch<I, O>(&self, method: &Method<I, O>, args: I) -> Option<Request<O>>
    where
        I: Clone + Send + Sync + 'static,
        O: Clone + Serialize + Send + Sync + 'static,
    {
        tracing::trace!(method = method.name(), "dispatching call");
        match self.interceptor(method) {
            Ok(Some(interceptor)) => interceptor.call(args),
            Ok(None) => None,
            Err(err) => panic!("{err}"),
        }
    }

    /// Whether a stand-in is installed under `name`.
    #[must_use]
    pub fn is_mocked(&self, name: &str) -> bool {
        self.bindings.lock().contains_key(name)
    }

    /// Names of all methods with a stand-in, sorted.
    #[must_use]
    pub fn mocked_methods(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.bindings.lock().keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodTable")
            .field("mocked", &self.mocked_methods())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Cardinality, ResponseEntry};

    const GET: Method<String, u32> = Method::new("get");
    const GET_AS_TEXT: Method<String, String> = Method::new("get");
    const PUT: Method<u32, ()> = Method::new("put");

    fn capture(method: &'static str) -> Capture {
        Capture {
            service: "Store",
            method,
            ..Capture::default()
        }
    }

    #[test]
    fn test_dispatch_without_stand_in_is_none() {
        let table = MethodTable::new();
        assert!(table.dispatch(&GET, "k".into()).is_none());
        assert!(!table.is_mocked("get"));
    }

    #[test]
    fn test_dispatch_reaches_installed_stand_in() {
        let table = MethodTable::new();
        let stand_in = table.install(GET, capture("get"));
        stand_in.schedule(Cardinality::Always, ResponseEntry::resolve(9));

        let request = table.dispatch(&GET, "k".into()).unwrap();

        assert_eq!(request.into_result(), Ok(9));
        assert_eq!(stand_in.call_count(), 1);
    }

    #[test]
    fn test_reinstall_replaces_and_resets_script() {
        let table = MethodTable::new();
        let first = table.install(GET, capture("get"));
        first.schedule(Cardinality::Always, ResponseEntry::resolve(1));

        let second = table.install(GET, capture("get"));

        assert!(table.dispatch(&GET, "k".into()).is_none());
        assert_eq!(first.call_count(), 0);
        assert_eq!(second.call_count(), 1);
    }

    #[test]
    fn test_methods_are_isolated() {
        let table = MethodTable::new();
        table
            .install(GET, capture("get"))
            .schedule(Cardinality::Always, ResponseEntry::resolve(1));

        assert!(table.dispatch(&PUT, 5).is_none());
        assert_eq!(table.mocked_methods(), vec!["get"]);
    }

    #[test]
    fn test_type_mismatch_is_reported() {
        let table = MethodTable::new();
        table.install(GET, capture("get"));

        let err = table.interceptor(&GET_AS_TEXT).unwrap_err();
        assert!(matches!(err, Error::MethodTypeMismatch { .. }));
    }

    #[test]
    #[should_panic(expected = "Method type mismatch")]
    fn test_dispatch_type_mismatch_panics() {
        let table = MethodTable::new();
        table.install(GET, capture("get"));

        table.dispatch(&GET_AS_TEXT, "k".into());
    }
}
