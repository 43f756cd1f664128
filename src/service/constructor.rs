//! Construction seams for code under test.
//!
//! Code that creates its own clients takes a [`ServiceFactory`] instead of
//! calling a constructor. Production wiring passes [`DirectFactory`]; tests
//! pass the builder's [`ServiceConstructor`], which hands back the mocked
//! instance and records the configuration it was asked for.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::Service;
use crate::mock::{Invocation, InvocationLog};

/// Creates service instances.
pub trait ServiceFactory<S: Service>: Send + Sync {
    /// Create (or hand out) an instance for `config`.
    fn create(&self, config: S::Config) -> Arc<S>;

    /// Create an instance with the default configuration.
    fn create_default(&self) -> Arc<S> {
        self.create(S::Config::default())
    }
}

/// Constructs a fresh instance on every call.
pub struct DirectFactory<S> {
    _service: PhantomData<fn() -> S>,
}

impl<S: Service> DirectFactory<S> {
    /// Create the factory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _service: PhantomData,
        }
    }
}

impl<S: Service> Default for DirectFactory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Service> ServiceFactory<S> for DirectFactory<S> {
    fn create(&self, config: S::Config) -> Arc<S> {
        Arc::new(S::construct(config))
    }
}

impl<S> fmt::Debug for DirectFactory<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectFactory").finish()
    }
}

/// Stands in for a service's constructor.
///
/// Every construction returns the same resolved instance, so stand-ins
/// installed through the builder are visible to code that builds its own
/// client. Each call is logged with the configuration passed in.
///
/// Clones share the instance and the log.
pub struct ServiceConstructor<S: Service> {
    instance: Arc<S>,
    calls: InvocationLog<S::Config>,
}

impl<S: Service> ServiceConstructor<S> {
    pub(crate) fn new(instance: Arc<S>) -> Self {
        Self {
            instance,
            calls: InvocationLog::new(),
        }
    }

    /// Record a construction with `config` and return the mocked instance.
    pub fn construct(&self, config: S::Config) -> Arc<S> {
        tracing::trace!(service = S::NAME, ?config, "constructor called");
        self.calls.record(config);
        Arc::clone(&self.instance)
    }

    /// Number of constructions.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.call_count()
    }

    /// Check if the constructor was called exactly N times.
    #[must_use]
    pub fn was_called_times(&self, n: usize) -> bool {
        self.calls.was_called_times(n)
    }

    /// All recorded constructions.
    #[must_use]
    pub fn calls(&self) -> Vec<Invocation<S::Config>> {
        self.calls.calls()
    }

    /// The Nth construction (0-indexed).
    #[must_use]
    pub fn nth_call(&self, n: usize) -> Option<Invocation<S::Config>> {
        self.calls.nth_call(n)
    }

    /// The underlying log.
    #[must_use]
    pub fn log(&self) -> &InvocationLog<S::Config> {
        &self.calls
    }
}

impl<S: Service> ServiceFactory<S> for ServiceConstructor<S> {
    fn create(&self, config: S::Config) -> Arc<S> {
        self.construct(config)
    }
}

impl<S: Service> Clone for ServiceConstructor<S> {
    fn clone(&self) -> Self {
        Self {
            instance: Arc::clone(&self.instance),
            calls: self.calls.clone(),
        }
    }
}

impl<S: Service> fmt::Debug for ServiceConstructor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConstructor")
            .field("service", &S::NAME)
            .field("calls", &self.calls)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MethodTable;
    use crate::service::{Method, MethodInfo};

    #[derive(Default)]
    struct Queue {
        methods: MethodTable,
    }

    impl Queue {
        const SEND_MESSAGE: Method<String, String> = Method::new("send_message");
    }

    impl Service for Queue {
        type Config = Option<String>;
        const NAME: &'static str = "Queue";
        const METHODS: &'static [MethodInfo] = &[Self::SEND_MESSAGE.info()];

        fn construct(_config: Option<String>) -> Self {
            Self::default()
        }

        fn methods(&self) -> &MethodTable {
            &self.methods
        }
    }

    #[test]
    fn test_constructor_returns_same_instance_and_records() {
        let instance = Arc::new(Queue::default());
        let constructor = ServiceConstructor::new(Arc::clone(&instance));

        let a = constructor.construct(Some("eu-west-1".into()));
        let b = constructor.create_default();

        assert!(Arc::ptr_eq(&a, &instance));
        assert!(Arc::ptr_eq(&b, &instance));
        assert!(constructor.was_called_times(2));
        assert_eq!(constructor.nth_call(0).unwrap().args.as_deref(), Some("eu-west-1"));
        assert_eq!(constructor.nth_call(1).unwrap().args, None);
    }

    #[test]
    fn test_constructor_clones_share_log() {
        let constructor = ServiceConstructor::new(Arc::new(Queue::default()));
        let view = constructor.clone();

        constructor.construct(None);

        assert_eq!(view.call_count(), 1);
    }

    #[test]
    fn test_direct_factory_builds_fresh_instances() {
        let factory = DirectFactory::<Queue>::new();

        let a = factory.create_default();
        let b = factory.create_default();

        assert!(!Arc::ptr_eq(&a, &b));
    }
}
