//! The fluent entry point.
//!
//! [`on`] resolves a target to one instance and returns a [`Builder`].
//! `Builder::mock` installs a stand-in and returns a [`MethodConfigurator`]
//! for scripting it; `and()` leads back to the builder so more methods on
//! the same instance can be mocked.
//!
//! # Example
//!
//! ```rust,ignore
//! use client_mock::{on, Target};
//!
//! let m = on(Target::<SecretsManager>::of_type())
//!     .mock(SecretsManager::GET_SECRET_VALUE)
//!     .resolve(GetSecretValueResponse::with_secret("foo-bar"))
//!     .and()
//!     .mock(SecretsManager::CREATE_SECRET)
//!     .reject_once("already exists");
//!
//! let sm = m.and().constructor().create_default();
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{Result, ServiceError};
use crate::mock::{Cardinality, Interceptor, Response, ResponseEntry};
use crate::service::{
    self, DefaultResolver, InstanceResolver, Method, Service, ServiceConstructor, Target,
};
use crate::snapshot::{self, Capture, SnapshotSink};

/// Builder-wide settings.
///
/// # Example
///
/// ```rust
/// use client_mock::{MockOptions, SnapshotRecorder};
///
/// let options = MockOptions::new()
///     .snapshot(false)
///     .sink(SnapshotRecorder::new());
///
/// assert!(!options.snapshot_enabled());
/// ```
#[derive(Clone)]
pub struct MockOptions {
    snapshot: bool,
    sink: Option<Arc<dyn SnapshotSink>>,
}

impl MockOptions {
    /// Create the default options: capture on, thread sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable snapshot capture for every stand-in.
    #[must_use]
    pub fn snapshot(mut self, enabled: bool) -> Self {
        self.snapshot = enabled;
        self
    }

    /// Send snapshots to `sink` instead of the thread's current sink.
    #[must_use]
    pub fn sink(mut self, sink: impl SnapshotSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Send snapshots to a shared sink.
    #[must_use]
    pub fn shared_sink(mut self, sink: Arc<dyn SnapshotSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Whether capture is enabled by default.
    #[must_use]
    pub fn snapshot_enabled(&self) -> bool {
        self.snapshot
    }
}

impl Default for MockOptions {
    fn default() -> Self {
        Self {
            snapshot: true,
            sink: None,
        }
    }
}

impl fmt::Debug for MockOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockOptions")
            .field("snapshot", &self.snapshot)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

/// Start mocking `target` with default options.
///
/// # Example
///
/// ```rust,ignore
/// let m = on(Target::<Sts>::of_type())
///     .mock(Sts::GET_CALLER_IDENTITY)
///     .resolve(identity);
/// ```
pub fn on<S: Service>(target: impl Into<Target<S>>) -> Builder<S> {
    Builder::new(target, MockOptions::default())
}

/// Start mocking `target` with the given options.
pub fn on_with<S: Service>(target: impl Into<Target<S>>, options: MockOptions) -> Builder<S> {
    Builder::new(target, options)
}

/// Mocks methods on one resolved instance.
///
/// Clones refer to the same instance.
pub struct Builder<S: Service> {
    inner: Arc<BuilderInner<S>>,
}

struct BuilderInner<S: Service> {
    instance: Arc<S>,
    constructor: ServiceConstructor<S>,
    config: Option<S::Config>,
    snapshot: bool,
    sink: Option<Arc<dyn SnapshotSink>>,
}

impl<S: Service> Builder<S> {
    /// Resolve `target` with [`DefaultResolver`].
    pub fn new(target: impl Into<Target<S>>, options: MockOptions) -> Self {
        Self::with_resolver(&DefaultResolver, target, options)
    }

    /// Resolve `target` with a custom resolver.
    pub fn with_resolver<R>(resolver: &R, target: impl Into<Target<S>>, options: MockOptions) -> Self
    where
        R: InstanceResolver<S> + ?Sized,
    {
        let resolution = resolver.resolve(target.into());
        let sink = options.sink.or_else(snapshot::current);
        tracing::debug!(
            service = S::NAME,
            constructed = resolution.config.is_some(),
            snapshot = options.snapshot,
            "resolved mock target"
        );
        Self {
            inner: Arc::new(BuilderInner {
                constructor: ServiceConstructor::new(Arc::clone(&resolution.instance)),
                instance: resolution.instance,
                config: resolution.config,
                snapshot: options.snapshot,
                sink,
            }),
        }
    }

    /// Install a stand-in for `method` and start scripting it.
    ///
    /// # Panics
    ///
    /// Panics if the service does not declare `method` with these request
    /// and response types. Use [`try_mock`](Self::try_mock) to get the error
    /// instead.
    pub fn mock<I, O>(&self, method: Method<I, O>) -> MethodConfigurator<S, I, O>
    where
        I: Clone + Send + Sync + 'static,
        O: Clone + Serialize + Send + Sync + 'static,
    {
        match self.try_mock(method) {
            Ok(configurator) => configurator,
            Err(err) => panic!("{err}"),
        }
    }

    /// Install a stand-in for `method` and start scripting it.
    ///
    /// Installing twice for the same method replaces the first stand-in
    /// and its script.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMethod`](crate::Error::UnknownMethod) if the
    /// service does not declare `method`, and
    /// [`Error::MethodTypeMismatch`](crate::Error::MethodTypeMismatch) if it
    /// declares it with other request or response types.
    pub fn try_mock<I, O>(&self, method: Method<I, O>) -> Result<MethodConfigurator<S, I, O>>
    where
        I: Clone + Send + Sync + 'static,
        O: Clone + Serialize + Send + Sync + 'static,
    {
        service::check_declared::<S, I, O>(&method)?;
        let capture = Capture {
            service: S::NAME,
            method: method.name(),
            enabled: self.inner.snapshot,
            sink: self.inner.sink.clone(),
        };
        let interceptor = self.inner.instance.methods().install(method, capture);
        Ok(MethodConfigurator {
            builder: self.clone(),
            interceptor,
        })
    }

    /// The resolved instance.
    #[must_use]
    pub fn service(&self) -> Arc<S> {
        Arc::clone(&self.inner.instance)
    }

    /// The constructor stand-in that hands out the resolved instance.
    #[must_use]
    pub fn constructor(&self) -> &ServiceConstructor<S> {
        &self.inner.constructor
    }

    /// The configuration the instance was built with.
    ///
    /// `None` when the target was an existing instance.
    #[must_use]
    pub fn constructed_with(&self) -> Option<&S::Config> {
        self.inner.config.as_ref()
    }
}

impl<S: Service> Clone for Builder<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Service> fmt::Debug for Builder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("service", &S::NAME)
            .field("config", &self.inner.config)
            .field("mocked", &self.inner.instance.methods().mocked_methods())
            .finish()
    }
}

/// Scripts the stand-in for one method.
pub struct MethodConfigurator<S: Service, I, O> {
    builder: Builder<S>,
    interceptor: Arc<Interceptor<I, O>>,
}

impl<S, I, O> MethodConfigurator<S, I, O>
where
    S: Service,
    I: Clone + Send + Sync + 'static,
    O: Clone + Serialize + Send + Sync + 'static,
{
    /// Answer every call with `response` once no one-shot response is
    /// pending. Replaces any previous default.
    #[must_use]
    pub fn resolve(self, response: impl Into<Response<O>>) -> Self {
        self.schedule(Cardinality::Always, ResponseEntry::resolve(response))
    }

    /// Fail every call with `error` once no one-shot response is pending.
    /// Replaces any previous default.
    #[must_use]
    pub fn reject(self, error: impl Into<Response<ServiceError>>) -> Self {
        self.schedule(Cardinality::Always, ResponseEntry::reject(error))
    }

    /// Answer the next unanswered call with `response`.
    #[must_use]
    pub fn resolve_once(self, response: impl Into<Response<O>>) -> Self {
        self.schedule(Cardinality::Once, ResponseEntry::resolve(response))
    }

    /// Fail the next unanswered call with `error`.
    #[must_use]
    pub fn reject_once(self, error: impl Into<Response<ServiceError>>) -> Self {
        self.schedule(Cardinality::Once, ResponseEntry::reject(error))
    }

    fn schedule(self, cardinality: Cardinality, entry: ResponseEntry<O>) -> Self {
        self.interceptor.schedule(cardinality, entry);
        self
    }

    /// Back to the builder, to mock another method on the same instance.
    #[must_use]
    pub fn and(&self) -> Builder<S> {
        self.builder.clone()
    }

    /// The resolved instance.
    #[must_use]
    pub fn service(&self) -> Arc<S> {
        self.builder.service()
    }

    /// The stand-in, for call count and argument assertions.
    #[must_use]
    pub fn interceptor(&self) -> &Arc<Interceptor<I, O>> {
        &self.interceptor
    }

    /// Number of calls the stand-in received.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.interceptor.call_count()
    }
}

impl<S: Service, I, O> fmt::Debug for MethodConfigurator<S, I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodConfigurator")
            .field("service", &S::NAME)
            .field("method", &self.interceptor.method())
            .finish()
    }
}
