//! Resolving a mock target to the instance whose methods get intercepted.

use std::fmt;
use std::sync::Arc;

use super::Service;

/// What a test wants to intercept.
pub enum Target<S: Service> {
    /// Construct a new instance with this configuration.
    Construct(S::Config),
    /// Use an instance the test already holds.
    Instance(Arc<S>),
}

impl<S: Service> Target<S> {
    /// Construct a new instance with the default configuration.
    #[must_use]
    pub fn of_type() -> Self {
        Self::Construct(S::Config::default())
    }

    /// Construct a new instance with the given configuration.
    #[must_use]
    pub fn with_config(config: S::Config) -> Self {
        Self::Construct(config)
    }

    /// Use an existing instance.
    #[must_use]
    pub fn instance(instance: impl Into<Arc<S>>) -> Self {
        Self::Instance(instance.into())
    }
}

impl<S: Service> From<Arc<S>> for Target<S> {
    fn from(instance: Arc<S>) -> Self {
        Self::Instance(instance)
    }
}

impl<S: Service> fmt::Debug for Target<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Construct(config) => f.debug_tuple("Construct").field(config).finish(),
            Self::Instance(_) => f.debug_tuple("Instance").field(&S::NAME).finish(),
        }
    }
}

/// The instance a target resolved to.
pub struct Resolution<S: Service> {
    /// The instance to intercept.
    pub instance: Arc<S>,
    /// The configuration it was built with, if it was constructed.
    pub config: Option<S::Config>,
}

/// Turns a [`Target`] into exactly one instance.
pub trait InstanceResolver<S: Service> {
    /// Resolve `target`.
    ///
    /// An instance target must come back unchanged, as the same allocation.
    fn resolve(&self, target: Target<S>) -> Resolution<S>;
}

/// Builds instances with [`Service::construct`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultResolver;

impl<S: Service> InstanceResolver<S> for DefaultResolver {
    fn resolve(&self, target: Target<S>) -> Resolution<S> {
        match target {
            Target::Construct(config) => Resolution {
                instance: Arc::new(S::construct(config.clone())),
                config: Some(config),
            },
            Target::Instance(instance) => Resolution {
                instance,
                config: None,
            },
        }
    }
}

/// Builds instances with a closure. See [`resolver_fn`].
#[derive(Clone, Copy)]
pub struct FnResolver<F> {
    construct: F,
}

/// Create a resolver that builds instances with `construct`.
///
/// Instance targets are still passed through untouched.
///
/// # Example
///
/// ```rust,ignore
/// let resolver = resolver_fn(|config: SecretsManagerConfig| {
///     SecretsManager::with_endpoint(config, "http://localhost:4566")
/// });
/// let builder = Builder::with_resolver(&resolver, Target::of_type(), MockOptions::new());
/// ```
pub fn resolver_fn<S, F>(construct: F) -> FnResolver<F>
where
    S: Service,
    F: Fn(S::Config) -> S,
{
    FnResolver { construct }
}

impl<S, F> InstanceResolver<S> for FnResolver<F>
where
    S: Service,
    F: Fn(S::Config) -> S,
{
    fn resolve(&self, target: Target<S>) -> Resolution<S> {
        match target {
            Target::Construct(config) => Resolution {
                instance: Arc::new((self.construct)(config.clone())),
                config: Some(config),
            },
            Target::Instance(instance) => Resolution {
                instance,
                config: None,
            },
        }
    }
}

impl<F> fmt::Debug for FnResolver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnResolver").finish_non_exhaustive()
    }
}
