//! Service abstractions.
//!
//! A *service* is a client type whose request-style methods can be replaced
//! by stand-ins. Instead of patching methods at runtime, each service owns a
//! [`MethodTable`] and routes its interceptable methods through it:
//!
//! ```rust
//! use client_mock::mock::MethodTable;
//! use client_mock::request::Request;
//! use client_mock::service::{Method, MethodInfo, Service};
//!
//! #[derive(Default)]
//! pub struct Sts {
//!     methods: MethodTable,
//! }
//!
//! impl Sts {
//!     pub const GET_CALLER_IDENTITY: Method<(), String> = Method::new("get_caller_identity");
//!
//!     pub fn get_caller_identity(&self) -> Option<Request<String>> {
//!         self.methods.dispatch(&Self::GET_CALLER_IDENTITY, ())
//!     }
//! }
//!
//! impl Service for Sts {
//!     type Config = ();
//!     const NAME: &'static str = "Sts";
//!     const METHODS: &'static [MethodInfo] = &[Self::GET_CALLER_IDENTITY.info()];
//!
//!     fn construct(_config: ()) -> Self {
//!         Self::default()
//!     }
//!
//!     fn methods(&self) -> &MethodTable {
//!         &self.methods
//!     }
//! }
//! ```

mod constructor;
mod method;
mod resolver;

pub use constructor::{DirectFactory, ServiceConstructor, ServiceFactory};
pub use method::{Method, MethodInfo};
pub use resolver::{resolver_fn, DefaultResolver, FnResolver, InstanceResolver, Resolution, Target};

use std::fmt::Debug;

use crate::error::{Error, Result};
use crate::mock::MethodTable;

/// A client type whose methods can be intercepted.
pub trait Service: Send + Sync + 'static {
    /// Construction parameters (credentials, region, endpoint...).
    ///
    /// Passed through verbatim; omitted fields take the client's defaults.
    type Config: Clone + Debug + Default + Send + Sync + 'static;

    /// Name used in errors, logs and snapshots.
    const NAME: &'static str;

    /// The methods that may be mocked, built with [`Method::info`].
    const METHODS: &'static [MethodInfo];

    /// Build a new instance.
    fn construct(config: Self::Config) -> Self;

    /// The instance's stand-in table.
    fn methods(&self) -> &MethodTable;
}

/// Check that `method` is declared by the service with the same request and
/// response types.
pub(crate) fn check_declared<S, I, O>(method: &Method<I, O>) -> Result<()>
where
    S: Service,
    I: 'static,
    O: 'static,
{
    match S::METHODS.iter().find(|info| info.name() == method.name()) {
        None => Err(Error::unknown_method(S::NAME, method.name())),
        Some(info) if info.matches(method) => Ok(()),
        Some(_) => Err(Error::method_type_mismatch(S::NAME, method.name())),
    }
}
