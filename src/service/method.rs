//! Typed method descriptors.

use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;

/// Names one interceptable operation and its request and response types.
///
/// Descriptors are declared as associated constants on the service and used
/// both to install a stand-in and to dispatch a call.
pub struct Method<I, O> {
    name: &'static str,
    _types: PhantomData<fn(I) -> O>,
}

impl<I, O> Method<I, O> {
    /// Create a descriptor for the method called `name`.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _types: PhantomData,
        }
    }

    /// The method name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<I: 'static, O: 'static> Method<I, O> {
    /// Type-erased declaration of this method, for [`Service::METHODS`].
    ///
    /// [`Service::METHODS`]: super::Service::METHODS
    #[must_use]
    pub const fn info(&self) -> MethodInfo {
        MethodInfo {
            name: self.name,
            request: TypeId::of::<I>,
            response: TypeId::of::<O>,
        }
    }
}

impl<I, O> Clone for Method<I, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, O> Copy for Method<I, O> {}

impl<I, O> fmt::Debug for Method<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Method").field(&self.name).finish()
    }
}

/// A declared method: its name and its request and response types.
#[derive(Clone, Copy)]
pub struct MethodInfo {
    name: &'static str,
    request: fn() -> TypeId,
    response: fn() -> TypeId,
}

impl MethodInfo {
    /// The method name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Check that `method` has this name and these request and response
    /// types.
    #[must_use]
    pub fn matches<I: 'static, O: 'static>(&self, method: &Method<I, O>) -> bool {
        self.name == method.name()
            && (self.request)() == TypeId::of::<I>()
            && (self.response)() == TypeId::of::<O>()
    }
}

impl fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MethodInfo").field(&self.name).finish()
    }
}
