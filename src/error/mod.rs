//! Error definitions
//!
//! This module provides the two error types of client-mock:
//!
//! - [`Error`] - configuration mistakes made while building a mock
//! - [`ServiceError`] - the failure value a scripted rejection delivers

use serde::Serialize;
use thiserror::Error;

/// Main error type for client-mock.
///
/// These are test-authoring mistakes. They are reported when the mock is
/// configured, never from a mocked call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The service does not declare a method with this name.
    #[error("Unknown method: `{service}` has no method named `{method}`")]
    UnknownMethod {
        /// Name of the service type.
        service: &'static str,
        /// The method name that was requested.
        method: String,
    },

    /// The method was installed with different request or response types.
    #[error("Method type mismatch: `{service}.{method}` does not match the declared request/response types")]
    MethodTypeMismatch {
        /// Name of the service type.
        service: &'static str,
        /// The method name.
        method: String,
    },
}

impl Error {
    /// Create an unknown method error.
    #[must_use]
    pub fn unknown_method(service: &'static str, method: impl Into<String>) -> Self {
        Self::UnknownMethod {
            service,
            method: method.into(),
        }
    }

    /// Create a method type mismatch error.
    #[must_use]
    pub fn method_type_mismatch(service: &'static str, method: impl Into<String>) -> Self {
        Self::MethodTypeMismatch {
            service,
            method: method.into(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// The error carried by a rejected request.
///
/// Plain text passed to `reject` is wrapped into a `ServiceError` with only a
/// message. Codes and status codes are available for tests that branch on
/// them.
///
/// # Example
///
/// ```rust
/// use client_mock::ServiceError;
///
/// let err = ServiceError::new("throttled")
///     .with_code("ThrottlingException")
///     .with_status_code(400);
///
/// assert_eq!(err.to_string(), "throttled");
/// assert_eq!(err.code(), Some("ThrottlingException"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
#[serde(rename_all = "camelCase")]
pub struct ServiceError {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_code: Option<u16>,
}

impl ServiceError {
    /// Create an error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            status_code: None,
        }
    }

    /// Wrap any error value, keeping its display text as the message.
    #[must_use]
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        Self::new(err.to_string())
    }

    /// Set the service error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the HTTP status code.
    #[must_use]
    pub fn with_status_code(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }

    /// The error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The service error code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// The HTTP status code, if any.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }
}

impl From<&str> for ServiceError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for ServiceError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}
