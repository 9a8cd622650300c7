//! Error type shared by registration, generation and dispatch.
//!
//! A request that matches no route is *not* an error: [`Router::parse`](crate::router::Router::parse)
//! returns `None` and the caller decides what to send (usually a 404). Everything in
//! [`RouterError`] is a programmer error surfaced with enough context to find the
//! offending route or handler.

use thiserror::Error;

/// Errors raised by the routing engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// A route was constructed with an empty key, path or handler reference,
    /// or with a method that is not a standard HTTP verb.
    #[error("invalid route '{key}': {reason}")]
    InvalidRoute { key: String, reason: String },

    /// A constraint fragment or parameter name could not be compiled into a pattern.
    #[error("invalid pattern for route '{key}': {reason}")]
    InvalidPattern { key: String, reason: String },

    /// The handler reference does not split into `Target@action`.
    #[error("invalid handler reference '{handler}': expected 'Target@action'")]
    InvalidHandlerRef { handler: String },

    /// No route is registered under the requested key.
    #[error("route '{0}' not found")]
    RouteNotFound(String),

    /// A supplied value does not satisfy the parameter's constraint.
    #[error(
        "argument '{parameter}' does not satisfy constraint '{pattern}' of route path '{path}'"
    )]
    ArgumentConstraintViolation {
        parameter: String,
        pattern: String,
        path: String,
    },

    /// Strict generation omitted a parameter the route path requires.
    #[error("missing argument '{parameter}' for route path '{path}'")]
    MissingArgument { parameter: String, path: String },

    /// The handler declares a required parameter that neither the captures,
    /// the defaults nor the query string provide.
    #[error("handler '{handler}' requires parameter '{parameter}' which was not supplied")]
    MissingRequiredDispatchParameter { parameter: String, handler: String },

    /// No handler is registered for the route's handler reference.
    #[error("no handler registered for '{0}'")]
    HandlerNotFound(String),

    /// An operation relative to the current request was attempted without one.
    #[error("no current request available")]
    NoCurrentRequest,

    /// A generated path could not be turned into a valid URI.
    #[error("invalid uri '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = RouterError> = std::result::Result<T, E>;
