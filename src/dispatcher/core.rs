use serde::Serialize;
use serde_json::Value;
use smallvec::SmallVec;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{Result, RouterError};
use crate::params::RouteParams;
use crate::route::Route;

/// Maximum inline response headers before heap allocation.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// The request type handlers receive: an `http::Request` whose body, if any,
/// has already been decoded to JSON by the hosting server.
pub type ServerRequest = http::Request<Option<Value>>;

/// Response produced by a handler. The router returns it verbatim.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HandlerResponse {
    pub status: u16,
    #[serde(skip_serializing)]
    pub headers: HeaderVec,
    pub body: Value,
}

impl HandlerResponse {
    #[must_use]
    pub fn new(status: u16, headers: HeaderVec, body: Value) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// JSON response with a `content-type` header.
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), "application/json".to_string()));
        Self {
            status,
            headers,
            body,
        }
    }

    #[must_use]
    pub fn ok_json(body: Value) -> Self {
        Self::json(200, body)
    }

    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "error": message }))
    }

    #[must_use]
    pub fn not_found() -> Self {
        Self::error(404, "Not Found")
    }

    /// Get a header by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or replace a header.
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }
}

/// Shared services a handler can reach during dispatch.
pub trait Container: Send + Sync {
    /// Look up a service by name.
    fn get(&self, service: &str) -> Option<Arc<dyn Any + Send + Sync>>;
}

/// Name → service map implementing [`Container`].
#[derive(Default, Clone)]
pub struct ServiceContainer {
    services: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl ServiceContainer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<T: Any + Send + Sync>(&mut self, service: &str, value: T) {
        self.services.insert(service.to_string(), Arc::new(value));
    }

    #[must_use]
    pub fn with<T: Any + Send + Sync>(mut self, service: &str, value: T) -> Self {
        self.insert(service, value);
        self
    }
}

impl Container for ServiceContainer {
    fn get(&self, service: &str) -> Option<Arc<dyn Any + Send + Sync>> {
        self.services.get(service).cloned()
    }
}

impl fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("services", &self.services.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Per-call context handed to a handler alongside its parameters and request.
#[derive(Clone, Copy)]
pub struct HandlerContext<'a> {
    pub route: &'a Route,
    /// Target half of the handler reference (`Target` in `Target@action`).
    pub target: &'a str,
    /// Action half of the handler reference.
    pub action: &'a str,
    pub container: Option<&'a dyn Container>,
}

impl HandlerContext<'_> {
    /// Fetch a typed service from the container.
    #[must_use]
    pub fn service<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.container?.get(name)?.downcast::<T>().ok()
    }
}

impl fmt::Debug for HandlerContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerContext")
            .field("route", &self.route.key())
            .field("target", &self.target)
            .field("action", &self.action)
            .field("container", &self.container.is_some())
            .finish()
    }
}

/// Fixed handler contract: `(context, params, request) -> response`.
pub trait Handler: Send + Sync {
    fn handle(
        &self,
        ctx: &HandlerContext<'_>,
        params: &RouteParams,
        request: &ServerRequest,
    ) -> HandlerResponse;
}

impl<F> Handler for F
where
    F: Fn(&HandlerContext<'_>, &RouteParams, &ServerRequest) -> HandlerResponse + Send + Sync,
{
    fn handle(
        &self,
        ctx: &HandlerContext<'_>,
        params: &RouteParams,
        request: &ServerRequest,
    ) -> HandlerResponse {
        self(ctx, params, request)
    }
}

/// A parameter a handler declares it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    pub name: String,
    pub required: bool,
    /// Value bound when an optional parameter is absent.
    pub default: Option<String>,
}

impl ParamDecl {
    #[must_use]
    pub fn required(name: &str) -> Self {
        Self {
            name: name.to_string(),
            required: true,
            default: None,
        }
    }

    #[must_use]
    pub fn optional(name: &str) -> Self {
        Self {
            name: name.to_string(),
            required: false,
            default: None,
        }
    }

    #[must_use]
    pub fn default_value(mut self, value: impl ToString) -> Self {
        self.default = Some(value.to_string());
        self
    }
}

#[derive(Clone)]
pub(crate) struct RegisteredHandler {
    pub(crate) handler: Arc<dyn Handler>,
    pub(crate) params: Vec<ParamDecl>,
}

impl RegisteredHandler {
    /// Apply declarations in order: present values bind as-is, optional ones fall
    /// back to their own default, a missing required one is an error.
    pub(crate) fn bind(&self, handler_ref: &str, mut params: RouteParams) -> Result<RouteParams> {
        for decl in &self.params {
            if params.contains(&decl.name) {
                continue;
            }
            if decl.required {
                return Err(RouterError::MissingRequiredDispatchParameter {
                    parameter: decl.name.clone(),
                    handler: handler_ref.to_string(),
                });
            }
            if let Some(default) = &decl.default {
                params.insert(&decl.name, default);
            }
        }
        Ok(params)
    }
}

/// Handler reference → handler, plus the optional service container.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, RegisteredHandler>,
    container: Option<Arc<dyn Container>>,
}

impl HandlerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_container(mut self, container: Arc<dyn Container>) -> Self {
        self.container = Some(container);
        self
    }

    /// Register a closure handler with no declared parameters.
    pub fn register<F>(&mut self, handler_ref: &str, handler: F) -> &mut Self
    where
        F: Fn(&HandlerContext<'_>, &RouteParams, &ServerRequest) -> HandlerResponse
            + Send
            + Sync
            + 'static,
    {
        self.register_handler(handler_ref, Vec::new(), handler)
    }

    /// Register a closure handler declaring the parameters it binds.
    pub fn register_with_params<F>(
        &mut self,
        handler_ref: &str,
        params: Vec<ParamDecl>,
        handler: F,
    ) -> &mut Self
    where
        F: Fn(&HandlerContext<'_>, &RouteParams, &ServerRequest) -> HandlerResponse
            + Send
            + Sync
            + 'static,
    {
        self.register_handler(handler_ref, params, handler)
    }

    /// Register any [`Handler`] implementation.
    ///
    /// Registering an existing reference replaces the previous handler.
    pub fn register_handler<H>(
        &mut self,
        handler_ref: &str,
        params: Vec<ParamDecl>,
        handler: H,
    ) -> &mut Self
    where
        H: Handler + 'static,
    {
        if self.handlers.contains_key(handler_ref) {
            warn!(
                handler = %handler_ref,
                total_handlers = self.handlers.len(),
                "Replaced existing handler"
            );
        }
        self.handlers.insert(
            handler_ref.to_string(),
            RegisteredHandler {
                handler: Arc::new(handler),
                params,
            },
        );
        info!(
            handler = %handler_ref,
            total_handlers = self.handlers.len(),
            "Handler registered successfully"
        );
        self
    }

    #[must_use]
    pub fn contains(&self, handler_ref: &str) -> bool {
        self.handlers.contains_key(handler_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub(crate) fn lookup(&self, handler_ref: &str) -> Result<&RegisteredHandler> {
        self.handlers
            .get(handler_ref)
            .ok_or_else(|| RouterError::HandlerNotFound(handler_ref.to_string()))
    }

    pub(crate) fn container(&self) -> Option<&dyn Container> {
        self.container.as_deref()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("container", &self.container.is_some())
            .finish()
    }
}
