//! Router core module - request matching, dispatch and reverse generation.

use http::uri::{PathAndQuery, Uri};
use http::{header, Request};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

use crate::collection::RouteCollection;
use crate::dispatcher::{HandlerContext, HandlerRegistry, HandlerResponse, ServerRequest};
use crate::error::{Result, RouterError};
use crate::params::RouteParams;
use crate::route::Route;
use crate::runtime_config::{normalize_base_path, RouterConfig};

/// Matches slower than this are logged at `warn`.
const SLOW_MATCH: Duration = Duration::from_millis(1);

/// Result of successfully matching a request to a route.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    /// Named captures merged with the route's defaults.
    pub params: RouteParams,
    /// Lower-cased effective method (after the override header).
    pub method: String,
    /// Request path relative to the base path.
    pub path: String,
}

impl RouteMatch<'_> {
    #[must_use]
    pub fn key(&self) -> &str {
        self.route.key()
    }

    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }
}

/// Matching and dispatch engine over a sealed [`RouteCollection`].
///
/// Holds configuration only; every operation that needs a request takes it as an
/// argument, so one router can be cloned and shared across threads freely.
#[derive(Clone, Debug)]
pub struct Router {
    routes: Arc<RouteCollection>,
    handlers: Arc<HandlerRegistry>,
    config: RouterConfig,
}

impl Router {
    /// Seal `routes` and build a router with no handlers and default configuration.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPattern`] when a route pattern fails to compile.
    pub fn new(routes: RouteCollection) -> Result<Self> {
        Ok(Self {
            routes: routes.seal()?,
            handlers: Arc::new(HandlerRegistry::new()),
            config: RouterConfig::default(),
        })
    }

    #[must_use]
    pub fn with_handlers(mut self, handlers: HandlerRegistry) -> Self {
        self.handlers = Arc::new(handlers);
        self
    }

    #[must_use]
    pub fn with_config(mut self, mut config: RouterConfig) -> Self {
        config.base_path = normalize_base_path(&config.base_path);
        self.config = config;
        self
    }

    pub fn set_base_path(&mut self, base_path: &str) {
        self.config.base_path = normalize_base_path(base_path);
    }

    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.config.base_path
    }

    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    #[must_use]
    pub fn routes(&self) -> &RouteCollection {
        &self.routes
    }

    /// Request path relative to the base path.
    ///
    /// Returns `None` when the path lies outside the base path. Empty and
    /// slash-only results collapse to `/`.
    #[must_use]
    pub fn effective_path<'p>(&self, path: &'p str) -> Option<&'p str> {
        let base = self.config.base_path.as_str();
        let rest = if base.is_empty() {
            path
        } else {
            let rest = path.strip_prefix(base)?;
            if !rest.is_empty() && !rest.starts_with('/') {
                return None;
            }
            rest
        };
        if rest.trim_matches('/').is_empty() {
            Some("/")
        } else {
            Some(rest)
        }
    }

    /// Lower-cased method used for matching: the override header when present and
    /// non-empty, otherwise the request's own method.
    #[must_use]
    pub fn effective_method<B>(&self, request: &Request<B>) -> String {
        request
            .headers()
            .get(self.config.method_override_header.as_str())
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| request.method().as_str())
            .to_ascii_lowercase()
    }

    /// Match a request. `None` means no route: not an error, the caller decides
    /// what to answer.
    #[must_use]
    pub fn parse<B>(&self, request: &Request<B>) -> Option<RouteMatch<'_>> {
        let method = self.effective_method(request);
        self.match_route(&method, request.uri().path())
    }

    /// Match a raw method and request path (base path included).
    ///
    /// Candidates are tried in registration order and the first match wins.
    #[must_use]
    pub fn match_route(&self, method: &str, request_path: &str) -> Option<RouteMatch<'_>> {
        let method = method.to_ascii_lowercase();
        let Some(path) = self.effective_path(request_path) else {
            debug!(
                method = %method,
                path = %request_path,
                base_path = %self.config.base_path,
                "Request path outside base path"
            );
            return None;
        };

        let match_start = Instant::now();
        let found = self
            .routes
            .get_routes_by_method(&method)
            .iter()
            .filter_map(|key| self.routes.get_route(key))
            .find_map(|route| match route.match_path(path) {
                Ok(params) => params.map(|params| (route, params)),
                Err(err) => {
                    warn!(route_key = %route.key(), error = %err, "Skipping unmatchable route");
                    None
                }
            });
        let match_duration = match_start.elapsed();

        if match_duration > SLOW_MATCH {
            warn!(
                method = %method,
                path = %path,
                candidates = self.routes.get_routes_by_method(&method).len(),
                duration_us = match_duration.as_micros(),
                "Slow route matching detected"
            );
        }

        match found {
            Some((route, params)) => {
                debug!(
                    method = %method,
                    path = %path,
                    route_key = %route.key(),
                    route_pattern = %route.path(),
                    path_params = ?params,
                    duration_us = match_duration.as_micros(),
                    "Route matched"
                );
                Some(RouteMatch {
                    route,
                    params,
                    method,
                    path: path.to_string(),
                })
            }
            None => {
                debug!(
                    method = %method,
                    path = %path,
                    duration_us = match_duration.as_micros(),
                    "No route matched"
                );
                None
            }
        }
    }

    /// Invoke the handler behind `route` for `request`.
    ///
    /// Parameters come from re-matching the request path (constrained routes) or the
    /// route's defaults (literal routes); query-string values fill in names the path
    /// did not provide.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidHandlerRef`], [`RouterError::HandlerNotFound`] or
    /// [`RouterError::MissingRequiredDispatchParameter`].
    pub fn execute(&self, route: &Route, request: &ServerRequest) -> Result<HandlerResponse> {
        let params = match route.constraints() {
            Some(_) => self
                .effective_path(request.uri().path())
                .and_then(|path| route.match_path(path).ok().flatten())
                .unwrap_or_else(|| route.defaults().clone()),
            None => route.defaults().clone(),
        };
        self.invoke(route, params, request)
    }

    /// Invoke the handler for an existing match without re-matching the path.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn execute_match(
        &self,
        matched: &RouteMatch<'_>,
        request: &ServerRequest,
    ) -> Result<HandlerResponse> {
        self.invoke(matched.route, matched.params.clone(), request)
    }

    /// Parse then execute. `Ok(None)` when no route matches.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn dispatch(&self, request: &ServerRequest) -> Result<Option<HandlerResponse>> {
        match self.parse(request) {
            Some(matched) => self.execute_match(&matched, request).map(Some),
            None => Ok(None),
        }
    }

    fn invoke(
        &self,
        route: &Route,
        mut params: RouteParams,
        request: &ServerRequest,
    ) -> Result<HandlerResponse> {
        let (target, action) = route.handler_parts()?;

        if let Some(query) = request.uri().query() {
            for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
                params.insert_missing(&name, &value);
            }
        }

        let registered = self.handlers.lookup(route.handler()).inspect_err(|err| {
            error!(route_key = %route.key(), handler = %route.handler(), error = %err, "Dispatch failed");
        })?;
        let params = registered
            .bind(route.handler(), params)
            .inspect_err(|err| {
                error!(route_key = %route.key(), handler = %route.handler(), error = %err, "Dispatch failed");
            })?;

        let ctx = HandlerContext {
            route,
            target,
            action,
            container: self.handlers.container(),
        };

        debug!(
            route_key = %route.key(),
            target = %target,
            action = %action,
            params = ?params,
            "Dispatching to handler"
        );
        Ok(registered.handler.handle(&ctx, &params, request))
    }

    /// Path for the named route, prefixed with the base path.
    ///
    /// # Errors
    ///
    /// [`RouterError::RouteNotFound`], [`RouterError::MissingArgument`] or
    /// [`RouterError::ArgumentConstraintViolation`].
    pub fn generate_path(&self, name: &str, args: &RouteParams, strict: bool) -> Result<String> {
        let route = self.routes.try_get_route(name)?;
        let path = route.generate_path(args, strict)?;
        Ok(self.join_base(&path))
    }

    /// Absolute URL for the named route.
    ///
    /// Scheme and authority come from `current` (its URI, else its `Host` header),
    /// falling back to the configured public origin.
    ///
    /// # Errors
    ///
    /// [`RouterError::NoCurrentRequest`] when neither a request nor a public origin is
    /// available, [`RouterError::InvalidUri`] when the origin cannot be parsed, plus
    /// everything [`generate_path`](Self::generate_path) returns.
    pub fn generate_url<B>(
        &self,
        name: &str,
        args: &RouteParams,
        strict: bool,
        current: Option<&Request<B>>,
    ) -> Result<String> {
        let path = self.generate_path(name, args, strict)?;
        let origin = match current {
            Some(request) => request_origin(request)?,
            None => self
                .config
                .public_origin
                .clone()
                .ok_or(RouterError::NoCurrentRequest)?,
        };

        let mut url = url::Url::parse(&origin).map_err(|e| RouterError::InvalidUri {
            uri: origin.clone(),
            reason: e.to_string(),
        })?;
        url.set_path(&path);
        Ok(url.to_string())
    }

    /// A copy of `current` whose URI path points at the named route.
    /// Scheme, authority and query string are kept.
    ///
    /// # Errors
    ///
    /// [`RouterError::NoCurrentRequest`] without a request, [`RouterError::InvalidUri`]
    /// when the generated path is not a valid URI path (e.g. a partial path still
    /// holding `{placeholders}`), plus everything [`generate_path`](Self::generate_path)
    /// returns.
    pub fn generate_request<B: Clone>(
        &self,
        name: &str,
        args: &RouteParams,
        strict: bool,
        current: Option<&Request<B>>,
    ) -> Result<Request<B>> {
        let current = current.ok_or(RouterError::NoCurrentRequest)?;
        let path = self.generate_path(name, args, strict)?;

        let path_and_query = match current.uri().query() {
            Some(query) => format!("{path}?{query}"),
            None => path,
        };
        let invalid = |reason: String| RouterError::InvalidUri {
            uri: path_and_query.clone(),
            reason,
        };

        let mut parts = current.uri().clone().into_parts();
        parts.path_and_query = Some(
            PathAndQuery::try_from(path_and_query.as_str()).map_err(|e| invalid(e.to_string()))?,
        );
        let uri = Uri::from_parts(parts).map_err(|e| invalid(e.to_string()))?;

        let mut builder = Request::builder()
            .method(current.method().clone())
            .version(current.version())
            .uri(uri);
        if let Some(headers) = builder.headers_mut() {
            headers.extend(current.headers().clone());
        }
        builder
            .body(current.body().clone())
            .map_err(|e| invalid(e.to_string()))
    }

    /// Whether `request` matches the named route.
    #[must_use]
    pub fn is_current<B>(&self, name: &str, request: &Request<B>) -> bool {
        self.parse(request).is_some_and(|m| m.key() == name)
    }

    /// One line per route: `METHOD path -> key (handler)`, in registration order.
    #[must_use]
    pub fn route_table(&self) -> Vec<String> {
        self.routes
            .iter()
            .map(|route| {
                format!(
                    "{} {} -> {} ({})",
                    route.method(),
                    self.join_base(route.path()),
                    route.key(),
                    route.handler()
                )
            })
            .collect()
    }

    /// Print all registered routes to stdout.
    pub fn dump_routes(&self) {
        println!(
            "[routes] base_path={} count={}",
            self.config.base_path,
            self.routes.len()
        );
        for line in self.route_table() {
            println!("[route] {line}");
        }
    }

    fn join_base(&self, path: &str) -> String {
        match (self.config.base_path.as_str(), path) {
            ("", path) => path.to_string(),
            (base, "/") => base.to_string(),
            (base, path) => format!("{base}{path}"),
        }
    }
}

/// `scheme://authority` of a request, from its URI or `Host` header.
fn request_origin<B>(request: &Request<B>) -> Result<String> {
    let uri = request.uri();
    let scheme = uri.scheme_str().unwrap_or("http");
    let authority = uri
        .authority()
        .map(|a| a.as_str().to_string())
        .or_else(|| {
            request
                .headers()
                .get(header::HOST)
                .and_then(|h| h.to_str().ok())
                .map(str::to_string)
        })
        .ok_or_else(|| RouterError::InvalidUri {
            uri: uri.to_string(),
            reason: "request has no authority or Host header".to_string(),
        })?;
    Ok(format!("{scheme}://{authority}"))
}
