//! # Router Module
//!
//! The router turns a sealed [`RouteCollection`](crate::collection::RouteCollection) into a
//! request matcher, a dispatcher and a reverse URL generator.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Resolving the effective method (honouring the method-override header)
//! - Stripping the configured base path from request paths
//! - Matching requests against routes in registration order
//! - Invoking the handler named by the matched route
//! - Generating paths, absolute URLs and redirected requests from route keys
//!
//! ## Architecture
//!
//! Matching happens in two phases:
//!
//! 1. **Compilation**: [`Router::new`] seals the collection. Every constrained route
//!    compiles its template into an anchored regex with one named group per constrained
//!    placeholder; a bad fragment fails here instead of on the first request.
//!
//! 2. **Matching**: for each request, only the routes registered for the effective
//!    method are tried, in registration order. Literal routes compare by string
//!    equality. The first match wins.
//!
//! The router holds no per-request state. Requests are passed to each call, so a single
//! `Router` can be cloned into worker threads and used concurrently.
//!
//! ## Example
//!
//! ```rust
//! use routeway::collection::RouteCollection;
//! use routeway::params::RouteParams;
//! use routeway::router::Router;
//!
//! let mut routes = RouteCollection::new();
//! routes.group(|g| {
//!     g.get("page", "/page/{id}", "Page@show")?.where_digits("id");
//!     Ok(())
//! }).unwrap();
//!
//! let router = Router::new(routes).unwrap();
//! let request = http::Request::get("/page/42").body(()).unwrap();
//! let matched = router.parse(&request).unwrap();
//! assert_eq!(matched.key(), "page");
//! assert_eq!(matched.get_param("id"), Some("42"));
//!
//! let path = router
//!     .generate_path("page", &RouteParams::new().with("id", 7), true)
//!     .unwrap();
//! assert_eq!(path, "/page/7");
//! ```
//!
//! ## Performance
//!
//! Matching is a linear scan over the method's candidates, so cost grows with the
//! number of routes sharing a method. Literal routes never touch the regex engine.
//! Matches slower than one millisecond are logged at `warn`.

mod core;

pub use self::core::{RouteMatch, Router};
