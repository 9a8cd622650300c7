//! # routeway
//!
//! **routeway** is a URL routing engine: it matches incoming HTTP requests against named
//! route templates, dispatches them to registered handlers, and generates URLs back from
//! route names.
//!
//! ## Overview
//!
//! Routes are path templates such as `/page/{id}`. A placeholder only becomes a capture
//! group once a regex constraint is attached to it (`where_digits("id")`); a route without
//! constraints is a literal path compared by string equality. Routes carry a unique key,
//! an HTTP method and a handler reference of the form `Target@action`.
//!
//! ## Architecture
//!
//! - **[`route`]** - A single route: template, constraints, defaults, pattern compilation,
//!   path matching and reverse generation
//! - **[`collection`]** - The keyed route table with its per-method index, and
//!   [`RouteGroup`](collection::RouteGroup) for prefix/name/namespace/constraint composition
//! - **[`router`]** - Request matching with base path and method override, dispatch, and
//!   path/URL/request generation
//! - **[`dispatcher`]** - Handler contract, handler registry and service container
//! - **[`manifest`]** - Declarative route tables in YAML or JSON
//! - **[`runtime_config`]** - Router configuration from the environment or a manifest
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `routeway` command-line tool
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Server as Hosting server
//!     participant Router as Router
//!     participant Routes as RouteCollection
//!     participant Registry as HandlerRegistry
//!     participant Handler as Handler
//!
//!     Server->>Router: dispatch(&request)
//!     Router->>Router: effective method (override header)
//!     Router->>Router: strip base path
//!     Router->>Routes: routes for method, in registration order
//!     Routes-->>Router: first matching route + captures
//!     Router->>Router: merge defaults and query params
//!     Router->>Registry: lookup(handler reference)
//!     Registry-->>Router: handler + declared params
//!     Router->>Handler: handle(ctx, params, request)
//!     Handler-->>Server: HandlerResponse
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use routeway::collection::RouteCollection;
//! use routeway::dispatcher::{HandlerRegistry, HandlerResponse, ServerRequest};
//! use routeway::params::RouteParams;
//! use routeway::router::Router;
//! use serde_json::json;
//!
//! let mut routes = RouteCollection::new();
//! routes.group(|g| {
//!     g.prefix("/blog").name("blog.");
//!     g.get("show", "/{slug}", "Blog@show")?.where_slug("slug");
//!     Ok(())
//! }).unwrap();
//!
//! let mut handlers = HandlerRegistry::new();
//! handlers.register("Blog@show", |_ctx, params, _req| {
//!     HandlerResponse::ok_json(json!({ "slug": params.get("slug") }))
//! });
//!
//! let router = Router::new(routes).unwrap().with_handlers(handlers);
//!
//! let request: ServerRequest = http::Request::get("/blog/hello-world").body(None).unwrap();
//! let response = router.dispatch(&request).unwrap().unwrap();
//! assert_eq!(response.body, json!({ "slug": "hello-world" }));
//!
//! let url = router
//!     .generate_path("blog.show", &RouteParams::new().with("slug", "next-post"), true)
//!     .unwrap();
//! assert_eq!(url, "/blog/next-post");
//! ```

pub mod cli;
pub mod collection;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod params;
pub mod route;
pub mod router;
pub mod runtime_config;

pub use collection::{GroupContext, RouteCollection, RouteGroup};
pub use dispatcher::{HandlerRegistry, HandlerResponse, ServerRequest};
pub use error::{Result, RouterError};
pub use manifest::{build_collection, load_manifest, Manifest};
pub use params::RouteParams;
pub use route::{Constraints, Route};
pub use router::{RouteMatch, Router};
pub use runtime_config::RouterConfig;
