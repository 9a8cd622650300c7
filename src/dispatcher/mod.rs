//! # Dispatcher Module
//!
//! Handler registration and the fixed handler contract the router invokes.
//!
//! ## Overview
//!
//! Every route names a handler reference such as `Pages@show`. At dispatch time the
//! router looks that reference up in a [`HandlerRegistry`] and calls the registered
//! [`Handler`] with three arguments:
//!
//! - a [`HandlerContext`] (the matched route, the split handler reference and the
//!   optional service [`Container`]),
//! - the bound [`RouteParams`](crate::params::RouteParams),
//! - the [`ServerRequest`].
//!
//! There is no runtime introspection: a handler declares the parameters it needs up
//! front with [`ParamDecl`], and the router checks those declarations before calling it.
//!
//! ## Handler Registration
//!
//! ```rust
//! use routeway::dispatcher::{HandlerRegistry, HandlerResponse, ParamDecl};
//!
//! let mut handlers = HandlerRegistry::new();
//! handlers.register_with_params(
//!     "Pages@show",
//!     vec![ParamDecl::required("id"), ParamDecl::optional("format").default_value("html")],
//!     |_ctx, params, _req| {
//!         HandlerResponse::ok_json(serde_json::json!({
//!             "id": params.get("id"),
//!             "format": params.get("format"),
//!         }))
//!     },
//! );
//! assert!(handlers.contains("Pages@show"));
//! ```
//!
//! ## Error Handling
//!
//! - An unknown handler reference is [`RouterError::HandlerNotFound`](crate::error::RouterError::HandlerNotFound)
//! - A required parameter that nothing supplies is
//!   [`RouterError::MissingRequiredDispatchParameter`](crate::error::RouterError::MissingRequiredDispatchParameter)
//! - Whatever the handler returns is passed back verbatim

mod core;

pub use self::core::{
    Container, Handler, HandlerContext, HandlerRegistry, HandlerResponse, HeaderVec, ParamDecl,
    ServerRequest, ServiceContainer, MAX_INLINE_HEADERS,
};
