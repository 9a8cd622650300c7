//! # Collection Module
//!
//! The route registry and its scoped group builder.
//!
//! [`RouteCollection`] maps route keys to [`Route`](crate::route::Route)s and keeps a
//! per-method list of keys in registration order; that order is the matching
//! precedence. [`RouteGroup`] threads a [`GroupContext`] (namespace, name prefix,
//! path prefix, constraints) into nested registrations:
//!
//! ```rust
//! use routeway::collection::{GroupContext, RouteCollection};
//! use routeway::route::Constraints;
//!
//! let mut routes = RouteCollection::new();
//! let admin = GroupContext::new()
//!     .with_prefix("/admin")
//!     .with_name("admin.")
//!     .with_namespace("Admin\\")
//!     .with_constraints(Constraints::new().with("id", r"\d+"));
//!
//! routes.group_with(admin, |g| {
//!     g.get("users.show", "/users/{id}", "Users@show")?;
//!     Ok(())
//! }).unwrap();
//!
//! let route = routes.try_get_route("admin.users.show").unwrap();
//! assert_eq!(route.path(), "/admin/users/{id}");
//! assert_eq!(route.handler(), "Admin\\Users@show");
//! ```

mod core;
mod group;

pub use self::core::RouteCollection;
pub use self::group::{GroupContext, RouteGroup};
