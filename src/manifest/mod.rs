//! # Route Manifest Module
//!
//! Declarative route registration from a YAML or JSON file.
//!
//! A manifest carries the router configuration, top-level routes and nested groups.
//! [`build_collection`] replays it through [`RouteCollection::group`] and
//! [`RouteGroup`], so prefixes, name and namespace prefixes and constraint overlays
//! behave exactly as they do for routes registered in code.
//!
//! ## Example
//!
//! ```rust
//! use routeway::manifest::{build_collection, Manifest};
//!
//! let manifest: Manifest = serde_yaml::from_str(r#"
//! groups:
//!   - prefix: /blog
//!     name: blog.
//!     where: { slug: '[a-z0-9\-]+' }
//!     routes:
//!       - { key: show, path: '/{slug}', handler: Blog@show }
//! "#).unwrap();
//!
//! let routes = build_collection(&manifest).unwrap();
//! assert_eq!(routes.try_get_route("blog.show").unwrap().path(), "/blog/{slug}");
//! ```
//!
//! [`RouteCollection::group`]: crate::collection::RouteCollection::group
//! [`RouteGroup`]: crate::collection::RouteGroup

mod build;
mod load;
mod types;

pub use build::build_collection;
pub use load::{load_manifest, load_router, router_from_manifest};
pub use types::{GroupDef, Manifest, RouteDef};
