//! # Route Module
//!
//! A [`Route`] is one named endpoint: key, HTTP method, normalized path template,
//! handler reference and optional per-parameter [`Constraints`].
//!
//! ## Path templates
//!
//! Templates use `{name}` placeholders. A placeholder only becomes a parameter once a
//! constraint names it:
//!
//! ```rust
//! use routeway::route::Route;
//! use routeway::params::RouteParams;
//!
//! let mut route = Route::new("page", "GET", "/page/{id}/", "Page@show", None).unwrap();
//! route.where_digits("id");
//!
//! assert_eq!(route.path(), "/page/{id}");
//! assert!(route.compiled_pattern().unwrap().is_match("/page/42"));
//! assert_eq!(
//!     route.generate_path(&RouteParams::new().with("id", 42), true).unwrap(),
//!     "/page/42"
//! );
//! ```
//!
//! The same fragments drive inbound matching (as named capture groups) and outbound
//! generation (as whole-string validators).

mod constraints;
mod core;

pub use self::constraints::{Constraints, DIGITS, SLUG, WORDS};
pub use self::core::Route;
