//! # Runtime Configuration Module
//!
//! Environment- and file-driven configuration for a [`Router`](crate::router::Router).
//!
//! ## Environment Variables
//!
//! ### `ROUTEWAY_BASE_PATH`
//!
//! Application-wide prefix stripped from request paths before matching and prepended
//! to generated paths. A trailing `/` is ignored, so `/app/` and `/app` are the same.
//!
//! Default: empty (routes are served from `/`).
//!
//! ### `ROUTEWAY_METHOD_OVERRIDE_HEADER`
//!
//! Header consulted for the effective HTTP method. When present and non-empty its value
//! replaces the request's own method during matching, letting HTML forms reach `PUT`
//! or `DELETE` routes.
//!
//! Default: `x-http-method-override`
//!
//! ### `ROUTEWAY_PUBLIC_ORIGIN`
//!
//! Scheme and authority (e.g. `https://example.com`) used by
//! [`Router::generate_url`](crate::router::Router::generate_url) when no current
//! request is supplied.
//!
//! Default: unset
//!
//! ## Usage
//!
//! ```rust
//! use routeway::runtime_config::RouterConfig;
//!
//! let config = RouterConfig::from_env();
//! println!("base path: {:?}", config.base_path);
//! ```

use serde::{Deserialize, Serialize};
use std::env;

/// Default header used to override the request method.
pub const DEFAULT_METHOD_OVERRIDE_HEADER: &str = "x-http-method-override";

/// Router configuration. Not per-request state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    pub base_path: String,
    pub method_override_header: String,
    pub public_origin: Option<String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            method_override_header: DEFAULT_METHOD_OVERRIDE_HEADER.to_string(),
            public_origin: None,
        }
    }
}

impl RouterConfig {
    /// Load configuration from environment variables, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        RouterConfig {
            base_path: env::var("ROUTEWAY_BASE_PATH")
                .map(|v| normalize_base_path(&v))
                .unwrap_or(defaults.base_path),
            method_override_header: env::var("ROUTEWAY_METHOD_OVERRIDE_HEADER")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.method_override_header),
            public_origin: env::var("ROUTEWAY_PUBLIC_ORIGIN")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }

    #[must_use]
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = normalize_base_path(base_path);
        self
    }

    #[must_use]
    pub fn with_public_origin(mut self, origin: &str) -> Self {
        self.public_origin = Some(origin.trim_end_matches('/').to_string());
        self
    }
}

/// Trim surrounding whitespace and trailing slashes; `/` becomes empty.
#[must_use]
pub fn normalize_base_path(path: &str) -> String {
    path.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert_eq!(config.base_path, "");
        assert_eq!(config.method_override_header, "x-http-method-override");
        assert!(config.public_origin.is_none());
    }

    #[test]
    fn test_normalize_base_path() {
        assert_eq!(normalize_base_path("/"), "");
        assert_eq!(normalize_base_path("/app/"), "/app");
        assert_eq!(normalize_base_path(" /app "), "/app");
    }

    #[test]
    fn test_deserialize_partial_yaml() {
        let config: RouterConfig = serde_yaml::from_str("base_path: /app\n").unwrap();
        assert_eq!(config.base_path, "/app");
        assert_eq!(config.method_override_header, DEFAULT_METHOD_OVERRIDE_HEADER);
    }

    #[test]
    fn test_builders() {
        let config = RouterConfig::default()
            .with_base_path("/shop/")
            .with_public_origin("https://example.com/");
        assert_eq!(config.base_path, "/shop");
        assert_eq!(config.public_origin.as_deref(), Some("https://example.com"));
    }
}
