use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::group::{GroupContext, RouteGroup};
use crate::error::{Result, RouterError};
use crate::route::Route;

/// Registry of routes: key → [`Route`], plus a per-method index in registration order.
///
/// Built once during bootstrap, then sealed into an `Arc` so the router can share it
/// read-only across threads. Every key listed in the method index exists in the map.
#[derive(Debug, Clone, Default)]
pub struct RouteCollection {
    routes: HashMap<String, Route>,
    /// Keys in registration order, for stable iteration.
    order: Vec<String>,
    /// Lower-cased method → keys in registration order. First match wins.
    by_method: HashMap<String, Vec<String>>,
}

impl RouteCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `route` under its key and append the key to its method's list.
    ///
    /// A route already registered under the same key is replaced and the replacement
    /// is logged. The key keeps its registration slot, so re-registering a route never
    /// changes matching precedence. If the method changed, the key moves from the old
    /// method's list to the end of the new one.
    pub fn add_route(&mut self, route: Route) -> &mut Route {
        let key = route.key().to_string();
        let method = route.method().as_str().to_ascii_lowercase();

        let previous_method = self.routes.get(&key).map(|old| {
            warn!(
                route_key = %key,
                old_path = %old.path(),
                new_path = %route.path(),
                "Route key registered twice - replacing previous route"
            );
            old.method().as_str().to_ascii_lowercase()
        });

        debug!(
            route_key = %key,
            method = %method,
            path = %route.path(),
            handler = %route.handler(),
            "Route registered"
        );

        match previous_method {
            Some(old_method) if old_method == method => {}
            Some(old_method) => {
                if let Some(keys) = self.by_method.get_mut(&old_method) {
                    keys.retain(|k| *k != key);
                }
                self.by_method.entry(method).or_default().push(key.clone());
            }
            None => {
                self.by_method.entry(method).or_default().push(key.clone());
                self.order.push(key.clone());
            }
        }

        match self.routes.entry(key) {
            Entry::Occupied(mut slot) => {
                slot.insert(route);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(route),
        }
    }

    /// Run `build` against a top-level group with an empty context.
    ///
    /// # Errors
    ///
    /// Whatever `build` returns, typically [`RouterError::InvalidRoute`].
    pub fn group<F>(&mut self, build: F) -> Result<()>
    where
        F: FnOnce(&mut RouteGroup<'_>) -> Result<()>,
    {
        self.group_with(GroupContext::default(), build)
    }

    /// Run `build` against a top-level group seeded with `context`.
    ///
    /// The context is a plain value; nothing on the collection is mutated besides
    /// the routes `build` registers.
    ///
    /// # Errors
    ///
    /// Whatever `build` returns.
    pub fn group_with<F>(&mut self, context: GroupContext, build: F) -> Result<()>
    where
        F: FnOnce(&mut RouteGroup<'_>) -> Result<()>,
    {
        let mut group = RouteGroup::new(self, context);
        build(&mut group)
    }

    /// Soft lookup used during matching.
    #[must_use]
    pub fn get_route(&self, key: &str) -> Option<&Route> {
        self.routes.get(key)
    }

    /// Hard lookup used during generation, where an unknown name is a caller bug.
    ///
    /// # Errors
    ///
    /// [`RouterError::RouteNotFound`].
    pub fn try_get_route(&self, key: &str) -> Result<&Route> {
        self.routes
            .get(key)
            .ok_or_else(|| RouterError::RouteNotFound(key.to_string()))
    }

    /// Mutable access for chaining constraints onto an already registered route.
    pub fn get_route_mut(&mut self, key: &str) -> Option<&mut Route> {
        self.routes.get_mut(key)
    }

    /// Keys registered for `method` (case-insensitive) in registration order.
    #[must_use]
    pub fn get_routes_by_method(&self, method: &str) -> &[String] {
        self.by_method
            .get(&method.to_ascii_lowercase())
            .map_or(&[], Vec::as_slice)
    }

    /// Routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.order.iter().filter_map(|k| self.routes.get(k))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Compile every route pattern and freeze the collection.
    ///
    /// After sealing no `&mut` access exists, so concurrent readers are safe by
    /// construction.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPattern`] for the first route whose pattern fails to compile.
    pub fn seal(self) -> Result<Arc<RouteCollection>> {
        for route in self.iter() {
            route.compiled_pattern()?;
        }

        let summary: Vec<String> = self
            .iter()
            .take(10)
            .map(|r| format!("{} {}", r.method(), r.path()))
            .collect();
        info!(
            routes_count = self.len(),
            methods = self.by_method.len(),
            routes_summary = ?summary,
            "Routing table sealed"
        );

        Ok(Arc::new(self))
    }
}
