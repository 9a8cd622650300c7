use http::Method;

use super::core::RouteCollection;
use crate::error::Result;
use crate::route::{Constraints, Route};

/// Shared registration context accumulated by nested groups.
///
/// An immutable value: nesting produces a new context rather than mutating the
/// parent's, so no state has to be reset after a group returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupContext {
    /// Prepended to every handler reference.
    pub namespace: String,
    /// Prepended to every route key.
    pub name: String,
    /// Prepended to every path. Plain concatenation; `Route::new` normalizes.
    pub prefix: String,
    pub constraints: Constraints,
}

impl GroupContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Concatenate strings and overlay constraints, `local` winning on collisions.
    #[must_use]
    pub fn nest(&self, local: &GroupContext) -> GroupContext {
        GroupContext {
            namespace: format!("{}{}", self.namespace, local.namespace),
            name: format!("{}{}", self.name, local.name),
            prefix: format!("{}{}", self.prefix, local.prefix),
            constraints: self.constraints.overlay(&local.constraints),
        }
    }
}

/// Short-lived builder bound to a parent's accumulated context.
///
/// Setters record *local* values; registration and nesting use the inherited
/// context extended by those local values.
///
/// ```rust
/// use routeway::collection::RouteCollection;
///
/// let mut routes = RouteCollection::new();
/// routes.group(|g| {
///     g.prefix("/api").name("api.");
///     g.group(|v1| {
///         v1.prefix("/v1").name("v1.");
///         v1.get("list", "/items", "Items@index")?;
///         Ok(())
///     })
/// }).unwrap();
///
/// assert_eq!(routes.try_get_route("api.v1.list").unwrap().path(), "/api/v1/items");
/// ```
pub struct RouteGroup<'a> {
    collection: &'a mut RouteCollection,
    current: GroupContext,
    local: GroupContext,
}

impl<'a> RouteGroup<'a> {
    pub(crate) fn new(collection: &'a mut RouteCollection, current: GroupContext) -> Self {
        Self {
            collection,
            current,
            local: GroupContext::default(),
        }
    }

    /// Context inherited from enclosing groups.
    #[must_use]
    pub fn current(&self) -> &GroupContext {
        &self.current
    }

    /// Inherited context extended by this group's local values.
    #[must_use]
    pub fn effective(&self) -> GroupContext {
        self.current.nest(&self.local)
    }

    pub fn prefix(&mut self, path: &str) -> &mut Self {
        self.local.prefix = path.to_string();
        self
    }

    /// Set the prefix and replace this group's pending constraints.
    pub fn prefix_with(&mut self, path: &str, withs: Constraints) -> &mut Self {
        self.local.prefix = path.to_string();
        self.local.constraints = withs;
        self
    }

    pub fn name(&mut self, name: &str) -> &mut Self {
        self.local.name = name.to_string();
        self
    }

    pub fn set_namespace(&mut self, namespace: &str) -> &mut Self {
        self.local.namespace = namespace.to_string();
        self
    }

    /// Replace this group's pending constraints.
    pub fn withs(&mut self, withs: Constraints) -> &mut Self {
        self.local.constraints = withs;
        self
    }

    /// Build a nested group inheriting this group's effective context.
    ///
    /// # Errors
    ///
    /// Whatever `build` returns.
    pub fn group<F>(&mut self, build: F) -> Result<()>
    where
        F: FnOnce(&mut RouteGroup<'_>) -> Result<()>,
    {
        let context = self.effective();
        let mut child = RouteGroup::new(&mut *self.collection, context);
        build(&mut child)
    }

    /// Register a route for `method` under this group's effective context.
    ///
    /// Returns the stored route so constraints and defaults can be chained onto it.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidRoute`](crate::error::RouterError::InvalidRoute) when the
    /// composed key, path or handler reference is malformed.
    pub fn add(
        &mut self,
        method: Method,
        key: &str,
        path: &str,
        handler: &str,
        withs: &Constraints,
    ) -> Result<&mut Route> {
        let context = self.effective();
        let constraints = context.constraints.overlay(withs);
        let route = Route::new(
            format!("{}{key}", context.name),
            method.as_str(),
            &format!("{}{path}", context.prefix),
            format!("{}{handler}", context.namespace),
            (!constraints.is_empty()).then_some(constraints),
        )?;
        Ok(self.collection.add_route(route))
    }

    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn get(&mut self, key: &str, path: &str, handler: &str) -> Result<&mut Route> {
        self.add(Method::GET, key, path, handler, &Constraints::new())
    }

    /// [`get`](Self::get) with route-level constraints layered over the group's.
    ///
    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn get_with(
        &mut self,
        key: &str,
        path: &str,
        handler: &str,
        withs: &Constraints,
    ) -> Result<&mut Route> {
        self.add(Method::GET, key, path, handler, withs)
    }

    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn post(&mut self, key: &str, path: &str, handler: &str) -> Result<&mut Route> {
        self.add(Method::POST, key, path, handler, &Constraints::new())
    }

    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn post_with(
        &mut self,
        key: &str,
        path: &str,
        handler: &str,
        withs: &Constraints,
    ) -> Result<&mut Route> {
        self.add(Method::POST, key, path, handler, withs)
    }

    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn put(&mut self, key: &str, path: &str, handler: &str) -> Result<&mut Route> {
        self.add(Method::PUT, key, path, handler, &Constraints::new())
    }

    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn put_with(
        &mut self,
        key: &str,
        path: &str,
        handler: &str,
        withs: &Constraints,
    ) -> Result<&mut Route> {
        self.add(Method::PUT, key, path, handler, withs)
    }

    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn patch(&mut self, key: &str, path: &str, handler: &str) -> Result<&mut Route> {
        self.add(Method::PATCH, key, path, handler, &Constraints::new())
    }

    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn patch_with(
        &mut self,
        key: &str,
        path: &str,
        handler: &str,
        withs: &Constraints,
    ) -> Result<&mut Route> {
        self.add(Method::PATCH, key, path, handler, withs)
    }

    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn delete(&mut self, key: &str, path: &str, handler: &str) -> Result<&mut Route> {
        self.add(Method::DELETE, key, path, handler, &Constraints::new())
    }

    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn delete_with(
        &mut self,
        key: &str,
        path: &str,
        handler: &str,
        withs: &Constraints,
    ) -> Result<&mut Route> {
        self.add(Method::DELETE, key, path, handler, withs)
    }

    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn options(&mut self, key: &str, path: &str, handler: &str) -> Result<&mut Route> {
        self.add(Method::OPTIONS, key, path, handler, &Constraints::new())
    }

    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn options_with(
        &mut self,
        key: &str,
        path: &str,
        handler: &str,
        withs: &Constraints,
    ) -> Result<&mut Route> {
        self.add(Method::OPTIONS, key, path, handler, withs)
    }

    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn head(&mut self, key: &str, path: &str, handler: &str) -> Result<&mut Route> {
        self.add(Method::HEAD, key, path, handler, &Constraints::new())
    }

    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn head_with(
        &mut self,
        key: &str,
        path: &str,
        handler: &str,
        withs: &Constraints,
    ) -> Result<&mut Route> {
        self.add(Method::HEAD, key, path, handler, withs)
    }
}
