//! Ordered parameter storage used for captures, defaults and generation arguments.
//!
//! Most routes carry a handful of parameters, so values live in a [`SmallVec`] and
//! only spill to the heap past [`MAX_INLINE_PARAMS`]. Lookups use "last write wins":
//! inserting an existing name replaces its value in place.

use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

/// Maximum number of parameters stored inline before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage.
///
/// Names are `Arc<str>` because they usually come from the route table and are
/// cloned into every match.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Ordered name → value map for route parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    inner: ParamVec,
}

impl RouteParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for generation arguments.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl ToString) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, name: &str, value: impl ToString) {
        let value = value.to_string();
        if let Some(slot) = self.inner.iter_mut().find(|(k, _)| k.as_ref() == name) {
            slot.1 = value;
        } else {
            self.inner.push((Arc::from(name), value));
        }
    }

    /// Insert only when the name is absent.
    pub fn insert_missing(&mut self, name: &str, value: &str) {
        if !self.contains(name) {
            self.inner.push((Arc::from(name), value.to_string()));
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.iter().any(|(k, _)| k.as_ref() == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Convert to a `HashMap`. This allocates; prefer [`get`](Self::get) on hot paths.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.inner
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

impl<K: AsRef<str>, V: ToString> FromIterator<(K, V)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RouteParams::new();
        for (k, v) in iter {
            params.insert(k.as_ref(), v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut params = RouteParams::new().with("a", 1).with("b", "two");
        params.insert("a", "uno");
        let collected: Vec<_> = params.iter().collect();
        assert_eq!(collected, vec![("a", "uno"), ("b", "two")]);
    }

    #[test]
    fn insert_missing_keeps_existing() {
        let mut params = RouteParams::new().with("id", "42");
        params.insert_missing("id", "1");
        params.insert_missing("page", "1");
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get("page"), Some("1"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn collects_from_pairs() {
        let params: RouteParams = [("id", "7"), ("slug", "hello")].into_iter().collect();
        assert_eq!(params.to_map().get("slug").map(String::as_str), Some("hello"));
    }
}
