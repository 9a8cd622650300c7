use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// `\d+`
pub const DIGITS: &str = r"\d+";
/// `\w+`
pub const WORDS: &str = r"\w+";
/// Lower-case slug: letters, digits and dashes.
pub const SLUG: &str = r"[a-z0-9\-]+";

/// Ordered mapping from parameter name to the regex fragment it must satisfy.
///
/// Declaration order is kept because generation walks constraints in that order.
/// Re-inserting a name replaces its fragment without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    entries: Vec<(String, String)>,
}

impl Constraints {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, fragment: impl Into<String>) -> Self {
        self.insert(name, fragment);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, fragment: impl Into<String>) {
        let name = name.into();
        let fragment = fragment.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = fragment,
            None => self.entries.push((name, fragment)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| f.as_str())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, f)| (n.as_str(), f.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Key-wise overlay: every entry of `self`, then every entry of `child`,
    /// with `child` winning on collisions.
    #[must_use]
    pub fn overlay(&self, child: &Constraints) -> Constraints {
        let mut merged = self.clone();
        for (name, fragment) in child.iter() {
            merged.insert(name, fragment);
        }
        merged
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Constraints {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut constraints = Constraints::new();
        for (name, fragment) in iter {
            constraints.insert(name, fragment);
        }
        constraints
    }
}

impl Serialize for Constraints {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, fragment) in &self.entries {
            map.serialize_entry(name, fragment)?;
        }
        map.end()
    }
}

struct ConstraintsVisitor;

impl<'de> Visitor<'de> for ConstraintsVisitor {
    type Value = Constraints;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of parameter names to regex fragments")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut constraints = Constraints::new();
        while let Some((name, fragment)) = access.next_entry::<String, String>()? {
            constraints.insert(name, fragment);
        }
        Ok(constraints)
    }
}

// Deserialized through a visitor so YAML/JSON key order survives.
impl<'de> Deserialize<'de> for Constraints {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ConstraintsVisitor)
    }
}
