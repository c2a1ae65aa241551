//! Logical-to-storage field name translation.

use std::collections::HashMap;

/// Maps logical (domain) field names to storage column names.
///
/// Lookups fall back to the logical name unchanged when no mapping exists,
/// so an empty map is a valid identity translation. The map is supplied to
/// each visitor by reference; it is never ambient state, which keeps
/// concurrent traversals of the same tree safe.
///
/// # Example
/// ```
/// use pgspec::FieldMap;
///
/// let fields = FieldMap::new()
///     .with("id", "user_id")
///     .with("name", "full_name");
///
/// assert_eq!(fields.resolve("id"), "user_id");
/// assert_eq!(fields.resolve("unmapped"), "unmapped");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    map: HashMap<String, String>,
}

impl FieldMap {
    /// Create an empty map (identity translation for every field).
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a logical → storage mapping.
    pub fn insert(&mut self, logical: impl Into<String>, storage: impl Into<String>) {
        self.map.insert(logical.into(), storage.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, logical: impl Into<String>, storage: impl Into<String>) -> Self {
        self.insert(logical, storage);
        self
    }

    /// Translate a logical field name, falling back to it unchanged.
    pub fn resolve<'a>(&'a self, field: &'a str) -> &'a str {
        self.map.get(field).map(String::as_str).unwrap_or(field)
    }

    /// Number of registered mappings.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether any mappings are registered.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl From<HashMap<String, String>> for FieldMap {
    fn from(map: HashMap<String, String>) -> Self {
        Self { map }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            map: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_maps_registered_fields() {
        let fields: FieldMap = [("id", "user_id")].into_iter().collect();
        assert_eq!(fields.resolve("id"), "user_id");
    }

    #[test]
    fn resolve_falls_back_to_identity() {
        let fields = FieldMap::new();
        assert_eq!(fields.resolve("anything"), "anything");
    }

    #[test]
    fn later_insert_wins() {
        let fields = FieldMap::new().with("id", "a").with("id", "b");
        assert_eq!(fields.resolve("id"), "b");
        assert_eq!(fields.len(), 1);
    }
}
