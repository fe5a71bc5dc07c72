//! Post metadata rows and the keyed map derived from them.

use crate::{MetaId, PostId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Meta keys the query layer reads itself.
pub mod meta_key {
    /// Attachment id of a post's featured image.
    pub const THUMBNAIL_ID: &str = "_thumbnail_id";
    /// Upload-relative path of an attachment file.
    pub const ATTACHED_FILE: &str = "_wp_attached_file";
    /// Parent menu item id of a menu entry.
    pub const MENU_ITEM_PARENT: &str = "_menu_item_menu_item_parent";
    /// Target URL of a custom menu entry.
    pub const MENU_ITEM_URL: &str = "_menu_item_url";
    /// Kind of object a menu entry links (`post_type`, `taxonomy`, `custom`).
    pub const MENU_ITEM_TYPE: &str = "_menu_item_type";
    /// Post type or taxonomy of the linked object.
    pub const MENU_ITEM_OBJECT: &str = "_menu_item_object";
    /// Id of the linked object.
    pub const MENU_ITEM_OBJECT_ID: &str = "_menu_item_object_id";
}

/// A row of the postmeta table.
///
/// `post_id` is not enforced by the store; rows may reference posts that no
/// longer exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMeta {
    pub meta_id: MetaId,
    pub post_id: PostId,
    pub meta_key: Option<String>,
    pub meta_value: Option<String>,
}

impl PostMeta {
    /// Creates a meta row with a key and value.
    #[must_use]
    pub fn new(
        meta_id: MetaId,
        post_id: PostId,
        meta_key: impl Into<String>,
        meta_value: impl Into<String>,
    ) -> Self {
        Self {
            meta_id,
            post_id,
            meta_key: Some(meta_key.into()),
            meta_value: Some(meta_value.into()),
        }
    }
}

/// A set of meta keys restricting a metadata lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetaKeys(BTreeSet<String>);

impl MetaKeys {
    /// Creates an empty key set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks membership.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates keys in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for MetaKeys {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Metadata of one post keyed by `meta_key`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetaMap(BTreeMap<String, Option<String>>);

impl MetaMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value unless the key is already present.
    ///
    /// Returns `true` when the value was stored.
    pub fn insert_first(&mut self, key: String, value: Option<String>) -> bool {
        match self.0.entry(key) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
            std::collections::btree_map::Entry::Occupied(_) => false,
        }
    }

    /// Returns the value of a key, `None` when absent or NULL.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_deref())
    }

    /// Checks whether the key is present, even with a NULL value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Iterates keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_keys_dedupes() {
        let keys: MetaKeys = ["b", "a", "b"].into_iter().collect();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_meta_keys_deserialize_from_array() {
        let keys: MetaKeys = serde_json::from_str(r#"["x","y"]"#).unwrap();
        assert!(keys.contains("x"));
        assert!(serde_json::from_str::<MetaKeys>(r#""x""#).is_err());
    }

    #[test]
    fn test_insert_first_keeps_existing() {
        let mut map = MetaMap::new();
        assert!(map.insert_first("color".to_string(), Some("red".to_string())));
        assert!(!map.insert_first("color".to_string(), Some("blue".to_string())));
        assert_eq!(map.get("color"), Some("red"));
    }

    #[test]
    fn test_null_value_is_present_but_empty() {
        let mut map = MetaMap::new();
        map.insert_first("empty".to_string(), None);
        assert!(map.contains_key("empty"));
        assert_eq!(map.get("empty"), None);
    }

    #[test]
    fn test_serializes_as_object() {
        let mut map = MetaMap::new();
        map.insert_first("a".to_string(), Some("1".to_string()));
        map.insert_first("b".to_string(), None);
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"a":"1","b":null}"#);
    }
}
