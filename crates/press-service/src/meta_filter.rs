//! Reduction of post meta rows to a keyed map.

use press_core::{MetaKeys, MetaMap, PostMeta};

/// Builds the key/value map of one post's metadata.
///
/// Rows are visited in ascending `meta_id` order and the first value seen for
/// a key wins. Rows without a key are skipped. When `keys` is given, only
/// those keys are kept.
#[must_use]
pub fn filter_meta(mut rows: Vec<PostMeta>, keys: Option<&MetaKeys>) -> MetaMap {
    rows.sort_by_key(|row| row.meta_id);

    let mut map = MetaMap::new();
    for row in rows {
        let Some(key) = row.meta_key else {
            continue;
        };
        if keys.is_some_and(|keys| !keys.contains(&key)) {
            continue;
        }
        map.insert_first(key, row.meta_value);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use press_core::{MetaId, PostId};

    fn row(meta_id: u64, key: &str, value: &str) -> PostMeta {
        PostMeta::new(MetaId::new(meta_id), PostId::new(1), key, value)
    }

    #[test]
    fn test_all_keys() {
        let map = filter_meta(vec![row(1, "a", "1"), row(2, "b", "2")], None);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some("1"));
        assert_eq!(map.get("b"), Some("2"));
    }

    #[test]
    fn test_restricted_keys() {
        let keys: MetaKeys = ["a".to_string(), "c".to_string()].into_iter().collect();
        let map = filter_meta(vec![row(1, "a", "1"), row(2, "b", "2"), row(3, "c", "3")], Some(&keys));
        let found: Vec<&str> = map.keys().collect();
        assert_eq!(found, vec!["a", "c"]);
    }

    #[test]
    fn test_duplicate_key_lowest_meta_id_wins() {
        let map = filter_meta(vec![row(9, "color", "blue"), row(4, "color", "red")], None);
        assert_eq!(map.get("color"), Some("red"));
    }

    #[test]
    fn test_null_key_skipped_and_null_value_kept() {
        let mut nameless = row(1, "x", "lost");
        nameless.meta_key = None;
        let mut empty = row(2, "flag", "");
        empty.meta_value = None;

        let map = filter_meta(vec![nameless, empty], None);
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("flag"));
        assert_eq!(map.get("flag"), None);
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_meta(Vec::new(), None).is_empty());
    }
}
