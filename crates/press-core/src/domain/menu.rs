//! Navigation menu tree.

use crate::PostId;
use serde::{Deserialize, Serialize};

/// A node of a navigation menu, reconstructed from a `nav_menu_item` post
/// and its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: PostId,
    pub title: String,
    pub url: String,
    /// Parent item as stored, zero for none. A node may sit at the root even
    /// when this is non-zero if the parent is missing or part of a cycle.
    pub parent_id: PostId,
    pub menu_order: i32,
    /// `post_type`, `taxonomy` or `custom`; empty when unset.
    pub item_type: String,
    /// Post type or taxonomy of the linked object.
    pub object: String,
    pub object_id: u64,
    /// Ordered by `menu_order`, then `id`.
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    /// Counts this node and all its descendants.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(&node.children);
        }
        count
    }

    /// Finds a node by id in this subtree, depth first.
    #[must_use]
    pub fn find(&self, id: PostId) -> Option<&Self> {
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            if node.id == id {
                return Some(node);
            }
            pending.extend(node.children.iter().rev());
        }
        None
    }
}
