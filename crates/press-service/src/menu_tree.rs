//! Navigation menu reconstruction.

use press_core::{meta_key, MenuItem, MetaMap, Post, PostId};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::warn;

/// Builds a flat menu record from a `nav_menu_item` post and its metadata.
///
/// The result has no children; [`MenuTreeBuilder::build`] nests records.
#[must_use]
pub fn menu_item_from_post(post: &Post, meta: &MetaMap) -> MenuItem {
    let number = |key: &str| {
        meta.get(key)
            .and_then(|value| value.trim().parse::<u64>().ok())
            .unwrap_or(0)
    };
    let text = |key: &str| meta.get(key).unwrap_or_default().to_string();

    MenuItem {
        id: post.id,
        title: post.post_title.clone(),
        url: text(meta_key::MENU_ITEM_URL),
        parent_id: PostId::new(number(meta_key::MENU_ITEM_PARENT)),
        menu_order: post.menu_order,
        item_type: text(meta_key::MENU_ITEM_TYPE),
        object: text(meta_key::MENU_ITEM_OBJECT),
        object_id: number(meta_key::MENU_ITEM_OBJECT_ID),
        children: Vec::new(),
    }
}

/// Assembles flat menu records into an ordered forest.
pub struct MenuTreeBuilder;

impl MenuTreeBuilder {
    /// Nests `records` by `parent_id`.
    ///
    /// A record is a root when its parent is zero, itself, or not among the
    /// records. Duplicate ids keep the first occurrence. Parent cycles are cut
    /// at the node where a walk (in ascending id order) first returns to its
    /// own path; that node becomes a root. Siblings are ordered by
    /// `menu_order`, then `id`.
    #[must_use]
    pub fn build(records: Vec<MenuItem>) -> Vec<MenuItem> {
        let mut nodes: BTreeMap<PostId, MenuItem> = BTreeMap::new();
        for mut record in records {
            record.children.clear();
            nodes.entry(record.id).or_insert(record);
        }

        let mut parents: HashMap<PostId, PostId> = nodes
            .values()
            .filter(|node| node.parent_id != node.id && nodes.contains_key(&node.parent_id))
            .map(|node| (node.id, node.parent_id))
            .collect();

        Self::cut_cycles(nodes.keys().copied(), &mut parents);

        let mut children: HashMap<PostId, Vec<PostId>> = HashMap::new();
        let mut roots = Vec::new();
        for id in nodes.keys() {
            match parents.get(id) {
                Some(parent) => children.entry(*parent).or_default().push(*id),
                None => roots.push(*id),
            }
        }

        let mut forest: Vec<MenuItem> = roots
            .into_iter()
            .filter_map(|id| Self::assemble(id, &mut nodes, &children))
            .collect();
        Self::sort_level(&mut forest);
        forest
    }

    fn cut_cycles(ids: impl Iterator<Item = PostId>, parents: &mut HashMap<PostId, PostId>) {
        let mut settled: HashSet<PostId> = HashSet::new();

        for start in ids {
            let mut path: Vec<PostId> = Vec::new();
            let mut on_path: HashSet<PostId> = HashSet::new();
            let mut current = start;

            loop {
                if settled.contains(&current) {
                    break;
                }
                path.push(current);
                on_path.insert(current);

                let Some(&next) = parents.get(&current) else {
                    break;
                };
                if on_path.contains(&next) {
                    warn!("Menu item {} is part of a parent cycle; treating it as a root", next);
                    parents.remove(&next);
                    break;
                }
                current = next;
            }

            settled.extend(path);
        }
    }

    /// Detaches the subtree under `root` from `nodes`.
    ///
    /// Walks depth first with an explicit stack; each frame holds a node and
    /// the index of its next child id.
    fn assemble(
        root: PostId,
        nodes: &mut BTreeMap<PostId, MenuItem>,
        children: &HashMap<PostId, Vec<PostId>>,
    ) -> Option<MenuItem> {
        let mut stack = vec![(nodes.remove(&root)?, 0usize)];
        loop {
            let (node, next) = stack.last_mut()?;
            let child = children.get(&node.id).and_then(|ids| ids.get(*next)).copied();
            *next += 1;

            if let Some(child) = child {
                if let Some(child_node) = nodes.remove(&child) {
                    stack.push((child_node, 0));
                }
                continue;
            }

            let (mut done, _) = stack.pop()?;
            Self::sort_level(&mut done.children);
            match stack.last_mut() {
                Some((parent, _)) => parent.children.push(done),
                None => return Some(done),
            }
        }
    }

    fn sort_level(items: &mut [MenuItem]) {
        items.sort_by_key(|item| (item.menu_order, item.id));
    }
}
