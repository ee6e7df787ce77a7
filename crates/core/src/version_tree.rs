//! Adjacency-list view of a version forest.
//!
//! Built from `(id, parent_id)` edges. A node whose parent is not among the
//! edges is treated as a root, so a partial load (one document's subtree)
//! forms a valid tree on its own. Children are kept in ascending id order,
//! which is creation order.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::types::DbId;

/// One node of a nested version tree, as returned by history listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionNode<T> {
    #[serde(flatten)]
    pub item: T,
    pub children: Vec<VersionNode<T>>,
}

#[derive(Debug, Clone, Default)]
pub struct VersionTree {
    parents: HashMap<DbId, Option<DbId>>,
    children: HashMap<DbId, Vec<DbId>>,
}

impl VersionTree {
    pub fn from_edges(edges: impl IntoIterator<Item = (DbId, Option<DbId>)>) -> Self {
        let parents: HashMap<DbId, Option<DbId>> = edges.into_iter().collect();
        let mut children: HashMap<DbId, Vec<DbId>> = HashMap::new();

        for (&id, &parent) in &parents {
            if let Some(parent_id) = parent.filter(|p| parents.contains_key(p)) {
                children.entry(parent_id).or_default().push(id);
            }
        }
        for ids in children.values_mut() {
            ids.sort_unstable();
        }

        Self { parents, children }
    }

    fn contains(&self, id: DbId) -> bool {
        self.parents.contains_key(&id)
    }

    fn children(&self, id: DbId) -> &[DbId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `id` and all its descendants, children before parents. This is a
    /// safe deletion order under a parent foreign key.
    pub fn subtree_post_order(&self, id: DbId) -> Vec<DbId> {
        if !self.contains(id) {
            return Vec::new();
        }
        let mut order = Vec::new();
        let mut seen = HashSet::from([id]);
        // (node, children already pushed)
        let mut stack = vec![(id, false)];
        while let Some((current, expanded)) = stack.pop() {
            if expanded {
                order.push(current);
                continue;
            }
            stack.push((current, true));
            for &child in self.children(current).iter().rev() {
                if seen.insert(child) {
                    stack.push((child, false));
                }
            }
        }
        order
    }

    /// Nest `items` under `root` following the tree shape.
    ///
    /// Nodes missing from `items` are skipped together with their
    /// descendants. Returns `None` if `root` itself has no item.
    pub fn nest<T>(&self, root: DbId, mut items: HashMap<DbId, T>) -> Option<VersionNode<T>> {
        let mut built: HashMap<DbId, VersionNode<T>> = HashMap::new();
        for id in self.subtree_post_order(root) {
            let Some(item) = items.remove(&id) else {
                continue;
            };
            let children = self
                .children(id)
                .iter()
                .filter_map(|child| built.remove(child))
                .collect();
            built.insert(id, VersionNode { item, children });
        }
        built.remove(&root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1 -> {2 -> {4}, 3}, 5 -> {6}
    fn sample() -> VersionTree {
        VersionTree::from_edges([
            (1, None),
            (2, Some(1)),
            (3, Some(1)),
            (4, Some(2)),
            (5, None),
            (6, Some(5)),
        ])
    }

    #[test]
    fn builds_children_in_id_order() {
        let tree = sample();
        assert!(tree.contains(6));
        assert!(!tree.contains(7));
        assert_eq!(tree.children(1), &[2, 3]);
        assert_eq!(tree.children(4), &[] as &[DbId]);
    }

    #[test]
    fn node_with_unknown_parent_starts_its_own_tree() {
        let tree = VersionTree::from_edges([(10, Some(3)), (11, Some(10))]);
        assert_eq!(tree.subtree_post_order(10), vec![11, 10]);
    }

    #[test]
    fn post_order_puts_children_first() {
        let tree = sample();
        assert_eq!(tree.subtree_post_order(1), vec![4, 2, 3, 1]);
        assert_eq!(tree.subtree_post_order(6), vec![6]);
        assert!(tree.subtree_post_order(99).is_empty());
    }

    #[test]
    fn cycles_do_not_hang_traversal() {
        // Not reachable from well-formed data; traversal must still end.
        let tree = VersionTree::from_edges([(1, Some(2)), (2, Some(1))]);
        assert_eq!(tree.subtree_post_order(1), vec![2, 1]);
    }

    #[test]
    fn nest_builds_nested_nodes() {
        let tree = sample();
        let items: HashMap<DbId, String> =
            (1..=6).map(|id| (id, format!("v{id}"))).collect();
        let root = tree.nest(1, items).unwrap();

        assert_eq!(root.item, "v1");
        let child_items: Vec<&str> = root.children.iter().map(|c| c.item.as_str()).collect();
        assert_eq!(child_items, vec!["v2", "v3"]);
        assert_eq!(root.children[0].children[0].item, "v4");
        assert!(root.children[1].children.is_empty());
    }

    #[test]
    fn nest_without_root_item_is_none() {
        let tree = sample();
        assert!(tree.nest::<String>(1, HashMap::new()).is_none());
    }
}
