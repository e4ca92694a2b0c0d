//! Category hierarchy held as a node store indexed by id.
//!
//! Nodes never point at each other; parent/child relationships are id lists,
//! so a malformed snapshot cannot produce a cyclic structure. The store keeps
//! the display order of the source snapshot and never re-sorts.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::categories::models::Category;

/// Category projected into a flat, depth-annotated list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FlattenedCategory {
    pub id: i64,
    pub name: String,
    /// Depth from the node's root (roots are level 0)
    pub level: u32,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    /// Nodes stored without their `children`
    nodes: HashMap<i64, Category>,
    children: HashMap<i64, Vec<i64>>,
    roots: Vec<i64>,
}

impl CategoryTree {
    /// Index a nested snapshot (as returned by the tree endpoint).
    ///
    /// A node whose id was already seen is dropped together with its subtree.
    pub fn from_forest(forest: Vec<Category>) -> Self {
        let mut tree = Self::default();
        for root in forest {
            if let Some(id) = tree.ingest(root, None) {
                tree.roots.push(id);
            }
        }
        tree
    }

    /// Index a flat list linked through `parent_id`.
    ///
    /// Nodes whose parent is absent from the list become roots. Nodes that are
    /// not reachable from any root (a `parent_id` cycle) are dropped.
    pub fn from_flat(categories: Vec<Category>) -> Self {
        let mut order = Vec::with_capacity(categories.len());
        let mut nodes = HashMap::with_capacity(categories.len());
        for mut category in categories {
            if nodes.contains_key(&category.id) {
                tracing::warn!("Duplicate category id {} in snapshot, skipping", category.id);
                continue;
            }
            category.children.clear();
            order.push(category.id);
            nodes.insert(category.id, category);
        }

        let mut roots = Vec::new();
        let mut children: HashMap<i64, Vec<i64>> = HashMap::new();
        for id in &order {
            match nodes[id].parent_id {
                Some(parent) if parent != *id && nodes.contains_key(&parent) => {
                    children.entry(parent).or_default().push(*id);
                }
                _ => roots.push(*id),
            }
        }

        let mut tree = Self {
            nodes,
            children,
            roots,
        };
        tree.drop_unreachable();
        tree
    }

    fn ingest(&mut self, mut category: Category, parent: Option<i64>) -> Option<i64> {
        let id = category.id;
        if self.nodes.contains_key(&id) {
            tracing::warn!("Duplicate category id {} in tree snapshot, skipping", id);
            return None;
        }

        let kids = std::mem::take(&mut category.children);
        category.parent_id = parent;
        self.nodes.insert(id, category);

        let child_ids: Vec<i64> = kids
            .into_iter()
            .filter_map(|child| self.ingest(child, Some(id)))
            .collect();
        if !child_ids.is_empty() {
            self.children.insert(id, child_ids);
        }
        Some(id)
    }

    fn drop_unreachable(&mut self) {
        let reachable: HashSet<i64> = self.all_ids().into_iter().collect();
        if reachable.len() == self.nodes.len() {
            return;
        }

        let orphaned: Vec<i64> = self
            .nodes
            .keys()
            .filter(|id| !reachable.contains(id))
            .copied()
            .collect();
        tracing::warn!(
            "Dropping {} categories caught in a parent cycle: {:?}",
            orphaned.len(),
            orphaned
        );
        for id in orphaned {
            self.nodes.remove(&id);
            self.children.remove(&id);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, id: i64) -> Option<&Category> {
        self.nodes.get(&id)
    }

    #[cfg(test)]
    pub fn roots(&self) -> &[i64] {
        &self.roots
    }

    pub fn children_of(&self, id: i64) -> &[i64] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rebuild the nested representation, children in stored order
    pub fn to_forest(&self) -> Vec<Category> {
        self.roots.iter().map(|id| self.nest(*id)).collect()
    }

    fn nest(&self, id: i64) -> Category {
        let mut category = self.nodes[&id].clone();
        category.children = self
            .children_of(id)
            .iter()
            .map(|child| self.nest(*child))
            .collect();
        category
    }

    /// Pre-order depth-first projection: every parent is immediately followed
    /// by its subtree.
    pub fn flatten(&self) -> Vec<FlattenedCategory> {
        let mut flat = Vec::with_capacity(self.nodes.len());
        for root in &self.roots {
            self.flatten_into(*root, 0, &mut flat);
        }
        flat
    }

    fn flatten_into(&self, id: i64, level: u32, out: &mut Vec<FlattenedCategory>) {
        let category = &self.nodes[&id];
        out.push(FlattenedCategory {
            id,
            name: category.name.clone(),
            level,
        });
        for child in self.children_of(id) {
            self.flatten_into(*child, level + 1, out);
        }
    }

    /// Every id in pre-order
    pub fn all_ids(&self) -> Vec<i64> {
        let mut ids = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<i64> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            ids.push(id);
            stack.extend(self.children_of(id).iter().rev().copied());
        }
        ids
    }
}

/// Ids that must not be offered as a parent for `target`: the target itself and
/// its whole subtree.
///
/// Scans the pre-order list from the target onwards and stops at the first node
/// whose level is not deeper than the target's, which marks the end of its
/// subtree. An unknown target yields just `{target}`.
pub fn disabled_ids(flat: &[FlattenedCategory], target: i64) -> BTreeSet<i64> {
    let mut disabled = BTreeSet::from([target]);

    let Some(index) = flat.iter().position(|c| c.id == target) else {
        return disabled;
    };
    let target_level = flat[index].level;

    disabled.extend(
        flat[index + 1..]
            .iter()
            .take_while(|c| c.level > target_level)
            .map(|c| c.id),
    );
    disabled
}
