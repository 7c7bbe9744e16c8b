use std::collections::{HashMap, HashSet};

/// Parent id to the ids of the transactions that declare it as parent.
#[derive(Debug, Default)]
pub struct ChildrenIndex {
    children: HashMap<i64, HashSet<i64>>,
}

impl ChildrenIndex {
    pub fn new() -> Self {
        Self {
            children: HashMap::new(),
        }
    }

    pub fn link(&mut self, parent: i64, child: i64) {
        self.children.entry(parent).or_default().insert(child);
    }

    /// Removes a child from its parent's set. A set left empty is dropped
    /// so that every remaining entry has at least one live child.
    pub fn unlink(&mut self, parent: i64, child: i64) {
        if let Some(set) = self.children.get_mut(&parent) {
            set.remove(&child);
            if set.is_empty() {
                self.children.remove(&parent);
            }
        }
    }

    pub fn children_of(&self, parent: i64) -> impl Iterator<Item = i64> + '_ {
        self.children
            .get(&parent)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_children(index: &ChildrenIndex, parent: i64) -> Vec<i64> {
        let mut children: Vec<i64> = index.children_of(parent).collect();
        children.sort_unstable();
        children
    }

    #[test]
    fn test_link_and_list() {
        let mut index = ChildrenIndex::new();
        index.link(1, 2);
        index.link(1, 3);
        index.link(1, 2); // repeated link is a no-op

        assert_eq!(sorted_children(&index, 1), vec![2, 3]);
        assert_eq!(index.children_of(2).count(), 0);
    }

    #[test]
    fn test_unlink_drops_empty_set() {
        let mut index = ChildrenIndex::new();
        index.link(1, 2);
        index.link(1, 3);

        index.unlink(1, 2);
        assert_eq!(sorted_children(&index, 1), vec![3]);

        index.unlink(1, 3);
        assert!(!index.children.contains_key(&1));
    }

    #[test]
    fn test_unlink_unknown_is_noop() {
        let mut index = ChildrenIndex::new();
        index.unlink(1, 2);
        index.link(1, 2);
        index.unlink(1, 5);
        assert_eq!(sorted_children(&index, 1), vec![2]);
    }
}
