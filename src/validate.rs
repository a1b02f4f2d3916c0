use core::fmt::Debug;

use crate::{RedwoodSet, node::NodeIndex};

impl<K: Ord + Debug> RedwoodSet<K> {
    /// Panics unless every structural and coloring invariant of the tree holds.
    pub(crate) fn assert_invariants(&self) {
        assert!(!self.is_red(NodeIndex::BLACK_NIL), "sentinel must be black");
        assert!(!self.is_red(self.root), "root must be black");

        if self.root.is_nil() {
            assert!(self.storage.is_empty(), "empty tree with stored nodes");
            assert!(self.minimum.is_nil() && self.maximum.is_nil());
            return;
        }

        assert!(
            self.parent(self.root).is_nil(),
            "root {:?} has a parent",
            self.root
        );

        let mut visited = vec![false; self.storage.len()];
        self.check_subtree(self.root, &mut visited);
        assert!(
            visited.iter().all(|&seen| seen),
            "arena holds unreachable nodes"
        );

        assert_eq!(self.minimum, self.subtree_min(self.root), "stale minimum");
        assert_eq!(self.maximum, self.subtree_max(self.root), "stale maximum");

        let keys: Vec<&K> = self.iter().collect();
        assert_eq!(keys.len(), self.len());
        for pair in keys.windows(2) {
            assert!(pair[0] < pair[1], "keys out of order: {pair:?}");
        }
    }

    /// Length of the longest downward path, in nodes.
    pub(crate) fn height(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self.root, 0)];

        while let Some((node, depth)) = pending.pop() {
            if node.is_nil() {
                deepest = deepest.max(depth);
                continue;
            }

            pending.push((self.left(node), depth + 1));
            pending.push((self.right(node), depth + 1));
        }

        deepest
    }

    /// Returns the black height of `node` after checking its subtree.
    fn check_subtree(&self, node: NodeIndex, visited: &mut [bool]) -> usize {
        if node.is_nil() {
            return 1;
        }

        assert!(!visited[node.0], "node {node:?} reachable twice");
        visited[node.0] = true;

        let left = self.left(node);
        let right = self.right(node);

        for child in [left, right] {
            if child.is_nil() {
                continue;
            }

            assert_eq!(self.parent(child), node, "broken parent link of {child:?}");
            if self.is_red(node) {
                assert!(!self.is_red(child), "red node {node:?} has a red child");
            }
        }

        if !left.is_nil() {
            assert!(self.key_at(left) < self.key_at(node));
        }
        if !right.is_nil() {
            assert!(self.key_at(node) < self.key_at(right));
        }

        let left_height = self.check_subtree(left, visited);
        let right_height = self.check_subtree(right, visited);
        assert_eq!(
            left_height, right_height,
            "black height mismatch under {node:?} ({:?})",
            self.key_at(node)
        );

        left_height + usize::from(!self.is_red(node))
    }
}
