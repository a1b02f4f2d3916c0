use crate::{
    RedwoodSet,
    node::{NodeColor, NodeIndex},
};

impl<K: Ord> RedwoodSet<K> {
    /// Promotes the right child of `center` into its place.
    pub(crate) fn rotate_left(&mut self, center: NodeIndex) {
        let grandparent_idx = self.parent(center);
        let sibling_idx = self.right(center);

        let c_idx = self.left(sibling_idx);

        self.links_mut(center).right = c_idx;
        if !c_idx.is_nil() {
            self.links_mut(c_idx).parent = center;
        }

        self.links_mut(sibling_idx).left = center;
        self.links_mut(center).parent = sibling_idx;
        self.links_mut(sibling_idx).parent = grandparent_idx;

        self.replace_child(grandparent_idx, center, sibling_idx);
    }

    /// Promotes the left child of `center` into its place.
    pub(crate) fn rotate_right(&mut self, center: NodeIndex) {
        let grandparent_idx = self.parent(center);
        let sibling_idx = self.left(center);

        let c_idx = self.right(sibling_idx);

        self.links_mut(center).left = c_idx;
        if !c_idx.is_nil() {
            self.links_mut(c_idx).parent = center;
        }

        self.links_mut(sibling_idx).right = center;
        self.links_mut(center).parent = sibling_idx;
        self.links_mut(sibling_idx).parent = grandparent_idx;

        self.replace_child(grandparent_idx, center, sibling_idx);
    }

    /// Puts `replacement` (possibly the sentinel) where `node` hangs.
    ///
    /// The sentinel's parent is written too: the deletion fixup reads it when the replacement
    /// is the sentinel.
    pub(crate) fn transplant(&mut self, node: NodeIndex, replacement: NodeIndex) {
        let parent = self.parent(node);

        self.replace_child(parent, node, replacement);
        self.links_mut(replacement).parent = parent;
    }

    /// Restores the red rule after `start_node_idx` was linked in as a red leaf.
    pub(crate) fn fix_red_violation(&mut self, start_node_idx: NodeIndex) {
        let mut curr_node = start_node_idx;

        // A red parent is never the root, so the grandparent is a real node.
        while self.is_red(self.parent(curr_node)) {
            let parent_idx = self.parent(curr_node);
            let grandparent_idx = self.parent(parent_idx);

            let parent_is_right_child = self.right(grandparent_idx) == parent_idx;
            let uncle = if parent_is_right_child {
                self.left(grandparent_idx)
            } else {
                self.right(grandparent_idx)
            };

            if self.is_red(uncle) {
                self.set_color(parent_idx, NodeColor::Black);
                self.set_color(uncle, NodeColor::Black);
                self.set_color(grandparent_idx, NodeColor::Red);

                curr_node = grandparent_idx;
                continue;
            }

            if parent_is_right_child && self.left(parent_idx) == curr_node {
                self.rotate_right(parent_idx);
                curr_node = parent_idx;
            } else if !parent_is_right_child && self.right(parent_idx) == curr_node {
                self.rotate_left(parent_idx);
                curr_node = parent_idx;
            }

            let parent_idx = self.parent(curr_node);
            self.set_color(parent_idx, NodeColor::Black);
            self.set_color(grandparent_idx, NodeColor::Red);

            if parent_is_right_child {
                self.rotate_left(grandparent_idx);
            } else {
                self.rotate_right(grandparent_idx);
            }
        }

        let root = self.root;
        self.set_color(root, NodeColor::Black);
    }

    /// Repairs the missing black node on every path through `start_node_idx`, left behind when
    /// a black node was unlinked. `start_node_idx` may be the sentinel.
    pub(crate) fn fix_double_black(&mut self, start_node_idx: NodeIndex) {
        let mut curr_node = start_node_idx;

        while curr_node != self.root && !self.is_red(curr_node) {
            let parent_idx = self.parent(curr_node);
            let is_left_child = self.left(parent_idx) == curr_node;

            let mut sibling = self.child_opposite(parent_idx, is_left_child);

            if self.is_red(sibling) {
                self.set_color(sibling, NodeColor::Black);
                self.set_color(parent_idx, NodeColor::Red);
                self.rotate_toward(parent_idx, is_left_child);

                sibling = self.child_opposite(parent_idx, is_left_child);
            }

            let near = self.child_same(sibling, is_left_child);
            let far = self.child_opposite(sibling, is_left_child);

            if !self.is_red(near) && !self.is_red(far) {
                self.set_color(sibling, NodeColor::Red);

                curr_node = parent_idx;
                continue;
            }

            if !self.is_red(far) {
                self.set_color(near, NodeColor::Black);
                self.set_color(sibling, NodeColor::Red);
                self.rotate_toward(sibling, !is_left_child);

                sibling = self.child_opposite(parent_idx, is_left_child);
            }

            let far = self.child_opposite(sibling, is_left_child);
            self.set_color(sibling, self.color(parent_idx));
            self.set_color(parent_idx, NodeColor::Black);
            self.set_color(far, NodeColor::Black);
            self.rotate_toward(parent_idx, is_left_child);

            curr_node = self.root;
        }

        self.set_color(curr_node, NodeColor::Black);
    }

    /// Rotates at `center` so that it sinks to its left side when `leftward` is set.
    fn rotate_toward(&mut self, center: NodeIndex, leftward: bool) {
        if leftward {
            self.rotate_left(center);
        } else {
            self.rotate_right(center);
        }
    }

    fn child_same(&self, node: NodeIndex, left: bool) -> NodeIndex {
        if left {
            self.left(node)
        } else {
            self.right(node)
        }
    }

    fn child_opposite(&self, node: NodeIndex, left: bool) -> NodeIndex {
        self.child_same(node, !left)
    }
}

#[cfg(test)]
mod tests {
    use crate::{RedwoodSet, node::NodeIndex};

    fn in_order(tree: &RedwoodSet<u32>) -> Vec<u32> {
        tree.iter().copied().collect()
    }

    fn find_node(tree: &RedwoodSet<u32>, key: u32) -> NodeIndex {
        let mut node = tree.root;
        while *tree.key_at(node) != key {
            node = if key < *tree.key_at(node) {
                tree.left(node)
            } else {
                tree.right(node)
            };
        }
        node
    }

    #[test]
    pub fn rotations_preserve_order() {
        let mut tree: RedwoodSet<u32> = (0..31).collect();
        let before = in_order(&tree);

        let root = tree.root;
        tree.rotate_left(root);
        assert_eq!(in_order(&tree), before);
        assert_eq!(tree.parent(root), tree.root);
        assert_eq!(tree.left(tree.root), root);

        let root = tree.root;
        tree.rotate_right(root);
        assert_eq!(in_order(&tree), before);
        assert!(tree.parent(tree.root).is_nil());
    }

    #[test]
    pub fn rotation_moves_inner_subtree() {
        let mut tree: RedwoodSet<u32> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();
        let four = find_node(&tree, 4);
        let six = find_node(&tree, 6);
        let five = find_node(&tree, 5);

        tree.rotate_left(four);

        assert_eq!(tree.root, six);
        assert_eq!(tree.right(four), five);
        assert_eq!(tree.parent(five), four);
        assert!(tree.parent(six).is_nil());
    }

    #[test]
    pub fn ascending_insertions_stay_balanced() {
        let tree: RedwoodSet<u32> = (0..1024).collect();
        tree.assert_invariants();

        // 2 * log2(n + 1)
        assert!(tree.height() <= 21);
    }

    #[test]
    pub fn descending_removals_stay_balanced() {
        let mut tree: RedwoodSet<u32> = (0..1024).collect();

        for key in (256..1024).rev() {
            assert!(tree.remove(&key));
            tree.assert_invariants();
        }

        assert!(tree.height() <= 17);
    }

    #[test]
    pub fn removal_of_black_leaf_with_red_sibling() {
        let mut tree: RedwoodSet<u32> = (1..=10).collect();

        for key in [1, 2, 3] {
            tree.remove(&key);
            tree.assert_invariants();
        }

        assert_eq!(in_order(&tree), (4..=10).collect::<Vec<_>>());
    }
}
