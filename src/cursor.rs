use core::{fmt, ptr};

use crate::{RedwoodSet, node::NodeIndex};

/// Bidirectional position over the keys of a [`RedwoodSet`], in sorted order.
///
/// Besides one position per key, a cursor can sit on the end position, past the largest key.
/// Moving forward from the end wraps around to the smallest key, and moving back from the
/// smallest key reaches the end position, so stepping never leaves the set.
pub struct Cursor<'a, K: Ord> {
    tree: &'a RedwoodSet<K>,
    node: NodeIndex,
}

impl<'a, K: Ord> Cursor<'a, K> {
    pub(crate) fn new(tree: &'a RedwoodSet<K>, node: NodeIndex) -> Self {
        Self { tree, node }
    }

    /// Key under the cursor, or `None` on the end position.
    #[must_use]
    pub fn get(&self) -> Option<&'a K> {
        let tree = self.tree;

        (!self.node.is_nil()).then(|| tree.key_at(self.node))
    }

    #[must_use]
    pub fn is_end(&self) -> bool {
        self.node.is_nil()
    }

    pub fn move_next(&mut self) {
        self.node = self.next_node();
    }

    pub fn move_prev(&mut self) {
        self.node = self.prev_node();
    }

    /// Key the cursor would reach with [`Cursor::move_next`].
    #[must_use]
    pub fn peek_next(&self) -> Option<&'a K> {
        Self::new(self.tree, self.next_node()).get()
    }

    /// Key the cursor would reach with [`Cursor::move_prev`].
    #[must_use]
    pub fn peek_prev(&self) -> Option<&'a K> {
        Self::new(self.tree, self.prev_node()).get()
    }

    fn next_node(&self) -> NodeIndex {
        if self.node.is_nil() {
            self.tree.minimum
        } else {
            self.tree.successor(self.node)
        }
    }

    fn prev_node(&self) -> NodeIndex {
        // The sentinel has no usable links, the cached maximum stands in for its predecessor.
        if self.node.is_nil() {
            self.tree.maximum
        } else {
            self.tree.predecessor(self.node)
        }
    }
}

impl<K: Ord> Clone for Cursor<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Ord> Copy for Cursor<'_, K> {}

impl<K: Ord> PartialEq for Cursor<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.node == other.node
    }
}

impl<K: Ord> Eq for Cursor<'_, K> {}

impl<K: Ord + fmt::Debug> fmt::Debug for Cursor<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}
