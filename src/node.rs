use crate::RedwoodSet;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum NodeColor {
    #[default]
    Red,
    Black,
}

/// Position of a node inside the arena.
///
/// [`NodeIndex::BLACK_NIL`] never points into the arena: it addresses the sentinel record kept
/// beside it, which stands in for every missing child and for the parent of the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeIndex(pub(crate) usize);

impl NodeIndex {
    pub(crate) const BLACK_NIL: Self = Self(usize::MAX);

    #[inline]
    pub(crate) fn is_nil(self) -> bool {
        self == Self::BLACK_NIL
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct NodeLinks {
    pub(crate) color: NodeColor,
    pub(crate) parent: NodeIndex,
    pub(crate) left: NodeIndex,
    pub(crate) right: NodeIndex,
}

impl NodeLinks {
    pub(crate) const fn sentinel() -> Self {
        Self {
            color: NodeColor::Black,
            parent: NodeIndex::BLACK_NIL,
            left: NodeIndex::BLACK_NIL,
            right: NodeIndex::BLACK_NIL,
        }
    }

    fn new_leaf(parent: NodeIndex) -> Self {
        Self {
            color: NodeColor::Red,
            parent,
            left: NodeIndex::BLACK_NIL,
            right: NodeIndex::BLACK_NIL,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RedwoodNode<K> {
    pub(crate) key: K,
    pub(crate) links: NodeLinks,
}

impl<K> RedwoodNode<K> {
    /// Red node with no children, ready to be hooked under `parent`.
    pub(crate) fn new_leaf(key: K, parent: NodeIndex) -> Self {
        Self {
            key,
            links: NodeLinks::new_leaf(parent),
        }
    }
}

impl<K: Ord> RedwoodSet<K> {
    #[inline]
    pub(crate) fn links(&self, node: NodeIndex) -> &NodeLinks {
        if node.is_nil() {
            &self.nil
        } else {
            &self.storage[node.0].links
        }
    }

    #[inline]
    pub(crate) fn links_mut(&mut self, node: NodeIndex) -> &mut NodeLinks {
        if node.is_nil() {
            &mut self.nil
        } else {
            &mut self.storage[node.0].links
        }
    }

    /// Key held by a real node. Must not be called with the sentinel.
    #[inline]
    pub(crate) fn key_at(&self, node: NodeIndex) -> &K {
        &self.storage[node.0].key
    }

    #[inline]
    pub(crate) fn parent(&self, node: NodeIndex) -> NodeIndex {
        self.links(node).parent
    }

    #[inline]
    pub(crate) fn left(&self, node: NodeIndex) -> NodeIndex {
        self.links(node).left
    }

    #[inline]
    pub(crate) fn right(&self, node: NodeIndex) -> NodeIndex {
        self.links(node).right
    }

    #[inline]
    pub(crate) fn color(&self, node: NodeIndex) -> NodeColor {
        self.links(node).color
    }

    #[inline]
    pub(crate) fn set_color(&mut self, node: NodeIndex, color: NodeColor) {
        self.links_mut(node).color = color;
    }

    #[inline]
    pub(crate) fn is_red(&self, node: NodeIndex) -> bool {
        self.color(node) == NodeColor::Red
    }

    pub(crate) fn subtree_min(&self, mut node: NodeIndex) -> NodeIndex {
        while !self.left(node).is_nil() {
            node = self.left(node);
        }

        node
    }

    pub(crate) fn subtree_max(&self, mut node: NodeIndex) -> NodeIndex {
        while !self.right(node).is_nil() {
            node = self.right(node);
        }

        node
    }

    /// In-order successor of a real node, or the sentinel when `node` is the maximum.
    pub(crate) fn successor(&self, node: NodeIndex) -> NodeIndex {
        let right = self.right(node);
        if !right.is_nil() {
            return self.subtree_min(right);
        }

        let mut current = node;
        let mut parent = self.parent(node);
        while !parent.is_nil() && self.right(parent) == current {
            current = parent;
            parent = self.parent(parent);
        }

        parent
    }

    /// In-order predecessor of a real node, or the sentinel when `node` is the minimum.
    pub(crate) fn predecessor(&self, node: NodeIndex) -> NodeIndex {
        let left = self.left(node);
        if !left.is_nil() {
            return self.subtree_max(left);
        }

        let mut current = node;
        let mut parent = self.parent(node);
        while !parent.is_nil() && self.left(parent) == current {
            current = parent;
            parent = self.parent(parent);
        }

        parent
    }

    /// Points the child slot of `parent` that held `old` at `new`. A nil `parent` means `old`
    /// was the root.
    pub(crate) fn replace_child(&mut self, parent: NodeIndex, old: NodeIndex, new: NodeIndex) {
        if parent.is_nil() {
            self.root = new;
        } else if self.right(parent) == old {
            self.links_mut(parent).right = new;
        } else {
            self.links_mut(parent).left = new;
        }
    }
}
