//! Ordered set of unique values, backed by a Red-Black Tree whose nodes live in a single
//! growable arena.
//!
//! Nodes refer to each other by index. One sentinel record, always black, stands in for every
//! missing child and for the parent of the root, so the balancing code never branches on
//! "no node". The smallest and largest nodes are cached, which makes [`RedwoodSet::first`],
//! [`RedwoodSet::last`] and stepping back from [`RedwoodSet::end`] constant time.
//!
//! ```
//! use redwood::RedwoodSet;
//!
//! let mut set = RedwoodSet::from([5, 3, 8, 1, 4]);
//! assert!(!set.insert(5));
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 8]);
//!
//! set.remove(&3);
//! assert!(set.find(&3).is_end());
//! assert_eq!(set.lower_bound(&2).get(), Some(&4));
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod cursor;
mod iter;
mod node;
#[cfg(feature = "quickcheck")]
mod quickcheck;
mod rebalance;
#[cfg(test)]
mod validate;

use core::{borrow::Borrow, cmp::Ordering, fmt};

use alloc::{collections::TryReserveError, vec::Vec};

pub use cursor::Cursor;
pub use iter::{IntoIter, Iter};
use node::{NodeColor, NodeIndex, NodeLinks, RedwoodNode};

/// An ordered set of unique keys.
///
/// Keys are ordered by their [`Ord`] implementation. Inserting a key that compares equal to
/// one already present leaves the set untouched.
pub struct RedwoodSet<K: Ord> {
    storage: Vec<RedwoodNode<K>>,
    nil: NodeLinks,
    root: NodeIndex,
    minimum: NodeIndex,
    maximum: NodeIndex,
}

impl<K: Ord> RedwoodSet<K> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            storage: Vec::new(),
            nil: NodeLinks::sentinel(),
            root: NodeIndex::BLACK_NIL,
            minimum: NodeIndex::BLACK_NIL,
            maximum: NodeIndex::BLACK_NIL,
        }
    }

    /// Creates an empty set able to hold `capacity` keys without reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.storage.reserve(additional);
    }

    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.storage.try_reserve(additional).inspect_err(|err| {
            log::trace!("failed to reserve {additional} node slots: {err}");
        })
    }

    pub fn shrink_to_fit(&mut self) {
        self.storage.shrink_to_fit();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Drops every key. The allocated capacity is kept.
    pub fn clear(&mut self) {
        log::trace!("clearing {} nodes", self.storage.len());

        self.storage.clear();
        self.nil = NodeLinks::sentinel();
        self.root = NodeIndex::BLACK_NIL;
        self.minimum = NodeIndex::BLACK_NIL;
        self.maximum = NodeIndex::BLACK_NIL;
    }

    /// Inserts `key`, returning whether it was absent.
    pub fn insert(&mut self, key: K) -> bool {
        match self.insertion_parent(&key) {
            Some(parent) => {
                self.link_leaf(parent, key);
                true
            }
            None => false,
        }
    }

    /// Like [`RedwoodSet::insert`], but reports allocation failure instead of aborting.
    ///
    /// The node slot is reserved before the tree is touched, so on error the set is unchanged.
    pub fn try_insert(&mut self, key: K) -> Result<bool, TryReserveError> {
        let Some(parent) = self.insertion_parent(&key) else {
            return Ok(false);
        };

        self.try_reserve(1)?;
        self.link_leaf(parent, key);

        Ok(true)
    }

    /// Removes `key`, returning whether it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.take(key).is_some()
    }

    /// Removes and returns the key equal to `key`, if any.
    pub fn take<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.find_node(key);
        if node.is_nil() {
            return None;
        }

        Some(self.remove_node(node))
    }

    pub fn pop_first(&mut self) -> Option<K> {
        if self.minimum.is_nil() {
            return None;
        }

        Some(self.remove_node(self.minimum))
    }

    pub fn pop_last(&mut self) -> Option<K> {
        if self.maximum.is_nil() {
            return None;
        }

        Some(self.remove_node(self.maximum))
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        !self.find_node(key).is_nil()
    }

    /// Returns the stored key equal to `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.find_node(key);

        (!node.is_nil()).then(|| self.key_at(node))
    }

    #[must_use]
    pub fn first(&self) -> Option<&K> {
        (!self.minimum.is_nil()).then(|| self.key_at(self.minimum))
    }

    #[must_use]
    pub fn last(&self) -> Option<&K> {
        (!self.maximum.is_nil()).then(|| self.key_at(self.maximum))
    }

    /// Cursor on the key equal to `key`, or the end cursor.
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Cursor::new(self, self.find_node(key))
    }

    /// Cursor on the first key not less than `key`, or the end cursor.
    pub fn lower_bound<Q>(&self, key: &Q) -> Cursor<'_, K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Cursor::new(self, self.lower_bound_node(key))
    }

    /// Cursor on the smallest key; equal to [`RedwoodSet::end`] when the set is empty.
    #[must_use]
    pub fn begin(&self) -> Cursor<'_, K> {
        Cursor::new(self, self.minimum)
    }

    /// Cursor on the position past the largest key.
    #[must_use]
    pub fn end(&self) -> Cursor<'_, K> {
        Cursor::new(self, NodeIndex::BLACK_NIL)
    }

    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self)
    }

    fn lower_bound_node<Q>(&self, key: &Q) -> NodeIndex
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut candidate = NodeIndex::BLACK_NIL;
        let mut current_node = self.root;

        while !current_node.is_nil() {
            match key.cmp(self.key_at(current_node).borrow()) {
                Ordering::Greater => {
                    current_node = self.right(current_node);
                }
                Ordering::Less => {
                    candidate = current_node;
                    current_node = self.left(current_node);
                }
                Ordering::Equal => {
                    return current_node;
                }
            }
        }

        candidate
    }

    fn find_node<Q>(&self, key: &Q) -> NodeIndex
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.lower_bound_node(key);

        if node.is_nil() || key.cmp(self.key_at(node).borrow()) == Ordering::Less {
            NodeIndex::BLACK_NIL
        } else {
            node
        }
    }

    /// Node under which `key` would be attached, or `None` if an equal key is already stored.
    /// A nil parent means the tree is empty.
    fn insertion_parent(&self, key: &K) -> Option<NodeIndex> {
        let mut current_node = self.root;
        let mut parent_node = NodeIndex::BLACK_NIL;

        while !current_node.is_nil() {
            parent_node = current_node;

            match key.cmp(self.key_at(current_node)) {
                Ordering::Less => current_node = self.left(current_node),
                Ordering::Greater => current_node = self.right(current_node),
                Ordering::Equal => return None,
            }
        }

        Some(parent_node)
    }

    fn link_leaf(&mut self, parent_node: NodeIndex, key: K) {
        let new_node_pos = NodeIndex(self.storage.len());

        let is_left_child = !parent_node.is_nil() && key < *self.key_at(parent_node);
        let is_new_minimum = self.minimum.is_nil() || key < *self.key_at(self.minimum);
        let is_new_maximum = self.maximum.is_nil() || *self.key_at(self.maximum) < key;

        self.storage.push(RedwoodNode::new_leaf(key, parent_node));

        if parent_node.is_nil() {
            self.root = new_node_pos;
        } else if is_left_child {
            self.links_mut(parent_node).left = new_node_pos;
        } else {
            self.links_mut(parent_node).right = new_node_pos;
        }

        self.fix_red_violation(new_node_pos);

        if is_new_minimum {
            self.minimum = new_node_pos;
        }
        if is_new_maximum {
            self.maximum = new_node_pos;
        }
    }

    fn remove_node(&mut self, target: NodeIndex) -> K {
        if self.maximum == target {
            self.maximum = self.predecessor(target);
        }
        if self.minimum == target {
            self.minimum = self.successor(target);
        }

        let mut removed_color = self.color(target);
        let replacement;

        if self.left(target).is_nil() {
            replacement = self.right(target);
            self.transplant(target, replacement);
        } else if self.right(target).is_nil() {
            replacement = self.left(target);
            self.transplant(target, replacement);
        } else {
            let heir = self.subtree_min(self.right(target));
            removed_color = self.color(heir);
            replacement = self.right(heir);

            if self.parent(heir) == target {
                self.links_mut(replacement).parent = heir;
            } else {
                self.transplant(heir, replacement);

                let target_right = self.right(target);
                self.links_mut(heir).right = target_right;
                self.links_mut(target_right).parent = heir;
            }

            self.transplant(target, heir);

            let target_left = self.left(target);
            self.links_mut(heir).left = target_left;
            self.links_mut(target_left).parent = heir;
            self.set_color(heir, self.color(target));
        }

        if removed_color == NodeColor::Black {
            self.fix_double_black(replacement);
        }

        self.release(target)
    }

    /// Frees the slot of an unlinked node. The last node of the arena moves into the hole.
    fn release(&mut self, node: NodeIndex) -> K {
        let last = NodeIndex(self.storage.len() - 1);
        let removed = self.storage.swap_remove(node.0);

        if last != node {
            self.relocate(last, node);
        }

        removed.key
    }

    /// Rewrites every link to a node that moved from slot `from` to slot `to`.
    fn relocate(&mut self, from: NodeIndex, to: NodeIndex) {
        log::trace!("node moved from slot {} to slot {}", from.0, to.0);

        let NodeLinks {
            parent,
            left,
            right,
            ..
        } = *self.links(to);

        self.replace_child(parent, from, to);
        if !left.is_nil() {
            self.links_mut(left).parent = to;
        }
        if !right.is_nil() {
            self.links_mut(right).parent = to;
        }

        if self.minimum == from {
            self.minimum = to;
        }
        if self.maximum == from {
            self.maximum = to;
        }
    }
}

impl<K: Ord> Default for RedwoodSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone> Clone for RedwoodSet<K> {
    fn clone(&self) -> Self {
        // Links are slot positions, so a copy of the arena is an independent tree of the same
        // shape and colors.
        Self {
            storage: self.storage.clone(),
            nil: self.nil,
            root: self.root,
            minimum: self.minimum,
            maximum: self.maximum,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        core::mem::swap(self, &mut copy);
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for RedwoodSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Ord> PartialEq for RedwoodSet<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Ord> Eq for RedwoodSet<K> {}

impl<K: Ord> FromIterator<K> for RedwoodSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K: Ord, const N: usize> From<[K; N]> for RedwoodSet<K> {
    fn from(keys: [K; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<K: Ord> Extend<K> for RedwoodSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K: Ord + Copy + 'a> Extend<&'a K> for RedwoodSet<K> {
    fn extend<I: IntoIterator<Item = &'a K>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}
