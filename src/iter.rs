use core::iter::FusedIterator;

use crate::{RedwoodSet, node::NodeIndex};

/// Borrowing iterator over the keys of a [`RedwoodSet`], in ascending order.
pub struct Iter<'a, K: Ord> {
    tree: &'a RedwoodSet<K>,
    front: NodeIndex,
    back: NodeIndex,
    remaining: usize,
}

impl<'a, K: Ord> Iter<'a, K> {
    pub(crate) fn new(tree: &'a RedwoodSet<K>) -> Self {
        Self {
            tree,
            front: tree.minimum,
            back: tree.maximum,
            remaining: tree.len(),
        }
    }
}

impl<'a, K: Ord> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.front;
        self.front = self.tree.successor(node);
        self.remaining -= 1;

        Some(self.tree.key_at(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Ord> DoubleEndedIterator for Iter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.back;
        self.back = self.tree.predecessor(node);
        self.remaining -= 1;

        Some(self.tree.key_at(node))
    }
}

impl<K: Ord> ExactSizeIterator for Iter<'_, K> {}

impl<K: Ord> FusedIterator for Iter<'_, K> {}

impl<K: Ord> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// Owning iterator over the keys of a [`RedwoodSet`], in ascending order.
///
/// Each step unlinks the current minimum (or maximum, from the back) of the remaining tree.
pub struct IntoIter<K: Ord> {
    tree: RedwoodSet<K>,
}

impl<K: Ord> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<K: Ord> DoubleEndedIterator for IntoIter<K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.tree.pop_last()
    }
}

impl<K: Ord> ExactSizeIterator for IntoIter<K> {}

impl<K: Ord> FusedIterator for IntoIter<K> {}

impl<K: Ord> IntoIterator for RedwoodSet<K> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { tree: self }
    }
}

impl<'a, K: Ord> IntoIterator for &'a RedwoodSet<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::RedwoodSet;

    #[test]
    pub fn sorted_iteration() {
        let tree: RedwoodSet<u32> = [40, 10, 30, 20, 10, 50].into_iter().collect();

        let keys: Vec<u32> = tree.iter().copied().collect();
        assert_eq!(keys, [10, 20, 30, 40, 50]);
        assert_eq!(tree.iter().len(), 5);
    }

    #[test]
    pub fn iteration_from_both_ends_meets() {
        let tree: RedwoodSet<u32> = (1..=6).collect();
        let mut iter = tree.iter();

        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&6));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    pub fn empty_iteration() {
        let tree = RedwoodSet::<u8>::new();

        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.iter().next_back(), None);
        assert_eq!(tree.into_iter().next(), None);
    }

    #[test]
    pub fn owning_iteration() {
        let tree: RedwoodSet<String> = ["b", "c", "a"].into_iter().map(String::from).collect();

        let mut iter = tree.into_iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next_back().as_deref(), Some("c"));
        assert_eq!(iter.collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    pub fn borrowed_for_loop() {
        let tree = RedwoodSet::from([3, 1, 2]);
        let mut total = 0;

        for key in &tree {
            total = total * 10 + key;
        }

        assert_eq!(total, 123);
    }
}
