use std::collections::VecDeque;
use std::hash::BuildHasherDefault;
use indexmap::IndexMap;
use rustc_hash::FxHasher;


/// Use indexmap for fast lookups and rustc_hash for fast hashing
pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;


/// Ordered sequence with O(1) append and O(1) pop from the front
/// Used for adjacency listings and as the container for computed paths
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sequence<T> {
    items: VecDeque<T>,
}

impl<T> Sequence<T> {

    /// Create an empty sequence
    pub fn new() -> Self {
        Self { items: VecDeque::new() }
    }

    /// Append an element at the tail
    pub fn push_back(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Remove and return the head element, None if the sequence is empty
    pub fn pop_front(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Element at `index` counted from the head, None past the end
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Forward cursor from head to tail, leaves the sequence untouched
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = std::collections::vec_deque::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
