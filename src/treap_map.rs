use core::fmt;
use core::iter::FusedIterator;
use core::ops::Index;

use crate::error::{Error, Result};
use crate::raw::{Owner, PriorityGen, RawTreap, Spine};

mod capacity;
mod comparator;
mod cursor;
mod order_statistic;

pub use crate::Rank;
pub use comparator::{Comparator, NaturalOrder};
pub use cursor::Cursor;

/// An ordered map based on a [treap].
///
/// Keys are kept in the order of a [`Comparator`], by default the natural [`Ord`] order. Every
/// tree node also carries a random priority, and the tree is kept a min-heap on those
/// priorities, which gives an expected height of O(log n) whatever the insertion order.
///
/// Besides key lookups, the map answers rank queries: [`get_by_rank`](Self::get_by_rank) finds
/// the entry at a sorted position and [`rank_of`](Self::rank_of) the position of a key.
///
/// Unlike `BTreeMap`, [`insert`](Self::insert) never overwrites: inserting a key that is
/// already present leaves the map unchanged and reports the existing entry.
///
/// Priorities come from a per-map random generator. [`TreapMap::with_seed`] fixes its seed, so
/// the same sequence of operations always builds the same tree.
///
/// It is a logic error for a key to be modified in such a way that its order relative to any
/// other key changes while it is in the map.
///
/// [treap]: https://en.wikipedia.org/wiki/Treap
///
/// # Examples
///
/// ```
/// use rank_collections::TreapMap;
///
/// let mut movie_reviews = TreapMap::new();
///
/// movie_reviews.insert("Office Space", "Deals with real issues in the workplace.");
/// movie_reviews.insert("Pulp Fiction", "Masterpiece.");
/// movie_reviews.insert("The Godfather", "Very enjoyable.");
///
/// // A second review of the same movie is ignored.
/// let (_, inserted) = movie_reviews.insert("Pulp Fiction", "Meh.");
/// assert!(!inserted);
/// assert_eq!(movie_reviews[&"Pulp Fiction"], "Masterpiece.");
///
/// // The second movie in alphabetical order.
/// let (title, _) = movie_reviews.get_by_rank(1).unwrap();
/// assert_eq!(*title, "Pulp Fiction");
///
/// for (movie, review) in &movie_reviews {
///     println!("{movie}: \"{review}\"");
/// }
/// ```
pub struct TreapMap<K, V, C = NaturalOrder> {
    raw: RawTreap<K, V>,
    cmp: C,
    owner: Owner,
    /// Set by the first insertion and reset by `clear`; erasing every entry leaves it set.
    populated: bool,
}

/// An iterator over the entries of a `TreapMap`.
///
/// This `struct` is created by the [`iter`] method on [`TreapMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use rank_collections::TreapMap;
///
/// let map = TreapMap::from([(1, "a"), (2, "b")]);
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: TreapMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    raw: &'a RawTreap<K, V>,
    /// Nodes whose right subtrees are still to be visited going forward.
    front: Spine,
    /// Nodes whose left subtrees are still to be visited going backward.
    back: Spine,
    remaining: usize,
}

/// An owning iterator over the entries of a `TreapMap`, in key order.
///
/// This `struct` is created by the [`into_iter`] method on [`TreapMap`]
/// (provided by the [`IntoIterator`] trait). See its documentation for more.
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

/// An iterator over the keys of a `TreapMap`.
///
/// This `struct` is created by the [`keys`] method on [`TreapMap`]. See its
/// documentation for more.
///
/// [`keys`]: TreapMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a `TreapMap`.
///
/// This `struct` is created by the [`values`] method on [`TreapMap`]. See its
/// documentation for more.
///
/// [`values`]: TreapMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<K: Ord, V> TreapMap<K, V> {
    /// Makes a new, empty `TreapMap` ordered by [`Ord`].
    ///
    /// The priority generator is seeded from a process-wide sequence, so maps created one
    /// after another get different seeds.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Makes a new, empty `TreapMap` whose node priorities are drawn from a generator seeded
    /// with `seed`.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::TreapMap;
    ///
    /// let mut a = TreapMap::with_seed(42);
    /// let mut b = TreapMap::with_seed(42);
    /// a.extend([(3, ()), (1, ()), (2, ())]);
    /// b.extend([(3, ()), (1, ()), (2, ())]);
    /// assert_eq!(a, b);
    /// ```
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_comparator_and_seed(NaturalOrder, seed)
    }
}

impl<K, V, C: Comparator<K>> TreapMap<K, V, C> {
    /// Makes a new, empty `TreapMap` that orders keys with `cmp`.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::TreapMap;
    ///
    /// let mut map = TreapMap::with_comparator(|a: &&str, b: &&str| a.len() < b.len());
    /// map.insert("ccc", 3);
    /// map.insert("a", 1);
    /// map.insert("bb", 2);
    ///
    /// // "dd" is as long as "bb", so it is treated as the same key.
    /// assert_eq!(map.get(&"dd"), Some(&2));
    /// ```
    #[must_use]
    pub fn with_comparator(cmp: C) -> Self {
        Self::from_parts(cmp, PriorityGen::new())
    }

    /// Makes a new, empty `TreapMap` that orders keys with `cmp` and draws node priorities
    /// from a generator seeded with `seed`.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    #[must_use]
    pub fn with_comparator_and_seed(cmp: C, seed: u64) -> Self {
        Self::from_parts(cmp, PriorityGen::with_seed(seed))
    }

    fn from_parts(cmp: C, priorities: PriorityGen) -> Self {
        TreapMap {
            raw: RawTreap::new(priorities),
            cmp,
            owner: Owner::fresh(),
            populated: false,
        }
    }

    /// Returns the comparator that orders this map.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns the number of elements in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::TreapMap;
    ///
    /// let mut a = TreapMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the map, removing all elements.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::TreapMap;
    ///
    /// let mut a = TreapMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
        self.populated = false;
    }

    /// Inserts a key-value pair into the map if the key is not yet present.
    ///
    /// Returns a cursor to the entry holding `key` and whether a new entry was created. When
    /// the key already exists, neither its key nor its value is touched and `value` is dropped.
    ///
    /// # Complexity
    ///
    /// O(log n) expected
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// let (first, inserted) = map.insert(37, "a");
    /// assert!(inserted);
    ///
    /// let (again, inserted) = map.insert(37, "b");
    /// assert!(!inserted);
    /// assert_eq!(first, again);
    /// assert_eq!(map[&37], "a");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Cursor, bool) {
        if let Some(node) = self.raw.search(&key, &self.cmp) {
            return (self.cursor_to(node), false);
        }
        let rank = self.raw.rank(&key, &self.cmp);
        let node = self.raw.insert_at(rank, key, value);
        self.populated = true;
        (self.cursor_to(node), true)
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Complexity
    ///
    /// O(log n) expected
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let node = self.raw.search(key, &self.cmp)?;
        Some(&self.raw.node(node).value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    #[must_use]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let node = self.raw.search(key, &self.cmp)?;
        Some(&mut self.raw.node_mut(node).value)
    }

    /// Returns the stored key and its value for the supplied key.
    ///
    /// This is useful when equivalent keys are not identical.
    #[must_use]
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.search(key, &self.cmp)?);
        Some((&node.key, &node.value))
    }

    /// Returns `true` if the map contains a value for the specified key.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.search(key, &self.cmp).is_some()
    }

    /// Returns the number of entries with the given key: `0` or `1`.
    #[must_use]
    pub fn count(&self, key: &K) -> usize {
        usize::from(self.contains_key(key))
    }

    /// Returns a reference to the value of `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContainerEmpty`] if nothing has been inserted since the map was created
    /// or last cleared, or [`Error::IndexOutOfBound`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::{Error, TreapMap};
    ///
    /// let mut map = TreapMap::new();
    /// assert_eq!(map.at(&1), Err(Error::ContainerEmpty));
    /// map.insert(1, "a");
    /// assert_eq!(map.at(&1), Ok(&"a"));
    /// assert_eq!(map.at(&2), Err(Error::IndexOutOfBound));
    ///
    /// map.remove(&1);
    /// assert_eq!(map.at(&1), Err(Error::IndexOutOfBound));
    /// map.clear();
    /// assert_eq!(map.at(&1), Err(Error::ContainerEmpty));
    /// ```
    pub fn at(&self, key: &K) -> Result<&V> {
        if !self.populated {
            return Err(Error::ContainerEmpty);
        }
        self.get(key).ok_or(Error::IndexOutOfBound)
    }

    /// Returns a mutable reference to the value of `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContainerEmpty`] if nothing has been inserted since the map was created
    /// or last cleared, or [`Error::IndexOutOfBound`] if the key is absent.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V> {
        if !self.populated {
            return Err(Error::ContainerEmpty);
        }
        self.get_mut(key).ok_or(Error::IndexOutOfBound)
    }

    /// Returns a mutable reference to the value of `key`, inserting `V::default()` first if
    /// the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::TreapMap;
    ///
    /// let mut counts: TreapMap<&str, i32> = TreapMap::new();
    /// for word in ["a", "b", "a"] {
    ///     *counts.get_or_insert_default(word) += 1;
    /// }
    /// assert_eq!(counts[&"a"], 2);
    /// assert_eq!(counts[&"b"], 1);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let node = match self.raw.search(&key, &self.cmp) {
            Some(node) => node,
            None => {
                let rank = self.raw.rank(&key, &self.cmp);
                self.populated = true;
                self.raw.insert_at(rank, key, V::default())
            }
        };
        &mut self.raw.node_mut(node).value
    }

    /// Removes a key from the map, returning its value if the key was present.
    ///
    /// # Complexity
    ///
    /// O(log n) expected
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.raw.search(key, &self.cmp)?;
        let rank = self.raw.rank(key, &self.cmp);
        self.raw.remove_at(rank).map(|(_, value)| value)
    }

    /// Returns the first key-value pair in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::TreapMap;
    ///
    /// let map = TreapMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.first_key_value(), Some((&1, &"a")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.get_by_rank(0)
    }

    /// Returns the last key-value pair in the map.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.get_by_rank(self.len().checked_sub(1)?)
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// for key in [5, 3, 8, 1] {
    ///     map.insert(key, ());
    /// }
    /// let keys: Vec<_> = map.iter().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [1, 3, 5, 8]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut front = Spine::new();
        let mut back = Spine::new();
        self.raw.push_left_spine(&mut front, self.raw.root());
        self.raw.push_right_spine(&mut back, self.raw.root());
        Iter {
            raw: &self.raw,
            front,
            back,
            remaining: self.raw.len(),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::TreapMap;
    ///
    /// let map = TreapMap::from([(2, "b"), (1, "a")]);
    /// let values: Vec<_> = map.values().copied().collect();
    /// assert_eq!(values, ["a", "b"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for TreapMap<K, V, C> {
    /// Deep-copies every node, keeping the tree shape. The copy is a different container, so
    /// cursors into `self` are foreign to it.
    fn clone(&self) -> Self {
        TreapMap {
            raw: self.raw.clone(),
            cmp: self.cmp.clone(),
            owner: Owner::fresh(),
            populated: self.populated,
        }
    }
}

impl<K: PartialEq, V: PartialEq, C: Comparator<K>> PartialEq for TreapMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C: Comparator<K>> Eq for TreapMap<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C: Comparator<K>> fmt::Debug for TreapMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Comparator<K> + Default> Default for TreapMap<K, V, C> {
    fn default() -> Self {
        TreapMap::with_comparator(C::default())
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for TreapMap<K, V, C> {
    /// Builds a map from `iter`. The first entry for each key wins.
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = TreapMap::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for TreapMap<K, V, C> {
    /// Inserts every entry of `iter`. Entries whose key is already present are skipped.
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for TreapMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, V, C: Comparator<K>> IntoIterator for &'a TreapMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for TreapMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::TreapMap;
    ///
    /// let map = TreapMap::from([(2, "b"), (1, "a")]);
    /// let mut iter = map.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next_back(), Some((2, "b")));
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<K, V, C: Comparator<K>> Index<&K> for TreapMap<K, V, C> {
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front.pop()?;
        let node = self.raw.node(handle);
        self.raw.push_left_spine(&mut self.front, node.right());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back.pop()?;
        let node = self.raw.node(handle);
        self.raw.push_right_spine(&mut self.back, node.left());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            raw: self.raw,
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}
