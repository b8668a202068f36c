use core::ops::{Index, IndexMut};

use super::{Comparator, TreapMap};
use crate::Rank;

impl<K, V, C: Comparator<K>> TreapMap<K, V, C> {
    /// Returns the key-value pair at position `rank` in sorted order.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// `BTreeMap` API.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
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
    /// map.insert("a", 10);
    /// map.insert("c", 30);
    /// map.insert("b", 20);
    ///
    /// let (key, value) = map.get_by_rank(1).unwrap();
    /// assert_eq!((key, value), (&"b", &20));
    /// assert!(map.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.select(rank)?);
        Some((&node.key, &node.value))
    }

    /// Returns the key and a mutable reference to the value at position `rank`
    /// in sorted order.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// `BTreeMap` API.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    /// The node is isolated by splitting the tree around it and merging it back.
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
    /// map.insert(10, "a");
    /// map.insert(5, "b");
    ///
    /// if let Some((key, value)) = map.get_by_rank_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    ///
    /// assert_eq!(map.get(&5), Some(&"updated"));
    /// ```
    #[must_use]
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        let handle = self.raw.get_kth(rank.checked_add(1)?)?;
        let node = self.raw.node_mut(handle);
        Some((&node.key, &mut node.value))
    }

    /// Returns the zero-based rank of `key` in sorted order, or `None` if the
    /// key is not present.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// `BTreeMap` API.
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
    /// map.insert(10, "a");
    /// map.insert(20, "b");
    ///
    /// assert_eq!(map.rank_of(&10), Some(0));
    /// assert_eq!(map.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of(&self, key: &K) -> Option<usize> {
        self.raw.search(key, &self.cmp)?;
        Some(self.raw.rank(key, &self.cmp))
    }

    /// Returns the number of keys that are ordered strictly before `key`, whether or not `key`
    /// itself is present.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::TreapMap;
    ///
    /// let map = TreapMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.count_preceding(&25), 2);
    /// assert_eq!(map.count_preceding(&10), 0);
    /// ```
    #[must_use]
    pub fn count_preceding(&self, key: &K) -> usize {
        self.raw.rank(key, &self.cmp)
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use rank_collections::{Rank, TreapMap};
///
/// let mut map = TreapMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
///
/// assert_eq!(map[Rank(0)], 1);
/// ```
impl<K, V, C: Comparator<K>> Index<Rank> for TreapMap<K, V, C> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}

/// Mutably indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use rank_collections::{Rank, TreapMap};
///
/// let mut map = TreapMap::from([("a", 1), ("b", 2)]);
/// map[Rank(1)] = 5;
///
/// assert_eq!(map.get(&"b"), Some(&5));
/// ```
impl<K, V, C: Comparator<K>> IndexMut<Rank> for TreapMap<K, V, C> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.get_by_rank_mut(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(30))]

        #[test]
        fn ranks_agree_with_sorted_keys(keys in prop::collection::btree_set(-1000i32..1000, 0..300)) {
            let mut map = TreapMap::with_seed(13);
            map.extend(keys.iter().map(|&k| (k, k)));
            let sorted: Vec<i32> = keys.iter().copied().collect();

            for (rank, key) in sorted.iter().enumerate() {
                prop_assert_eq!(map.rank_of(key), Some(rank));
                prop_assert_eq!(map.get_by_rank(rank), Some((key, key)));
                prop_assert_eq!(map.get_by_rank_mut(rank).map(|(k, _)| *k), Some(*key));
            }
            prop_assert_eq!(map.get_by_rank(sorted.len()), None);
            map.raw.validate_invariants(&map.cmp);
        }
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn rank_index_out_of_bounds_panics() {
        let map: TreapMap<i32, i32> = TreapMap::new();
        let _ = map[Rank(0)];
    }
}
