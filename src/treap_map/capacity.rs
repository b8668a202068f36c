use super::{NaturalOrder, TreapMap};
use crate::raw::{Owner, PriorityGen, RawTreap};

impl<K: Ord, V> TreapMap<K, V> {
    /// Creates an empty map with capacity for at least `capacity` elements.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::TreapMap;
    ///
    /// let map: TreapMap<i32, i32> = TreapMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        TreapMap {
            raw: RawTreap::with_capacity(capacity, PriorityGen::new()),
            cmp: NaturalOrder,
            owner: Owner::fresh(),
            populated: false,
        }
    }
}

impl<K, V, C> TreapMap<K, V, C> {
    /// Returns the number of entries the map can hold without reallocating.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
