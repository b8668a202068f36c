use super::{Comparator, TreapMap};
use crate::error::{Error, Result};
use crate::raw::{Handle, Owner};

/// A position in a [`TreapMap`]: one entry, or the end position past the last entry.
///
/// An entry cursor pins the tree node it was created for. It stays valid through any number
/// of inserts, removals and rebalancing of *other* entries, and becomes stale once its own
/// entry is removed, even if the same key is inserted again later.
///
/// Moving a cursor re-derives the entry's rank from its key, so it always steps to the
/// current neighbour in key order.
///
/// # Examples
///
/// ```
/// use rank_collections::{Error, TreapMap};
///
/// let mut map = TreapMap::from([(1, "a"), (2, "b")]);
/// let (cursor, _) = map.insert(3, "c");
///
/// map.insert(0, "z");
/// assert_eq!(map.get_at(&cursor), Ok((&3, &"c")));
///
/// map.remove(&3);
/// assert_eq!(map.get_at(&cursor), Err(Error::InvalidIterator));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Cursor {
    owner: Owner,
    /// The node and its creation stamp; `None` is the end position.
    node: Option<(Handle, u64)>,
}

impl Cursor {
    /// Returns `true` if this is the end position.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.node.is_none()
    }
}

impl<K, V, C: Comparator<K>> TreapMap<K, V, C> {
    pub(super) fn cursor_to(&self, node: Handle) -> Cursor {
        Cursor {
            owner: self.owner,
            node: Some((node, self.raw.node(node).stamp())),
        }
    }

    fn cursor_at_rank(&self, rank: usize) -> Cursor {
        match self.raw.select(rank) {
            Some(node) => self.cursor_to(node),
            None => self.end(),
        }
    }

    /// Returns a cursor to the first entry, or the end position of an empty map.
    ///
    /// # Complexity
    ///
    /// O(log n) expected
    #[must_use]
    pub fn begin(&self) -> Cursor {
        self.cursor_at_rank(0)
    }

    /// Returns the end position. It is never dereferenceable.
    #[must_use]
    pub const fn end(&self) -> Cursor {
        Cursor {
            owner: self.owner,
            node: None,
        }
    }

    /// Returns a cursor to the entry for `key`, or [`end`](Self::end) if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::TreapMap;
    ///
    /// let map = TreapMap::from([(1, "a")]);
    /// assert_eq!(map.get_at(&map.find(&1)), Ok((&1, &"a")));
    /// assert_eq!(map.find(&2), map.end());
    /// ```
    #[must_use]
    pub fn find(&self, key: &K) -> Cursor {
        match self.raw.search(key, &self.cmp) {
            Some(node) => self.cursor_to(node),
            None => self.end(),
        }
    }

    /// Returns `true` if `cursor` belongs to this map and its entry, if any, is still present.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn is_valid(&self, cursor: &Cursor) -> bool {
        cursor.owner == self.owner && cursor.node.is_none_or(|(node, stamp)| self.raw.is_live(node, stamp))
    }

    /// Resolves `cursor` to a live node, rejecting foreign, stale and end cursors.
    fn resolve(&self, cursor: &Cursor) -> Result<Handle> {
        if !self.is_valid(cursor) {
            return Err(Error::InvalidIterator);
        }
        cursor.node.map(|(node, _)| node).ok_or(Error::InvalidIterator)
    }

    /// Returns the entry `cursor` points at.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIterator`] if `cursor` is stale, foreign, or the end position.
    pub fn get_at(&self, cursor: &Cursor) -> Result<(&K, &V)> {
        let node = self.raw.node(self.resolve(cursor)?);
        Ok((&node.key, &node.value))
    }

    /// Returns a mutable reference to the value of the entry `cursor` points at.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIterator`] if `cursor` is stale, foreign, or the end position.
    pub fn value_at_mut(&mut self, cursor: &Cursor) -> Result<&mut V> {
        let node = self.resolve(cursor)?;
        Ok(&mut self.raw.node_mut(node).value)
    }

    /// Returns the cursor to the entry after the one `cursor` points at, or the end position
    /// after the last entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIterator`] if the map is empty, or if `cursor` is stale, foreign,
    /// or already the end position.
    ///
    /// # Complexity
    ///
    /// O(log n) expected
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::{Error, TreapMap};
    ///
    /// let map = TreapMap::from([(5, ()), (3, ()), (8, ())]);
    /// let mut keys = Vec::new();
    /// let mut cursor = map.begin();
    /// while cursor != map.end() {
    ///     keys.push(*map.get_at(&cursor).unwrap().0);
    ///     cursor = map.next_cursor(&cursor).unwrap();
    /// }
    /// assert_eq!(keys, [3, 5, 8]);
    /// assert_eq!(map.next_cursor(&cursor), Err(Error::InvalidIterator));
    /// ```
    pub fn next_cursor(&self, cursor: &Cursor) -> Result<Cursor> {
        let node = self.resolve(cursor)?;
        let rank = self.raw.rank(&self.raw.node(node).key, &self.cmp);
        Ok(self.cursor_at_rank(rank + 1))
    }

    /// Returns the cursor to the entry before the one `cursor` points at. From the end
    /// position this is the last entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIterator`] if the map is empty, if `cursor` is stale or foreign,
    /// or if it points at the first entry.
    ///
    /// # Complexity
    ///
    /// O(log n) expected
    pub fn prev_cursor(&self, cursor: &Cursor) -> Result<Cursor> {
        if !self.is_valid(cursor) || self.is_empty() {
            return Err(Error::InvalidIterator);
        }
        let rank = match cursor.node {
            Some((node, _)) => self.raw.rank(&self.raw.node(node).key, &self.cmp),
            None => self.len(),
        };
        let prev = rank.checked_sub(1).ok_or(Error::InvalidIterator)?;
        Ok(self.cursor_at_rank(prev))
    }

    /// Removes the entry `pos` points at and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIterator`] if `pos` is the end position, belongs to another map,
    /// or its entry has already been removed. The map is left unchanged.
    ///
    /// # Complexity
    ///
    /// O(log n) expected
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::{Error, TreapMap};
    ///
    /// let mut map = TreapMap::from([(1, "a"), (2, "b")]);
    /// let first = map.begin();
    /// assert_eq!(map.erase(&first), Ok((1, "a")));
    /// assert_eq!(map.erase(&first), Err(Error::InvalidIterator));
    /// assert_eq!(map.erase(&map.end()), Err(Error::InvalidIterator));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn erase(&mut self, pos: &Cursor) -> Result<(K, V)> {
        let node = self.resolve(pos)?;
        let rank = self.raw.rank(&self.raw.node(node).key, &self.cmp);
        self.raw.remove_at(rank).ok_or(Error::InvalidIterator)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use pretty_assertions::assert_eq;

    #[test]
    fn walks_both_directions() {
        let map: TreapMap<_, _> = (0..100).map(|k| (k, k * k)).collect();

        let mut forward = Vec::new();
        let mut cursor = map.begin();
        while !cursor.is_end() {
            forward.push(*map.get_at(&cursor).unwrap().0);
            cursor = map.next_cursor(&cursor).unwrap();
        }
        assert_eq!(forward, (0..100).collect::<Vec<_>>());

        let mut backward = Vec::new();
        let mut cursor = map.end();
        while let Ok(prev) = map.prev_cursor(&cursor) {
            backward.push(*map.get_at(&prev).unwrap().0);
            cursor = prev;
        }
        assert_eq!(backward, (0..100).rev().collect::<Vec<_>>());
        assert_eq!(cursor, map.begin());
    }

    #[test]
    fn cursors_survive_unrelated_mutation() {
        let mut map = TreapMap::with_seed(14);
        map.extend((0..64).map(|k| (k * 2, k)));
        let (cursor, _) = map.insert(33, 100);
        for k in 0..64 {
            map.insert(k * 2 + 1, k);
        }
        map.remove(&0);
        assert_eq!(map.get_at(&cursor), Ok((&33, &100)));
        assert_eq!(map.next_cursor(&cursor).map(|c| map.get_at(&c).map(|(k, _)| *k)), Ok(Ok(34)));
        *map.value_at_mut(&cursor).unwrap() += 1;
        assert_eq!(map[&33], 101);
    }

    #[test]
    fn reinserted_key_does_not_revive_a_cursor() {
        let mut map = TreapMap::with_seed(15);
        let (cursor, _) = map.insert(1, 'a');
        assert_eq!(map.erase(&cursor), Ok((1, 'a')));
        let (fresh, _) = map.insert(1, 'b');
        assert!(!map.is_valid(&cursor));
        assert!(map.is_valid(&fresh));
        assert_ne!(cursor, fresh);
    }

    #[test]
    fn empty_map_rejects_navigation() {
        let map: TreapMap<i32, i32> = TreapMap::new();
        assert_eq!(map.begin(), map.end());
        assert_eq!(map.next_cursor(&map.begin()), Err(Error::InvalidIterator));
        assert_eq!(map.prev_cursor(&map.end()), Err(Error::InvalidIterator));
    }

    #[test]
    fn foreign_cursors_are_rejected() {
        let mut a = TreapMap::from([(1, 1)]);
        let b = a.clone();
        let cursor = b.begin();
        assert!(!a.is_valid(&cursor));
        assert_eq!(a.erase(&cursor), Err(Error::InvalidIterator));
        assert_eq!(a.len(), 1);
    }
}
