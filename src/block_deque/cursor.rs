use core::hash::{Hash, Hasher};

use super::BlockDeque;
use crate::error::{Error, Result};
use crate::raw::{Location, Owner};

/// A position in a [`BlockDeque`], from the first element up to one past the last.
///
/// A cursor records the logical index it was created at together with the block, offset and
/// cell that index resolved to. The deque re-resolves the index whenever the cursor is used;
/// if any insert, erase, split or merge moved a different element (or none) to that spot, the
/// cursor is stale and the operation fails with [`Error::InvalidIterator`]. The exception is a
/// cursor at index 0, which always names the current front.
///
/// Two cursors are equal when they come from the same deque and name the same index.
///
/// # Examples
///
/// ```
/// use rank_collections::{BlockDeque, Error};
///
/// let mut deque = BlockDeque::from([1, 2, 3]);
/// let last = deque.advance(&deque.begin(), 2).unwrap();
/// assert_eq!(deque.get_at(&last), Ok(&3));
///
/// let first = deque.begin();
/// deque.push_front(0);
/// assert!(!deque.is_valid(&last));
/// assert_eq!(deque.get_at(&last), Err(Error::InvalidIterator));
/// assert_eq!(deque.get_at(&first), Ok(&0));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Cursor {
    owner: Owner,
    index: usize,
    location: Location,
}

impl Cursor {
    pub(super) const fn new(owner: Owner, index: usize, location: Location) -> Self {
        Cursor {
            owner,
            index,
            location,
        }
    }

    /// Returns the logical index this cursor was created at.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the signed distance from `origin` to `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIterator`] if the cursors come from different deques.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::BlockDeque;
    ///
    /// let deque = BlockDeque::from([1, 2, 3]);
    /// assert_eq!(deque.end().offset_from(&deque.begin()), Ok(3));
    /// assert_eq!(deque.begin().offset_from(&deque.end()), Ok(-3));
    /// ```
    pub fn offset_from(&self, origin: &Cursor) -> Result<isize> {
        if self.owner != origin.owner {
            return Err(Error::InvalidIterator);
        }
        let distance = if self.index >= origin.index {
            isize::try_from(self.index - origin.index)
        } else {
            isize::try_from(origin.index - self.index).map(|distance| -distance)
        };
        distance.map_err(|_| Error::InvalidIterator)
    }
}

impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.index == other.index
    }
}

impl Eq for Cursor {}

impl Hash for Cursor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.index.hash(state);
    }
}

impl<T> BlockDeque<T> {
    fn cursor_at(&self, index: usize) -> Cursor {
        Cursor::new(self.owner, index, self.raw.locate(index))
    }

    /// Returns a cursor to the first element, or the end position of an empty deque.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn begin(&self) -> Cursor {
        self.cursor_at(0)
    }

    /// Returns the one-past-the-last cursor. It is never dereferenceable.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn end(&self) -> Cursor {
        self.cursor_at(self.len())
    }

    /// Returns a cursor to the first element.
    ///
    /// # Errors
    ///
    /// Unlike [`begin`](Self::begin), returns [`Error::ContainerEmpty`] if the deque is empty.
    pub fn cbegin(&self) -> Result<Cursor> {
        if self.is_empty() {
            return Err(Error::ContainerEmpty);
        }
        Ok(self.begin())
    }

    /// Same as [`end`](Self::end).
    #[must_use]
    pub fn cend(&self) -> Cursor {
        self.end()
    }

    /// Returns `true` if `cursor` belongs to this deque and still resolves to the spot it was
    /// created at. A cursor at index 0 stays valid through any change at the front.
    ///
    /// # Complexity
    ///
    /// O(√n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::BlockDeque;
    ///
    /// let mut deque = BlockDeque::from([1, 2, 3]);
    /// let other = deque.clone();
    /// let begin = deque.begin();
    /// let second = deque.next_cursor(&begin).unwrap();
    /// assert!(deque.is_valid(&begin));
    /// assert!(!other.is_valid(&begin));
    ///
    /// deque.pop_front().unwrap();
    /// assert!(deque.is_valid(&begin));
    /// assert!(!deque.is_valid(&second));
    /// ```
    #[must_use]
    pub fn is_valid(&self, cursor: &Cursor) -> bool {
        self.resolve(cursor).is_ok()
    }

    /// Resolves `cursor` against the current chain.
    fn resolve(&self, cursor: &Cursor) -> Result<Location> {
        if cursor.owner != self.owner || cursor.index > self.len() {
            return Err(Error::InvalidIterator);
        }
        let location = self.raw.locate(cursor.index);
        if cursor.index == 0 || location == cursor.location {
            Ok(location)
        } else {
            Err(Error::InvalidIterator)
        }
    }

    /// Returns the element `cursor` points at.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIterator`] if `cursor` is stale, foreign, or the end position.
    pub fn get_at(&self, cursor: &Cursor) -> Result<&T> {
        let cell = self.resolve(cursor)?.cell.ok_or(Error::InvalidIterator)?;
        Ok(self.raw.value(cell))
    }

    /// Returns a mutable reference to the element `cursor` points at.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIterator`] if `cursor` is stale, foreign, or the end position.
    pub fn get_at_mut(&mut self, cursor: &Cursor) -> Result<&mut T> {
        let cell = self.resolve(cursor)?.cell.ok_or(Error::InvalidIterator)?;
        Ok(self.raw.value_mut(cell))
    }

    /// Returns a cursor `n` positions after `cursor` (before it, for negative `n`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIterator`] if `cursor` is stale or foreign, or if the target
    /// falls outside `[begin, end]`.
    ///
    /// # Complexity
    ///
    /// O(√n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::{BlockDeque, Error};
    ///
    /// let deque = BlockDeque::from([1, 2, 3]);
    /// let end = deque.advance(&deque.begin(), 3).unwrap();
    /// assert_eq!(end, deque.end());
    /// assert_eq!(deque.advance(&end, 1), Err(Error::InvalidIterator));
    /// assert_eq!(deque.advance(&deque.begin(), -1), Err(Error::InvalidIterator));
    /// ```
    pub fn advance(&self, cursor: &Cursor, n: isize) -> Result<Cursor> {
        self.resolve(cursor)?;
        let index = cursor
            .index
            .checked_add_signed(n)
            .filter(|&index| index <= self.len())
            .ok_or(Error::InvalidIterator)?;
        Ok(self.cursor_at(index))
    }

    /// Returns the cursor after `cursor`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIterator`] if `cursor` is stale, foreign, or already the end.
    pub fn next_cursor(&self, cursor: &Cursor) -> Result<Cursor> {
        self.advance(cursor, 1)
    }

    /// Returns the cursor before `cursor`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIterator`] if `cursor` is stale, foreign, or the beginning.
    pub fn prev_cursor(&self, cursor: &Cursor) -> Result<Cursor> {
        self.advance(cursor, -1)
    }

    /// Inserts `value` in front of `pos` and returns a cursor to it.
    ///
    /// `pos` may be [`end`](Self::end), which appends. Cursors other than the returned one may
    /// become stale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIterator`] if `pos` is stale or foreign.
    ///
    /// # Complexity
    ///
    /// O(√n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::BlockDeque;
    ///
    /// let mut deque = BlockDeque::from([1, 3]);
    /// let end = deque.end();
    /// let four = deque.insert(&end, 4).unwrap();
    /// let three = deque.prev_cursor(&four).unwrap();
    /// deque.insert(&three, 2).unwrap();
    /// assert_eq!(deque, BlockDeque::from([1, 2, 3, 4]));
    /// ```
    pub fn insert(&mut self, pos: &Cursor, value: T) -> Result<Cursor> {
        self.resolve(pos)?;
        let location = self.raw.insert(pos.index, value);
        Ok(Cursor::new(self.owner, pos.index, location))
    }

    /// Removes the element at `pos` and returns a cursor to the element that followed it
    /// (the end position if it was the last).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIterator`] if `pos` is stale or foreign,
    /// [`Error::ContainerEmpty`] if the deque is empty, or [`Error::IndexOutOfBound`] if `pos`
    /// is the end position.
    ///
    /// # Complexity
    ///
    /// O(√n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::{BlockDeque, Error};
    ///
    /// let mut deque = BlockDeque::from([1, 2]);
    /// let next = deque.erase(&deque.begin()).unwrap();
    /// assert_eq!(deque.get_at(&next), Ok(&2));
    /// assert_eq!(deque.erase(&deque.end()), Err(Error::IndexOutOfBound));
    /// ```
    pub fn erase(&mut self, pos: &Cursor) -> Result<Cursor> {
        self.resolve(pos)?;
        if self.is_empty() {
            return Err(Error::ContainerEmpty);
        }
        if pos.index >= self.len() {
            return Err(Error::IndexOutOfBound);
        }
        self.raw.remove(pos.index);
        Ok(self.cursor_at(pos.index))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::super::Thresholds;
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_invalidate_cursors_past_the_split_point() {
        let mut deque = BlockDeque::with_thresholds(Thresholds::new(8, 3, 8));
        deque.extend(0..7);
        let early = deque.advance(&deque.begin(), 1).unwrap();
        let late = deque.advance(&deque.begin(), 6).unwrap();

        // The eighth element splits [0..8) into [0..4) and [4..8).
        deque.push_back(7);
        assert_eq!(deque.block_count(), 2);
        assert!(deque.is_valid(&early));
        assert!(!deque.is_valid(&late));
        assert_eq!(deque.get_at(&early), Ok(&1));
    }

    #[test]
    fn failed_calls_leave_the_deque_untouched() {
        let mut deque = BlockDeque::from([1, 2, 3]);
        let foreign = BlockDeque::from([1, 2, 3]).begin();
        assert_eq!(deque.insert(&foreign, 0), Err(Error::InvalidIterator));
        assert_eq!(deque.erase(&foreign), Err(Error::InvalidIterator));
        assert_eq!(deque.erase(&deque.end()), Err(Error::IndexOutOfBound));
        assert_eq!(deque, BlockDeque::from([1, 2, 3]));
    }

    #[test]
    fn empty_deque_cursors() {
        let mut deque: BlockDeque<i32> = BlockDeque::new();
        assert_eq!(deque.begin(), deque.end());
        assert_eq!(deque.cbegin(), Err(Error::ContainerEmpty));
        assert_eq!(deque.cend(), deque.end());
        assert_eq!(deque.erase(&deque.end()), Err(Error::ContainerEmpty));
        assert_eq!(deque.get_at(&deque.begin()), Err(Error::InvalidIterator));
    }

    #[test]
    fn erase_returns_following_element() {
        let mut deque: BlockDeque<_> = (0..20).collect();
        let mut cursor = deque.advance(&deque.begin(), 5).unwrap();
        for expected in 6..20 {
            cursor = deque.erase(&cursor).unwrap();
            assert_eq!(deque.get_at(&cursor), Ok(&expected));
        }
        cursor = deque.erase(&cursor).unwrap();
        assert_eq!(cursor, deque.end());
        assert_eq!(deque.len(), 5);
    }

    #[test]
    fn begin_survives_changes_at_the_front() {
        let mut deque = BlockDeque::with_thresholds(Thresholds::new(4, 1, 4));
        deque.extend([1, 2, 3]);
        let begin = deque.begin();

        deque.pop_front().unwrap();
        assert!(deque.is_valid(&begin));
        assert_eq!(deque.get_at(&begin), Ok(&2));
        let front = deque.insert(&begin, 0).unwrap();
        assert_eq!(deque.get_at(&front), Ok(&0));

        for value in (-8..0).rev() {
            deque.push_front(value);
        }
        assert!(deque.block_count() > 1);
        *deque.get_at_mut(&begin).unwrap() *= 10;
        assert_eq!(deque.erase(&begin).map(|next| next.index()), Ok(0));
        assert_eq!(deque.get_at(&begin), Ok(&-7));
        assert_eq!(deque.next_cursor(&begin).and_then(|c| deque.get_at(&c).copied()), Ok(-6));

        while deque.pop_front().is_ok() {}
        assert!(deque.is_valid(&begin));
        assert_eq!(begin, deque.end());
        assert_eq!(deque.get_at(&begin), Err(Error::InvalidIterator));
        assert_eq!(deque.erase(&begin), Err(Error::ContainerEmpty));
    }

    #[test]
    fn offset_between_deques_is_rejected() {
        let a = BlockDeque::from([1]);
        let b = BlockDeque::from([1]);
        assert_eq!(a.begin().offset_from(&b.begin()), Err(Error::InvalidIterator));
        assert_eq!(a.end().offset_from(&a.begin()), Ok(1));
    }
}
