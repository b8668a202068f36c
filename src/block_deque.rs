use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::{Index, IndexMut};

use crate::error::{Error, Result};
use crate::raw::{Handle, Owner, RawBlockDeque};

mod capacity;
mod cursor;
mod thresholds;

pub use cursor::Cursor;
pub use thresholds::Thresholds;

/// A double-ended sequence stored as a doubly linked chain of bounded blocks.
///
/// Each block holds a short linked run of elements. Reaching an index first walks the chain
/// block by block and then walks inside one block, so with the default [`Thresholds`] every
/// positional operation costs O(√n). Unlike `VecDeque`, that bound holds for inserting and
/// removing in the *middle* of the sequence too.
///
/// Elements never move once inserted: splitting and merging blocks only relinks them.
///
/// Positions can be captured as a [`Cursor`]. A cursor remembers its logical index and the
/// physical spot it resolved to. Any later change that moves that index to another spot makes
/// the cursor stale, and every operation taking it then fails with
/// [`Error::InvalidIterator`].
///
/// # Examples
///
/// ```
/// use rank_collections::BlockDeque;
///
/// let mut deque = BlockDeque::new();
/// deque.push_back(2);
/// deque.push_back(3);
/// deque.push_front(1);
///
/// assert_eq!(deque.len(), 3);
/// assert_eq!(deque.front(), Ok(&1));
/// assert_eq!(deque[2], 3);
///
/// // Insert in the middle through a cursor.
/// let second = deque.next_cursor(&deque.begin()).unwrap();
/// deque.insert(&second, 10).unwrap();
///
/// let values: Vec<_> = deque.iter().copied().collect();
/// assert_eq!(values, [1, 10, 2, 3]);
/// ```
///
/// A `BlockDeque` with a known list of items can be initialized from an array:
///
/// ```
/// use rank_collections::BlockDeque;
///
/// let deque = BlockDeque::from(["a", "b", "c"]);
/// assert_eq!(deque.back(), Ok(&"c"));
/// ```
pub struct BlockDeque<T> {
    raw: RawBlockDeque<T>,
    owner: Owner,
}

/// An iterator over the elements of a `BlockDeque`.
///
/// This `struct` is created by the [`iter`] method on [`BlockDeque`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use rank_collections::BlockDeque;
///
/// let deque = BlockDeque::from([1, 2, 3]);
/// let mut iter = deque.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: BlockDeque::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    raw: &'a RawBlockDeque<T>,
    /// Next `(block, cell)` to yield from the front.
    front: Option<(Handle, Handle)>,
    /// Next `(block, cell)` to yield from the back.
    back: Option<(Handle, Handle)>,
    remaining: usize,
}

/// A mutable iterator over the elements of a `BlockDeque`.
///
/// This `struct` is created by the [`iter_mut`] method on [`BlockDeque`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use rank_collections::BlockDeque;
///
/// let mut deque = BlockDeque::from([1, 2, 3]);
/// for value in deque.iter_mut() {
///     *value *= 10;
/// }
/// assert_eq!(deque, BlockDeque::from([10, 20, 30]));
/// ```
///
/// [`iter_mut`]: BlockDeque::iter_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, T> {
    inner: alloc::vec::IntoIter<&'a mut T>,
}

/// An owning iterator over the elements of a `BlockDeque`.
///
/// This `struct` is created by the [`into_iter`] method on [`BlockDeque`]
/// (provided by the [`IntoIterator`] trait). See its documentation for more.
///
/// # Examples
///
/// ```
/// use rank_collections::BlockDeque;
///
/// let deque = BlockDeque::from([1, 2]);
/// let mut iter = deque.into_iter();
/// assert_eq!(iter.next(), Some(1));
/// assert_eq!(iter.next_back(), Some(2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<T> {
    inner: alloc::vec::IntoIter<T>,
}

impl<T> BlockDeque<T> {
    /// Creates an empty deque with the default [`Thresholds`].
    ///
    /// The chain starts out as a single empty block.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::BlockDeque;
    ///
    /// let deque: BlockDeque<u32> = BlockDeque::new();
    /// assert!(deque.is_empty());
    /// assert_eq!(deque.block_count(), 1);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_thresholds(Thresholds::DEFAULT)
    }

    /// Creates an empty deque that splits and merges blocks according to `thresholds`.
    ///
    /// This is an extension and is not part of the standard `VecDeque` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::BlockDeque;
    /// use rank_collections::block_deque::Thresholds;
    ///
    /// let mut deque = BlockDeque::with_thresholds(Thresholds::new(4, 1, 4));
    /// deque.extend(0..4);
    /// assert_eq!(deque.block_count(), 2);
    /// ```
    #[must_use]
    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        BlockDeque {
            raw: RawBlockDeque::new(thresholds),
            owner: Owner::fresh(),
        }
    }

    /// Returns the rebalancing policy of this deque.
    #[must_use]
    pub const fn thresholds(&self) -> Thresholds {
        self.raw.thresholds()
    }

    /// Returns the number of blocks in the chain.
    ///
    /// This is an extension and is not part of the standard `VecDeque` API.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn block_count(&self) -> usize {
        self.raw.block_count()
    }

    /// Returns the number of elements in the deque.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::BlockDeque;
    ///
    /// let mut deque = BlockDeque::new();
    /// assert_eq!(deque.len(), 0);
    /// deque.push_back(1);
    /// assert_eq!(deque.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the deque contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every element, leaving a single empty block.
    ///
    /// Every cursor into this deque other than [`begin`](Self::begin)/[`end`](Self::end)
    /// captured afterwards becomes stale.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::BlockDeque;
    ///
    /// let mut deque: BlockDeque<_> = (0..1000).collect();
    /// deque.clear();
    /// assert!(deque.is_empty());
    /// assert_eq!(deque.block_count(), 1);
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a reference to the element at `index`, or `None` if out of bounds.
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
    /// let deque = BlockDeque::from([3, 4, 5]);
    /// assert_eq!(deque.get(1), Some(&4));
    /// assert_eq!(deque.get(3), None);
    /// ```
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.raw.get(index)
    }

    /// Returns a mutable reference to the element at `index`, or `None` if out of bounds.
    ///
    /// # Complexity
    ///
    /// O(√n)
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.raw.get_mut(index)
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBound`] if `index >= len`.
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
    /// let deque = BlockDeque::from([3, 4, 5]);
    /// assert_eq!(deque.at(0), Ok(&3));
    /// assert_eq!(deque.at(3), Err(Error::IndexOutOfBound));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T> {
        self.get(index).ok_or(Error::IndexOutOfBound)
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBound`] if `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        self.get_mut(index).ok_or(Error::IndexOutOfBound)
    }

    /// Returns a reference to the first element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContainerEmpty`] if the deque is empty.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::{BlockDeque, Error};
    ///
    /// let mut deque = BlockDeque::new();
    /// assert_eq!(deque.front(), Err(Error::ContainerEmpty));
    /// deque.push_back(1);
    /// deque.push_back(2);
    /// assert_eq!(deque.front(), Ok(&1));
    /// ```
    pub fn front(&self) -> Result<&T> {
        let (_, cell) = self.raw.first().ok_or(Error::ContainerEmpty)?;
        Ok(self.raw.value(cell))
    }

    /// Returns a mutable reference to the first element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContainerEmpty`] if the deque is empty.
    pub fn front_mut(&mut self) -> Result<&mut T> {
        let (_, cell) = self.raw.first().ok_or(Error::ContainerEmpty)?;
        Ok(self.raw.value_mut(cell))
    }

    /// Returns a reference to the last element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContainerEmpty`] if the deque is empty.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::BlockDeque;
    ///
    /// let deque = BlockDeque::from([1, 2]);
    /// assert_eq!(deque.back(), Ok(&2));
    /// ```
    pub fn back(&self) -> Result<&T> {
        let (_, cell) = self.raw.last().ok_or(Error::ContainerEmpty)?;
        Ok(self.raw.value(cell))
    }

    /// Returns a mutable reference to the last element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContainerEmpty`] if the deque is empty.
    pub fn back_mut(&mut self) -> Result<&mut T> {
        let (_, cell) = self.raw.last().ok_or(Error::ContainerEmpty)?;
        Ok(self.raw.value_mut(cell))
    }

    /// Appends an element to the back of the deque.
    ///
    /// # Complexity
    ///
    /// O(1) amortized, plus O(√n) when the tail block splits.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::BlockDeque;
    ///
    /// let mut deque = BlockDeque::new();
    /// deque.push_back(1);
    /// deque.push_back(3);
    /// assert_eq!(deque.back(), Ok(&3));
    /// ```
    pub fn push_back(&mut self, value: T) {
        self.raw.insert(self.raw.len(), value);
    }

    /// Prepends an element to the front of the deque.
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
    /// let mut deque = BlockDeque::new();
    /// deque.push_front(1);
    /// deque.push_front(2);
    /// assert_eq!(deque.front(), Ok(&2));
    /// ```
    pub fn push_front(&mut self, value: T) {
        self.raw.insert(0, value);
    }

    /// Removes the last element and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContainerEmpty`] if the deque is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::{BlockDeque, Error};
    ///
    /// let mut deque = BlockDeque::from([1, 3]);
    /// assert_eq!(deque.pop_back(), Ok(3));
    /// assert_eq!(deque.pop_back(), Ok(1));
    /// assert_eq!(deque.pop_back(), Err(Error::ContainerEmpty));
    /// ```
    pub fn pop_back(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::ContainerEmpty);
        }
        Ok(self.raw.remove(self.raw.len() - 1))
    }

    /// Removes the first element and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContainerEmpty`] if the deque is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::BlockDeque;
    ///
    /// let mut deque = BlockDeque::from([1, 2]);
    /// assert_eq!(deque.pop_front(), Ok(1));
    /// assert_eq!(deque.front(), Ok(&2));
    /// ```
    pub fn pop_front(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::ContainerEmpty);
        }
        Ok(self.raw.remove(0))
    }

    /// Inserts `value` at `index`, shifting every later element back by one, and returns a
    /// cursor to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBound`] if `index > len`.
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
    /// let mut deque = BlockDeque::from(['a', 'c']);
    /// let cursor = deque.insert_at(1, 'b').unwrap();
    /// assert_eq!(cursor.index(), 1);
    /// assert_eq!(deque, BlockDeque::from(['a', 'b', 'c']));
    /// ```
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<Cursor> {
        if index > self.len() {
            return Err(Error::IndexOutOfBound);
        }
        let location = self.raw.insert(index, value);
        Ok(Cursor::new(self.owner, index, location))
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContainerEmpty`] if the deque is empty, or
    /// [`Error::IndexOutOfBound`] if `index >= len`.
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
    /// let mut deque = BlockDeque::from([1, 2, 3]);
    /// assert_eq!(deque.remove_at(1), Ok(2));
    /// assert_eq!(deque.remove_at(2), Err(Error::IndexOutOfBound));
    /// ```
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        if self.is_empty() {
            return Err(Error::ContainerEmpty);
        }
        if index >= self.len() {
            return Err(Error::IndexOutOfBound);
        }
        Ok(self.raw.remove(index))
    }

    /// Gets an iterator over the elements of the deque, front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::BlockDeque;
    ///
    /// let deque = BlockDeque::from([5, 3, 4]);
    /// let values: Vec<_> = deque.iter().collect();
    /// assert_eq!(values, [&5, &3, &4]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            raw: &self.raw,
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    /// Gets a mutable iterator over the elements of the deque, front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            inner: self.raw.values_mut().into_iter(),
        }
    }
}

impl<T: Clone> Clone for BlockDeque<T> {
    /// Deep-copies every block and element. The copy is a different container, so cursors
    /// into `self` are foreign to it.
    fn clone(&self) -> Self {
        BlockDeque {
            raw: self.raw.clone(),
            owner: Owner::fresh(),
        }
    }
}

impl<T: Hash> Hash for BlockDeque<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for value in self {
            value.hash(state);
        }
    }
}

impl<T: PartialEq> PartialEq for BlockDeque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for BlockDeque<T> {}

impl<T: fmt::Debug> fmt::Debug for BlockDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for BlockDeque<T> {
    fn default() -> Self {
        BlockDeque::new()
    }
}

impl<T> FromIterator<T> for BlockDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = BlockDeque::new();
        deque.extend(iter);
        deque
    }
}

impl<T> Extend<T> for BlockDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for BlockDeque<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for &value in iter {
            self.push_back(value);
        }
    }
}

impl<T, const N: usize> From<[T; N]> for BlockDeque<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a BlockDeque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut BlockDeque<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T> IntoIterator for BlockDeque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the deque into a front-to-back iterator over its elements.
    fn into_iter(mut self) -> IntoIter<T> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<T> Index<usize> for BlockDeque<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get(index).expect("`BlockDeque::index()` - `index` out of bounds!")
    }
}

impl<T> IndexMut<usize> for BlockDeque<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index).expect("`BlockDeque::index_mut()` - `index` out of bounds!")
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let (block, cell) = self.front?;
        self.remaining -= 1;
        self.front = self.raw.successor(block, cell);
        Some(self.raw.value(cell))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (block, cell) = self.back?;
        self.remaining -= 1;
        self.back = self.raw.predecessor(block, cell);
        Some(self.raw.value(cell))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            raw: self.raw,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}
