use super::{BlockDeque, Thresholds};
use crate::raw::{Owner, RawBlockDeque};

impl<T> BlockDeque<T> {
    /// Creates an empty deque with room for at least `capacity` elements.
    ///
    /// This is an extension and is not part of the standard `VecDeque` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::BlockDeque;
    ///
    /// let deque: BlockDeque<i32> = BlockDeque::with_capacity(32);
    /// assert!(deque.is_empty());
    /// assert!(deque.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        BlockDeque {
            raw: RawBlockDeque::with_capacity(capacity, Thresholds::DEFAULT),
            owner: Owner::fresh(),
        }
    }

    /// Returns the number of elements the deque can hold without reallocating.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
