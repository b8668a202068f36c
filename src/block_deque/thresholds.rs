/// Block rebalancing policy for a [`BlockDeque`](super::BlockDeque).
///
/// A block is split in two once it holds `split` elements. After an erase, a block holding at
/// most `merge` elements is merged with its next neighbour (or, failing that, its previous one)
/// when the combined block would hold at most `merge_size` elements.
///
/// This is an extension and is not part of the standard `VecDeque` API.
///
/// # Examples
///
/// ```
/// use rank_collections::BlockDeque;
/// use rank_collections::block_deque::Thresholds;
///
/// let thresholds = Thresholds::new(8, 3, 8);
/// let mut deque = BlockDeque::with_thresholds(thresholds);
/// deque.extend(0..100);
///
/// assert_eq!(deque.thresholds(), thresholds);
/// assert!(deque.block_count() > 1);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Thresholds {
    split: usize,
    merge: usize,
    merge_size: usize,
}

impl Thresholds {
    /// The default policy: split at 320, merge a block of at most 150 when the result holds at
    /// most 320.
    pub const DEFAULT: Self = Self {
        split: 320,
        merge: 150,
        merge_size: 320,
    };

    /// Creates a rebalancing policy.
    ///
    /// # Panics
    ///
    /// Panics unless `split >= 2`, `merge < split`, `merge <= merge_size` and
    /// `merge_size + 1 >= split`. The last condition guarantees an emptied block is always
    /// merged away when it has a neighbour.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::block_deque::Thresholds;
    ///
    /// let thresholds = Thresholds::new(64, 30, 64);
    /// assert_eq!(thresholds.split(), 64);
    /// ```
    #[must_use]
    pub const fn new(split: usize, merge: usize, merge_size: usize) -> Self {
        assert!(split >= 2, "`Thresholds::new()` - `split` < 2!");
        assert!(merge < split, "`Thresholds::new()` - `merge` >= `split`!");
        assert!(merge <= merge_size, "`Thresholds::new()` - `merge` > `merge_size`!");
        assert!(merge_size + 1 >= split, "`Thresholds::new()` - `merge_size` + 1 < `split`!");
        Self {
            split,
            merge,
            merge_size,
        }
    }

    /// Block size at which a block is split in two.
    #[must_use]
    pub const fn split(&self) -> usize {
        self.split
    }

    /// Largest block size that is considered for merging.
    #[must_use]
    pub const fn merge(&self) -> usize {
        self.merge
    }

    /// Largest block size a merge may produce.
    #[must_use]
    pub const fn merge_size(&self) -> usize {
        self.merge_size
    }

    /// Largest number of elements any settled block may hold.
    pub(crate) const fn max_block_len(&self) -> usize {
        if self.merge_size > self.split - 1 {
            self.merge_size
        } else {
            self.split - 1
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}
