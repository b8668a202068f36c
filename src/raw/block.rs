use super::handle::Handle;

/// The owned slot holding one element of a [`RawBlockDeque`](super::RawBlockDeque).
///
/// Cells are linked only to their neighbours inside the same block; the last cell of a block
/// has `next == None` even when a following block exists.
#[derive(Clone)]
pub(crate) struct Cell<T> {
    pub(crate) value: T,
    pub(crate) prev: Option<Handle>,
    pub(crate) next: Option<Handle>,
}

impl<T> Cell<T> {
    pub(crate) const fn new(value: T) -> Self {
        Self {
            value,
            prev: None,
            next: None,
        }
    }
}

/// One link of the block chain: a bounded doubly linked run of cells.
#[derive(Clone, Debug, Default)]
pub(crate) struct Block {
    prev: Option<Handle>,
    next: Option<Handle>,
    head: Option<Handle>,
    tail: Option<Handle>,
    len: usize,
}

impl Block {
    /// Creates a new empty block.
    pub(crate) const fn new() -> Self {
        Self {
            prev: None,
            next: None,
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Returns the number of cells in this block.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn prev(&self) -> Option<Handle> {
        self.prev
    }

    pub(crate) fn set_prev(&mut self, prev: Option<Handle>) {
        self.prev = prev;
    }

    pub(crate) const fn next(&self) -> Option<Handle> {
        self.next
    }

    pub(crate) fn set_next(&mut self, next: Option<Handle>) {
        self.next = next;
    }

    /// Returns the first cell of the block.
    pub(crate) const fn head(&self) -> Option<Handle> {
        self.head
    }

    /// Returns the last cell of the block.
    pub(crate) const fn tail(&self) -> Option<Handle> {
        self.tail
    }

    pub(crate) fn set_head(&mut self, head: Option<Handle>) {
        self.head = head;
    }

    pub(crate) fn set_tail(&mut self, tail: Option<Handle>) {
        self.tail = tail;
    }

    /// Accounts for one cell spliced into the run.
    pub(crate) fn grow(&mut self) {
        self.len += 1;
    }

    /// Accounts for one cell unlinked from the run.
    pub(crate) fn shrink(&mut self) {
        debug_assert!(self.len > 0, "`Block::shrink()` - block is already empty!");
        self.len -= 1;
    }

    /// Replaces the cell run of this block.
    pub(crate) fn set_run(&mut self, head: Option<Handle>, tail: Option<Handle>, len: usize) {
        debug_assert_eq!(head.is_none(), len == 0);
        debug_assert_eq!(tail.is_none(), len == 0);
        self.head = head;
        self.tail = tail;
        self.len = len;
    }

    /// Detaches and returns the whole cell run, leaving the block empty.
    pub(crate) fn take_run(&mut self) -> (Option<Handle>, Option<Handle>, usize) {
        let run = (self.head, self.tail, self.len);
        self.set_run(None, None, 0);
        run
    }
}
