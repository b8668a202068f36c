use super::handle::Handle;

/// A treap node: one key-value pair, its heap priority and the cached size of its subtree.
#[derive(Clone)]
pub(crate) struct TreapNode<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    priority: u32,
    // Distinguishes this node from later nodes recycled into the same arena slot.
    stamp: u64,
    size: usize,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl<K, V> TreapNode<K, V> {
    /// Creates a detached single-node subtree.
    pub(crate) const fn new(key: K, value: V, priority: u32, stamp: u64) -> Self {
        Self {
            key,
            value,
            priority,
            stamp,
            size: 1,
            left: None,
            right: None,
        }
    }

    pub(crate) const fn priority(&self) -> u32 {
        self.priority
    }

    pub(crate) const fn stamp(&self) -> u64 {
        self.stamp
    }

    /// Returns the number of nodes in the subtree rooted here.
    pub(crate) const fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    pub(crate) fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    pub(crate) fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }
}
