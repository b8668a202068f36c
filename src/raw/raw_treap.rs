use alloc::vec::Vec;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::priority::PriorityGen;
use super::tree_node::TreapNode;
use crate::treap_map::Comparator;

/// Stack of handles used by in-order walks.
pub(crate) type Spine = SmallVec<[Handle; 32]>;

/// The treap backing `TreapMap`.
///
/// Split and merge work purely on in-order rank; key comparisons only happen in
/// [`rank`](Self::rank) and [`search`](Self::search), which translate a key into the rank the
/// structural primitives act on.
#[derive(Clone)]
pub(crate) struct RawTreap<K, V> {
    /// Arena storing all tree nodes.
    nodes: Arena<TreapNode<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    priorities: PriorityGen,
    next_stamp: u64,
}

impl<K, V> RawTreap<K, V> {
    pub(crate) fn new(priorities: PriorityGen) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            priorities,
            next_stamp: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize, priorities: PriorityGen) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            priorities,
            next_stamp: 0,
        }
    }

    /// Returns the number of key-value pairs, mirrored from the root's cached size.
    pub(crate) fn len(&self) -> usize {
        self.size(self.root)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn clear(&mut self) {
        tracing::trace!(len = self.len(), "clearing treap");
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn node(&self, handle: Handle) -> &TreapNode<K, V> {
        self.nodes.get(handle)
    }

    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut TreapNode<K, V> {
        self.nodes.get_mut(handle)
    }

    /// Returns `true` if `handle` still holds the node that was stamped `stamp`.
    pub(crate) fn is_live(&self, handle: Handle, stamp: u64) -> bool {
        self.nodes.try_get(handle).is_some_and(|node| node.stamp() == stamp)
    }

    #[inline]
    fn size(&self, node: Option<Handle>) -> usize {
        node.map_or(0, |handle| self.nodes.get(handle).size())
    }

    /// Recomputes the cached subtree size of `handle` from its children.
    fn update(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let size = 1 + self.size(node.left()) + self.size(node.right());
        self.nodes.get_mut(handle).set_size(size);
    }

    /// Partitions the subtree at `node` into its first `k` in-order nodes and the rest.
    pub(crate) fn split(&mut self, node: Option<Handle>, k: usize) -> (Option<Handle>, Option<Handle>) {
        let Some(handle) = node else {
            return (None, None);
        };
        if k == 0 {
            return (None, Some(handle));
        }

        let (left, right) = {
            let node = self.nodes.get(handle);
            (node.left(), node.right())
        };
        let left_size = self.size(left);

        if k <= left_size {
            let (first, rest) = self.split(left, k);
            self.nodes.get_mut(handle).set_left(rest);
            self.update(handle);
            (first, Some(handle))
        } else {
            let (first, rest) = self.split(right, k - left_size - 1);
            self.nodes.get_mut(handle).set_right(first);
            self.update(handle);
            (Some(handle), rest)
        }
    }

    /// Joins two subtrees where every node of `a` precedes every node of `b`.
    ///
    /// The root with the smaller priority stays on top, keeping the min-heap order.
    pub(crate) fn merge(&mut self, a: Option<Handle>, b: Option<Handle>) -> Option<Handle> {
        match (a, b) {
            (None, b) => b,
            (a, None) => a,
            (Some(a), Some(b)) => {
                if self.nodes.get(a).priority() < self.nodes.get(b).priority() {
                    let right = self.nodes.get(a).right();
                    let merged = self.merge(right, Some(b));
                    self.nodes.get_mut(a).set_right(merged);
                    self.update(a);
                    Some(a)
                } else {
                    let left = self.nodes.get(b).left();
                    let merged = self.merge(Some(a), left);
                    self.nodes.get_mut(b).set_left(merged);
                    self.update(b);
                    Some(b)
                }
            }
        }
    }

    /// Returns the `k`-th (1-based) node in order.
    ///
    /// The node is isolated with two splits and the three parts are merged back, so the tree
    /// is settled again when this returns.
    pub(crate) fn get_kth(&mut self, k: usize) -> Option<Handle> {
        if k == 0 || k > self.len() {
            return None;
        }
        let (before, rest) = self.split(self.root, k - 1);
        let (kth, after) = self.split(rest, 1);
        let tail = self.merge(kth, after);
        self.root = self.merge(before, tail);
        kth
    }

    /// Returns the node at zero-based `rank` by descending on cached sizes.
    ///
    /// Finds the same node as `get_kth(rank + 1)` without restructuring, for shared borrows.
    pub(crate) fn select(&self, rank: usize) -> Option<Handle> {
        let mut remaining = rank;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let left_size = self.size(node.left());
            match remaining.cmp(&left_size) {
                core::cmp::Ordering::Less => current = node.left(),
                core::cmp::Ordering::Equal => return Some(handle),
                core::cmp::Ordering::Greater => {
                    remaining -= left_size + 1;
                    current = node.right();
                }
            }
        }
        None
    }

    /// Counts the nodes whose key strictly precedes `key`.
    pub(crate) fn rank<C: Comparator<K>>(&self, key: &K, cmp: &C) -> usize {
        let mut rank = 0;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if cmp.precedes(&node.key, key) {
                rank += self.size(node.left()) + 1;
                current = node.right();
            } else {
                current = node.left();
            }
        }
        rank
    }

    /// Finds the node whose key is equivalent to `key`.
    pub(crate) fn search<C: Comparator<K>>(&self, key: &K, cmp: &C) -> Option<Handle> {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if cmp.precedes(key, &node.key) {
                current = node.left();
            } else if cmp.precedes(&node.key, key) {
                current = node.right();
            } else {
                return Some(handle);
            }
        }
        None
    }

    /// Inserts a new node so that it lands at zero-based `rank`, returning its handle.
    ///
    /// The caller guarantees `rank` is the key's rank and that the key is absent.
    pub(crate) fn insert_at(&mut self, rank: usize, key: K, value: V) -> Handle {
        let priority = self.priorities.next_priority();
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        let handle = self.nodes.alloc(TreapNode::new(key, value, priority, stamp));

        let (before, after) = self.split(self.root, rank);
        let head = self.merge(before, Some(handle));
        self.root = self.merge(head, after);
        handle
    }

    /// Unlinks the node at zero-based `rank` and returns its pair.
    pub(crate) fn remove_at(&mut self, rank: usize) -> Option<(K, V)> {
        if rank >= self.len() {
            return None;
        }
        let (before, rest) = self.split(self.root, rank);
        let (node, after) = self.split(rest, 1);
        self.root = self.merge(before, after);

        let node = self.nodes.take(node?);
        Some((node.key, node.value))
    }

    /// Pushes `node` and its chain of left descendants onto `spine`.
    pub(crate) fn push_left_spine(&self, spine: &mut Spine, mut node: Option<Handle>) {
        while let Some(handle) = node {
            spine.push(handle);
            node = self.nodes.get(handle).left();
        }
    }

    /// Pushes `node` and its chain of right descendants onto `spine`.
    pub(crate) fn push_right_spine(&self, spine: &mut Spine, mut node: Option<Handle>) {
        while let Some(handle) = node {
            spine.push(handle);
            node = self.nodes.get(handle).right();
        }
    }

    /// Returns every node handle in order.
    fn in_order(&self) -> Vec<Handle> {
        let mut order = Vec::with_capacity(self.len());
        let mut spine = Spine::new();
        self.push_left_spine(&mut spine, self.root);
        while let Some(handle) = spine.pop() {
            order.push(handle);
            self.push_left_spine(&mut spine, self.nodes.get(handle).right());
        }
        order
    }

    /// Moves every pair out in order and leaves the treap empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let order = self.in_order();
        let mut result = Vec::with_capacity(order.len());
        for handle in order {
            let node = self.nodes.take(handle);
            result.push((node.key, node.value));
        }
        self.clear();
        result
    }
}
