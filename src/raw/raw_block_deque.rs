use alloc::vec::Vec;

use super::arena::Arena;
use super::block::{Block, Cell};
use super::handle::Handle;
use crate::block_deque::Thresholds;

/// The block chain backing `BlockDeque`.
#[derive(Clone)]
pub(crate) struct RawBlockDeque<T> {
    /// Arena storing every value cell.
    cells: Arena<Cell<T>>,
    /// Arena storing every block of the chain.
    blocks: Arena<Block>,
    /// First block of the chain. The chain always holds at least one block.
    head_block: Handle,
    /// Last block of the chain.
    tail_block: Handle,
    /// Total number of elements.
    len: usize,
    thresholds: Thresholds,
}

/// Physical position of a logical index: the block holding it, the offset inside that block and
/// the cell itself (`None` for the one-past-the-end position).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) struct Location {
    pub(crate) block: Handle,
    pub(crate) offset: usize,
    pub(crate) cell: Option<Handle>,
}

impl<T> RawBlockDeque<T> {
    /// Creates an empty chain made of a single empty block.
    pub(crate) fn new(thresholds: Thresholds) -> Self {
        Self::with_capacity(0, thresholds)
    }

    pub(crate) fn with_capacity(capacity: usize, thresholds: Thresholds) -> Self {
        let mut blocks = Arena::with_capacity(capacity.div_ceil(thresholds.split()).max(1));
        let head_block = blocks.alloc(Block::new());
        Self {
            cells: Arena::with_capacity(capacity),
            blocks,
            head_block,
            tail_block: head_block,
            len: 0,
            thresholds,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) const fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub(crate) fn capacity(&self) -> usize {
        self.cells.capacity()
    }

    /// Returns the number of blocks in the chain.
    pub(crate) const fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Drops every element and resets the chain to a single empty block.
    pub(crate) fn clear(&mut self) {
        tracing::trace!(len = self.len, blocks = self.blocks.len(), "clearing block chain");
        self.cells.clear();
        self.blocks.clear();
        self.head_block = self.blocks.alloc(Block::new());
        self.tail_block = self.head_block;
        self.len = 0;
    }

    /// Moves every element out in order and resets the chain.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let order = self.cell_order();
        let mut result = Vec::with_capacity(order.len());
        for cell in order {
            result.push(self.cells.take(cell).value);
        }
        self.clear();
        result
    }

    /// Resolves a logical index in `0..=len` to its physical location.
    ///
    /// The front and back of the sequence resolve in constant time; anything else scans the
    /// chain block by block and then walks inside the owning block.
    pub(crate) fn locate(&self, index: usize) -> Location {
        debug_assert!(index <= self.len, "`RawBlockDeque::locate()` - `index` > `len`!");
        let tail = self.blocks.get(self.tail_block);
        if index == self.len {
            return Location {
                block: self.tail_block,
                offset: tail.len(),
                cell: None,
            };
        }
        if index + 1 == self.len {
            return Location {
                block: self.tail_block,
                offset: tail.len() - 1,
                cell: tail.tail(),
            };
        }

        let mut block = self.head_block;
        let mut offset = index;
        loop {
            let current = self.blocks.get(block);
            if offset < current.len() {
                break;
            }
            offset -= current.len();
            block = current.next().expect("`RawBlockDeque::locate()` - chain shorter than `len`!");
        }

        Location {
            block,
            offset,
            cell: Some(self.cell_at(block, offset)),
        }
    }

    /// Walks to the `offset`-th cell of `block`, from whichever end is closer.
    fn cell_at(&self, block: Handle, offset: usize) -> Handle {
        let block = self.blocks.get(block);
        debug_assert!(offset < block.len());
        if offset <= block.len() / 2 {
            let mut cell = block.head().expect("`RawBlockDeque::cell_at()` - empty block!");
            for _ in 0..offset {
                cell = self.cells.get(cell).next.expect("`RawBlockDeque::cell_at()` - broken cell run!");
            }
            cell
        } else {
            let mut cell = block.tail().expect("`RawBlockDeque::cell_at()` - empty block!");
            for _ in offset + 1..block.len() {
                cell = self.cells.get(cell).prev.expect("`RawBlockDeque::cell_at()` - broken cell run!");
            }
            cell
        }
    }

    /// Returns the value stored in `cell`.
    pub(crate) fn value(&self, cell: Handle) -> &T {
        &self.cells.get(cell).value
    }

    pub(crate) fn value_mut(&mut self, cell: Handle) -> &mut T {
        &mut self.cells.get_mut(cell).value
    }

    /// Returns a reference to the element at `index`.
    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        let cell = self.locate(index).cell?;
        Some(self.value(cell))
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        let cell = self.locate(index).cell?;
        Some(self.value_mut(cell))
    }

    /// Returns the first cell of the sequence and its block.
    pub(crate) fn first(&self) -> Option<(Handle, Handle)> {
        let mut block = Some(self.head_block);
        while let Some(current) = block {
            if let Some(cell) = self.blocks.get(current).head() {
                return Some((current, cell));
            }
            block = self.blocks.get(current).next();
        }
        None
    }

    /// Returns the last cell of the sequence and its block.
    pub(crate) fn last(&self) -> Option<(Handle, Handle)> {
        let mut block = Some(self.tail_block);
        while let Some(current) = block {
            if let Some(cell) = self.blocks.get(current).tail() {
                return Some((current, cell));
            }
            block = self.blocks.get(current).prev();
        }
        None
    }

    /// Returns the cell after `cell`, hopping to the next block at the end of a run.
    pub(crate) fn successor(&self, block: Handle, cell: Handle) -> Option<(Handle, Handle)> {
        if let Some(next) = self.cells.get(cell).next {
            return Some((block, next));
        }
        let mut block = self.blocks.get(block).next();
        while let Some(current) = block {
            if let Some(head) = self.blocks.get(current).head() {
                return Some((current, head));
            }
            block = self.blocks.get(current).next();
        }
        None
    }

    /// Returns the cell before `cell`, hopping to the previous block at the start of a run.
    pub(crate) fn predecessor(&self, block: Handle, cell: Handle) -> Option<(Handle, Handle)> {
        if let Some(prev) = self.cells.get(cell).prev {
            return Some((block, prev));
        }
        let mut block = self.blocks.get(block).prev();
        while let Some(current) = block {
            if let Some(tail) = self.blocks.get(current).tail() {
                return Some((current, tail));
            }
            block = self.blocks.get(current).prev();
        }
        None
    }

    /// Returns every cell handle in sequence order.
    fn cell_order(&self) -> Vec<Handle> {
        let mut order = Vec::with_capacity(self.len);
        let mut next = self.first();
        while let Some((block, cell)) = next {
            order.push(cell);
            next = self.successor(block, cell);
        }
        order
    }

    /// Returns exclusive references to every element, in sequence order.
    pub(crate) fn values_mut(&mut self) -> Vec<&mut T> {
        let order = self.cell_order();
        let mut slots = self.cells.slots_mut();
        order
            .into_iter()
            .map(|cell| {
                let cell = slots[cell.to_index()].take().expect("`RawBlockDeque::values_mut()` - cell visited twice!");
                &mut cell.value
            })
            .collect()
    }

    /// Inserts `value` so that it ends up at logical `index` (`0..=len`).
    ///
    /// Returns the location of the new element after any split has settled.
    pub(crate) fn insert(&mut self, index: usize, value: T) -> Location {
        let at = self.locate(index);
        let cell = self.cells.alloc(Cell::new(value));
        self.link_before(at.block, at.cell, cell);
        self.len += 1;

        if self.blocks.get(at.block).len() >= self.thresholds.split() {
            self.split_block(at.block);
        }
        debug_assert!(self.blocks.get(at.block).len() <= self.thresholds.max_block_len());

        self.locate(index)
    }

    /// Splices `cell` into `block` in front of `before`, or at the end of the run for `None`.
    fn link_before(&mut self, block: Handle, before: Option<Handle>, cell: Handle) {
        let prev = match before {
            Some(next) => self.cells.get(next).prev,
            None => self.blocks.get(block).tail(),
        };

        let new_cell = self.cells.get_mut(cell);
        new_cell.prev = prev;
        new_cell.next = before;

        match before {
            Some(next) => self.cells.get_mut(next).prev = Some(cell),
            None => self.blocks.get_mut(block).set_tail(Some(cell)),
        }
        match prev {
            Some(prev) => self.cells.get_mut(prev).next = Some(cell),
            None => self.blocks.get_mut(block).set_head(Some(cell)),
        }
        self.blocks.get_mut(block).grow();
    }

    /// Moves the trailing half of `block` into a new block linked right after it.
    fn split_block(&mut self, block: Handle) {
        let len = self.blocks.get(block).len();
        let keep = len / 2;
        let first_moved = self.cell_at(block, keep);
        let last_kept = self.cells.get(first_moved).prev.expect("`RawBlockDeque::split_block()` - nothing to keep!");
        self.cells.get_mut(last_kept).next = None;
        self.cells.get_mut(first_moved).prev = None;

        let left = self.blocks.get(block);
        let (head, tail, old_next) = (left.head(), left.tail(), left.next());

        let mut right = Block::new();
        right.set_run(Some(first_moved), tail, len - keep);
        right.set_prev(Some(block));
        right.set_next(old_next);
        let right = self.blocks.alloc(right);

        let left = self.blocks.get_mut(block);
        left.set_run(head, Some(last_kept), keep);
        left.set_next(Some(right));

        match old_next {
            Some(next) => self.blocks.get_mut(next).set_prev(Some(right)),
            None => self.tail_block = right,
        }

        tracing::trace!(left = keep, right = len - keep, blocks = self.blocks.len(), "split block");
    }

    /// Removes and returns the element at `index` (`0..len`).
    pub(crate) fn remove(&mut self, index: usize) -> T {
        let at = self.locate(index);
        let cell = at.cell.expect("`RawBlockDeque::remove()` - `index` >= `len`!");
        let Cell { value, prev, next } = self.cells.take(cell);

        match prev {
            Some(prev) => self.cells.get_mut(prev).next = next,
            None => self.blocks.get_mut(at.block).set_head(next),
        }
        match next {
            Some(next) => self.cells.get_mut(next).prev = prev,
            None => self.blocks.get_mut(at.block).set_tail(prev),
        }
        self.blocks.get_mut(at.block).shrink();
        self.len -= 1;

        self.rebalance_after_remove(at.block);
        value
    }

    /// Merges an under-full block into a neighbour. At most one merge happens per removal.
    fn rebalance_after_remove(&mut self, block: Handle) {
        let current = self.blocks.get(block);
        let (len, prev, next) = (current.len(), current.prev(), current.next());
        if len > self.thresholds.merge() {
            return;
        }

        if let Some(next) = next
            && len + self.blocks.get(next).len() <= self.thresholds.merge_size()
        {
            self.merge_blocks(block, next);
        } else if let Some(prev) = prev
            && self.blocks.get(prev).len() + len <= self.thresholds.merge_size()
        {
            self.merge_blocks(prev, block);
        }
    }

    /// Appends the run of `right` onto `left` and frees `right`.
    fn merge_blocks(&mut self, left: Handle, right: Handle) {
        let (right_head, right_tail, right_len) = self.blocks.get_mut(right).take_run();
        let right_next = self.blocks.get(right).next();

        let (left_head, left_tail, left_len) = {
            let left = self.blocks.get(left);
            (left.head(), left.tail(), left.len())
        };
        if let (Some(left_tail), Some(right_head)) = (left_tail, right_head) {
            self.cells.get_mut(left_tail).next = Some(right_head);
            self.cells.get_mut(right_head).prev = Some(left_tail);
        }

        let merged = self.blocks.get_mut(left);
        merged.set_run(left_head.or(right_head), right_tail.or(left_tail), left_len + right_len);
        merged.set_next(right_next);

        match right_next {
            Some(next) => self.blocks.get_mut(next).set_prev(Some(left)),
            None => self.tail_block = left,
        }
        self.blocks.free(right);

        tracing::trace!(len = left_len + right_len, blocks = self.blocks.len(), "merged blocks");
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::manual_assert, clippy::uninlined_format_args)]
mod tests {
    use super::*;
    use alloc::collections::VecDeque;
    use alloc::string::String;
    use alloc::vec;
    use proptest::prelude::*;

    impl<T> RawBlockDeque<T> {
        /// Validates every chain invariant. Panics with a descriptive message if any are violated.
        pub(crate) fn validate_invariants(&self) {
            let mut errors: Vec<String> = Vec::new();
            let max = self.thresholds.max_block_len();

            if self.blocks.get(self.head_block).prev().is_some() {
                errors.push(String::from("head block has a predecessor"));
            }
            if self.blocks.get(self.tail_block).next().is_some() {
                errors.push(String::from("tail block has a successor"));
            }

            let mut total = 0;
            let mut block_count = 0;
            let mut prev_block = None;
            let mut block = Some(self.head_block);
            while let Some(current) = block {
                let b = self.blocks.get(current);
                block_count += 1;
                if b.prev() != prev_block {
                    errors.push(alloc::format!("block {:?} has a stale back-link", current));
                }
                if b.len() > max {
                    errors.push(alloc::format!("block {:?} holds {} > {} elements", current, b.len(), max));
                }
                if b.len() == 0 && self.len > 0 {
                    errors.push(alloc::format!("empty block {:?} in a non-empty chain", current));
                }

                let mut run = 0;
                let mut prev_cell = None;
                let mut cell = b.head();
                while let Some(c) = cell {
                    run += 1;
                    if self.cells.get(c).prev != prev_cell {
                        errors.push(alloc::format!("cell {:?} has a stale back-link", c));
                    }
                    prev_cell = Some(c);
                    cell = self.cells.get(c).next;
                }
                if prev_cell != b.tail() {
                    errors.push(alloc::format!("block {:?} tail does not end its run", current));
                }
                if run != b.len() {
                    errors.push(alloc::format!("block {:?} len={} but run={}", current, b.len(), run));
                }

                total += run;
                prev_block = Some(current);
                block = b.next();
            }

            if prev_block != Some(self.tail_block) {
                errors.push(String::from("chain does not end at the tail block"));
            }
            if block_count != self.blocks.len() {
                errors.push(alloc::format!("{} blocks linked but {} allocated", block_count, self.blocks.len()));
            }
            if total != self.len || self.cells.len() != self.len {
                errors.push(alloc::format!("len={} but chain holds {} ({} cells)", self.len, total, self.cells.len()));
            }

            assert!(errors.is_empty(), "Chain invariant violations:\n{}", errors.join("\n"));
        }

        fn to_vec(&self) -> Vec<&T> {
            self.cell_order().into_iter().map(|cell| self.value(cell)).collect()
        }
    }

    const SMALL: Thresholds = Thresholds::new(8, 3, 8);

    #[derive(Clone, Debug)]
    enum Op {
        Insert(usize, u32),
        Remove(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (any::<usize>(), any::<u32>()).prop_map(|(at, value)| Op::Insert(at, value)),
            2 => any::<usize>().prop_map(Op::Remove),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn chain_invariants_maintained_after_operations(ops in prop::collection::vec(op_strategy(), 0..600)) {
            let mut chain = RawBlockDeque::new(SMALL);
            let mut model: VecDeque<u32> = VecDeque::new();

            for op in ops {
                match op {
                    Op::Insert(at, value) => {
                        let index = at % (model.len() + 1);
                        let location = chain.insert(index, value);
                        model.insert(index, value);
                        prop_assert_eq!(location, chain.locate(index));
                        prop_assert_eq!(location.cell.map(|cell| *chain.value(cell)), Some(value));
                    }
                    Op::Remove(at) => {
                        if model.is_empty() {
                            continue;
                        }
                        let index = at % model.len();
                        prop_assert_eq!(chain.remove(index), model.remove(index).unwrap());
                    }
                }
                chain.validate_invariants();
            }

            let expected: Vec<&u32> = model.iter().collect();
            prop_assert_eq!(chain.to_vec(), expected);
            for (index, value) in model.iter().enumerate() {
                prop_assert_eq!(chain.get(index), Some(value));
            }
        }
    }

    #[test]
    fn sole_block_survives_emptying() {
        let mut chain = RawBlockDeque::new(SMALL);
        for i in 0..40 {
            chain.insert(i, i);
        }
        assert!(chain.block_count() > 1);
        while !chain.is_empty() {
            chain.remove(0);
            chain.validate_invariants();
        }
        assert_eq!(chain.block_count(), 1);
        assert_eq!(chain.locate(0), Location { block: chain.head_block, offset: 0, cell: None });
    }

    #[test]
    fn split_halves_a_full_block() {
        let mut chain = RawBlockDeque::new(SMALL);
        for i in 0..7 {
            chain.insert(i, i);
        }
        assert_eq!(chain.block_count(), 1);

        chain.insert(7, 7);
        chain.validate_invariants();
        assert_eq!(chain.block_count(), 2);
        let first = chain.blocks.get(chain.head_block).len();
        let second = chain.blocks.get(chain.tail_block).len();
        assert_eq!((first, second), (4, 4));
    }

    #[test]
    fn remove_merges_with_next_then_previous() {
        let mut chain = RawBlockDeque::new(SMALL);
        for i in 0..8 {
            chain.insert(i, i);
        }
        // [0 1 2 3] [4 5 6 7]
        chain.remove(0);
        // First block now holds 3 <= merge and 3 + 4 <= 8: merged with the next block.
        chain.validate_invariants();
        assert_eq!(chain.block_count(), 1);

        let mut chain = RawBlockDeque::new(SMALL);
        for i in 0..8 {
            chain.insert(i, i);
        }
        chain.insert(8, 8);
        chain.insert(9, 9);
        chain.insert(10, 10);
        chain.insert(11, 11);
        // [0 1 2 3] [4 5 6 7 8 9 10 11] would split, so the tail is [4 5 6 7] [8 9 10 11].
        assert_eq!(chain.block_count(), 3);
        chain.remove(11);
        // Tail block holds 3 with no successor: merged into the previous block.
        chain.validate_invariants();
        assert_eq!(chain.block_count(), 2);
        chain.remove(10);
        chain.validate_invariants();
        assert_eq!(chain.block_count(), 2);
        assert_eq!(chain.to_vec(), vec![&0, &1, &2, &3, &4, &5, &6, &7, &8, &9]);
    }

    #[test]
    fn drain_moves_everything_out() {
        let mut chain = RawBlockDeque::new(SMALL);
        for i in 0..30 {
            chain.insert(i, i);
        }
        let drained = chain.drain_to_vec();
        assert_eq!(drained, (0..30).collect::<Vec<_>>());
        assert!(chain.is_empty());
        chain.validate_invariants();
    }

    #[test]
    fn values_mut_visits_in_order() {
        let mut chain = RawBlockDeque::new(SMALL);
        for i in 0..20 {
            chain.insert(0, i);
        }
        for (i, value) in chain.values_mut().into_iter().enumerate() {
            *value += 100 * i;
        }
        assert_eq!(chain.get(0), Some(&19));
        assert_eq!(chain.get(19), Some(&(1900)));
    }
}
