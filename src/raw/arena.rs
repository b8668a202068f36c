use alloc::vec::Vec;

use super::handle::Handle;

/// Slot storage for blocks, value cells and tree nodes.
///
/// A live value never moves to another slot, so its [`Handle`] is a stable link for as long as
/// the value is in the arena. Blocks link to their neighbours, cells to their block and tree
/// nodes to their children purely through these handles.
///
/// Freed slots are recycled most-recently-freed first. A handle held past `take` may
/// therefore name a different value later, which is why tree nodes carry a creation stamp.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    vacant: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            vacant: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of live values.
    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.vacant.len())
    }

    /// Stores `value` and returns its handle, reusing the most recently vacated slot if any.
    ///
    /// # Panics
    ///
    /// Panics if every handle value is in use.
    pub(crate) fn alloc(&mut self, value: T) -> Handle {
        if let Some(handle) = self.vacant.pop() {
            self.slots[handle.to_index()] = Some(value);
            return handle;
        }
        assert!(
            self.slots.len() < Handle::MAX,
            "`Arena::alloc()` - no handles left ({} in use)!",
            Handle::MAX
        );
        self.slots.push(Some(value));
        Handle::from_index(self.slots.len() - 1)
    }

    /// Returns the value behind a handle the caller knows to be live.
    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is vacant!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is vacant!")
    }

    /// Like [`get`](Self::get), but a vacant or never-issued handle yields `None`.
    ///
    /// This is how cursors holding an old handle are checked.
    #[inline]
    pub(crate) fn try_get(&self, handle: Handle) -> Option<&T> {
        self.slots.get(handle.to_index()).and_then(Option::as_ref)
    }

    /// Moves the value out and makes its slot available to the next `alloc`.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let value = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is vacant!");
        self.vacant.push(handle);
        value
    }

    pub(crate) fn free(&mut self, handle: Handle) {
        drop(self.take(handle));
    }

    /// Drops every value. All previously issued handles become vacant.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.vacant.clear();
    }

    /// Splits the arena into one exclusive borrow per slot, indexed by `Handle::to_index`.
    ///
    /// The deque's `IterMut` uses this to hand out the `&mut T` of every cell at once, in
    /// chain order rather than slot order.
    pub(crate) fn slots_mut(&mut self) -> Vec<Option<&mut T>> {
        self.slots.iter_mut().map(Option::as_mut).collect()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;
    use proptest::prelude::*;

    #[test]
    fn with_capacity_reserves_slots() {
        let arena: Arena<u32> = Arena::with_capacity(10);
        assert!(arena.capacity() >= 10);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn vacated_handles_are_detected_and_recycled() {
        let mut arena: Arena<&str> = Arena::new();
        let a = arena.alloc("a");
        let b = arena.alloc("b");
        assert_eq!(arena.take(a), "a");
        assert!(arena.try_get(a).is_none());
        assert!(arena.try_get(Handle::from_index(42)).is_none());

        arena.free(b);
        // Most recently vacated first.
        assert_eq!(arena.alloc("c"), b);
        assert_eq!(arena.alloc("d"), a);
        assert_eq!(*arena.get(a), "d");
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn slots_mut_gives_disjoint_borrows() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.alloc(1);
        let b = arena.alloc(2);
        arena.free(a);

        let mut slots = arena.slots_mut();
        assert!(slots[a.to_index()].is_none());
        let value = slots[b.to_index()].take().unwrap();
        *value += 40;
        assert_eq!(*arena.get(b), 42);
    }

    #[derive(Clone, Debug)]
    enum Step {
        Alloc(u32),
        Overwrite(usize, u32),
        Take(usize),
        Clear,
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            20 => any::<u32>().prop_map(Step::Alloc),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Step::Overwrite(which, value)),
            8 => any::<usize>().prop_map(Step::Take),
            1 => Just(Step::Clear),
        ]
    }

    proptest! {
        /// Live handles always resolve to the last value stored under them, and no two live
        /// values share a handle.
        #[test]
        fn handles_track_their_values(steps in prop::collection::vec(step(), 0..256)) {
            let mut arena: Arena<u32> = Arena::new();
            let mut live: BTreeMap<usize, (Handle, u32)> = BTreeMap::new();

            for step in steps {
                match step {
                    Step::Alloc(value) => {
                        let handle = arena.alloc(value);
                        prop_assert!(live.insert(handle.to_index(), (handle, value)).is_none());
                    }
                    Step::Overwrite(which, value) => {
                        let len = live.len().max(1);
                        if let Some((_, entry)) = live.iter_mut().nth(which % len) {
                            *arena.get_mut(entry.0) = value;
                            entry.1 = value;
                        }
                    }
                    Step::Take(which) => {
                        let Some(&index) = live.keys().nth(which % live.len().max(1)) else {
                            continue;
                        };
                        let (handle, value) = live.remove(&index).unwrap();
                        prop_assert_eq!(arena.take(handle), value);
                        prop_assert!(arena.try_get(handle).is_none());
                    }
                    Step::Clear => {
                        arena.clear();
                        live.clear();
                    }
                }

                prop_assert_eq!(arena.len(), live.len());
                for &(handle, value) in live.values() {
                    prop_assert_eq!(arena.try_get(handle).copied(), Some(value));
                }
            }
        }
    }
}
