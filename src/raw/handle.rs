use core::num::NonZero;
use core::sync::atomic::{AtomicU64, Ordering};

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Index of a live slot in an [`Arena`](super::arena::Arena).
///
/// Blocks, value cells and tree nodes keep the same handle for as long as they are alive, so
/// structural rewiring (split, merge, splice) never changes the identity of an element.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        // `index + 1` cannot be zero and cannot overflow.
        #[allow(clippy::cast_possible_truncation)]
        match NonZero::new((index + 1) as RawHandle) {
            Some(raw) => Self(raw),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

/// Identity of one container instance.
///
/// Cursors carry the owner of the container that produced them so a cursor handed to a
/// different container (including a clone) is rejected as foreign.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Owner(NonZero<u64>);

impl Owner {
    /// Returns an identity that no other container in this process has been given.
    pub(crate) fn fresh() -> Self {
        let id = NEXT_OWNER.fetch_add(1, Ordering::Relaxed);
        match NonZero::new(id) {
            Some(id) => Self(id),
            None => panic!("`Owner::fresh()` - container identities exhausted!"),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // Verify our assumptions about `Handle`/`Owner` and the niche optimization.
    assert_eq_size!(Handle, Option<Handle>);
    assert_eq_size!(Handle, RawHandle);
    assert_eq_size!(Owner, Option<Owner>);

    #[test]
    #[should_panic(expected = "`Handle::from_index()` - `index` > `Handle::MAX`!")]
    fn invalid_handle() {
        let _ = Handle::from_index(Handle::MAX + 1);
    }

    #[test]
    fn owners_are_unique() {
        let a = Owner::fresh();
        let b = Owner::fresh();
        assert_ne!(a, b);
        assert_eq!(a, a);
    }

    proptest! {
        #[test]
        fn handle_round_trip(index in 0..=Handle::MAX) {
            let handle = Handle::from_index(index);
            assert_eq!(handle.to_index(), index);
        }
    }
}
