/// A strict weak order over keys.
///
/// A [`TreapMap`](super::TreapMap) only ever asks "does `a` precede `b`?"; two keys are
/// equivalent when neither precedes the other.
///
/// Any `Fn(&K, &K) -> bool` closure is a comparator.
///
/// # Examples
///
/// ```
/// use rank_collections::TreapMap;
///
/// // Keys in descending order.
/// let mut map = TreapMap::with_comparator(|a: &i32, b: &i32| a > b);
/// map.insert(1, "one");
/// map.insert(3, "three");
/// map.insert(2, "two");
///
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, [3, 2, 1]);
/// ```
pub trait Comparator<K: ?Sized> {
    /// Returns `true` if `a` is ordered strictly before `b`.
    fn precedes(&self, a: &K, b: &K) -> bool;
}

/// The natural `<` order of an [`Ord`] key. This is the default comparator.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct NaturalOrder;

impl<K: ?Sized + Ord> Comparator<K> for NaturalOrder {
    #[inline]
    fn precedes(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn precedes(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn natural_order() {
        assert!(NaturalOrder.precedes(&1, &2));
        assert!(!NaturalOrder.precedes(&2, &2));
        assert!(NaturalOrder.precedes("abc", "abd"));
    }

    #[test]
    fn closure_order() {
        let by_len = |a: &&str, b: &&str| a.len() < b.len();
        assert!(by_len.precedes(&"ab", &"abc"));
        assert!(!by_len.precedes(&"ab", &"cd"));
        assert!(!by_len.precedes(&"cd", &"ab"));
    }
}
