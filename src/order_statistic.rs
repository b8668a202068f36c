/// A zero-based rank into the key order of a [`TreapMap`](crate::TreapMap).
///
/// This is an order-statistic extension and is not part of the standard
/// `BTreeMap` API.
///
/// # Examples
///
/// ```
/// use rank_collections::{Rank, TreapMap};
///
/// let mut map = TreapMap::new();
/// map.insert("b", 20);
/// map.insert("a", 10);
///
/// assert_eq!(map[Rank(0)], 10);
/// map[Rank(1)] += 1;
/// assert_eq!(map[&"b"], 21);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
