/// The ways an operation on a [`BlockDeque`](crate::BlockDeque) or [`TreapMap`](crate::TreapMap)
/// can fail.
///
/// Every check happens before the container is touched, so a call that returns an error leaves
/// the container exactly as it was.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum Error {
    /// An index or key does not name an element of the container.
    #[error("index out of bounds")]
    IndexOutOfBound,
    /// The operation needs at least one element.
    #[error("container is empty")]
    ContainerEmpty,
    /// A cursor is stale, belongs to another container, or points outside `[begin, end]`.
    #[error("invalid cursor")]
    InvalidIterator,
}

/// Result type for fallible container operations.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages() {
        assert_eq!(Error::IndexOutOfBound.to_string(), "index out of bounds");
        assert_eq!(Error::ContainerEmpty.to_string(), "container is empty");
        assert_eq!(Error::InvalidIterator.to_string(), "invalid cursor");
    }
}
