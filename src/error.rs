/// Error enumerates over all invariant violations that
/// [`Llrb::validate`](crate::Llrb::validate) can report. Each of them is
/// fatal, a tree built only through `put` shall never return one.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error<K> {
    /// Root node is linked red.
    #[error("root node is red")]
    RedRoot,
    /// Breaking one of the two LLRB rules, a red node under a red link.
    #[error("consecutive red links")]
    ConsecutiveReds,
    /// Red link leaning right, under the node holding this key.
    #[error("right leaning red link under {0:?}")]
    RightLeaningRed(K),
    /// Breaking one of the two LLRB rules. The String component of this
    /// variant can be used for debugging.
    #[error("unbalanced blacks, {0}")]
    UnbalancedBlacks(String),
    /// Index entries are not in sort-order, (child, parent).
    #[error("sort error, {0:?} against {1:?}")]
    SortError(K, K),
    /// Subtree size cached in a node is stale.
    #[error("count at {key:?} is {count}, expected {expected}")]
    CountMismatch { key: K, count: usize, expected: usize },
}
