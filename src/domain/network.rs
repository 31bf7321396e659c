//! Implicit perfect binary tree describing one referral network.

use tracing::debug;

use crate::domain::error::{DomainError, DomainResult};

/// Maximum supported network depth.
///
/// Depth 24 already yields 2^25 - 1 members, the practical upper limit
/// for an in-memory run. Larger depths are rejected before any
/// allocation happens.
pub const MAX_DEPTH: u32 = 24;

/// A fully materialized perfect binary referral network.
///
/// The tree is implicit and addressed by a zero-based index: for index
/// `i`, the children are `2i+1` (left) and `2i+2` (right), the parent
/// of a non-root index is `(i-1)/2`. The index space `0..node_count`
/// is dense and contiguous, every index exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    depth: u32,
    node_count: usize,
}

impl Network {
    /// Build a network of the given depth (root is level 0).
    ///
    /// Pure function of `depth`; fails with [`DomainError::OutOfRange`]
    /// when the depth exceeds [`MAX_DEPTH`].
    pub fn build(depth: u32) -> DomainResult<Self> {
        if depth > MAX_DEPTH {
            return Err(DomainError::OutOfRange {
                depth,
                max: MAX_DEPTH,
            });
        }
        let node_count = (1usize << (depth + 1)) - 1;
        debug!("built network: depth={}, node_count={}", depth, node_count);
        Ok(Self { depth, node_count })
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Total member count, `2^(depth+1) - 1`.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Highest valid index, `2^(depth+1) - 2`.
    pub fn max_index(&self) -> usize {
        self.node_count - 1
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.node_count
    }

    /// Left child of `index`, if it exists within the network.
    pub fn left(&self, index: usize) -> Option<usize> {
        let child = 2 * index + 1;
        (child < self.node_count).then_some(child)
    }

    /// Right child of `index`, if it exists within the network.
    pub fn right(&self, index: usize) -> Option<usize> {
        let child = 2 * index + 2;
        (child < self.node_count).then_some(child)
    }

    /// Parent of `index`, `None` for the root.
    pub fn parent(&self, index: usize) -> Option<usize> {
        (index > 0 && index < self.node_count).then(|| (index - 1) / 2)
    }

    /// Depth of the node below the root.
    ///
    /// Level k spans indices `2^k - 1 ..= 2^(k+1) - 2`, so the level is
    /// the bit length of `index + 1` minus one.
    pub fn level_of(&self, index: usize) -> u32 {
        (index + 1).ilog2()
    }

    /// All indices in level order.
    pub fn indices(&self) -> std::ops::Range<usize> {
        0..self.node_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_depth_three_when_built_then_fifteen_nodes() {
        let network = Network::build(3).unwrap();
        assert_eq!(network.node_count(), 15);
        assert_eq!(network.max_index(), 14);
    }

    #[test]
    fn given_root_when_navigating_then_children_are_one_and_two() {
        let network = Network::build(2).unwrap();
        assert_eq!(network.left(0), Some(1));
        assert_eq!(network.right(0), Some(2));
        assert_eq!(network.parent(0), None);
        assert_eq!(network.parent(1), Some(0));
        assert_eq!(network.parent(6), Some(2));
    }

    #[test]
    fn given_leaf_when_navigating_then_no_children() {
        let network = Network::build(1).unwrap();
        assert_eq!(network.left(1), None);
        assert_eq!(network.right(2), None);
    }

    #[test]
    fn given_indices_when_levelled_then_levels_match_layout() {
        let network = Network::build(3).unwrap();
        assert_eq!(network.level_of(0), 0);
        assert_eq!(network.level_of(1), 1);
        assert_eq!(network.level_of(2), 1);
        assert_eq!(network.level_of(3), 2);
        assert_eq!(network.level_of(7), 3);
        assert_eq!(network.level_of(14), 3);
    }
}
