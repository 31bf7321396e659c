//! Downline computation: descendant sets and bottom-up count accumulation.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::Arc;

use tracing::trace;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::network::Network;

/// Run-scoped index over a network's downlines.
///
/// Descendant sets are memoized per node index. The memo table lives
/// and dies with this instance, so every run starts cold and no state
/// leaks across runs.
#[derive(Debug)]
pub struct DescendantIndex {
    max_index: usize,
    memo: HashMap<usize, Arc<BTreeSet<usize>>>,
}

impl DescendantIndex {
    pub fn new(network: &Network) -> Self {
        Self {
            max_index: network.max_index(),
            memo: HashMap::new(),
        }
    }

    /// Full descendant set of `index`, memoized.
    ///
    /// Iterative BFS over an explicit queue, so the stack stays bounded
    /// regardless of network depth. A leaf yields the empty set.
    /// Repeated calls for the same node hit the memo and do not
    /// re-traverse.
    pub fn descendants_of(&mut self, index: usize) -> DomainResult<Arc<BTreeSet<usize>>> {
        if index > self.max_index {
            return Err(DomainError::InternalInvariantViolation(format!(
                "descendant query for index {} outside 0..={}",
                index, self.max_index
            )));
        }
        if let Some(set) = self.memo.get(&index) {
            trace!("descendants_of: memo hit for {}", index);
            return Ok(Arc::clone(set));
        }

        let mut set = BTreeSet::new();
        let mut queue = VecDeque::new();
        queue.push_back(index);
        while let Some(current) = queue.pop_front() {
            for child in [2 * current + 1, 2 * current + 2] {
                if child <= self.max_index {
                    set.insert(child);
                    queue.push_back(child);
                }
            }
        }

        let set = Arc::new(set);
        self.memo.insert(index, Arc::clone(&set));
        Ok(set)
    }

    /// `index` plus all descendants reachable within `relative_depth`
    /// hops, bounded by the network.
    ///
    /// Not memoized: callers evaluate this once per node with a small
    /// bound, so caching would only grow the table.
    pub fn subtree_within_depth(&self, index: usize, relative_depth: u32) -> BTreeSet<usize> {
        let mut set = BTreeSet::new();
        if index > self.max_index {
            return set;
        }
        set.insert(index);

        let mut queue = VecDeque::new();
        queue.push_back((index, 0u32));
        while let Some((current, distance)) = queue.pop_front() {
            if distance == relative_depth {
                continue;
            }
            for child in [2 * current + 1, 2 * current + 2] {
                if child <= self.max_index {
                    set.insert(child);
                    queue.push_back((child, distance + 1));
                }
            }
        }
        set
    }
}

/// Count, for every node, the descendants matching `predicate`.
///
/// Children always carry a higher index than their parent, so one
/// reverse-index sweep accumulates each child's count (plus its own
/// match) into the parent: O(N) for the whole network, no sets
/// materialized. The root's own match is deliberately not counted
/// anywhere, counts are strict-descendant counts.
pub fn accumulate_downline_counts<F>(network: &Network, predicate: F) -> Vec<u32>
where
    F: Fn(usize) -> bool,
{
    let mut counts = vec![0u32; network.node_count()];
    for index in (1..network.node_count()).rev() {
        let parent = (index - 1) / 2;
        counts[parent] += counts[index] + u32::from(predicate(index));
    }
    counts
}
