//! Tests for descendant sets and bottom-up count accumulation,
//! including the differential check between the two.

use std::sync::Arc;

use rstest::rstest;

use binplan::domain::{accumulate_downline_counts, DescendantIndex, Network};
use binplan::util::testing::init_test_setup;

#[test]
fn given_leaf_when_queried_then_empty_set() {
    init_test_setup();
    let network = Network::build(3).unwrap();
    let mut downline = DescendantIndex::new(&network);
    for index in 7..15 {
        assert!(downline.descendants_of(index).unwrap().is_empty());
    }
}

#[test]
fn given_internal_node_when_queried_then_whole_subtree_returned() {
    init_test_setup();
    let network = Network::build(3).unwrap();
    let mut downline = DescendantIndex::new(&network);
    let set = downline.descendants_of(2).unwrap();
    assert_eq!(*set, [5, 6, 11, 12, 13, 14].into_iter().collect());
}

#[test]
fn given_second_query_when_memoized_then_no_retraversal() {
    init_test_setup();
    let network = Network::build(5).unwrap();
    let mut downline = DescendantIndex::new(&network);
    let first = downline.descendants_of(3).unwrap();
    let second = downline.descendants_of(3).unwrap();
    assert!(Arc::ptr_eq(&first, &second), "memo must return the cached set");
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(4)]
#[case(8)]
fn given_any_depth_when_accumulated_then_counts_match_brute_force(#[case] depth: u32) {
    init_test_setup();
    let network = Network::build(depth).unwrap();
    let mut downline = DescendantIndex::new(&network);

    // arbitrary non-uniform predicate: every third index matches
    let matches = |index: usize| index % 3 == 0;
    let counts = accumulate_downline_counts(&network, matches);

    for index in network.indices() {
        let brute = downline
            .descendants_of(index)
            .unwrap()
            .iter()
            .filter(|&&d| matches(d))
            .count() as u32;
        assert_eq!(
            counts[index], brute,
            "bottom-up and set-based counts diverge at index {}",
            index
        );
    }
}

#[rstest]
#[case(0, 0, 1)]
#[case(0, 1, 3)]
#[case(0, 2, 7)]
#[case(0, 3, 15)]
#[case(1, 2, 7)]
// bound clipped at the network edge
#[case(1, 9, 15)]
#[case(7, 1, 3)]
#[case(15, 0, 1)]
fn given_depth_bound_when_collecting_subtree_then_expected_size(
    #[case] index: usize,
    #[case] relative_depth: u32,
    #[case] expected: usize,
) {
    init_test_setup();
    let network = Network::build(4).unwrap();
    let downline = DescendantIndex::new(&network);
    assert_eq!(
        downline.subtree_within_depth(index, relative_depth).len(),
        expected
    );
}
