//! Property-based invariant tests for flattening and filtered reconstruction.
//!
//! These tests verify structural invariants that must hold for any tree and
//! any label predicate:
//!
//! 1. flatten emits exactly one entry per node.
//! 2. flatten order is pre-order and depths match the source tree.
//! 3. flatten output always validates.
//! 4. reconstruct agrees with a naive recursive prune.
//! 5. Every surviving node matches or has a matching descendant.
//! 6. Every matching node survives.
//! 7. Sibling order is preserved.
//! 8. Everything-matches rebuilds the source tree exactly.

use proptest::prelude::*;
use taxsel_core::{TaxonomyItem, TaxonomyNode, TaxonomyPath, build_forest, flatten, reconstruct};

// ── Strategies ──────────────────────────────────────────────────────────

fn node_strategy() -> impl Strategy<Value = TaxonomyNode> {
    let leaf = "[a-d]{1,2}".prop_map(TaxonomyNode::new);
    leaf.prop_recursive(6, 96, 4, |inner| {
        ("[a-d]{1,2}", prop::collection::vec(inner, 1..4))
            .prop_map(|(label, children)| TaxonomyNode::new(label).with_children(children))
    })
}

fn forest_strategy() -> impl Strategy<Value = Vec<TaxonomyItem>> {
    prop::collection::vec(node_strategy(), 0..5).prop_map(build_forest)
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn naive_pre_order(items: &[TaxonomyItem], out: &mut Vec<(TaxonomyPath, usize)>) {
    for item in items {
        out.push((item.path().clone(), item.depth()));
        naive_pre_order(item.children(), out);
    }
}

fn naive_prune(items: &[TaxonomyItem], needle: &str) -> Vec<TaxonomyItem> {
    items
        .iter()
        .filter_map(|item| {
            let children = naive_prune(item.children(), needle);
            if item.label().contains(needle) || !children.is_empty() {
                Some(
                    TaxonomyItem::new(item.label(), item.path().clone(), item.depth())
                        .with_children(children),
                )
            } else {
                None
            }
        })
        .collect()
}

fn any_match(item: &TaxonomyItem, needle: &str) -> bool {
    item.label().contains(needle) || item.children().iter().any(|c| any_match(c, needle))
}

fn all_nodes<'a>(items: &'a [TaxonomyItem], out: &mut Vec<&'a TaxonomyItem>) {
    for item in items {
        out.push(item);
        all_nodes(item.children(), out);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Flatten
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn flatten_emits_one_entry_per_node(forest in forest_strategy()) {
        let total: usize = forest.iter().map(TaxonomyItem::subtree_len).sum();
        prop_assert_eq!(flatten(&forest).len(), total);
    }

    #[test]
    fn flatten_is_pre_order_with_source_depths(forest in forest_strategy()) {
        let mut expected = Vec::new();
        naive_pre_order(&forest, &mut expected);
        let actual: Vec<(TaxonomyPath, usize)> = flatten(&forest)
            .iter()
            .map(|entry| (entry.path().clone(), entry.depth()))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn flatten_output_validates(forest in forest_strategy()) {
        prop_assert!(flatten(&forest).validate().is_ok());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-8. Reconstruct
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reconstruct_matches_naive_prune(forest in forest_strategy(), needle in "[a-d]") {
        let flat = flatten(&forest);
        let fast = reconstruct(&flat, |item| item.label().contains(needle.as_str()));
        prop_assert_eq!(fast, naive_prune(&forest, &needle));
    }

    #[test]
    fn survivors_match_or_lead_to_a_match(forest in forest_strategy(), needle in "[a-d]") {
        let flat = flatten(&forest);
        let pruned = reconstruct(&flat, |item| item.label().contains(needle.as_str()));
        let mut nodes = Vec::new();
        all_nodes(&pruned, &mut nodes);
        for node in nodes {
            prop_assert!(any_match(node, &needle), "{:?} survived without a match", node.path());
            let has_matching_child = node.children().iter().any(|c| any_match(c, &needle));
            prop_assert!(node.label().contains(needle.as_str()) || has_matching_child);
        }
    }

    #[test]
    fn every_match_survives(forest in forest_strategy(), needle in "[a-d]") {
        let flat = flatten(&forest);
        let pruned = reconstruct(&flat, |item| item.label().contains(needle.as_str()));
        let surviving = flatten(&pruned);

        let expected: Vec<&TaxonomyPath> = flat
            .iter()
            .filter(|entry| entry.item().label().contains(needle.as_str()))
            .map(|entry| entry.path())
            .collect();
        let matched: Vec<&TaxonomyPath> = surviving
            .iter()
            .filter(|entry| entry.item().label().contains(needle.as_str()))
            .map(|entry| entry.path())
            .collect();
        prop_assert_eq!(matched, expected);
    }

    #[test]
    fn reconstruct_preserves_relative_order(forest in forest_strategy(), needle in "[a-d]") {
        let flat = flatten(&forest);
        let pruned = reconstruct(&flat, |item| item.label().contains(needle.as_str()));

        // The pruned pre-order must be a subsequence of the source pre-order.
        let mut source = flat.iter().map(|entry| (entry.path(), entry.depth()));
        for entry in flatten(&pruned).iter() {
            let key = (entry.path(), entry.depth());
            prop_assert!(source.any(|candidate| candidate == key), "{:?} out of order", key);
        }
    }

    #[test]
    fn everything_matching_rebuilds_source(forest in forest_strategy()) {
        let flat = flatten(&forest);
        prop_assert_eq!(reconstruct(&flat, |_| true), forest);
    }

    #[test]
    fn nothing_matching_is_empty(forest in forest_strategy()) {
        let flat = flatten(&forest);
        prop_assert!(reconstruct(&flat, |_| false).is_empty());
    }
}
