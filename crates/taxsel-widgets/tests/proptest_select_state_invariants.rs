//! Property-based invariant tests for `TaxonomySelectState`.
//!
//! 1. Every reported selection equals the state's selection at that moment.
//! 2. A capped picker never holds more paths than its cap.
//! 3. A leaf-only picker never holds a path with children.
//! 4. Rows of a fully expanded tree are its pre-order flattening.
//! 5. Search rows only show matches and ancestors of matches.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use taxsel_core::{
    SelectedSet, TaxonomyItem, TaxonomyNode, TaxonomyOptions, TaxonomyPath, build_forest, flatten,
};
use taxsel_widgets::TaxonomySelectState;

// ── Fixtures ────────────────────────────────────────────────────────────

/// Three roots, three children each, two leaves under every child.
fn fixture() -> Vec<TaxonomyItem> {
    build_forest(["r0", "r1", "r2"].map(|root| {
        let mids = ["m0", "m1", "m2"].map(|mid| {
            TaxonomyNode::new(format!("{root}{mid}"))
                .child(TaxonomyNode::new(format!("{root}{mid}x")))
                .child(TaxonomyNode::new(format!("{root}{mid}y")))
        });
        TaxonomyNode::new(root).with_children(Vec::from(mids))
    }))
}

fn all_paths(items: &[TaxonomyItem]) -> Vec<TaxonomyPath> {
    flatten(items).iter().map(|entry| entry.path().clone()).collect()
}

#[derive(Debug, Clone)]
enum Op {
    Toggle(usize, bool),
    Activate(usize),
    Deselect(usize),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (any::<usize>(), any::<bool>())
            .prop_map(|(i, make_selected)| Op::Toggle(i, make_selected)),
        3 => any::<usize>().prop_map(Op::Activate),
        2 => any::<usize>().prop_map(Op::Deselect),
        1 => Just(Op::Clear),
    ]
}

fn run(state: &mut TaxonomySelectState, paths: &[TaxonomyPath], op: &Op) {
    let pick = |i: usize| &paths[i % paths.len()];
    match op {
        Op::Toggle(i, make_selected) => {
            let _ = state.toggle(pick(*i), *make_selected);
        }
        Op::Activate(i) => {
            let _ = state.activate(pick(*i));
        }
        Op::Deselect(i) => {
            let _ = state.deselect(pick(*i));
        }
        Op::Clear => {
            let _ = state.clear();
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Selection policies under random interaction
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn callback_mirrors_state(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let items = fixture();
        let paths = all_paths(&items);
        let last: Rc<RefCell<Option<SelectedSet>>> = Rc::default();
        let sink = Rc::clone(&last);
        let mut state = TaxonomySelectState::new(items, TaxonomyOptions::new())
            .with_on_change(move |set| *sink.borrow_mut() = Some(set.clone()));

        for op in &ops {
            let before = state.selected().clone();
            *last.borrow_mut() = None;
            run(&mut state, &paths, op);
            match last.borrow().as_ref() {
                Some(reported) => prop_assert_eq!(reported, state.selected()),
                None => prop_assert_eq!(&before, state.selected()),
            }
        }
    }

    #[test]
    fn cap_is_never_exceeded(
        max in 1usize..5,
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let items = fixture();
        let paths = all_paths(&items);
        let mut state =
            TaxonomySelectState::new(items, TaxonomyOptions::new().with_max_usages(max));
        for op in &ops {
            run(&mut state, &paths, op);
            prop_assert!(state.selected().len() <= max);
            prop_assert_eq!(
                state.options().max_usages_reached(),
                state.selected().len() >= max
            );
        }
    }

    #[test]
    fn leaf_only_admits_only_leaves(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let items = fixture();
        let paths = all_paths(&items);
        let mut state =
            TaxonomySelectState::new(items, TaxonomyOptions::new().with_leafs_only(true));
        for op in &ops {
            run(&mut state, &paths, op);
            for path in state.selected() {
                prop_assert!(state.is_leaf(path));
                prop_assert_eq!(path.len(), 3);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-5. Rows
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn fully_expanded_rows_are_pre_order() {
    let items = fixture();
    let paths = all_paths(&items);
    let mut state = TaxonomySelectState::new(items, TaxonomyOptions::new());
    for path in &paths {
        state.set_expanded(path, true);
    }
    let rows: Vec<TaxonomyPath> = state.rows().into_iter().map(|row| row.path).collect();
    assert_eq!(rows, paths);
}

proptest! {
    #[test]
    fn search_rows_lead_to_matches(needle in "[rmxy0-2]{1,3}") {
        let mut state = TaxonomySelectState::new(fixture(), TaxonomyOptions::new());
        state.set_search(&needle);
        let rows = state.rows();
        for row in &rows {
            let leads_to_match = rows.iter().any(|other| {
                other.label.contains(needle.as_str())
                    && (other.path == row.path || other.path.is_strict_descendant_of(&row.path))
            });
            prop_assert!(leads_to_match, "{} has no match below it", row.path);
        }
    }
}
