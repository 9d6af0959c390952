#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use taxsel_core::{
    SelectedSet, TaxonomyOptions, TaxonomyPath, ToggleOutcome, apply_toggle, node_state, resolve,
};

#[derive(Debug, Arbitrary)]
struct Input {
    max_usages: Option<u8>,
    leafs_only: bool,
    ops: Vec<(Vec<u8>, bool)>,
}

fn path_of(bytes: &[u8]) -> TaxonomyPath {
    bytes
        .iter()
        .take(4)
        .map(|b| char::from(b'a' + b % 3).to_string())
        .collect()
}

fuzz_target!(|input: Input| {
    let mut options = TaxonomyOptions::new().with_leafs_only(input.leafs_only);
    if let Some(max) = input.max_usages {
        options = options.with_max_usages(usize::from(max % 6));
    }
    let cap = input.max_usages.map(|max| usize::from(max % 6)).filter(|&max| max > 0);

    let mut selected = SelectedSet::new();
    for (bytes, make_selected) in input.ops.iter().take(256) {
        let path = path_of(bytes);
        let is_leaf = path.len() >= 3;
        let resolved = resolve(&options, &selected);

        let state = node_state(&selected, &resolved, &path, is_leaf);
        assert!(!(state.checked && state.indeterminate));
        assert_eq!(state.disabled, state.reason.is_some());

        match apply_toggle(&selected, &resolved, &path, is_leaf, *make_selected) {
            ToggleOutcome::Changed(next) => {
                assert_eq!(next.is_checked(&path), *make_selected);
                if *make_selected {
                    assert!(!state.disabled, "disabled node was selected");
                }
                selected = next;
            }
            ToggleOutcome::Unchanged => assert_eq!(selected.is_checked(&path), *make_selected),
            ToggleOutcome::Rejected(reason) => {
                assert!(*make_selected, "deselect was rejected");
                assert_eq!(state.reason, Some(reason));
            }
        }

        if let Some(cap) = cap {
            assert!(selected.len() <= cap, "cap exceeded");
        }
        if input.leafs_only {
            assert!(selected.iter().all(|p| p.len() >= 3), "non-leaf selected");
        }
    }
});
