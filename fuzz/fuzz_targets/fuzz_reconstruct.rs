#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use taxsel_core::{FlatSequence, TaxonomyItem, TaxonomyPath, reconstruct};

#[derive(Debug, Arbitrary)]
struct Input {
    /// (depth, label byte) pairs, not necessarily a valid pre-order walk.
    entries: Vec<(u8, u8)>,
    target: u8,
}

const LABELS: [&str; 4] = ["a", "b", "c", "d"];

fuzz_target!(|input: Input| {
    let entries = &input.entries[..input.entries.len().min(512)];

    // Build paths from depths so well-formed walks validate; malformed
    // depths still go through `reconstruct`, which must not panic.
    let mut ancestors: Vec<String> = Vec::new();
    let flat: FlatSequence = entries
        .iter()
        .map(|&(depth, label)| {
            let depth = usize::from(depth % 8);
            let label = LABELS[usize::from(label) % LABELS.len()].to_owned();
            ancestors.truncate(depth);
            ancestors.push(label.clone());
            TaxonomyItem::new(label, TaxonomyPath::new(ancestors.iter().cloned()), depth)
        })
        .collect();

    let target = LABELS[usize::from(input.target) % LABELS.len()];
    let pruned = reconstruct(&flat, |item| item.label() == target);

    if flat.validate().is_err() {
        return;
    }

    let survivors: usize = pruned.iter().map(TaxonomyItem::subtree_len).sum();
    assert!(survivors <= flat.len(), "pruning grew the tree");

    // Every surviving node matches or has a surviving child.
    let mut stack: Vec<&TaxonomyItem> = pruned.iter().collect();
    while let Some(node) = stack.pop() {
        assert!(
            node.label() == target || !node.children().is_empty(),
            "dead branch survived: {}",
            node.path()
        );
        stack.extend(node.children());
    }
});
