//! Filtered-tree reconstruction.
//!
//! Rebuilds a pruned forest from a [`FlatSequence`]: every entry accepted by
//! the predicate survives, together with the chain of ancestors leading to
//! it. Ancestors that do not match themselves carry only the surviving part
//! of their subtree.
//!
//! # Algorithm
//!
//! Pre-order places every subtree contiguously right after its root, so a
//! single backward scan can assemble the result bottom-up:
//!
//! - `pending[d]` holds finished nodes at depth `d + 1` waiting for their
//!   parent at depth `d`.
//! - `closing` is the depth of the next ancestor that must be emitted because
//!   something below it survived.
//! - An entry at the closing depth is emitted with `pending[depth]` attached,
//!   without consulting the predicate, and the closing depth moves one level
//!   up.
//! - Any other entry is emitted childless if it matches, and the closing
//!   depth becomes its parent's depth.
//!
//! Scanning backwards fills every pending list in reverse, so each list is
//! reversed once when it is attached. The whole pass is O(n).

use crate::error::Result;
use crate::flatten::FlatSequence;
use crate::item::TaxonomyItem;
#[cfg(feature = "tracing")]
use web_time::Instant;

/// Prune `flat` to the entries accepted by `predicate` plus their ancestors.
///
/// Sibling order and nesting follow the source tree. No match yields an
/// empty forest. The result is unspecified if `flat` is not a consistent
/// pre-order sequence; use [`try_reconstruct`] to check first.
#[must_use]
pub fn reconstruct<P>(flat: &FlatSequence, mut predicate: P) -> Vec<TaxonomyItem>
where
    P: FnMut(&TaxonomyItem) -> bool,
{
    #[cfg(feature = "tracing")]
    let start = Instant::now();
    #[cfg(feature = "tracing")]
    let span = tracing::debug_span!(
        "taxonomy.reconstruct",
        input_nodes = flat.len(),
        output_roots = tracing::field::Empty,
        duration_us = tracing::field::Empty,
    );
    #[cfg(feature = "tracing")]
    let _guard = span.enter();

    let mut roots: Vec<TaxonomyItem> = Vec::new();
    let mut pending: Vec<Vec<TaxonomyItem>> = Vec::new();
    let mut closing: Option<usize> = None;

    for entry in flat.iter().rev() {
        let source = entry.item();
        let depth = source.depth();

        if closing == Some(depth) {
            let mut node = source.detached();
            if let Some(children) = pending.get_mut(depth) {
                let mut children = std::mem::take(children);
                children.reverse();
                node.set_children(children);
            }
            attach(&mut roots, &mut pending, node);
            closing = depth.checked_sub(1);
            continue;
        }

        if predicate(source) {
            attach(&mut roots, &mut pending, source.detached());
            closing = depth.checked_sub(1);
        }
    }

    roots.reverse();

    #[cfg(feature = "tracing")]
    {
        span.record("output_roots", roots.len());
        span.record("duration_us", start.elapsed().as_micros() as u64);
    }

    roots
}

/// [`reconstruct`] after checking that `flat` is a consistent pre-order
/// sequence.
pub fn try_reconstruct<P>(flat: &FlatSequence, predicate: P) -> Result<Vec<TaxonomyItem>>
where
    P: FnMut(&TaxonomyItem) -> bool,
{
    flat.validate()?;
    Ok(reconstruct(flat, predicate))
}

/// Push a finished node onto its parent's pending list, or the root list.
fn attach(roots: &mut Vec<TaxonomyItem>, pending: &mut Vec<Vec<TaxonomyItem>>, node: TaxonomyItem) {
    match node.depth().checked_sub(1) {
        None => roots.push(node),
        Some(parent) => {
            if pending.len() <= parent {
                pending.resize_with(parent + 1, Vec::new);
            }
            pending[parent].push(node);
        }
    }
}

/// Case-insensitive substring match on item labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelQuery {
    needle: String,
}

impl LabelQuery {
    /// Lower-case `query`. Returns `None` for the empty string, in which
    /// case callers show the unfiltered tree. Whitespace is significant.
    #[must_use]
    pub fn new(query: &str) -> Option<Self> {
        if query.is_empty() {
            return None;
        }
        Some(Self {
            needle: query.to_lowercase(),
        })
    }

    /// The normalized needle.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    #[must_use]
    pub fn matches(&self, item: &TaxonomyItem) -> bool {
        contains_ignore_case(item.label(), &self.needle)
    }
}

/// Reconstruct the forest of labels matching `query`.
#[must_use]
pub fn search(flat: &FlatSequence, query: &LabelQuery) -> Vec<TaxonomyItem> {
    reconstruct(flat, |item| query.matches(item))
}

/// `needle_lower` must already be lower-cased.
fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    if haystack.is_ascii() && needle_lower.is_ascii() {
        let needle = needle_lower.as_bytes();
        if needle.len() > haystack.len() {
            return false;
        }
        return haystack
            .as_bytes()
            .windows(needle.len())
            .any(|window| window.eq_ignore_ascii_case(needle));
    }
    haystack.to_lowercase().contains(needle_lower)
}
