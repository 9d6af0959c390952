//! Pre-order linearization of an item tree.
//!
//! The flat sequence is the search index: one entry per node, parent before
//! children, siblings in their original order. Entries drop their children
//! and keep a `has_children` flag instead, so the sequence is cheap to cache
//! alongside the tree it was built from.

use crate::error::{Result, TaxonomyError};
use crate::item::{TaxonomyItem, check_item};
use crate::path::TaxonomyPath;
#[cfg(feature = "tracing")]
use web_time::Instant;

/// One node of a [`FlatSequence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    item: TaxonomyItem,
    has_children: bool,
}

impl FlatEntry {
    /// The node with an empty children list.
    #[must_use]
    pub fn item(&self) -> &TaxonomyItem {
        &self.item
    }

    /// Whether the source node had children.
    #[must_use]
    pub fn has_children(&self) -> bool {
        self.has_children
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.item.depth()
    }

    #[must_use]
    pub fn path(&self) -> &TaxonomyPath {
        self.item.path()
    }
}

/// Pre-order sequence of [`FlatEntry`] values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatSequence {
    entries: Vec<FlatEntry>,
}

impl FlatSequence {
    #[must_use]
    pub fn entries(&self) -> &[FlatEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlatEntry> {
        self.entries.iter()
    }

    /// Check that depths describe a real pre-order walk and that every path
    /// extends its parent's.
    ///
    /// The first entry must sit at depth 0 and each later entry may be at
    /// most one level deeper than its predecessor.
    pub fn validate(&self) -> Result<()> {
        let mut ancestors: Vec<&TaxonomyPath> = Vec::new();
        let mut previous: Option<usize> = None;

        for entry in &self.entries {
            let depth = entry.depth();
            if depth > previous.map_or(0, |p| p + 1) {
                return Err(match previous {
                    None => TaxonomyError::DepthMismatch {
                        path: entry.path().clone(),
                        expected: 0,
                        found: depth,
                    },
                    Some(previous) => TaxonomyError::DepthJump {
                        path: entry.path().clone(),
                        previous,
                        found: depth,
                    },
                });
            }
            ancestors.truncate(depth);
            check_item(&entry.item, depth, ancestors.last().copied())?;
            ancestors.push(entry.path());
            previous = Some(depth);
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a FlatSequence {
    type Item = &'a FlatEntry;
    type IntoIter = std::slice::Iter<'a, FlatEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<TaxonomyItem> for FlatSequence {
    /// Collect already-linearized items; children of each item are dropped.
    fn from_iter<I: IntoIterator<Item = TaxonomyItem>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|item| FlatEntry {
                has_children: !item.is_leaf(),
                item: item.detached(),
            })
            .collect();
        Self { entries }
    }
}

/// Linearize `tree` in pre-order.
///
/// Uses an explicit stack, so depth is bounded only by memory.
#[must_use]
pub fn flatten(tree: &[TaxonomyItem]) -> FlatSequence {
    #[cfg(feature = "tracing")]
    let start = Instant::now();

    let mut entries = Vec::with_capacity(tree.len());
    let mut stack: Vec<&TaxonomyItem> = tree.iter().rev().collect();
    while let Some(node) = stack.pop() {
        entries.push(FlatEntry {
            item: node.detached(),
            has_children: !node.is_leaf(),
        });
        stack.extend(node.children().iter().rev());
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        message = "taxonomy.flatten",
        roots = tree.len(),
        nodes = entries.len(),
        duration_us = start.elapsed().as_micros() as u64
    );

    FlatSequence { entries }
}
