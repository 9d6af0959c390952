//! Taxonomy items and a label-only builder.
//!
//! # Example
//!
//! ```
//! use taxsel_core::{TaxonomyNode, TaxonomyPath};
//!
//! let animals = TaxonomyNode::new("Animals")
//!     .child(TaxonomyNode::new("Birds")
//!         .child(TaxonomyNode::new("Finch")))
//!     .build();
//!
//! let finch = &animals.children()[0].children()[0];
//! assert_eq!(finch.depth(), 2);
//! assert_eq!(finch.path(), &TaxonomyPath::from(["Animals", "Birds", "Finch"]));
//! ```

use crate::error::{Result, TaxonomyError};
use crate::path::TaxonomyPath;

/// A node in the taxonomy tree.
///
/// `depth` counts ancestors and `path` is the ancestor chain followed by the
/// node's own label. The engine never re-derives either; see
/// [`validate_forest`] for an explicit check.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaxonomyItem {
    label: String,
    path: TaxonomyPath,
    depth: usize,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    children: Vec<TaxonomyItem>,
}

impl TaxonomyItem {
    /// Create a leaf item.
    #[must_use]
    pub fn new(label: impl Into<String>, path: TaxonomyPath, depth: usize) -> Self {
        Self {
            label: label.into(),
            path,
            depth,
            children: Vec::new(),
        }
    }

    /// Add a child item.
    #[must_use]
    pub fn child(mut self, item: TaxonomyItem) -> Self {
        self.children.push(item);
        self
    }

    /// Set children from a vec.
    #[must_use]
    pub fn with_children(mut self, children: Vec<TaxonomyItem>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn path(&self) -> &TaxonomyPath {
        &self.path
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn children(&self) -> &[TaxonomyItem] {
        &self.children
    }

    /// Whether this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including this one.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        let mut count = 0usize;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Copy of this node without its children.
    pub(crate) fn detached(&self) -> Self {
        Self {
            label: self.label.clone(),
            path: self.path.clone(),
            depth: self.depth,
            children: Vec::new(),
        }
    }

    pub(crate) fn set_children(&mut self, children: Vec<TaxonomyItem>) {
        self.children = children;
    }
}

/// Label-only tree builder; [`build`](Self::build) derives paths and depths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyNode {
    label: String,
    children: Vec<TaxonomyNode>,
}

impl TaxonomyNode {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Add a child node.
    #[must_use]
    pub fn child(mut self, node: TaxonomyNode) -> Self {
        self.children.push(node);
        self
    }

    /// Set children from a vec.
    #[must_use]
    pub fn with_children(mut self, nodes: Vec<TaxonomyNode>) -> Self {
        self.children = nodes;
        self
    }

    /// Build a root item at depth 0.
    #[must_use]
    pub fn build(self) -> TaxonomyItem {
        self.build_under(&TaxonomyPath::root())
    }

    /// Build an item whose parent sits at `parent`.
    #[must_use]
    pub fn build_under(self, parent: &TaxonomyPath) -> TaxonomyItem {
        let path = parent.child(self.label.as_str());
        let depth = parent.len();
        let children = self
            .children
            .into_iter()
            .map(|child| child.build_under(&path))
            .collect();
        TaxonomyItem {
            label: self.label,
            path,
            depth,
            children,
        }
    }
}

/// Build a root-level forest from label nodes.
#[must_use]
pub fn build_forest(nodes: impl IntoIterator<Item = TaxonomyNode>) -> Vec<TaxonomyItem> {
    nodes.into_iter().map(TaxonomyNode::build).collect()
}

/// Check that every item's depth and path agree with where it sits.
///
/// Walks with an explicit stack, so arbitrarily deep trees are fine.
pub fn validate_forest(items: &[TaxonomyItem]) -> Result<()> {
    let mut stack: Vec<(&TaxonomyItem, Option<&TaxonomyPath>)> =
        items.iter().rev().map(|item| (item, None)).collect();

    while let Some((item, parent)) = stack.pop() {
        let expected = parent.map_or(0, TaxonomyPath::len);
        check_item(item, expected, parent)?;
        stack.extend(
            item.children
                .iter()
                .rev()
                .map(|child| (child, Some(&item.path))),
        );
    }
    Ok(())
}

/// Depth and path checks for one item given its expected depth and parent.
pub(crate) fn check_item(
    item: &TaxonomyItem,
    expected_depth: usize,
    parent: Option<&TaxonomyPath>,
) -> Result<()> {
    if item.depth != expected_depth {
        return Err(TaxonomyError::DepthMismatch {
            path: item.path.clone(),
            expected: expected_depth,
            found: item.depth,
        });
    }
    if item.path.len() != item.depth + 1 {
        return Err(TaxonomyError::PathLength {
            path: item.path.clone(),
            len: item.path.len(),
            depth: item.depth,
        });
    }
    let extends_parent = parent.is_none_or(|parent| item.path.is_strict_descendant_of(parent));
    if !extends_parent || item.path.leaf_label() != Some(item.label.as_str()) {
        return Err(TaxonomyError::PathMismatch {
            path: item.path.clone(),
            label: item.label.clone(),
        });
    }
    Ok(())
}
