//! Label paths identifying taxonomy nodes.
//!
//! A path is the chain of labels from a root down to a node, inclusive.
//! Paths are immutable; clones share the same backing storage.

use std::fmt;
use std::sync::Arc;

/// Ordered label sequence from the tree root to a node.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct TaxonomyPath(Arc<[String]>);

impl TaxonomyPath {
    /// Build a path from its labels, root first.
    #[must_use]
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(labels.into_iter().map(Into::into).collect())
    }

    /// The empty path. Every non-empty path is a strict descendant of it.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Labels, root first.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of labels.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path has no labels.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate labels, root first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.0.iter().map(String::as_str)
    }

    /// The terminal label, i.e. the node's own label.
    #[must_use]
    pub fn leaf_label(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Path of the parent node, or `None` for the empty path.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, ancestors) = self.0.split_last()?;
        Some(Self(ancestors.into()))
    }

    /// Path of a child with the given label.
    #[must_use]
    pub fn child(&self, label: impl Into<String>) -> Self {
        let mut labels = Vec::with_capacity(self.0.len() + 1);
        labels.extend(self.0.iter().cloned());
        labels.push(label.into());
        Self(labels.into())
    }

    /// Whether `self` lies strictly below `ancestor`.
    #[inline]
    #[must_use]
    pub fn is_strict_descendant_of(&self, ancestor: &Self) -> bool {
        is_strict_descendant(self, ancestor)
    }

    /// Join labels with `separator`, e.g. `"Animals / Birds / Finch"`.
    #[must_use]
    pub fn display(&self, separator: &str) -> String {
        self.0.join(separator)
    }
}

/// True iff both paths have the same length and equal labels in order.
#[inline]
#[must_use]
pub fn paths_equal(a: &TaxonomyPath, b: &TaxonomyPath) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
}

/// True iff `candidate` is longer than `ancestor` and starts with it.
#[inline]
#[must_use]
pub fn is_strict_descendant(candidate: &TaxonomyPath, ancestor: &TaxonomyPath) -> bool {
    candidate.len() > ancestor.len()
        && candidate.as_slice()[..ancestor.len()] == *ancestor.as_slice()
}

impl fmt::Debug for TaxonomyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for TaxonomyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display(crate::options::DEFAULT_PATH_SEPARATOR))
    }
}

impl AsRef<[String]> for TaxonomyPath {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for TaxonomyPath {
    fn from(labels: Vec<String>) -> Self {
        Self(labels.into())
    }
}

impl From<&[&str]> for TaxonomyPath {
    fn from(labels: &[&str]) -> Self {
        Self::new(labels.iter().copied())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for TaxonomyPath {
    fn from(labels: [S; N]) -> Self {
        Self::new(labels)
    }
}

impl<S: Into<String>> FromIterator<S> for TaxonomyPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
