//! Path-based selection model.
//!
//! The selected set is a flat list of paths. Selection never cascades: a
//! parent and its descendants are selected independently, and a parent only
//! *looks* indeterminate when something below it is selected.

use std::fmt;

use crate::options::ResolvedOptions;
use crate::path::{TaxonomyPath, is_strict_descendant, paths_equal};

/// Ordered list of selected paths without duplicates.
///
/// Order is insertion order; it carries no meaning beyond keeping toggles
/// stable for the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<TaxonomyPath>", into = "Vec<TaxonomyPath>")
)]
pub struct SelectedSet {
    paths: Vec<TaxonomyPath>,
}

impl SelectedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an external list, keeping the first of any duplicates.
    #[must_use]
    pub fn from_paths(paths: impl IntoIterator<Item = TaxonomyPath>) -> Self {
        let mut set = Self::new();
        for path in paths {
            if !set.is_checked(&path) {
                set.paths.push(path);
            }
        }
        set
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaxonomyPath> {
        self.paths.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[TaxonomyPath] {
        &self.paths
    }

    /// Whether `path` itself is selected.
    #[must_use]
    pub fn is_checked(&self, path: &TaxonomyPath) -> bool {
        self.paths.iter().any(|selected| paths_equal(selected, path))
    }

    /// Whether `path` is unselected but has a selected descendant.
    #[must_use]
    pub fn is_indeterminate(&self, path: &TaxonomyPath) -> bool {
        !self.is_checked(path)
            && self
                .paths
                .iter()
                .any(|selected| is_strict_descendant(selected, path))
    }

    /// Return a new set with `path` added or removed.
    ///
    /// Adding a present path and removing an absent one both return an
    /// equal copy. Descendants and ancestors of `path` are not touched.
    #[must_use]
    pub fn toggle(&self, path: &TaxonomyPath, make_selected: bool) -> Self {
        let mut paths = self.paths.clone();
        if make_selected {
            if !self.is_checked(path) {
                paths.push(path.clone());
            }
        } else {
            paths.retain(|selected| !paths_equal(selected, path));
        }
        Self { paths }
    }
}

impl From<Vec<TaxonomyPath>> for SelectedSet {
    fn from(paths: Vec<TaxonomyPath>) -> Self {
        Self::from_paths(paths)
    }
}

impl From<SelectedSet> for Vec<TaxonomyPath> {
    fn from(set: SelectedSet) -> Self {
        set.paths
    }
}

impl FromIterator<TaxonomyPath> for SelectedSet {
    fn from_iter<I: IntoIterator<Item = TaxonomyPath>>(iter: I) -> Self {
        Self::from_paths(iter)
    }
}

impl<'a> IntoIterator for &'a SelectedSet {
    type Item = &'a TaxonomyPath;
    type IntoIter = std::slice::Iter<'a, TaxonomyPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Why a node cannot be checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisabledReason {
    /// Leaf-only mode and the node has children.
    LeafOnly,
    /// The selection already holds `max` paths.
    MaxUsagesReached { max: usize },
}

impl fmt::Display for DisabledReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeafOnly => f.write_str("Only leaf nodes allowed"),
            Self::MaxUsagesReached { max } => write!(f, "Maximum {max} items already selected"),
        }
    }
}

/// Tri-state checkbox state for one node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeState {
    pub checked: bool,
    pub indeterminate: bool,
    pub disabled: bool,
    pub reason: Option<DisabledReason>,
}

/// Checkbox state of `path` under the current selection and policies.
///
/// `is_leaf` is the node's leafness in the full tree, not in a pruned view.
#[must_use]
pub fn node_state(
    selected: &SelectedSet,
    options: &ResolvedOptions,
    path: &TaxonomyPath,
    is_leaf: bool,
) -> NodeState {
    let checked = selected.is_checked(path);
    let indeterminate = !checked && selected.is_indeterminate(path);
    let reason = disabled_reason(options, checked, is_leaf);
    NodeState {
        checked,
        indeterminate,
        disabled: reason.is_some(),
        reason,
    }
}

fn disabled_reason(
    options: &ResolvedOptions,
    checked: bool,
    is_leaf: bool,
) -> Option<DisabledReason> {
    if options.leafs_only() && !is_leaf {
        return Some(DisabledReason::LeafOnly);
    }
    if options.max_usages_reached() && !checked {
        let max = options.max_usages().unwrap_or_default();
        return Some(DisabledReason::MaxUsagesReached { max });
    }
    None
}

/// Result of a policy-checked toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum ToggleOutcome {
    /// The selection changed; this is the new set.
    Changed(SelectedSet),
    /// The path was already in the requested state.
    Unchanged,
    /// A policy blocked the change.
    Rejected(DisabledReason),
}

impl ToggleOutcome {
    #[must_use]
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }

    #[must_use]
    pub fn into_changed(self) -> Option<SelectedSet> {
        match self {
            Self::Changed(set) => Some(set),
            Self::Unchanged | Self::Rejected(_) => None,
        }
    }
}

/// Toggle `path` subject to the leaf-only and max-usages policies.
///
/// Deselecting is always allowed; the cap blocks growth, not shrinkage.
pub fn apply_toggle(
    selected: &SelectedSet,
    options: &ResolvedOptions,
    path: &TaxonomyPath,
    is_leaf: bool,
    make_selected: bool,
) -> ToggleOutcome {
    let checked = selected.is_checked(path);
    let outcome = if make_selected == checked {
        ToggleOutcome::Unchanged
    } else if make_selected {
        match disabled_reason(options, checked, is_leaf) {
            Some(reason) => ToggleOutcome::Rejected(reason),
            None => ToggleOutcome::Changed(selected.toggle(path, true)),
        }
    } else {
        ToggleOutcome::Changed(selected.toggle(path, false))
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        message = "taxonomy.toggle",
        action = if make_selected { "select" } else { "deselect" },
        outcome = match &outcome {
            ToggleOutcome::Changed(_) => "changed",
            ToggleOutcome::Unchanged => "unchanged",
            ToggleOutcome::Rejected(_) => "rejected",
        },
        selected = selected.len(),
    );

    outcome
}
