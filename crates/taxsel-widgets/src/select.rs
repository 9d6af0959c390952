//! Taxonomy picker state.
//!
//! The caller owns the authoritative selection. [`TaxonomySelectState`]
//! keeps a copy that is replaced wholesale by
//! [`sync_selected`](TaxonomySelectState::sync_selected) and updated
//! between syncs by toggles, each of which is reported upward through the
//! change callback right away.

use std::fmt;

use ahash::{AHashMap, AHashSet};
use taxsel_core::{
    FlatSequence, LabelQuery, ResolvedOptions, Result, SelectedSet, TaxonomyItem, TaxonomyOptions,
    TaxonomyPath, ToggleOutcome, apply_toggle, flatten, node_state, resolve, search,
    validate_forest,
};

use crate::rows::{NodeRow, collect_rows};
use crate::summary::{self, SelectedChip};

/// Callback receiving the new selection after every change.
pub type ChangeCallback = Box<dyn FnMut(&SelectedSet)>;

/// What a click on a row did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// The node was expanded (`true`) or collapsed (`false`).
    Expansion(bool),
    /// The node's checkbox was toggled.
    Selection(ToggleOutcome),
}

/// Controlled-component state for a taxonomy picker.
pub struct TaxonomySelectState {
    items: Vec<TaxonomyItem>,
    /// Pre-order index, rebuilt once per tree change.
    flat: FlatSequence,
    /// Leafness in the full tree, keyed by path.
    leaves: AHashMap<TaxonomyPath, bool>,
    options: ResolvedOptions,
    selected: SelectedSet,
    query: Option<LabelQuery>,
    /// Pruned forest for `query`, if any.
    filtered: Option<Vec<TaxonomyItem>>,
    expanded: AHashSet<TaxonomyPath>,
    /// Expansion inside the pruned forest; reseeded fully expanded on every
    /// search.
    search_expanded: AHashSet<TaxonomyPath>,
    on_change: Option<ChangeCallback>,
}

impl TaxonomySelectState {
    /// Create state for `items` with an empty selection.
    ///
    /// Items are trusted to be depth/path consistent; use
    /// [`try_new`](Self::try_new) to check.
    #[must_use]
    pub fn new(items: Vec<TaxonomyItem>, options: TaxonomyOptions) -> Self {
        let selected = SelectedSet::new();
        let options = resolve(&options, &selected);
        let mut state = Self {
            items: Vec::new(),
            flat: FlatSequence::default(),
            leaves: AHashMap::new(),
            options,
            selected,
            query: None,
            filtered: None,
            expanded: AHashSet::new(),
            search_expanded: AHashSet::new(),
            on_change: None,
        };
        state.set_items(items);
        state
    }

    /// Like [`new`](Self::new), but rejects items whose depth or path
    /// disagrees with their position in the tree.
    pub fn try_new(items: Vec<TaxonomyItem>, options: TaxonomyOptions) -> Result<Self> {
        validate_forest(&items)?;
        Ok(Self::new(items, options))
    }

    /// Start from an externally supplied selection.
    #[must_use]
    pub fn with_selected(mut self, selected: impl Into<SelectedSet>) -> Self {
        self.sync_selected(selected);
        self
    }

    /// Register the upward change notification.
    #[must_use]
    pub fn with_on_change(mut self, callback: impl FnMut(&SelectedSet) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Replace the change notification.
    pub fn set_on_change(&mut self, callback: impl FnMut(&SelectedSet) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Replace the tree. Rebuilds the flat index and leaf table, re-runs the
    /// active search and forgets expansion of paths that no longer exist.
    pub fn set_items(&mut self, items: Vec<TaxonomyItem>) {
        self.flat = flatten(&items);
        self.leaves = self
            .flat
            .iter()
            .map(|entry| (entry.path().clone(), !entry.has_children()))
            .collect();
        self.items = items;
        let leaves = &self.leaves;
        self.expanded.retain(|path| leaves.get(path) == Some(&false));
        self.refilter();
    }

    /// Replace the selection wholesale with the caller's copy.
    ///
    /// Does not fire the change callback; the caller already knows.
    pub fn sync_selected(&mut self, selected: impl Into<SelectedSet>) {
        self.selected = selected.into();
        self.rebind();
    }

    /// Replace the options; derived flags are recomputed.
    pub fn set_options(&mut self, options: TaxonomyOptions) {
        self.options = resolve(&options, &self.selected);
    }

    /// Set the search text. Empty text clears the filter; whitespace is
    /// matched like any other character.
    pub fn set_search(&mut self, query: &str) {
        self.query = LabelQuery::new(query);
        self.refilter();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "taxonomy.search",
            active = self.query.is_some(),
            indexed = self.flat.len(),
            roots = self.filtered.as_ref().map_or(0, Vec::len),
        );
    }

    /// Clear the search filter.
    pub fn clear_search(&mut self) {
        self.set_search("");
    }

    fn refilter(&mut self) {
        self.filtered = self.query.as_ref().map(|query| search(&self.flat, query));
        self.search_expanded.clear();
        let Some(filtered) = &self.filtered else {
            return;
        };
        let mut stack: Vec<&TaxonomyItem> = filtered.iter().collect();
        while let Some(item) = stack.pop() {
            if !item.is_leaf() {
                self.search_expanded.insert(item.path().clone());
                stack.extend(item.children());
            }
        }
    }

    fn rebind(&mut self) {
        self.options.rebind(&self.selected);
    }

    /// Expansion set in effect for the current view.
    fn active_expansion(&self) -> &AHashSet<TaxonomyPath> {
        if self.is_searching() {
            &self.search_expanded
        } else {
            &self.expanded
        }
    }

    fn active_expansion_mut(&mut self) -> &mut AHashSet<TaxonomyPath> {
        if self.is_searching() {
            &mut self.search_expanded
        } else {
            &mut self.expanded
        }
    }

    #[must_use]
    pub fn items(&self) -> &[TaxonomyItem] {
        &self.items
    }

    #[must_use]
    pub fn flat(&self) -> &FlatSequence {
        &self.flat
    }

    #[must_use]
    pub fn selected(&self) -> &SelectedSet {
        &self.selected
    }

    #[must_use]
    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    /// The active search needle, lower-cased.
    #[must_use]
    pub fn search_query(&self) -> Option<&str> {
        self.query.as_ref().map(LabelQuery::as_str)
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.query.is_some()
    }

    /// The forest to render: the pruned forest while searching, otherwise
    /// the full tree.
    #[must_use]
    pub fn visible_forest(&self) -> &[TaxonomyItem] {
        self.filtered.as_deref().unwrap_or(&self.items)
    }

    /// Whether `path` is a leaf in the full tree. Unknown paths count as
    /// leaves.
    #[must_use]
    pub fn is_leaf(&self, path: &TaxonomyPath) -> bool {
        self.leaves.get(path).copied().unwrap_or(true)
    }

    /// Whether `path` is shown expanded.
    ///
    /// A search starts with every node of the pruned forest expanded and
    /// tracks expansion separately, so the browsing state comes back once
    /// the search clears.
    #[must_use]
    pub fn is_expanded(&self, path: &TaxonomyPath) -> bool {
        self.active_expansion().contains(path)
    }

    /// Expand or collapse `path` in the current view. Leaves cannot be
    /// expanded.
    pub fn set_expanded(&mut self, path: &TaxonomyPath, expanded: bool) {
        let expandable = expanded && !self.is_leaf(path);
        let set = self.active_expansion_mut();
        if expandable {
            set.insert(path.clone());
        } else {
            set.remove(path);
        }
    }

    /// Flip expansion of `path` and return the new state.
    pub fn toggle_expanded(&mut self, path: &TaxonomyPath) -> bool {
        self.set_expanded(path, !self.is_expanded(path));
        self.is_expanded(path)
    }

    /// Collapse every node in the current view.
    pub fn collapse_all(&mut self) {
        self.active_expansion_mut().clear();
    }

    /// Select or deselect `path`, subject to the leaf-only and max-usages
    /// policies. On change the new set is stored and reported.
    pub fn toggle(&mut self, path: &TaxonomyPath, make_selected: bool) -> ToggleOutcome {
        let outcome = apply_toggle(
            &self.selected,
            &self.options,
            path,
            self.is_leaf(path),
            make_selected,
        );
        if let ToggleOutcome::Changed(next) = &outcome {
            self.commit(next.clone());
        }
        outcome
    }

    /// Click semantics for a row.
    ///
    /// In leaf-only mode a node with children only expands or collapses.
    /// Otherwise the checkbox flips.
    pub fn activate(&mut self, path: &TaxonomyPath) -> Activation {
        if self.options.leafs_only() && !self.is_leaf(path) {
            return Activation::Expansion(self.toggle_expanded(path));
        }
        let make_selected = !self.selected.is_checked(path);
        Activation::Selection(self.toggle(path, make_selected))
    }

    /// Remove `path` from the selection, e.g. from a summary chip. Returns
    /// whether anything changed.
    pub fn deselect(&mut self, path: &TaxonomyPath) -> bool {
        self.toggle(path, false).is_changed()
    }

    /// Deselect everything with a single notification.
    pub fn clear(&mut self) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        self.commit(SelectedSet::new());
        true
    }

    fn commit(&mut self, next: SelectedSet) {
        self.selected = next;
        self.rebind();
        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.selected);
        }
    }

    /// Visible rows of [`visible_forest`](Self::visible_forest) in
    /// pre-order, annotated with checkbox state.
    #[must_use]
    pub fn rows(&self) -> Vec<NodeRow> {
        collect_rows(
            self.visible_forest(),
            |item| self.is_expanded(item.path()),
            |item| {
                let is_leaf = self.is_leaf(item.path());
                let state = node_state(&self.selected, &self.options, item.path(), is_leaf);
                (is_leaf, state)
            },
        )
    }

    /// One chip per selected path.
    #[must_use]
    pub fn summary(&self) -> Vec<SelectedChip> {
        summary::chips(&self.selected, self.options.options())
    }

    /// Text for the closed-state trigger control.
    #[must_use]
    pub fn trigger_label(&self) -> String {
        summary::trigger_label(&self.selected, self.options.options())
    }
}

impl fmt::Debug for TaxonomySelectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaxonomySelectState")
            .field("nodes", &self.flat.len())
            .field("options", &self.options)
            .field("selected", &self.selected)
            .field("query", &self.query)
            .field("expanded", &self.expanded.len())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}
