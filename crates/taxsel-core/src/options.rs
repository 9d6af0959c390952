//! Display and behavior options, plus the derived flags resolved against the
//! current selection.

use crate::selection::SelectedSet;

/// Separator used for full-path display when none is configured.
pub const DEFAULT_PATH_SEPARATOR: &str = " / ";

const DEFAULT_PLACEHOLDER: &str = "Select...";

/// Caller-supplied options.
///
/// With the `serde` feature the record uses the camelCase field names of
/// the host UI (`leafsOnly`, `showFullPath`, `pathSeparator`, `maxUsages`,
/// `placeholder`); every field is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct TaxonomyOptions {
    leafs_only: bool,
    show_full_path: bool,
    path_separator: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    max_usages: Option<usize>,
    placeholder: String,
}

impl Default for TaxonomyOptions {
    fn default() -> Self {
        Self {
            leafs_only: false,
            show_full_path: false,
            path_separator: DEFAULT_PATH_SEPARATOR.to_owned(),
            max_usages: None,
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
        }
    }
}

impl TaxonomyOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only leaf nodes may be selected; clicking a parent toggles expansion.
    #[must_use]
    pub fn with_leafs_only(mut self, leafs_only: bool) -> Self {
        self.leafs_only = leafs_only;
        self
    }

    /// Show the full path instead of the terminal label in the summary.
    #[must_use]
    pub fn with_show_full_path(mut self, show: bool) -> Self {
        self.show_full_path = show;
        self
    }

    #[must_use]
    pub fn with_path_separator(mut self, separator: impl Into<String>) -> Self {
        self.path_separator = separator.into();
        self
    }

    /// Cap the number of selected paths. A cap of zero means no cap.
    #[must_use]
    pub fn with_max_usages(mut self, max: usize) -> Self {
        self.max_usages = Some(max);
        self
    }

    /// Remove the selection cap.
    #[must_use]
    pub fn without_max_usages(mut self) -> Self {
        self.max_usages = None;
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub const fn leafs_only(&self) -> bool {
        self.leafs_only
    }

    #[must_use]
    pub const fn show_full_path(&self) -> bool {
        self.show_full_path
    }

    #[must_use]
    pub fn path_separator(&self) -> &str {
        &self.path_separator
    }

    #[must_use]
    pub const fn max_usages(&self) -> Option<usize> {
        self.max_usages
    }

    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Parse an options record from JSON.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Options merged with flags derived from the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    options: TaxonomyOptions,
    max_usages_reached: bool,
}

impl ResolvedOptions {
    #[must_use]
    pub fn options(&self) -> &TaxonomyOptions {
        &self.options
    }

    /// Whether the selection has hit `max_usages`.
    #[must_use]
    pub const fn max_usages_reached(&self) -> bool {
        self.max_usages_reached
    }

    #[must_use]
    pub const fn leafs_only(&self) -> bool {
        self.options.leafs_only
    }

    #[must_use]
    pub const fn max_usages(&self) -> Option<usize> {
        self.options.max_usages
    }

    /// Recompute the derived flags for a new selection.
    pub fn rebind(&mut self, selected: &SelectedSet) {
        self.max_usages_reached = usages_reached(self.options.max_usages, selected);
    }
}

/// Merge `options` with the flags derived from `selected`.
#[must_use]
pub fn resolve(options: &TaxonomyOptions, selected: &SelectedSet) -> ResolvedOptions {
    ResolvedOptions {
        options: options.clone(),
        max_usages_reached: usages_reached(options.max_usages, selected),
    }
}

fn usages_reached(max_usages: Option<usize>, selected: &SelectedSet) -> bool {
    max_usages.is_some_and(|max| max > 0 && selected.len() >= max)
}
