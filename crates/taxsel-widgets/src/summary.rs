//! Selected-items summary shown next to the trigger control.

use taxsel_core::{SelectedSet, TaxonomyOptions, TaxonomyPath};

/// One selected path as displayed in the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedChip {
    pub path: TaxonomyPath,
    pub text: String,
}

/// One chip per selected path, in selection order.
///
/// Text is the terminal label, or the whole path joined with the configured
/// separator when `show_full_path` is on.
pub(crate) fn chips(selected: &SelectedSet, options: &TaxonomyOptions) -> Vec<SelectedChip> {
    selected
        .iter()
        .map(|path| SelectedChip {
            path: path.clone(),
            text: chip_text(path, options),
        })
        .collect()
}

fn chip_text(path: &TaxonomyPath, options: &TaxonomyOptions) -> String {
    if options.show_full_path() {
        path.display(options.path_separator())
    } else {
        path.leaf_label().unwrap_or_default().to_owned()
    }
}

/// Trigger text: the placeholder when nothing is selected, otherwise the
/// chip texts joined with `", "`.
pub(crate) fn trigger_label(selected: &SelectedSet, options: &TaxonomyOptions) -> String {
    if selected.is_empty() {
        return options.placeholder().to_owned();
    }
    selected
        .iter()
        .map(|path| chip_text(path, options))
        .collect::<Vec<_>>()
        .join(", ")
}
