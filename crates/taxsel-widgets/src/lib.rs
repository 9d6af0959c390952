#![forbid(unsafe_code)]

//! Controlled-component state for a hierarchical multi-select.
//!
//! [`TaxonomySelectState`] owns the pieces a picker needs between events:
//! the cached flat index, the current search, expansion state and the
//! caller's selection. It never draws; a rendering layer walks
//! [`TaxonomySelectState::rows`] and paints checkboxes from each row's
//! [`NodeState`](taxsel_core::NodeState).
//!
//! # Example
//!
//! ```
//! use taxsel_core::{TaxonomyNode, TaxonomyOptions, TaxonomyPath, build_forest};
//! use taxsel_widgets::TaxonomySelectState;
//!
//! let tree = build_forest([TaxonomyNode::new("Animals")
//!     .child(TaxonomyNode::new("Birds").child(TaxonomyNode::new("Finch")))]);
//!
//! let mut state = TaxonomySelectState::new(tree, TaxonomyOptions::new());
//! let finch = TaxonomyPath::from(["Animals", "Birds", "Finch"]);
//! assert!(state.toggle(&finch, true).is_changed());
//!
//! state.set_search("fin");
//! let rows = state.rows();
//! assert_eq!(rows.len(), 3);
//! assert!(rows[0].state.indeterminate);
//! assert!(rows[2].state.checked);
//! ```

pub mod rows;
pub mod select;
pub mod summary;

pub use rows::NodeRow;
pub use select::{Activation, ChangeCallback, TaxonomySelectState};
pub use summary::SelectedChip;
