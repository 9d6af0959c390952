#![forbid(unsafe_code)]

//! Core engine for hierarchical multi-select.
//!
//! # Role in taxsel
//! `taxsel-core` owns the data model and the pure transformations behind a
//! taxonomy picker. Nothing here renders or keeps state between calls; the
//! widget layer (`taxsel-widgets`) holds the controlled-component state and
//! calls into this crate.
//!
//! # Primary responsibilities
//! - **Paths**: [`TaxonomyPath`] with exact and strict-prefix comparison.
//! - **Flattening**: pre-order linearization of an item tree ([`flatten`]).
//! - **Reconstruction**: pruned forest of matches plus their ancestors
//!   ([`reconstruct`]), in a single backward pass.
//! - **Selection**: [`SelectedSet`] with tri-state lookup and policy-aware
//!   toggling ([`apply_toggle`]).
//! - **Options**: [`TaxonomyOptions`] and the derived [`ResolvedOptions`].
//!
//! # Example
//!
//! ```
//! use taxsel_core::{flatten, reconstruct, LabelQuery, TaxonomyNode, TaxonomyPath};
//!
//! let tree = vec![TaxonomyNode::new("A")
//!     .child(TaxonomyNode::new("A1"))
//!     .child(TaxonomyNode::new("A2").child(TaxonomyNode::new("A2a")))
//!     .build()];
//!
//! let flat = flatten(&tree);
//! assert_eq!(flat.len(), 4);
//!
//! let query = LabelQuery::new("a2a").unwrap();
//! let pruned = reconstruct(&flat, |item| query.matches(item));
//! assert_eq!(pruned[0].children()[0].path(), &TaxonomyPath::from(["A", "A2"]));
//! ```

pub mod error;
pub mod flatten;
pub mod item;
pub mod options;
pub mod path;
pub mod reconstruct;
pub mod selection;

pub use error::{Result, TaxonomyError};
pub use flatten::{FlatEntry, FlatSequence, flatten};
pub use item::{TaxonomyItem, TaxonomyNode, build_forest, validate_forest};
pub use options::{DEFAULT_PATH_SEPARATOR, ResolvedOptions, TaxonomyOptions, resolve};
pub use path::{TaxonomyPath, is_strict_descendant, paths_equal};
pub use reconstruct::{LabelQuery, reconstruct, search, try_reconstruct};
pub use selection::{
    DisabledReason, NodeState, SelectedSet, ToggleOutcome, apply_toggle, node_state,
};
