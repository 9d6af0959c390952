//! Error type for structural problems in caller-supplied data.
//!
//! Selection policy rejections are not errors; see
//! [`ToggleOutcome::Rejected`](crate::ToggleOutcome::Rejected).

use thiserror::Error;

use crate::path::TaxonomyPath;

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("node {path} sits at depth {found}, expected {expected}")]
    DepthMismatch {
        path: TaxonomyPath,
        expected: usize,
        found: usize,
    },
    #[error("node {path} jumps from depth {previous} to {found} in the flat sequence")]
    DepthJump {
        path: TaxonomyPath,
        previous: usize,
        found: usize,
    },
    #[error("node {path} has {len} labels but depth {depth}")]
    PathLength {
        path: TaxonomyPath,
        len: usize,
        depth: usize,
    },
    #[error("node {path} does not extend its parent path or end with its label {label:?}")]
    PathMismatch { path: TaxonomyPath, label: String },
    #[cfg(feature = "serde")]
    #[error("failed to parse taxonomy options JSON: {0}")]
    OptionsParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TaxonomyError>;
