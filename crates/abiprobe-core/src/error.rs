//! Error types for classification and table operations.

use serde::Serialize;

use crate::table::EnumerationKind;
use crate::version::ApiVersion;

/// A classification failure.
///
/// These are carried as values all the way into the generated modules, so the
/// `Display` text is what a downstream consumer eventually reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "error", rename_all = "kebab-case")]
pub enum ClassificationError {
    /// The probe reported a token that has no entry in the table.
    #[error("the {enumeration} token \"{token}\" reported by {header} is not recognized")]
    Unrecognized {
        /// The exact raw token.
        token: String,
        /// Which enumeration was being resolved.
        enumeration: EnumerationKind,
        /// Identity of the probe header the token came from.
        header: &'static str,
    },

    /// The token resolved, but to a value introduced after the targeted API version.
    #[error(
        "the {enumeration} value {variant} requires API version {introduced} \
         but this module targets version {target}"
    )]
    VersionGated {
        enumeration: EnumerationKind,
        /// Symbolic name of the rejected variant.
        variant: &'static str,
        /// Version in which the variant was introduced.
        introduced: ApiVersion,
        /// Version being targeted.
        target: ApiVersion,
    },
}

impl ClassificationError {
    /// Whether this failure comes from a version gate rather than an unknown token.
    pub fn is_version_gated(&self) -> bool {
        matches!(self, ClassificationError::VersionGated { .. })
    }
}

/// Errors from operations on the classification tables themselves.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An API version string that is not one of the published versions.
    #[error("unsupported API version: '{input}'")]
    UnsupportedVersion {
        /// The rejected input.
        input: String,
    },

    /// A structural problem in a classification table.
    #[error("invalid {enumeration} table: {detail}")]
    InvalidTable {
        enumeration: EnumerationKind,
        /// Description of the problem.
        detail: String,
    },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
