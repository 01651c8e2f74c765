//! Raw token classification.

use tracing::{debug, warn};

use crate::abi::{Abi, ABI_TABLE};
use crate::error::ClassificationError;
use crate::os::{Os, OS_TABLE};
use crate::table::{Classified, Table};

/// A successfully resolved token: the variant and its canonical raw name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<V> {
    pub value: V,
    /// Canonical raw name, embedded verbatim in generated output.
    pub raw_name: &'static str,
}

/// Outcome of classifying one raw token.
pub type Classification<V> = Result<Resolved<V>, ClassificationError>;

/// Resolve `raw` against `table` by exact string equality.
///
/// The canonical name of the matched variant is returned rather than `raw`
/// itself, so a known-unsupported token such as `darwin_ppc64` echoes as
/// `"unknown"`.
pub fn classify<V: Classified>(raw: &str, table: &Table<V>) -> Classification<V> {
    match table.lookup(raw) {
        Some(value) => {
            debug!(enumeration = %V::KIND, raw, variant = value.symbol(), "classified token");
            Ok(Resolved {
                value,
                raw_name: value.canonical_name(),
            })
        }
        None => {
            warn!(enumeration = %V::KIND, raw, header = table.header(), "unrecognized token");
            Err(ClassificationError::Unrecognized {
                token: raw.to_string(),
                enumeration: V::KIND,
                header: table.header(),
            })
        }
    }
}

/// Classify a raw OS token against [`OS_TABLE`].
pub fn classify_os(raw: &str) -> Classification<Os> {
    classify(raw, &OS_TABLE)
}

/// Classify a raw ABI token against [`ABI_TABLE`].
pub fn classify_abi(raw: &str) -> Classification<Abi> {
    classify(raw, &ABI_TABLE)
}
