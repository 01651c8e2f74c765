//! Raw token tables.
//!
//! Each enumeration owns one static table mapping the exact strings emitted by
//! the probe header to a variant. A token that names a real but unsupported
//! platform maps to the `Unknown` variant; a token missing from the table is an
//! error. Tables only grow: new variants are appended with a newer
//! introduction version, existing rows never change.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::error::{CoreError, Result};
use crate::version::ApiVersion;

/// File name of the probe header whose macros produce the raw tokens.
pub const PROBE_HEADER_NAME: &str = "abiprobe_target.h";

/// Which enumeration a table or error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumerationKind {
    Os,
    Abi,
}

impl fmt::Display for EnumerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumerationKind::Os => write!(f, "OS"),
            EnumerationKind::Abi => write!(f, "ABI"),
        }
    }
}

/// A closed enumeration whose variants carry a canonical raw name and the API
/// version that introduced them.
pub trait Classified: Copy + Eq + fmt::Debug + 'static {
    /// The enumeration this type represents.
    const KIND: EnumerationKind;

    /// Every variant, in declaration order.
    fn all() -> &'static [Self];

    /// Symbolic name used in generated code (e.g. `Linux_x86`).
    fn symbol(self) -> &'static str;

    /// Canonical raw token (e.g. `"linux_x86"`).
    fn canonical_name(self) -> &'static str;

    /// Minimum API version in which the variant exists.
    fn introduced(self) -> ApiVersion;

    /// Whether the variant exists in `version`.
    fn available_in(self, version: ApiVersion) -> bool {
        self.introduced() <= version
    }

    /// The variants an API version may reference, in declaration order.
    fn variants_at(version: ApiVersion) -> Vec<Self> {
        Self::all()
            .iter()
            .copied()
            .filter(|v| v.available_in(version))
            .collect()
    }
}

/// One row of a classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableEntry<V: 'static> {
    /// Exact token emitted by the probe.
    pub raw: &'static str,
    /// Variant the token resolves to.
    pub value: V,
}

impl<V: Classified> TableEntry<V> {
    /// Whether this row maps a real platform onto a variant with another
    /// canonical name (the known-unsupported collapse to `Unknown`).
    pub fn is_alias(&self) -> bool {
        self.raw != self.value.canonical_name()
    }
}

/// A fixed mapping from raw probe tokens to variants.
#[derive(Debug, Clone, Copy)]
pub struct Table<V: 'static> {
    header: &'static str,
    entries: &'static [TableEntry<V>],
}

impl<V: Classified> Table<V> {
    /// Build a table over static rows.
    pub const fn new(header: &'static str, entries: &'static [TableEntry<V>]) -> Self {
        Self { header, entries }
    }

    /// Identity of the probe header the tokens come from.
    pub fn header(&self) -> &'static str {
        self.header
    }

    /// All rows in table order.
    pub fn entries(&self) -> &'static [TableEntry<V>] {
        self.entries
    }

    /// Resolve a raw token by exact string equality.
    pub fn lookup(&self, raw: &str) -> Option<V> {
        self.entries.iter().find(|e| e.raw == raw).map(|e| e.value)
    }

    /// Rows that collapse a real platform onto another variant.
    pub fn aliases(&self) -> impl Iterator<Item = &'static TableEntry<V>> {
        self.entries.iter().filter(|e| e.is_alias())
    }

    /// Check the structural invariants of the table.
    ///
    /// - no raw token appears twice
    /// - no two variants share a canonical name
    /// - every variant is reachable through its own canonical name
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in self.entries {
            if !seen.insert(entry.raw) {
                return Err(self.invalid(format!("raw token \"{}\" appears twice", entry.raw)));
            }
        }

        let mut canonical = HashSet::new();
        for variant in V::all() {
            let name = variant.canonical_name();
            if !canonical.insert(name) {
                return Err(self.invalid(format!(
                    "canonical name \"{name}\" is shared by more than one variant"
                )));
            }
            if self.lookup(name) != Some(*variant) {
                return Err(self.invalid(format!(
                    "variant {} is not reachable through its canonical name \"{name}\"",
                    variant.symbol()
                )));
            }
        }

        Ok(())
    }

    fn invalid(&self, detail: String) -> CoreError {
        CoreError::InvalidTable {
            enumeration: V::KIND,
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::os::Os;

    static DUPLICATE_RAW: [TableEntry<Os>; 2] = [
        TableEntry { raw: "Linux", value: Os::Linux },
        TableEntry { raw: "Linux", value: Os::Android },
    ];

    static MISSING_CANONICAL: [TableEntry<Os>; 1] = [TableEntry {
        raw: "Linux",
        value: Os::Linux,
    }];

    #[test]
    fn kind_display() {
        assert_eq!(EnumerationKind::Os.to_string(), "OS");
        assert_eq!(EnumerationKind::Abi.to_string(), "ABI");
    }

    #[test]
    fn duplicate_raw_token_rejected() {
        let table = Table::new(PROBE_HEADER_NAME, &DUPLICATE_RAW);
        let err = table.validate().unwrap_err();
        assert!(err.to_string().contains("appears twice"));
    }

    #[test]
    fn unreachable_variant_rejected() {
        let table = Table::new(PROBE_HEADER_NAME, &MISSING_CANONICAL);
        let err = table.validate().unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidTable {
                enumeration: EnumerationKind::Os,
                ..
            }
        ));
    }

    #[test]
    fn lookup_is_exact() {
        let table = Table::new(PROBE_HEADER_NAME, &MISSING_CANONICAL);
        assert_eq!(table.lookup("Linux"), Some(Os::Linux));
        assert_eq!(table.lookup("linux"), None);
        assert_eq!(table.lookup(" Linux"), None);
    }

    #[test]
    fn variants_at_filters_by_introduction() {
        assert!(!Os::variants_at(ApiVersion::V1).contains(&Os::Unknown));
        assert!(!Os::variants_at(ApiVersion::V2).contains(&Os::Unknown));
        assert!(Os::variants_at(ApiVersion::V3).contains(&Os::Unknown));
    }
}
