//! Operating system classification.

use std::fmt;

use serde::Serialize;

use crate::table::{Classified, EnumerationKind, Table, TableEntry, PROBE_HEADER_NAME};
use crate::version::ApiVersion;

/// The operating system a toolchain targets.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Os {
    /// Not classifiable. Introduced in API version 3.
    Unknown,
    Android,
    IOS,
    Linux,
    OSX,
    Windows,
}

impl Classified for Os {
    const KIND: EnumerationKind = EnumerationKind::Os;

    fn all() -> &'static [Self] {
        &[
            Os::Unknown,
            Os::Android,
            Os::IOS,
            Os::Linux,
            Os::OSX,
            Os::Windows,
        ]
    }

    fn symbol(self) -> &'static str {
        match self {
            Os::Unknown => "Unknown",
            Os::Android => "Android",
            Os::IOS => "IOS",
            Os::Linux => "Linux",
            Os::OSX => "OSX",
            Os::Windows => "Windows",
        }
    }

    fn canonical_name(self) -> &'static str {
        // OS tokens are emitted with the same spelling as the variants.
        self.symbol()
    }

    fn introduced(self) -> ApiVersion {
        match self {
            Os::Unknown => ApiVersion::V3,
            _ => ApiVersion::V1,
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Raw OS tokens emitted by `ABIPROBE_OS_NAME`.
pub static OS_TABLE: Table<Os> = Table::new(
    PROBE_HEADER_NAME,
    &[
        TableEntry { raw: "Unknown", value: Os::Unknown },
        TableEntry { raw: "Android", value: Os::Android },
        TableEntry { raw: "IOS", value: Os::IOS },
        TableEntry { raw: "Linux", value: Os::Linux },
        TableEntry { raw: "OSX", value: Os::OSX },
        TableEntry { raw: "Windows", value: Os::Windows },
    ],
);
