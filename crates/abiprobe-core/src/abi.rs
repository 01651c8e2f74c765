//! Application binary interface classification.
//!
//! An ABI is an (OS, architecture, variant) combination. Each variant has a
//! symbolic name used in generated code (`Linux_x86`) and a distinct canonical
//! raw name that is embedded verbatim (`"linux_x86"`).

use std::fmt;

use serde::Serialize;

use crate::os::Os;
use crate::table::{Classified, EnumerationKind, Table, TableEntry, PROBE_HEADER_NAME};
use crate::version::ApiVersion;

/// The ABI a toolchain targets.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Abi {
    /// Not classifiable, or a known but unsupported architecture.
    /// Introduced in API version 3.
    Unknown,
    Android_arm64v8a,
    Android_arm32v7a,
    Android_x86,
    Android_x86_64,
    Darwin_arm64,
    Darwin_x86_64,
    Linux_arm64,
    Linux_arm32v6,
    Linux_arm32v7,
    Linux_x86_64,
    /// Introduced in API version 2.
    Linux_x86,
    Windows_x86_64,
    Windows_x86,
    Windows_arm64,
    Windows_arm32,
}

impl Abi {
    /// The operating system family the ABI belongs to.
    ///
    /// Darwin ABIs are shared by macOS and iOS and report [`Os::OSX`].
    pub fn os(self) -> Os {
        match self {
            Abi::Unknown => Os::Unknown,
            Abi::Android_arm64v8a | Abi::Android_arm32v7a | Abi::Android_x86 | Abi::Android_x86_64 => {
                Os::Android
            }
            Abi::Darwin_arm64 | Abi::Darwin_x86_64 => Os::OSX,
            Abi::Linux_arm64
            | Abi::Linux_arm32v6
            | Abi::Linux_arm32v7
            | Abi::Linux_x86_64
            | Abi::Linux_x86 => Os::Linux,
            Abi::Windows_x86_64 | Abi::Windows_x86 | Abi::Windows_arm64 | Abi::Windows_arm32 => {
                Os::Windows
            }
        }
    }
}

impl Classified for Abi {
    const KIND: EnumerationKind = EnumerationKind::Abi;

    fn all() -> &'static [Self] {
        &[
            Abi::Unknown,
            Abi::Android_arm64v8a,
            Abi::Android_arm32v7a,
            Abi::Android_x86,
            Abi::Android_x86_64,
            Abi::Darwin_arm64,
            Abi::Darwin_x86_64,
            Abi::Linux_arm64,
            Abi::Linux_arm32v6,
            Abi::Linux_arm32v7,
            Abi::Linux_x86_64,
            Abi::Linux_x86,
            Abi::Windows_x86_64,
            Abi::Windows_x86,
            Abi::Windows_arm64,
            Abi::Windows_arm32,
        ]
    }

    fn symbol(self) -> &'static str {
        match self {
            Abi::Unknown => "Unknown",
            Abi::Android_arm64v8a => "Android_arm64v8a",
            Abi::Android_arm32v7a => "Android_arm32v7a",
            Abi::Android_x86 => "Android_x86",
            Abi::Android_x86_64 => "Android_x86_64",
            Abi::Darwin_arm64 => "Darwin_arm64",
            Abi::Darwin_x86_64 => "Darwin_x86_64",
            Abi::Linux_arm64 => "Linux_arm64",
            Abi::Linux_arm32v6 => "Linux_arm32v6",
            Abi::Linux_arm32v7 => "Linux_arm32v7",
            Abi::Linux_x86_64 => "Linux_x86_64",
            Abi::Linux_x86 => "Linux_x86",
            Abi::Windows_x86_64 => "Windows_x86_64",
            Abi::Windows_x86 => "Windows_x86",
            Abi::Windows_arm64 => "Windows_arm64",
            Abi::Windows_arm32 => "Windows_arm32",
        }
    }

    fn canonical_name(self) -> &'static str {
        match self {
            Abi::Unknown => "unknown",
            Abi::Android_arm64v8a => "android_arm64v8a",
            Abi::Android_arm32v7a => "android_arm32v7a",
            Abi::Android_x86 => "android_x86",
            Abi::Android_x86_64 => "android_x86_64",
            Abi::Darwin_arm64 => "darwin_arm64",
            Abi::Darwin_x86_64 => "darwin_x86_64",
            Abi::Linux_arm64 => "linux_arm64",
            Abi::Linux_arm32v6 => "linux_arm32v6",
            Abi::Linux_arm32v7 => "linux_arm32v7",
            Abi::Linux_x86_64 => "linux_x86_64",
            Abi::Linux_x86 => "linux_x86",
            Abi::Windows_x86_64 => "windows_x86_64",
            Abi::Windows_x86 => "windows_x86",
            Abi::Windows_arm64 => "windows_arm64",
            Abi::Windows_arm32 => "windows_arm32",
        }
    }

    fn introduced(self) -> ApiVersion {
        match self {
            Abi::Unknown => ApiVersion::V3,
            Abi::Linux_x86 => ApiVersion::V2,
            _ => ApiVersion::V1,
        }
    }
}

impl fmt::Display for Abi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Raw ABI tokens emitted by `ABIPROBE_ABI`.
///
/// The trailing rows collapse big-endian PowerPC, little-endian ppc64, s390x
/// and MIPS onto [`Abi::Unknown`]: the probe recognizes them, nothing
/// downstream supports them.
pub static ABI_TABLE: Table<Abi> = Table::new(
    PROBE_HEADER_NAME,
    &[
        TableEntry { raw: "unknown", value: Abi::Unknown },
        TableEntry { raw: "android_arm64v8a", value: Abi::Android_arm64v8a },
        TableEntry { raw: "android_arm32v7a", value: Abi::Android_arm32v7a },
        TableEntry { raw: "android_x86", value: Abi::Android_x86 },
        TableEntry { raw: "android_x86_64", value: Abi::Android_x86_64 },
        TableEntry { raw: "darwin_arm64", value: Abi::Darwin_arm64 },
        TableEntry { raw: "darwin_x86_64", value: Abi::Darwin_x86_64 },
        TableEntry { raw: "linux_arm64", value: Abi::Linux_arm64 },
        TableEntry { raw: "linux_arm32v6", value: Abi::Linux_arm32v6 },
        TableEntry { raw: "linux_arm32v7", value: Abi::Linux_arm32v7 },
        TableEntry { raw: "linux_x86_64", value: Abi::Linux_x86_64 },
        TableEntry { raw: "linux_x86", value: Abi::Linux_x86 },
        TableEntry { raw: "windows_x86_64", value: Abi::Windows_x86_64 },
        TableEntry { raw: "windows_x86", value: Abi::Windows_x86 },
        TableEntry { raw: "windows_arm64", value: Abi::Windows_arm64 },
        TableEntry { raw: "windows_arm32", value: Abi::Windows_arm32 },
        // known but unsupported
        TableEntry { raw: "darwin_ppc", value: Abi::Unknown },
        TableEntry { raw: "darwin_ppc64", value: Abi::Unknown },
        TableEntry { raw: "linux_ppc64", value: Abi::Unknown },
        TableEntry { raw: "linux_ppc64le", value: Abi::Unknown },
        TableEntry { raw: "linux_s390x", value: Abi::Unknown },
        TableEntry { raw: "linux_mips", value: Abi::Unknown },
    ],
);
