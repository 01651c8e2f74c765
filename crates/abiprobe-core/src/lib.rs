//! OS and ABI classification for abiprobe.
//!
//! Turns the raw OS and ABI tokens reported by the C toolchain probe into typed
//! values, then projects them backward through every published API version:
//!
//! - [`table`]: the authoritative raw token tables and the [`Classified`] trait
//! - [`os`], [`abi`]: the closed enumerations and their tables
//! - [`classify`]: raw token resolution
//! - [`version`]: API versions and the version projector
//! - [`assemble`]: per-version bundles ready for emission
//!
//! Failures are data. An unrecognized token or a value that a given API version
//! does not know about becomes a [`ClassificationError`] embedded in the result,
//! never a panic or an early exit.

pub mod abi;
pub mod assemble;
pub mod classify;
pub mod error;
pub mod os;
pub mod table;
pub mod version;

pub use abi::{Abi, ABI_TABLE};
pub use assemble::{assemble, assemble_supported, ModuleSpec, VersionedBundle};
pub use classify::{classify, classify_abi, classify_os, Classification, Resolved};
pub use error::{ClassificationError, CoreError, Result};
pub use os::{Os, OS_TABLE};
pub use table::{Classified, EnumerationKind, Table, TableEntry, PROBE_HEADER_NAME};
pub use version::{project, ApiVersion};
