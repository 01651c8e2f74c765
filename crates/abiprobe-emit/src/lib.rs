//! Rust source emission for abiprobe.
//!
//! - [`render`] turns a [`ModuleSpec`](abiprobe_core::ModuleSpec) into the text
//!   of a Rust source file with one module per API version
//! - [`write`] puts that text on disk, leaving the file untouched when the
//!   content is unchanged

pub mod error;
pub mod render;
pub mod write;

pub use error::{EmitError, Result};
pub use render::render;
pub use write::{write, WriteOutcome};
