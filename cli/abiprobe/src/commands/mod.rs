//! CLI command implementations.

pub mod classify;
pub mod doctor;
pub mod generate;
pub mod table;
