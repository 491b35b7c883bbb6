//! Command implementations for the CLI.

/// Scan, review and encode: the whole discrip run.
pub mod rip;
