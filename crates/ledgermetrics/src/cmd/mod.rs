//! Command implementations.
//!
//! Each module holds the full implementation of a command, invoked by a thin
//! wrapper binary.

pub mod export;
