//! High-level operations that correspond to CLI commands
//!
//! These hold the session logic for plan and apply runs, separated from CLI
//! concerns like argument parsing, prompting and output formatting.

pub mod rename;

pub use rename::rename_operation;
