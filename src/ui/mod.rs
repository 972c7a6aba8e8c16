//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All terminal output goes through this module so quiet, normal and debug
//! modes behave the same in every command. Diagnostic logging is separate
//! and goes through `tracing`.

pub mod output;
