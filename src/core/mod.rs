//! core
//!
//! Core domain types and configuration for reflens.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Oid, RefName, RefType and the Ref value
//! - [`version`] - Dotted version comparison and the installed git's version
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing
//! - Nothing here runs git; values are built from its output by [`crate::git`]

pub mod config;
pub mod types;
pub mod version;
