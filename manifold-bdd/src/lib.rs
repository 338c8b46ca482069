//! BDD harness (cucumber-rs).
//!
//! This crate exists to keep scenario tests isolated from the production crates.
//! Scenarios live in `features/` and drive the `manifold` binary.

/// Name of the binary the scenarios run.
pub const BINARY: &str = "manifold";
