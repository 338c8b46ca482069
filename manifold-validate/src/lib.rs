//! Validation rule engine: run per-platform rule sets against a canonical manifest.
//!
//! Rules are injected through a [`RuleCatalog`]; the engine never discovers rule modules itself.
//! Findings are data. The engine only fails when the input is not a usable canonical manifest or
//! a requested platform has no registered rule set.

mod catalog;
mod engine;
mod error;
mod rule;
pub mod rules;

pub use catalog::{RuleCatalog, RuleCatalogBuilder, RuleSummary};
pub use engine::validate_manifest;
pub use error::ValidationError;
pub use rule::ValidationRule;

/// Platform id of the common rule set.
pub const COMMON_RULES: &str = "all";
