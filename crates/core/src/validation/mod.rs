//! Data-quality rule engine.
//!
//! Provides typed field rules, the ordered rule registry and a pure-logic
//! evaluator that checks a tabular batch against the registry.

pub mod evaluator;
pub mod registry;
pub mod rules;

pub use registry::RuleRegistry;
pub use rules::{FieldRule, RuleKind};
