//! vs_rules: the fixed, ordered catalogue of ballot rules.
//!
//! Each rule is a variant of [`RuleId`] carrying a stable key, a severity,
//! static message/suggestion texts, and a pure predicate over an immutable
//! ballot snapshot (`true` = the problem is present). Evaluation order is
//! [`CATALOGUE`] order; reports depend on it.

#![forbid(unsafe_code)]

pub mod catalogue;
pub mod params;
pub mod predicates;

pub use catalogue::{RuleId, Severity, CATALOGUE};
pub use params::{validate_domains, ParamError, RuleParams};
