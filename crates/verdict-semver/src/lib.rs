//! Semantic versioning library compatible with npm-style version ranges
//!
//! This crate provides semantic version parsing, precedence comparison, and
//! range matching compatible with the version ranges used by the npm package
//! manager.

pub mod constraint;
mod comparator;
mod semver;
mod version;
mod version_parser;

pub use comparator::Comparator;
pub use constraint::{Constraint, ConstraintSet, EvaluationOptions, InvalidOperatorError, Operator, RangeExpression};
pub use semver::Semver;
pub use version::{Identifier, Version};
pub use version_parser::{VersionParser, VersionParserError};
