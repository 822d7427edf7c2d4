//! Constraint types for version matching

pub mod constraint;
mod constraint_set;
mod operator;
mod range_expression;

pub use constraint::Constraint;
pub use constraint_set::ConstraintSet;
pub use operator::{InvalidOperatorError, Operator};
pub use range_expression::{EvaluationOptions, RangeExpression};
