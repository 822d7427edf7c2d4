//! Operator types for version constraints

use std::fmt;
use thiserror::Error;

/// Comparison operators for version constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal (=), implied when a comparator has no operator
    Equal,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanOrEqual,
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
}

#[derive(Error, Debug)]
#[error("Invalid operator: {0}")]
pub struct InvalidOperatorError(pub String);

impl Operator {
    /// Parse operator from string; the empty string is an implicit equal
    pub fn from_str(s: &str) -> Result<Self, InvalidOperatorError> {
        match s {
            "" | "=" => Ok(Operator::Equal),
            "<" => Ok(Operator::LessThan),
            "<=" => Ok(Operator::LessThanOrEqual),
            ">" => Ok(Operator::GreaterThan),
            ">=" => Ok(Operator::GreaterThanOrEqual),
            _ => Err(InvalidOperatorError(s.to_string())),
        }
    }

    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
        }
    }

    /// Get all supported operators
    pub fn supported_operators() -> &'static [&'static str] {
        &["=", "<", "<=", ">", ">="]
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Operator::from_str("").unwrap(), Operator::Equal);
        assert_eq!(Operator::from_str("=").unwrap(), Operator::Equal);
        assert_eq!(Operator::from_str("<").unwrap(), Operator::LessThan);
        assert_eq!(Operator::from_str("<=").unwrap(), Operator::LessThanOrEqual);
        assert_eq!(Operator::from_str(">").unwrap(), Operator::GreaterThan);
        assert_eq!(Operator::from_str(">=").unwrap(), Operator::GreaterThanOrEqual);
    }

    #[test]
    fn test_from_str_invalid() {
        for bad in ["==", "!=", "<>", "=>", "=<", "~", "^", ">>"] {
            assert!(Operator::from_str(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Operator::GreaterThanOrEqual.to_string(), ">=");
        assert_eq!(Operator::Equal.to_string(), "=");
    }
}
