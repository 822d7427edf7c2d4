//! Single version constraint

use std::fmt;

use crate::comparator::Comparator;
use crate::constraint::Operator;
use crate::version::{Identifier, Version};

/// A single comparator: an operator paired with a version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    operator: Operator,
    version: Version,
}

impl Constraint {
    pub fn new(operator: Operator, version: Version) -> Self {
        Constraint { operator, version }
    }

    /// The comparator no version can satisfy, the desugared form of
    /// degenerate inputs like `>*`. Nothing orders below `0.0.0-0`.
    pub fn match_none() -> Self {
        let mut floor = Version::new(0, 0, 0);
        floor.pre.push(Identifier::Numeric(0));
        Constraint::new(Operator::LessThan, floor)
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Evaluate the constraint against a concrete version
    pub fn matches(&self, version: &Version) -> bool {
        match self.operator {
            Operator::Equal => Comparator::equal_to(version, &self.version),
            Operator::LessThan => Comparator::less_than(version, &self.version),
            Operator::LessThanOrEqual => Comparator::less_than_or_equal_to(version, &self.version),
            Operator::GreaterThan => Comparator::greater_than(version, &self.version),
            Operator::GreaterThanOrEqual => {
                Comparator::greater_than_or_equal_to(version, &self.version)
            }
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operator {
            Operator::Equal => write!(f, "{}", self.version),
            op => write!(f, "{}{}", op, self.version),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> Version {
        Version::parse(text).unwrap()
    }

    fn c(operator: Operator, version: &str) -> Constraint {
        Constraint::new(operator, v(version))
    }

    #[test]
    fn test_matches_equal() {
        let exact = c(Operator::Equal, "1.2.3");
        assert!(exact.matches(&v("1.2.3")));
        assert!(exact.matches(&v("1.2.3+build.7")));
        assert!(!exact.matches(&v("1.2.4")));
        assert!(!exact.matches(&v("1.2.3-rc.1")));
    }

    #[test]
    fn test_matches_less_than() {
        let upper = c(Operator::LessThan, "2.0.0");
        assert!(upper.matches(&v("1.9.9")));
        assert!(!upper.matches(&v("2.0.0")));
        assert!(!upper.matches(&v("2.0.1")));
        // A pre-release of the bound itself orders below the bound.
        assert!(upper.matches(&v("2.0.0-rc.1")));
    }

    #[test]
    fn test_matches_less_than_or_equal() {
        let upper = c(Operator::LessThanOrEqual, "2.0.0");
        assert!(upper.matches(&v("2.0.0")));
        assert!(upper.matches(&v("1.0.0")));
        assert!(!upper.matches(&v("2.0.1")));
    }

    #[test]
    fn test_matches_greater_than() {
        let lower = c(Operator::GreaterThan, "1.2.3");
        assert!(lower.matches(&v("1.2.4")));
        assert!(!lower.matches(&v("1.2.3")));
        assert!(!lower.matches(&v("1.2.3-alpha")));
        assert!(lower.matches(&v("2.0.0-alpha")));
    }

    #[test]
    fn test_matches_greater_than_or_equal() {
        let lower = c(Operator::GreaterThanOrEqual, "1.2.3-beta.2");
        assert!(lower.matches(&v("1.2.3-beta.2")));
        assert!(lower.matches(&v("1.2.3-beta.4")));
        assert!(lower.matches(&v("1.2.3")));
        assert!(!lower.matches(&v("1.2.3-alpha")));
    }

    #[test]
    fn test_match_none() {
        let none = Constraint::match_none();
        for text in ["0.0.0-0", "0.0.0", "0.0.1", "99.99.99", "1.0.0-alpha"] {
            assert!(!none.matches(&v(text)), "matched {}", text);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(c(Operator::Equal, "1.2.3").to_string(), "1.2.3");
        assert_eq!(c(Operator::GreaterThanOrEqual, "1.2.0").to_string(), ">=1.2.0");
        assert_eq!(Constraint::match_none().to_string(), "<0.0.0-0");
    }
}
