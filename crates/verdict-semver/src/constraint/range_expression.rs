//! Disjunctive range expression

use std::fmt;
use std::str::FromStr;

use crate::constraint::ConstraintSet;
use crate::version::Version;
use crate::version_parser::{VersionParser, VersionParserError};

/// Options controlling range evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvaluationOptions {
    /// Lift the pre-release exclusion rule
    pub include_prerelease: bool,
}

/// One or more constraint-set alternatives combined with OR.
///
/// The parser never produces an empty alternative list, so `matches` is
/// true iff at least one alternative is fully satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeExpression {
    alternatives: Vec<ConstraintSet>,
}

impl RangeExpression {
    pub fn new(alternatives: Vec<ConstraintSet>) -> Self {
        RangeExpression { alternatives }
    }

    /// Parse a range expression string
    pub fn parse(text: &str) -> Result<Self, VersionParserError> {
        VersionParser::new().parse_range(text)
    }

    pub fn alternatives(&self) -> &[ConstraintSet] {
        &self.alternatives
    }

    /// Check a version against the range with default options
    pub fn matches(&self, version: &Version) -> bool {
        self.matches_with(version, &EvaluationOptions::default())
    }

    /// Check a version against the range
    pub fn matches_with(&self, version: &Version, options: &EvaluationOptions) -> bool {
        self.alternatives
            .iter()
            .any(|set| set.matches(version, options.include_prerelease))
    }
}

impl FromStr for RangeExpression {
    type Err = VersionParserError;

    fn from_str(s: &str) -> Result<RangeExpression, VersionParserError> {
        RangeExpression::parse(s)
    }
}

impl fmt::Display for RangeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, set) in self.alternatives.iter().enumerate() {
            if i > 0 {
                f.write_str(" || ")?;
            }
            write!(f, "{}", set)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{Constraint, Operator};

    fn v(text: &str) -> Version {
        Version::parse(text).unwrap()
    }

    fn window(low: &str, high: &str) -> ConstraintSet {
        ConstraintSet::new(vec![
            Constraint::new(Operator::GreaterThanOrEqual, v(low)),
            Constraint::new(Operator::LessThan, v(high)),
        ])
    }

    #[test]
    fn test_or_of_alternatives() {
        // The desugared form of `1.x || 2.x`.
        let range = RangeExpression::new(vec![
            window("1.0.0", "2.0.0-0"),
            window("2.0.0", "3.0.0-0"),
        ]);
        assert!(range.matches(&v("1.4.7")));
        assert!(range.matches(&v("2.0.0")));
        assert!(!range.matches(&v("3.0.0")));
        assert!(!range.matches(&v("0.9.9")));
    }

    #[test]
    fn test_prerelease_rule_is_per_alternative() {
        // The desugared form of `>=1.2.3-alpha <2.0.0 || 3.0.0`.
        let range = RangeExpression::new(vec![
            ConstraintSet::new(vec![
                Constraint::new(Operator::GreaterThanOrEqual, v("1.2.3-alpha")),
                Constraint::new(Operator::LessThan, v("2.0.0")),
            ]),
            ConstraintSet::new(vec![Constraint::new(Operator::Equal, v("3.0.0"))]),
        ]);
        assert!(range.matches(&v("1.2.3-beta")));
        assert!(!range.matches(&v("1.4.0-beta")));
        assert!(range.matches(&v("3.0.0")));
    }

    #[test]
    fn test_matches_with_options() {
        let range = RangeExpression::new(vec![window("1.0.0", "2.0.0-0")]);
        let include = EvaluationOptions {
            include_prerelease: true,
        };
        assert!(!range.matches(&v("1.5.0-rc.1")));
        assert!(range.matches_with(&v("1.5.0-rc.1"), &include));
        assert!(!range.matches_with(&v("2.1.0-rc.1"), &include));
    }

    #[test]
    fn test_display() {
        let range = RangeExpression::new(vec![
            window("1.0.0", "2.0.0-0"),
            ConstraintSet::default(),
        ]);
        assert_eq!(range.to_string(), ">=1.0.0 <2.0.0-0 || *");
    }

    #[test]
    fn test_from_str_roundtrip() {
        let range: RangeExpression = ">=1.2.0 <2.0.0".parse().unwrap();
        assert!(range.matches(&v("1.2.5")));
        assert!("not a range".parse::<RangeExpression>().is_err());
    }
}
