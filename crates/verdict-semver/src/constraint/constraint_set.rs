//! Conjunctive constraint set

use std::fmt;

use crate::constraint::Constraint;
use crate::version::Version;

/// A conjunction of constraints; a version must satisfy every one.
///
/// The empty set is the desugared form of `*` and matches every release
/// version.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    pub fn new(constraints: Vec<Constraint>) -> Self {
        ConstraintSet { constraints }
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Evaluate the set against a version.
    ///
    /// A version carrying a pre-release sequence additionally needs one of
    /// the constraints to target the same major.minor.patch core with a
    /// pre-release of its own, unless `include_prerelease` lifts that
    /// restriction.
    pub fn matches(&self, version: &Version, include_prerelease: bool) -> bool {
        if !self.constraints.iter().all(|c| c.matches(version)) {
            return false;
        }
        if version.is_prerelease() && !include_prerelease {
            return self.allows_prerelease_of(version);
        }
        true
    }

    fn allows_prerelease_of(&self, version: &Version) -> bool {
        self.constraints
            .iter()
            .any(|c| c.version().is_prerelease() && c.version().same_core(version))
    }
}

impl fmt::Display for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.constraints.is_empty() {
            return f.write_str("*");
        }
        for (i, constraint) in self.constraints.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", constraint)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Operator;

    fn v(text: &str) -> Version {
        Version::parse(text).unwrap()
    }

    fn set(pairs: &[(Operator, &str)]) -> ConstraintSet {
        ConstraintSet::new(
            pairs
                .iter()
                .map(|(op, version)| Constraint::new(*op, v(version)))
                .collect(),
        )
    }

    #[test]
    fn test_conjunction() {
        let window = set(&[
            (Operator::GreaterThanOrEqual, "1.2.0"),
            (Operator::LessThan, "2.0.0"),
        ]);
        assert!(window.matches(&v("1.2.0"), false));
        assert!(window.matches(&v("1.9.9"), false));
        assert!(!window.matches(&v("1.1.9"), false));
        assert!(!window.matches(&v("2.0.0"), false));
    }

    #[test]
    fn test_empty_set_matches_releases() {
        let any = ConstraintSet::default();
        assert!(any.matches(&v("0.0.0"), false));
        assert!(any.matches(&v("99.1.7"), false));
        // No constraint targets a pre-release series, so none qualify.
        assert!(!any.matches(&v("1.0.0-alpha"), false));
        assert!(any.matches(&v("1.0.0-alpha"), true));
    }

    #[test]
    fn test_prerelease_needs_same_core_constraint() {
        let window = set(&[
            (Operator::GreaterThanOrEqual, "1.2.3-alpha"),
            (Operator::LessThan, "2.0.0"),
        ]);
        assert!(window.matches(&v("1.2.3-alpha.7"), false));
        assert!(window.matches(&v("1.2.3"), false));
        // In range but on a core no constraint targets with a pre-release.
        assert!(!window.matches(&v("1.5.0-beta"), false));
        assert!(window.matches(&v("1.5.0-beta"), true));
    }

    #[test]
    fn test_prerelease_floor_on_upper_bound() {
        // The desugared form of `~1.2.3`.
        let tilde = set(&[
            (Operator::GreaterThanOrEqual, "1.2.3"),
            (Operator::LessThan, "1.3.0-0"),
        ]);
        assert!(tilde.matches(&v("1.2.9"), false));
        // The floor keeps pre-releases of the boundary core out even with
        // the restriction lifted.
        assert!(!tilde.matches(&v("1.3.0-alpha"), true));
        // It never admits pre-releases on other cores by itself.
        assert!(!tilde.matches(&v("1.2.9-beta"), false));
    }

    #[test]
    fn test_display() {
        let window = set(&[
            (Operator::GreaterThanOrEqual, "1.2.0"),
            (Operator::LessThan, "2.0.0"),
        ]);
        assert_eq!(window.to_string(), ">=1.2.0 <2.0.0");
        assert_eq!(ConstraintSet::default().to_string(), "*");
        assert_eq!(set(&[(Operator::Equal, "1.2.3")]).to_string(), "1.2.3");
    }
}
