//! High-level version checks built on the parser

use crate::constraint::{EvaluationOptions, RangeExpression};
use crate::version::Version;
use crate::version_parser::{VersionParser, VersionParserError};

/// Facade bundling the common version and range operations
pub struct Semver;

impl Semver {
    /// Check whether a version satisfies a range expression.
    pub fn satisfies(version: &str, range: &str) -> Result<bool, VersionParserError> {
        Self::satisfies_with(version, range, &EvaluationOptions::default())
    }

    /// Check whether a version satisfies a range expression with explicit
    /// evaluation options.
    pub fn satisfies_with(
        version: &str,
        range: &str,
        options: &EvaluationOptions,
    ) -> Result<bool, VersionParserError> {
        let parser = VersionParser::new();
        let version = parser.parse(version)?;
        let range = parser.parse_range(range)?;
        Ok(range.matches_with(&version, options))
    }

    /// Parse a range expression once for repeated checks.
    pub fn parse_range(range: &str) -> Result<RangeExpression, VersionParserError> {
        VersionParser::new().parse_range(range)
    }

    /// Check a version against an already parsed range. A version that does
    /// not parse satisfies nothing.
    pub fn satisfies_parsed(version: &str, range: &RangeExpression) -> bool {
        match VersionParser::new().parse(version) {
            Ok(version) => range.matches(&version),
            Err(_) => false,
        }
    }

    /// Filter versions down to the ones satisfying the range, preserving
    /// the input order. Versions that do not parse are skipped.
    pub fn satisfied_by(versions: &[&str], range: &str) -> Result<Vec<String>, VersionParserError> {
        let range = Self::parse_range(range)?;
        Ok(versions
            .iter()
            .filter(|version| Self::satisfies_parsed(version, &range))
            .map(|version| version.to_string())
            .collect())
    }

    /// Highest version satisfying the range, if any. The returned string is
    /// the original input, not a normalized form.
    pub fn max_satisfying(
        versions: &[&str],
        range: &str,
    ) -> Result<Option<String>, VersionParserError> {
        let parser = VersionParser::new();
        let range = parser.parse_range(range)?;

        let mut best: Option<(Version, &str)> = None;
        for &text in versions {
            let Ok(version) = parser.parse(text) else {
                continue;
            };
            if !range.matches(&version) {
                continue;
            }
            let better = match &best {
                Some((max, _)) => version > *max,
                None => true,
            };
            if better {
                best = Some((version, text));
            }
        }
        Ok(best.map(|(_, text)| text.to_string()))
    }

    /// Sort versions in ascending precedence order
    pub fn sort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, true)
    }

    /// Sort versions in descending precedence order (reverse sort)
    pub fn rsort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, false)
    }

    fn usort(versions: &[&str], ascending: bool) -> Vec<String> {
        let parser = VersionParser::new();

        // Pair each parseable version with its original spelling
        let mut parsed: Vec<(Version, &str)> = versions
            .iter()
            .filter_map(|text| parser.parse(text).ok().map(|version| (version, *text)))
            .collect();

        parsed.sort_by(|(a, _), (b, _)| {
            let cmp = a.cmp(b);
            if ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });

        parsed
            .into_iter()
            .map(|(_, text)| text.to_string())
            .collect()
    }
}
