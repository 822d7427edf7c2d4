//! Version and range parsing module

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::constraint::{
    Constraint, ConstraintSet, InvalidOperatorError, Operator, RangeExpression,
};
use crate::version::{Identifier, Version};

/// Error type for version and range parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionParserError {
    #[error("Invalid version string \"{0}\"")]
    InvalidVersion(String),
    #[error("Invalid operator \"{0}\"")]
    InvalidOperator(String),
    #[error("Could not parse version range \"{range}\": {reason}")]
    RangeParseError { range: String, reason: String },
}

impl From<InvalidOperatorError> for VersionParserError {
    fn from(err: InvalidOperatorError) -> Self {
        VersionParserError::InvalidOperator(err.0)
    }
}

lazy_static! {
    /// Pre-release identifier: numeric without leading zeros, or containing
    /// at least one non-digit
    static ref PRE_IDENTIFIER: &'static str = r"(?:0|[1-9]\d*|\d*[A-Za-z-][0-9A-Za-z-]*)";

    /// Build identifier: leading zeros are allowed here
    static ref BUILD_IDENTIFIER: &'static str = r"[0-9A-Za-z-]+";

    /// Strict version: exactly three numeric components plus optional
    /// pre-release and build suffixes
    static ref VERSION_RE: Regex = Regex::new(&format!(
        r"^v?(?P<major>0|[1-9]\d*)\.(?P<minor>0|[1-9]\d*)\.(?P<patch>0|[1-9]\d*)(?:-(?P<pre>{pre}(?:\.{pre})*))?(?:\+(?P<build>{build}(?:\.{build})*))?$",
        pre = *PRE_IDENTIFIER,
        build = *BUILD_IDENTIFIER,
    )).unwrap();

    /// Range operand: components may be wildcards, trailing ones may be
    /// missing
    static ref PARTIAL_RE: Regex = Regex::new(&format!(
        r"^v?(?P<major>0|[1-9]\d*|[xX*])(?:\.(?P<minor>0|[1-9]\d*|[xX*]))?(?:\.(?P<patch>0|[1-9]\d*|[xX*]))?(?:-(?P<pre>{pre}(?:\.{pre})*))?(?:\+(?P<build>{build}(?:\.{build})*))?$",
        pre = *PRE_IDENTIFIER,
        build = *BUILD_IDENTIFIER,
    )).unwrap();

    /// OR splitter between comparator-set alternatives
    static ref OR_SPLIT_RE: Regex = Regex::new(r"\s*\|\|\s*").unwrap();

    /// Joins an operator to its operand across whitespace before
    /// tokenization, so `>= 1.2.0` reads as `>=1.2.0`
    static ref OPERATOR_TRIM_RE: Regex = Regex::new(r"([<>]=?|=|~>?|\^)\s+").unwrap();
}

/// A range operand with possibly missing or wildcard components
#[derive(Debug, Clone, PartialEq, Eq)]
struct PartialVersion {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: Vec<Identifier>,
    build: Vec<String>,
}

impl PartialVersion {
    fn is_full(&self) -> bool {
        self.major.is_some() && self.minor.is_some() && self.patch.is_some()
    }

    /// Concrete version with missing components filled with zeros
    fn to_zeros(&self) -> Version {
        Version {
            major: self.major.unwrap_or(0),
            minor: self.minor.unwrap_or(0),
            patch: self.patch.unwrap_or(0),
            pre: self.pre.clone(),
            build: self.build.clone(),
        }
    }
}

fn gte(version: Version) -> Constraint {
    Constraint::new(Operator::GreaterThanOrEqual, version)
}

fn lt(version: Version) -> Constraint {
    Constraint::new(Operator::LessThan, version)
}

/// Exclusive upper bound at the lowest pre-release of the given core, so
/// pre-releases of the boundary itself stay out of the range
fn upper_floor(major: u64, minor: u64, patch: u64) -> Constraint {
    let mut version = Version::new(major, minor, patch);
    version.pre.push(Identifier::Numeric(0));
    lt(version)
}

fn bump(component: u64, token: &str) -> Result<u64, VersionParserError> {
    component
        .checked_add(1)
        .ok_or_else(|| VersionParserError::RangeParseError {
            range: token.to_string(),
            reason: "numeric component overflow".to_string(),
        })
}

/// Parser for version strings and range expressions
pub struct VersionParser;

impl VersionParser {
    pub fn new() -> Self {
        VersionParser
    }

    /// Parse a complete version string.
    ///
    /// Accepts an optional leading `v` and surrounding whitespace. Requires
    /// exactly three dot-separated numeric components without leading
    /// zeros; pre-release and build suffixes follow the usual `-`/`+`
    /// syntax.
    pub fn parse(&self, version: &str) -> Result<Version, VersionParserError> {
        let trimmed = version.trim();
        let caps = VERSION_RE
            .captures(trimmed)
            .ok_or_else(|| VersionParserError::InvalidVersion(version.to_string()))?;

        Ok(Version {
            major: parse_component(&caps["major"], version)?,
            minor: parse_component(&caps["minor"], version)?,
            patch: parse_component(&caps["patch"], version)?,
            pre: match caps.name("pre") {
                Some(pre) => parse_pre_identifiers(pre.as_str(), version)?,
                None => Vec::new(),
            },
            build: match caps.name("build") {
                Some(build) => build.as_str().split('.').map(str::to_string).collect(),
                None => Vec::new(),
            },
        })
    }

    /// Parse a range expression.
    ///
    /// Alternatives are separated by `||`, comparators within an
    /// alternative by whitespace. Comparators are operators applied to full
    /// or partial versions, hyphen ranges, caret and tilde shorthands, and
    /// wildcards; partial versions expand to the window they denote.
    pub fn parse_range(&self, range: &str) -> Result<RangeExpression, VersionParserError> {
        let trimmed = range.trim();
        if trimmed.is_empty() {
            return Err(VersionParserError::RangeParseError {
                range: range.to_string(),
                reason: "empty range".to_string(),
            });
        }

        let mut alternatives = Vec::new();
        for alternative in OR_SPLIT_RE.split(trimmed) {
            if alternative.is_empty() {
                return Err(VersionParserError::RangeParseError {
                    range: range.to_string(),
                    reason: "empty alternative".to_string(),
                });
            }
            alternatives.push(self.parse_constraint_set(alternative)?);
        }

        Ok(RangeExpression::new(alternatives))
    }

    fn parse_constraint_set(&self, alternative: &str) -> Result<ConstraintSet, VersionParserError> {
        let glued = OPERATOR_TRIM_RE.replace_all(alternative, "$1");
        let tokens: Vec<&str> = glued.split_whitespace().collect();

        let mut constraints = Vec::new();

        // The hyphen form `A - B` is anchored: it must make up the whole
        // alternative.
        if let Some(position) = tokens.iter().position(|token| *token == "-") {
            if tokens.len() != 3 || position != 1 {
                return Err(VersionParserError::RangeParseError {
                    range: alternative.to_string(),
                    reason: "hyphen range must span the whole alternative".to_string(),
                });
            }
            let from = self.parse_partial(tokens[0], tokens[0])?;
            let to = self.parse_partial(tokens[2], tokens[2])?;
            self.expand_hyphen(&from, &to, tokens[2], &mut constraints)?;
            return Ok(ConstraintSet::new(constraints));
        }

        for token in &tokens {
            self.parse_comparator_token(token, &mut constraints)?;
        }

        Ok(ConstraintSet::new(constraints))
    }

    fn parse_comparator_token(
        &self,
        token: &str,
        out: &mut Vec<Constraint>,
    ) -> Result<(), VersionParserError> {
        if let Some(rest) = token.strip_prefix('~') {
            // ~> is a historical alias for tilde
            let rest = rest.strip_prefix('>').unwrap_or(rest);
            let partial = self.parse_partial(rest, token)?;
            return self.expand_tilde(&partial, token, out);
        }
        if let Some(rest) = token.strip_prefix('^') {
            let partial = self.parse_partial(rest, token)?;
            return self.expand_caret(&partial, token, out);
        }

        let operand_start = token
            .find(|c: char| !matches!(c, '<' | '>' | '=' | '!' | '~' | '^'))
            .unwrap_or(token.len());
        let (op_text, operand) = token.split_at(operand_start);
        let operator = Operator::from_str(op_text)?;
        if operand.is_empty() {
            return Err(VersionParserError::InvalidVersion(token.to_string()));
        }
        let partial = self.parse_partial(operand, token)?;

        match operator {
            Operator::Equal => self.expand_x_range(&partial, token, out),
            op if partial.is_full() => {
                out.push(Constraint::new(op, partial.to_zeros()));
                Ok(())
            }
            Operator::GreaterThan => {
                // The next version boundary is the real lower bound
                let Some(major) = partial.major else {
                    out.push(Constraint::match_none());
                    return Ok(());
                };
                let bound = match partial.minor {
                    None => Version::new(bump(major, token)?, 0, 0),
                    Some(minor) => Version::new(major, bump(minor, token)?, 0),
                };
                out.push(gte(bound));
                Ok(())
            }
            Operator::GreaterThanOrEqual => {
                // A bare wildcard imposes no lower bound
                if partial.major.is_some() {
                    out.push(gte(partial.to_zeros()));
                }
                Ok(())
            }
            Operator::LessThan => {
                if partial.major.is_none() {
                    out.push(Constraint::match_none());
                    return Ok(());
                }
                let zeros = partial.to_zeros();
                out.push(upper_floor(zeros.major, zeros.minor, zeros.patch));
                Ok(())
            }
            Operator::LessThanOrEqual => {
                // Any version within the denoted window passes
                let Some(major) = partial.major else {
                    return Ok(());
                };
                match partial.minor {
                    None => out.push(upper_floor(bump(major, token)?, 0, 0)),
                    Some(minor) => out.push(upper_floor(major, bump(minor, token)?, 0)),
                }
                Ok(())
            }
        }
    }

    /// Bare or `=` operand: full versions match exactly, partial versions
    /// expand to their window, wildcards match everything
    fn expand_x_range(
        &self,
        partial: &PartialVersion,
        token: &str,
        out: &mut Vec<Constraint>,
    ) -> Result<(), VersionParserError> {
        if partial.is_full() {
            out.push(Constraint::new(Operator::Equal, partial.to_zeros()));
            return Ok(());
        }
        let Some(major) = partial.major else {
            return Ok(());
        };
        match partial.minor {
            None => {
                out.push(gte(Version::new(major, 0, 0)));
                out.push(upper_floor(bump(major, token)?, 0, 0));
            }
            Some(minor) => {
                out.push(gte(Version::new(major, minor, 0)));
                out.push(upper_floor(major, bump(minor, token)?, 0));
            }
        }
        Ok(())
    }

    /// Caret: no change to the leftmost non-zero component
    fn expand_caret(
        &self,
        partial: &PartialVersion,
        token: &str,
        out: &mut Vec<Constraint>,
    ) -> Result<(), VersionParserError> {
        let Some(major) = partial.major else {
            return Ok(());
        };
        match (partial.minor, partial.patch) {
            (None, _) => {
                out.push(gte(Version::new(major, 0, 0)));
                out.push(upper_floor(bump(major, token)?, 0, 0));
            }
            (Some(minor), None) => {
                out.push(gte(Version::new(major, minor, 0)));
                if major == 0 {
                    out.push(upper_floor(0, bump(minor, token)?, 0));
                } else {
                    out.push(upper_floor(bump(major, token)?, 0, 0));
                }
            }
            (Some(minor), Some(patch)) => {
                out.push(gte(partial.to_zeros()));
                if major > 0 {
                    out.push(upper_floor(bump(major, token)?, 0, 0));
                } else if minor > 0 {
                    out.push(upper_floor(0, bump(minor, token)?, 0));
                } else {
                    out.push(upper_floor(0, 0, bump(patch, token)?));
                }
            }
        }
        Ok(())
    }

    /// Tilde: patch-level changes, or minor-level when no minor is given
    fn expand_tilde(
        &self,
        partial: &PartialVersion,
        token: &str,
        out: &mut Vec<Constraint>,
    ) -> Result<(), VersionParserError> {
        let Some(major) = partial.major else {
            return Ok(());
        };
        match partial.minor {
            None => {
                out.push(gte(Version::new(major, 0, 0)));
                out.push(upper_floor(bump(major, token)?, 0, 0));
            }
            Some(minor) => {
                out.push(gte(partial.to_zeros()));
                out.push(upper_floor(major, bump(minor, token)?, 0));
            }
        }
        Ok(())
    }

    /// Hyphen range `A - B`: inclusive on full ends, widened to the next
    /// boundary on partial ends, open on wildcard ends
    fn expand_hyphen(
        &self,
        from: &PartialVersion,
        to: &PartialVersion,
        to_token: &str,
        out: &mut Vec<Constraint>,
    ) -> Result<(), VersionParserError> {
        if from.major.is_some() {
            out.push(gte(from.to_zeros()));
        }
        let Some(major) = to.major else {
            return Ok(());
        };
        match (to.minor, to.patch) {
            (None, _) => out.push(upper_floor(bump(major, to_token)?, 0, 0)),
            (Some(minor), None) => out.push(upper_floor(major, bump(minor, to_token)?, 0)),
            (Some(_), Some(_)) => out.push(Constraint::new(Operator::LessThanOrEqual, to.to_zeros())),
        }
        Ok(())
    }

    fn parse_partial(
        &self,
        operand: &str,
        token: &str,
    ) -> Result<PartialVersion, VersionParserError> {
        let caps = PARTIAL_RE
            .captures(operand)
            .ok_or_else(|| VersionParserError::InvalidVersion(token.to_string()))?;

        let major = parse_partial_component(caps.name("major"), token)?;
        let minor = match major {
            Some(_) => parse_partial_component(caps.name("minor"), token)?,
            // Components after a wildcard carry no information
            None => None,
        };
        let patch = match minor {
            Some(_) => parse_partial_component(caps.name("patch"), token)?,
            None => None,
        };

        let pre = match caps.name("pre") {
            Some(pre) => parse_pre_identifiers(pre.as_str(), token)?,
            None => Vec::new(),
        };
        let build: Vec<String> = match caps.name("build") {
            Some(build) => build.as_str().split('.').map(str::to_string).collect(),
            None => Vec::new(),
        };

        // Suffixes only make sense on a fully specified version
        if (!pre.is_empty() || !build.is_empty())
            && (major.is_none() || minor.is_none() || patch.is_none())
        {
            return Err(VersionParserError::InvalidVersion(token.to_string()));
        }

        Ok(PartialVersion {
            major,
            minor,
            patch,
            pre,
            build,
        })
    }
}

impl Default for VersionParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_component(text: &str, original: &str) -> Result<u64, VersionParserError> {
    text.parse::<u64>()
        .map_err(|_| VersionParserError::InvalidVersion(original.to_string()))
}

fn parse_partial_component(
    component: Option<regex::Match<'_>>,
    original: &str,
) -> Result<Option<u64>, VersionParserError> {
    match component {
        None => Ok(None),
        Some(m) if matches!(m.as_str(), "x" | "X" | "*") => Ok(None),
        Some(m) => parse_component(m.as_str(), original).map(Some),
    }
}

fn parse_pre_identifiers(text: &str, original: &str) -> Result<Vec<Identifier>, VersionParserError> {
    text.split('.')
        .map(|id| {
            if id.bytes().all(|b| b.is_ascii_digit()) {
                id.parse::<u64>()
                    .map(Identifier::Numeric)
                    .map_err(|_| VersionParserError::InvalidVersion(original.to_string()))
            } else {
                Ok(Identifier::AlphaNumeric(id.to_string()))
            }
        })
        .collect()
}
