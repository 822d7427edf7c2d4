use thiserror::Error;

use verdict_semver::VersionParserError;

/// Terminal failures of a check invocation, mapped onto the exit codes the
/// calling process relies on
#[derive(Error, Debug)]
pub enum CheckError {
    // Invocation errors
    #[error("Usage: verdict <installed_version> <range_spec>")]
    Usage,

    // Input errors
    #[error(transparent)]
    Parse(#[from] VersionParserError),

    // Exit code 2 stays reserved for a missing comparison capability; the
    // evaluator is compiled in, so nothing constructs this today
    #[allow(dead_code)]
    #[error("semantic version comparison support is unavailable: {0}")]
    Environment(String),
}

impl CheckError {
    /// Process exit code reported for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckError::Usage | CheckError::Parse(_) => 1,
            CheckError::Environment(_) => 2,
        }
    }
}
