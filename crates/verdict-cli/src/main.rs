mod error;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use verdict_semver::{EvaluationOptions, VersionParser};

use error::CheckError;

#[derive(Parser, Debug)]
#[command(name = "verdict")]
#[command(about = "Check whether a version satisfies an npm-style version range")]
#[command(version)]
struct Args {
    /// Installed version to check, e.g. 1.2.3 or v1.2.3-beta.1
    #[arg(value_name = "VERSION")]
    installed_version: Option<String>,

    /// Range expression to check against, e.g. "^1.2.0" or "1.2.7 || >=1.2.9 <2.0.0"
    #[arg(value_name = "RANGE")]
    range_spec: Option<String>,

    /// Let pre-release versions satisfy ranges that do not mention a
    /// pre-release on the same version core
    #[arg(short = 'p', long = "include-prerelease")]
    include_prerelease: bool,
}

/// Parse both inputs and evaluate satisfaction
fn evaluate(version: &str, range: &str, options: &EvaluationOptions) -> Result<bool, CheckError> {
    let parser = VersionParser::new();
    let version = parser.parse(version)?;
    let range = parser.parse_range(range)?;
    log::debug!("checking {} against {}", version, range);
    Ok(range.matches_with(&version, options))
}

fn report(err: CheckError) -> i32 {
    match err {
        CheckError::Usage => eprintln!("{}", err),
        _ => eprintln!("Error: {}", err),
    }
    err.exit_code()
}

fn run() -> Result<i32> {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version go to stdout and are not failures
        Err(err) if !err.use_stderr() => {
            err.print()?;
            return Ok(0);
        }
        Err(_) => return Ok(report(CheckError::Usage)),
    };

    let (Some(version), Some(range)) =
        (args.installed_version.as_deref(), args.range_spec.as_deref())
    else {
        return Ok(report(CheckError::Usage));
    };

    let options = EvaluationOptions {
        include_prerelease: args.include_prerelease,
    };

    match evaluate(version, range, &options) {
        Ok(satisfied) => {
            println!("{}", satisfied);
            Ok(0)
        }
        Err(err) => Ok(report(err)),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_args_parsing() {
        let args = Args::try_parse_from(["verdict", "1.2.3", "^1.2"]).unwrap();
        assert_eq!(args.installed_version.as_deref(), Some("1.2.3"));
        assert_eq!(args.range_spec.as_deref(), Some("^1.2"));
        assert!(!args.include_prerelease);

        let args = Args::try_parse_from(["verdict", "-p", "1.2.3-rc.1", ">=1.0.0"]).unwrap();
        assert!(args.include_prerelease);

        let args = Args::try_parse_from(["verdict", "1.2.3", "^1.2", "--include-prerelease"])
            .unwrap();
        assert!(args.include_prerelease);

        // Missing arguments parse; run() turns them into a usage failure.
        let args = Args::try_parse_from(["verdict"]).unwrap();
        assert!(args.installed_version.is_none());
        assert!(args.range_spec.is_none());

        assert!(Args::try_parse_from(["verdict", "a", "b", "c"]).is_err());
        assert!(Args::try_parse_from(["verdict", "--bogus"]).is_err());
    }

    #[test]
    fn test_evaluate() {
        let defaults = EvaluationOptions::default();
        assert!(evaluate("1.2.3", "^1.2.0", &defaults).unwrap());
        assert!(evaluate("1.4.6", "1.2.7 || >=1.2.9 <2.0.0", &defaults).unwrap());
        assert!(!evaluate("2.0.0", "^1.2.0", &defaults).unwrap());
        assert!(!evaluate("1.3.0-beta.2", "^1.2.0", &defaults).unwrap());

        let include = EvaluationOptions {
            include_prerelease: true,
        };
        assert!(evaluate("1.3.0-beta.2", "^1.2.0", &include).unwrap());
    }

    #[test]
    fn test_evaluate_propagates_parse_failures() {
        let defaults = EvaluationOptions::default();
        assert!(matches!(
            evaluate("abc", "*", &defaults),
            Err(CheckError::Parse(_))
        ));
        assert!(matches!(
            evaluate("1.2.3", "", &defaults),
            Err(CheckError::Parse(_))
        ));
        assert_eq!(
            evaluate("1.2", "*", &defaults).unwrap_err().exit_code(),
            1
        );
    }
}
