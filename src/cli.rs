//! Command-line interface for fortran-linter.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgGroup, Command};

/// What to do with each checked file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Print diagnostics only (default)
    Diagnostics,
    /// Print the corrected text
    Stdout,
    /// Keep the source as `<file>.orig` and write the corrected text in its place
    InPlace,
}

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Files or directories to check
    pub inputs: Vec<PathBuf>,

    pub mode: OutputMode,

    /// Maximum line length
    pub line_length: Option<usize>,

    /// Number of spaces per indent level
    pub indent: Option<usize>,

    /// Disable indentation
    pub no_indent: bool,

    /// Config file path (disables discovery)
    pub config: Option<PathBuf>,

    /// Diagnostics printed per file; `None` prints all
    pub max_errors: Option<usize>,

    /// Exclude patterns for files/directories (glob patterns)
    pub exclude: Vec<String>,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    pub jobs: Option<usize>,

    pub verbose: bool,

    /// Enable debug output
    pub debug: bool,
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("fortran-linter")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Style checker and auto-fixer for modern Fortran code")
        .arg(
            Arg::new("inputs")
                .help("Input file(s) or directories")
                .value_name("FILE")
                .num_args(1..)
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("inplace")
                .short('i')
                .long("inplace")
                .help("Correct the errors inplace (original kept as <file>.orig)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stdout")
                .long("stdout")
                .help("Print the corrected file to stdout")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("syntax-only")
                .long("syntax-only")
                .visible_alias("fsyntax-only")
                .help("Print syntax errors to stdout (default)")
                .action(ArgAction::SetTrue),
        )
        .group(
            ArgGroup::new("mode")
                .args(["inplace", "stdout", "syntax-only"])
                .multiple(false),
        )
        .arg(
            Arg::new("linelength")
                .long("linelength")
                .help("Line length [default: 120]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("indent")
                .long("indent")
                .help("Number of spaces per indent level [default: 2]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("no-indent")
                .long("no-indent")
                .help("Keep the existing indentation")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Read settings from this TOML file instead of searching for fortran-linter.toml")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("max-errors")
                .long("max-errors")
                .help("Maximum number of errors to report per file, -1 for all [default: -1]")
                .value_name("NUM")
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .help("Exclude files or directories matching this glob (repeatable)")
                .value_name("GLOB")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Number of parallel jobs (0 = all cores)")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Be verbose")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
}

/// Parse command line arguments
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    let mode = if matches.get_flag("inplace") {
        OutputMode::InPlace
    } else if matches.get_flag("stdout") {
        OutputMode::Stdout
    } else {
        OutputMode::Diagnostics
    };

    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        mode,
        line_length: matches.get_one::<usize>("linelength").copied(),
        indent: matches.get_one::<usize>("indent").copied(),
        no_indent: matches.get_flag("no-indent"),
        config: matches.get_one::<PathBuf>("config").cloned(),
        max_errors: matches
            .get_one::<i64>("max-errors")
            .and_then(|&n| usize::try_from(n).ok())
            .filter(|&n| n > 0),
        exclude: matches
            .get_many::<String>("exclude")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        jobs: matches.get_one::<usize>("jobs").copied(),
        verbose: matches.get_flag("verbose"),
        debug: matches.get_flag("debug"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_builds() {
        let cmd = build_cli();
        assert_eq!(cmd.get_name(), "fortran-linter");
        cmd.debug_assert();
    }

    #[test]
    fn test_inputs_required() {
        assert!(build_cli()
            .try_get_matches_from(vec!["fortran-linter"])
            .is_err());
    }

    #[test]
    fn test_defaults() {
        let args = parse_args_from(vec!["fortran-linter", "file.f90"]);
        assert_eq!(args.inputs, vec![PathBuf::from("file.f90")]);
        assert_eq!(args.mode, OutputMode::Diagnostics);
        assert_eq!(args.line_length, None);
        assert_eq!(args.indent, None);
        assert_eq!(args.max_errors, None);
        assert!(!args.no_indent);
        assert!(!args.verbose);
        assert!(args.exclude.is_empty());
    }

    #[test]
    fn test_modes() {
        let args = parse_args_from(vec!["fortran-linter", "-i", "a.f90"]);
        assert_eq!(args.mode, OutputMode::InPlace);
        let args = parse_args_from(vec!["fortran-linter", "--stdout", "a.f90"]);
        assert_eq!(args.mode, OutputMode::Stdout);
        let args = parse_args_from(vec!["fortran-linter", "--fsyntax-only", "a.f90"]);
        assert_eq!(args.mode, OutputMode::Diagnostics);
    }

    #[test]
    fn test_modes_are_exclusive() {
        let result =
            build_cli().try_get_matches_from(vec!["fortran-linter", "-i", "--stdout", "a.f90"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_max_errors() {
        let args = parse_args_from(vec!["fortran-linter", "--max-errors", "3", "a.f90"]);
        assert_eq!(args.max_errors, Some(3));
        let args = parse_args_from(vec!["fortran-linter", "--max-errors", "-1", "a.f90"]);
        assert_eq!(args.max_errors, None);
        let args = parse_args_from(vec!["fortran-linter", "--max-errors", "0", "a.f90"]);
        assert_eq!(args.max_errors, None);
    }

    #[test]
    fn test_value_options() {
        let args = parse_args_from(vec![
            "fortran-linter",
            "--linelength",
            "80",
            "--indent",
            "4",
            "-e",
            "build/*",
            "-e",
            "*.F",
            "-j",
            "2",
            "-v",
            "src",
            "main.f90",
        ]);
        assert_eq!(args.line_length, Some(80));
        assert_eq!(args.indent, Some(4));
        assert_eq!(args.exclude, vec!["build/*", "*.F"]);
        assert_eq!(args.jobs, Some(2));
        assert!(args.verbose);
        assert_eq!(args.inputs.len(), 2);
    }
}
