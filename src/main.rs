//! fortran-linter - Style checker and auto-fixer for modern Fortran source code

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use fortran_linter::process::{CheckReport, LineChecker};
use fortran_linter::{parse_args, CliArgs, Config, OutputMode, Result};
use glob::Pattern;
use rayon::prelude::*;
use walkdir::WalkDir;

/// Fortran file extensions picked up when walking directories
const FORTRAN_EXTENSIONS: &[&str] = &[
    "f90", "f95", "f03", "f08", "f18", "f", "for", "ftn", "fpp", "F90", "F95", "F03", "F08", "F18",
    "F", "FOR", "FTN", "FPP",
];

fn main() -> Result<ExitCode> {
    let args = parse_args();
    init_logging(&args);

    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                log::warn!("failed to configure thread pool: {e}");
            }
        }
    }

    let files = collect_files(&args)?;
    if files.is_empty() {
        eprintln!("No Fortran files found to check.");
        return Ok(ExitCode::SUCCESS);
    }

    // An explicit config file applies to every input; otherwise each file
    // discovers its own
    let shared_checker = match &args.config {
        Some(_) => Some(LineChecker::new(&build_config(&args, None)?)?),
        None => None,
    };

    let results: Vec<Result<CheckReport>> = files
        .par_iter()
        .map(|path| match &shared_checker {
            Some(checker) => process_single_file(path, checker, args.mode),
            None => {
                let checker = LineChecker::new(&build_config(&args, Some(path.as_path()))?)?;
                process_single_file(path, &checker, args.mode)
            }
        })
        .collect();

    let mut total_errors = 0;
    let mut failed = 0;
    for (path, result) in files.iter().zip(results) {
        if args.verbose {
            println!("Checking {}", path.display());
        }
        let report = match result {
            Ok(report) => report,
            Err(e) => {
                failed += 1;
                eprintln!("Error checking {}: {e:#}", path.display());
                continue;
            }
        };
        total_errors += report.error_count;

        match args.mode {
            OutputMode::Diagnostics => {
                if report.error_count > 0 {
                    println!("{}", report.render_diagnostics(args.max_errors));
                }
            }
            OutputMode::Stdout => {
                if args.verbose {
                    println!("{} modifications.", report.modification_count);
                }
                print!("{}", report.corrected_text());
            }
            OutputMode::InPlace => {
                if args.verbose {
                    println!("{} modifications.", report.modification_count);
                }
            }
        }
    }

    log::info!(
        "{} files checked, {total_errors} diagnostics, {failed} failures",
        files.len()
    );

    if failed > 0 {
        Ok(ExitCode::from(2))
    } else if total_errors > 0 {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Route `log` output to stderr; `RUST_LOG` wins over the flags
fn init_logging(args: &CliArgs) {
    let level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        log::debug!("Using explicit config file: {}", config_path.display());
        Config::from_toml_file(config_path)?
    } else if let Some(path) = for_path {
        Config::from_discovered_files(path)
    } else {
        Config::from_discovered_files(&std::env::current_dir()?)
    };

    if let Some(line_length) = args.line_length {
        config.max_line_length = line_length;
    }
    if let Some(indent) = args.indent {
        config.indent_unit = indent;
    }
    if args.no_indent {
        config.impose_indent = false;
    }

    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    log::debug!("Configuration: {config:?}");
    Ok(config)
}

/// Collect all files to check, walking directories recursively.
///
/// The result is sorted and free of duplicates. A path that does not exist
/// is an error.
fn collect_files(args: &CliArgs) -> Result<Vec<PathBuf>> {
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                log::warn!("ignoring invalid exclude pattern {p:?}: {e}");
                None
            }
        })
        .collect();

    let mut files = BTreeSet::new();

    for input in &args.inputs {
        if input.is_file() {
            if !is_excluded(input, &exclude_patterns) {
                files.insert(input.clone());
            }
        } else if input.is_dir() {
            // WalkDir reports symlink loops as errors, which are skipped
            for entry in WalkDir::new(input)
                .follow_links(true)
                .max_depth(256)
                .into_iter()
                .filter_map(std::result::Result::ok)
            {
                let path = entry.path();
                if path.is_file() && is_fortran_file(path) && !is_excluded(path, &exclude_patterns)
                {
                    files.insert(path.to_path_buf());
                }
            }
        } else {
            anyhow::bail!("{}: No such file or directory", input.display());
        }
    }

    Ok(files.into_iter().collect())
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path.components().any(|component| match component {
                std::path::Component::Normal(c) => pattern.matches(&c.to_string_lossy()),
                _ => false,
            })
    })
}

fn is_fortran_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| FORTRAN_EXTENSIONS.contains(&ext))
}

/// Check one file, writing the corrected text back for in-place mode
fn process_single_file(path: &Path, checker: &LineChecker, mode: OutputMode) -> Result<CheckReport> {
    let source = std::fs::read_to_string(path)?;
    let report = checker.check_source(&path.display().to_string(), &source);

    if mode == OutputMode::InPlace {
        let mut backup = path.as_os_str().to_owned();
        backup.push(".orig");
        std::fs::rename(path, &backup)?;
        std::fs::write(path, report.corrected_text())?;
    }

    Ok(report)
}
