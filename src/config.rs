//! Linter settings.
//!
//! A [`Config`] is handed to [`crate::rules::RuleCorpus::new`] and
//! [`crate::process::LineChecker::new`]; nothing reads settings globally.
//! Values come from `fortran-linter.toml` files and are then overridden by
//! command-line flags. The home directory file is applied first, then every
//! file from the filesystem root down to the checked file's directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;

const CONFIG_FILE_NAME: &str = "fortran-linter.toml";

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

fn default_line_length() -> usize {
    120
}
fn default_indent() -> usize {
    2
}
fn default_true() -> bool {
    true
}

/// Settings shared by every check of one run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Lines longer than this are reported (default: 120)
    #[serde(default = "default_line_length")]
    pub max_line_length: usize,

    /// Number of spaces per indent level (default: 2)
    #[serde(default = "default_indent")]
    pub indent_unit: usize,

    /// Re-derive leading whitespace from structure (default: true)
    #[serde(default = "default_true")]
    pub impose_indent: bool,
}

/// One config file as written: absent keys stay `None` so merging only
/// touches what the file sets.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    pub max_line_length: Option<usize>,
    pub indent_unit: Option<usize>,
    pub impose_indent: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_line_length: default_line_length(),
            indent_unit: default_indent(),
            impose_indent: true,
        }
    }
}

impl Config {
    const MAX_LINE_LENGTH: usize = 10_000;
    const MAX_INDENT: usize = 20;

    /// Describe the first out-of-range value, if any.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.max_line_length == 0 {
            return Some("max_line_length must be at least 1".to_string());
        }
        if self.max_line_length > Self::MAX_LINE_LENGTH {
            return Some(format!(
                "max_line_length {} exceeds maximum of {}",
                self.max_line_length,
                Self::MAX_LINE_LENGTH
            ));
        }
        if self.indent_unit > Self::MAX_INDENT {
            return Some(format!(
                "indent_unit {} exceeds maximum of {}",
                self.indent_unit,
                Self::MAX_INDENT
            ));
        }
        None
    }

    /// Defaults overridden by the keys set in `path`.
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.max_line_length {
            self.max_line_length = v;
        }
        if let Some(v) = partial.indent_unit {
            self.indent_unit = v;
        }
        if let Some(v) = partial.impose_indent {
            self.impose_indent = v;
        }
    }

    /// Config files that apply to `start_path`, least specific first.
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut found = Vec::new();

        if let Some(home_config) = home_dir().map(|home| home.join(CONFIG_FILE_NAME)) {
            if home_config.is_file() {
                found.push(home_config);
            }
        }

        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            std::env::current_dir().ok()
        };

        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            // Root first, so nearer files win
            ancestors.reverse();

            for ancestor in ancestors {
                let candidate = ancestor.join(CONFIG_FILE_NAME);
                if candidate.is_file() && !found.contains(&candidate) {
                    found.push(candidate);
                }
            }
        }

        found
    }

    /// Merge every discovered file over the defaults, nearest last.
    ///
    /// Unreadable or malformed files are skipped with a warning.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let mut config = Self::default();
        for path in &Self::discover_config_files(start_path) {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => {
                        log::debug!("Applying config file {}", path.display());
                        config.apply_partial(&partial);
                    }
                    Err(e) => log::warn!("failed to parse {}: {e}", path.display()),
                },
                Err(e) => log::warn!("failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}
