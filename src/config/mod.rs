//! Configuration management for the daybook application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults.
//!
//! # Environment Variables
//!
//! - `DAYBOOK_DIR`: Path to the journal directory (defaults to ~/.daybook)
//! - `DAYBOOK_FILE`: Journal file name inside that directory (defaults to journal.json)
//! - `DAYBOOK_DUPLICATES`: `allow` or `one-per-day`
//! - `DAYBOOK_LOG_FORMAT`: `text` or `json`
//! - `DAYBOOK_PASSWORD`: Journal password, used instead of prompting
//! - `HOME`: Used for expanding the default journal directory path

use crate::constants::{
    DEFAULT_JOURNAL_FILE, DEFAULT_JOURNAL_SUBDIR, ENV_VAR_DAYBOOK_DIR, ENV_VAR_DAYBOOK_DUPLICATES,
    ENV_VAR_DAYBOOK_FILE, ENV_VAR_DAYBOOK_LOG_FORMAT, ENV_VAR_DAYBOOK_PASSWORD, ENV_VAR_HOME,
    LOG_FORMAT_JSON, LOG_FORMAT_TEXT, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use crate::journal::DuplicatePolicy;
use crate::journal_io::journal_path;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for the daybook application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use daybook::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     journal_dir: PathBuf::from("/path/to/journal"),
///     ..Config::default()
/// };
/// assert!(config.journal_path().ends_with("journal.json"));
/// ```
///
/// Loading configuration from environment variables:
/// ```no_run
/// use daybook::Config;
/// use std::env;
///
/// env::set_var("DAYBOOK_DIR", "/custom/journal/path");
///
/// let config = Config::load().expect("Failed to load configuration");
/// assert_eq!(config.journal_dir.to_str(), Some("/custom/journal/path"));
/// ```
#[derive(Clone)]
pub struct Config {
    /// Directory holding the journal files.
    pub journal_dir: PathBuf,

    /// Name of the journal file inside `journal_dir`. `.json` is appended
    /// when missing.
    pub journal_file: String,

    /// Whether several entries may share a day.
    pub duplicate_policy: DuplicatePolicy,

    /// Log output format, `text` or `json`.
    pub log_format: String,

    /// Password supplied through the environment, if any.
    pub password: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("journal_dir", &"[REDACTED_PATH]")
            .field("journal_file", &self.journal_file)
            .field("duplicate_policy", &self.duplicate_policy)
            .field("log_format", &self.log_format)
            .field(
                "password",
                &self.password.as_ref().map(|_| REDACTED_PLACEHOLDER),
            )
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            journal_dir: PathBuf::from(""),
            journal_file: DEFAULT_JOURNAL_FILE.to_string(),
            duplicate_policy: DuplicatePolicy::default(),
            log_format: LOG_FORMAT_TEXT.to_string(),
            password: None,
        }
    }
}

impl Config {
    /// Validates a journal file name.
    ///
    /// The name must be non-empty and must not contain path separators, so a
    /// journal always lives directly inside the journal directory.
    fn validate_file_name(name: &str) -> AppResult<&str> {
        if name.trim().is_empty() {
            return Err(AppError::Config(
                "Journal file name cannot be empty".to_string(),
            ));
        }

        if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
            return Err(AppError::Config(format!(
                "Journal file name cannot contain path separators: '{}'. Set {} to change the directory instead",
                name, ENV_VAR_DAYBOOK_DIR
            )));
        }

        Ok(name)
    }

    fn validate_log_format(format: &str) -> AppResult<&str> {
        match format {
            LOG_FORMAT_TEXT | LOG_FORMAT_JSON => Ok(format),
            other => Err(AppError::Config(format!(
                "Unknown log format '{}', expected '{}' or '{}'",
                other, LOG_FORMAT_TEXT, LOG_FORMAT_JSON
            ))),
        }
    }

    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The journal directory is expanded with `shellexpand`, so `~` and
    /// environment variable references work.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The journal directory path expansion fails or yields an empty path
    /// - The file name, duplicate policy or log format is invalid
    pub fn load() -> AppResult<Self> {
        Config::load_with_log_format(None)
    }

    /// Like [`Config::load`], with `log_format` taking precedence over
    /// `DAYBOOK_LOG_FORMAT`. The environment value is not consulted, and so
    /// not validated, when an override is given.
    pub fn load_with_log_format(log_format: Option<&str>) -> AppResult<Self> {
        let journal_dir_str = env::var(ENV_VAR_DAYBOOK_DIR).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_JOURNAL_SUBDIR)
        });

        let expanded_path = shellexpand::full(&journal_dir_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
        let journal_dir = PathBuf::from(expanded_path.into_owned());

        if journal_dir.as_os_str().is_empty() {
            return Err(AppError::Config(
                "Journal directory path is empty".to_string(),
            ));
        }

        let journal_file_raw =
            env::var(ENV_VAR_DAYBOOK_FILE).unwrap_or_else(|_| DEFAULT_JOURNAL_FILE.to_string());
        let journal_file = Config::validate_file_name(&journal_file_raw)?.to_string();

        let duplicate_policy = match env::var(ENV_VAR_DAYBOOK_DUPLICATES) {
            Ok(raw) => raw.parse::<DuplicatePolicy>().map_err(AppError::Config)?,
            Err(_) => DuplicatePolicy::default(),
        };

        let log_format_raw = match log_format {
            Some(format) => format.to_string(),
            None => env::var(ENV_VAR_DAYBOOK_LOG_FORMAT)
                .unwrap_or_else(|_| LOG_FORMAT_TEXT.to_string()),
        };
        let log_format = Config::validate_log_format(&log_format_raw)?.to_string();

        let password = env::var(ENV_VAR_DAYBOOK_PASSWORD).ok();

        Ok(Config {
            journal_dir,
            journal_file,
            duplicate_policy,
            log_format,
            password,
        })
    }

    /// Switches to another journal in the same directory (`--use NAME`).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `name` is not a valid file name.
    pub fn use_journal(&mut self, name: &str) -> AppResult<()> {
        self.journal_file = Config::validate_file_name(name)?.to_string();
        Ok(())
    }

    /// Full path of the journal file.
    pub fn journal_path(&self) -> PathBuf {
        journal_path(&self.journal_dir, &self.journal_file)
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Journal directory path is empty"
    /// - "Journal directory must be an absolute path"
    /// - a file name or log format complaint
    ///
    /// # Examples
    ///
    /// ```
    /// use daybook::Config;
    /// use std::path::PathBuf;
    ///
    /// let valid_config = Config {
    ///     journal_dir: PathBuf::from("/absolute/path"),
    ///     ..Config::default()
    /// };
    /// assert!(valid_config.validate().is_ok());
    ///
    /// let invalid_config = Config {
    ///     journal_dir: PathBuf::from("relative/path"),
    ///     ..Config::default()
    /// };
    /// assert!(invalid_config.validate().is_err());
    /// ```
    pub fn validate(&self) -> AppResult<()> {
        if self.journal_dir.as_os_str().is_empty() {
            return Err(AppError::Config(
                "Journal directory path is empty".to_string(),
            ));
        }

        if !self.journal_dir.is_absolute() {
            return Err(AppError::Config(
                "Journal directory must be an absolute path".to_string(),
            ));
        }

        Config::validate_file_name(&self.journal_file)?;
        Config::validate_log_format(&self.log_format)?;
        Ok(())
    }
}
