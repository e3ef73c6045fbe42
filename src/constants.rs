//! Constants used throughout the application.
//!
//! This module contains all constants used in the daybook application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "daybook";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A one-line personal journal with dates, tags and fields";
/// Project page, used for the newest-release check.
pub const REPOSITORY_URL: &str = "https://github.com/daybook-journal/daybook";

// Logging
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
/// Log level used with `--verbose`.
pub const VERBOSE_LOG_LEVEL: &str = "info";

// Configuration Keys & Environment Variables
/// Environment variable for the journal directory.
pub const ENV_VAR_DAYBOOK_DIR: &str = "DAYBOOK_DIR";
/// Environment variable for the journal file name.
pub const ENV_VAR_DAYBOOK_FILE: &str = "DAYBOOK_FILE";
/// Environment variable selecting the duplicate-entry policy.
pub const ENV_VAR_DAYBOOK_DUPLICATES: &str = "DAYBOOK_DUPLICATES";
/// Environment variable selecting the log format.
pub const ENV_VAR_DAYBOOK_LOG_FORMAT: &str = "DAYBOOK_LOG_FORMAT";
/// Environment variable supplying the journal password non-interactively.
pub const ENV_VAR_DAYBOOK_PASSWORD: &str = "DAYBOOK_PASSWORD";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default journal directory inside the user's home directory.
pub const DEFAULT_JOURNAL_SUBDIR: &str = ".daybook";
/// Default journal file name.
pub const DEFAULT_JOURNAL_FILE: &str = "journal.json";
/// Extension every journal file name carries.
pub const JOURNAL_FILE_EXTENSION: &str = ".json";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// File System Parameters
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Default POSIX permissions for journal files (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;
/// Contents of a journal file that was initialised but never saved.
pub const EMPTY_JOURNAL_MARKER: &str = "[]";

// Date/Time Logic
/// Canonical format of an entry timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Digit templates recognised as a leading date, finest first. `d` is any ASCII digit.
pub const DATE_TEMPLATE_DAY: &str = "dddd-dd-dd";
/// Year and month template.
pub const DATE_TEMPLATE_MONTH: &str = "dddd-dd";
/// Year template.
pub const DATE_TEMPLATE_YEAR: &str = "dddd";
/// Time-of-day template following a date token (24-hour `HH.MM`).
pub const TIME_TEMPLATE: &str = "dd.dd";
/// Keyword for the current day.
pub const KEYWORD_TODAY: &str = "today";
/// Keyword for the previous day.
pub const KEYWORD_YESTERDAY: &str = "yesterday";
/// Argument selecting every entry for `--show` and `--remove`.
pub const KEYWORD_ALL: &str = "all";

// Entry micro-syntax
/// Characters that end an entry title.
pub const TITLE_DELIMITERS: &[char] = &['.', '?', '!', '+', '@'];
/// Marker opening a tag.
pub const TAG_MARKER: char = '+';
/// Marker opening a field.
pub const FIELD_MARKER: char = '@';
/// Separator between a field key and its value.
pub const FIELD_SEPARATOR: char = '=';

// Encryption
/// AES-256 key length in bytes.
pub const KEY_LENGTH: usize = 32;
/// Byte used to pad short passwords up to the key length.
pub const KEY_PADDING_BYTE: u8 = b'0';
/// AES-GCM nonce length in bytes.
pub const NONCE_LENGTH: usize = 12;

// Release check
/// Timeout for the newest-release lookup, in seconds.
pub const UPDATE_CHECK_TIMEOUT_SECS: u64 = 5;
