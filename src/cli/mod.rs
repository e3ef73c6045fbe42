use crate::constants::{APP_DESCRIPTION, APP_NAME, KEYWORD_ALL, LOG_FORMAT_JSON, LOG_FORMAT_TEXT};
use crate::display::OutputStyle;
use crate::errors::{AppError, AppResult};
use clap::Parser;

/// A one-line personal journal with dates, tags and fields
#[derive(Parser, Debug, Default)]
#[command(name = APP_NAME, about = APP_DESCRIPTION)]
#[command(author, version, long_about = None)]
pub struct CliArgs {
    /// Entry text, starting with an optional date: today, yesterday, a weekday,
    /// YYYY-MM-DD, YYYY-MM or YYYY, then an optional time HH.MM
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,

    /// Adds an entry; any further words are appended to it
    #[arg(long, value_name = "TEXT")]
    pub add: Option<String>,

    /// Removes the entries of a date (YYYY-MM-DD, YYYY-MM, YYYY, today, ...) or all
    #[arg(long, value_name = "DATE|all", conflicts_with_all = ["add", "show"])]
    pub remove: Option<String>,

    /// Shows the entries of a date or all
    #[arg(long, value_name = "DATE|all", conflicts_with = "add")]
    pub show: Option<String>,

    /// Start of a date range (YYYY-MM-DD), used with `all`
    #[arg(long, value_name = "YYYY-MM-DD", requires = "to")]
    pub from: Option<String>,

    /// End of a date range (YYYY-MM-DD), used with `all`
    #[arg(long, value_name = "YYYY-MM-DD", requires = "from")]
    pub to: Option<String>,

    /// Shows entries containing any of the keywords
    #[arg(long, alias = "searchkeywords", value_name = "KEYWORD")]
    pub search: Option<String>,

    /// Shows entries with any of the tags
    #[arg(long, value_name = "TAG")]
    pub searchtags: Option<String>,

    /// Shows entries defining any of the field keys
    #[arg(long, value_name = "KEY")]
    pub searchfields: Option<String>,

    /// Lists every tag with its number of uses
    #[arg(long)]
    pub tags: bool,

    /// Lists every field
    #[arg(long)]
    pub fields: bool,

    /// Shows entries one per line
    #[arg(long, conflicts_with = "json")]
    pub plaintext: bool,

    /// Shows entries as JSON
    #[arg(long)]
    pub json: bool,

    /// Encrypts the journal with a new password
    #[arg(long)]
    pub encrypt: bool,

    /// Opens an encrypted journal; it stays encrypted
    #[arg(long)]
    pub decrypt: bool,

    /// Opens an encrypted journal and saves it unencrypted
    #[arg(long, conflicts_with = "encrypt")]
    pub removepassword: bool,

    /// Uses another journal file in the journal directory
    #[arg(long = "use", value_name = "NAME")]
    pub use_journal: Option<String>,

    /// Prints the version and looks up the newest release
    #[arg(long)]
    pub check_update: bool,

    /// Print verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Log format: text or json
    #[arg(long, value_name = "FORMAT", value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON])]
    pub log_format: Option<String>,
}

/// Which entries a `--show` or `--remove` applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Every entry.
    All,
    /// Entries strictly between two dates.
    Range {
        /// Exclusive start date, `YYYY-MM-DD`.
        from: String,
        /// Exclusive end date, `YYYY-MM-DD`.
        to: String,
    },
    /// Entries matching a date expression.
    Expression(String),
}

/// The journal operation requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Add an entry from a journal line.
    Add(String),
    /// Remove the entries in scope.
    Remove(Scope),
    /// Show the entries in scope.
    Show(Scope),
    /// Entries containing any of the keywords.
    Search(Vec<String>),
    /// Entries carrying any of the tags.
    SearchTags(Vec<String>),
    /// Entries defining any of the field keys.
    SearchFields(Vec<String>),
    /// Tag usage counts.
    Tags,
    /// Every field of every entry.
    Fields,
    /// Print the version and look up the newest release.
    CheckUpdate,
    /// Only the storage changes (`--encrypt`, `--decrypt`, `--removepassword`).
    Rewrite,
    /// Nothing to do; print usage.
    Help,
}

impl Action {
    /// True when the action changes the entries.
    pub fn mutates(&self) -> bool {
        matches!(self, Action::Add(_) | Action::Remove(_))
    }
}

/// How the journal is read and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageChange {
    /// Plain in, plain out.
    Plain,
    /// Encrypted in, encrypted out with the same key.
    KeepEncrypted,
    /// Read as it is, write encrypted with a new key.
    Encrypt { from_encrypted: bool },
    /// Encrypted in, plain out.
    RemovePassword,
}

impl StorageChange {
    /// True when the journal on disk is expected to be encrypted.
    pub fn reads_encrypted(self) -> bool {
        match self {
            StorageChange::Plain => false,
            StorageChange::KeepEncrypted | StorageChange::RemovePassword => true,
            StorageChange::Encrypt { from_encrypted } => from_encrypted,
        }
    }
}

fn with_rest(first: &str, rest: &[String]) -> Vec<String> {
    std::iter::once(first.to_string())
        .chain(rest.iter().cloned())
        .collect()
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        <CliArgs as Parser>::parse()
    }

    fn scope(&self, target: &str) -> AppResult<Scope> {
        let is_all = target.trim().eq_ignore_ascii_case(KEYWORD_ALL);
        match (&self.from, &self.to, is_all) {
            (Some(from), Some(to), true) => Ok(Scope::Range {
                from: from.clone(),
                to: to.clone(),
            }),
            (None, None, true) => Ok(Scope::All),
            (None, None, false) => Ok(Scope::Expression(target.to_string())),
            _ => Err(AppError::Config(format!(
                "--from and --to only apply together with '{}'",
                KEYWORD_ALL
            ))),
        }
    }

    /// Works out the requested action.
    ///
    /// Flags are considered in a fixed order: add, remove, show, the searches,
    /// tags, fields, then the release check. Free text with no flag is an add.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when `--from`/`--to` are used without `all`.
    pub fn action(&self) -> AppResult<Action> {
        if let Some(add) = &self.add {
            return Ok(Action::Add(with_rest(add, &self.text).join(" ")));
        }
        if let Some(target) = &self.remove {
            return Ok(Action::Remove(self.scope(target)?));
        }
        if let Some(target) = &self.show {
            return Ok(Action::Show(self.scope(target)?));
        }
        if self.from.is_some() || self.to.is_some() {
            return Err(AppError::Config(
                "--from and --to need --show all or --remove all".to_string(),
            ));
        }
        if let Some(keyword) = &self.search {
            return Ok(Action::Search(with_rest(keyword, &self.text)));
        }
        if let Some(tag) = &self.searchtags {
            return Ok(Action::SearchTags(with_rest(tag, &self.text)));
        }
        if let Some(key) = &self.searchfields {
            return Ok(Action::SearchFields(with_rest(key, &self.text)));
        }
        if self.tags {
            return Ok(Action::Tags);
        }
        if self.fields {
            return Ok(Action::Fields);
        }
        if self.check_update {
            return Ok(Action::CheckUpdate);
        }
        if !self.text.is_empty() {
            return Ok(Action::Add(self.text.join(" ")));
        }
        if self.encrypt || self.decrypt || self.removepassword {
            return Ok(Action::Rewrite);
        }
        Ok(Action::Help)
    }

    /// Layout for entry listings.
    pub fn output_style(&self) -> OutputStyle {
        if self.json {
            OutputStyle::Json
        } else if self.plaintext {
            OutputStyle::Plaintext
        } else {
            OutputStyle::Pretty
        }
    }

    /// How the journal is read and written.
    pub fn storage_change(&self) -> StorageChange {
        if self.encrypt {
            StorageChange::Encrypt {
                from_encrypted: self.decrypt,
            }
        } else if self.removepassword {
            StorageChange::RemovePassword
        } else if self.decrypt {
            StorageChange::KeepEncrypted
        } else {
            StorageChange::Plain
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::parse_from(std::iter::once("daybook").chain(args.iter().copied()))
    }

    #[test]
    fn test_default_args() {
        let args = parse(&[]);
        assert!(args.text.is_empty());
        assert!(args.add.is_none());
        assert!(!args.verbose);
        assert_eq!(args.action().unwrap(), Action::Help);
        assert_eq!(args.output_style(), OutputStyle::Pretty);
        assert_eq!(args.storage_change(), StorageChange::Plain);
    }

    #[test]
    fn test_free_text_is_add() {
        let args = parse(&["yesterday", "Went", "running.", "+sport"]);
        assert_eq!(
            args.action().unwrap(),
            Action::Add("yesterday Went running. +sport".to_string())
        );
    }

    #[test]
    fn test_add_flag_appends_rest() {
        let args = parse(&["--add", "today", "Slept.", "@hours=8"]);
        assert_eq!(
            args.action().unwrap(),
            Action::Add("today Slept. @hours=8".to_string())
        );
    }

    #[test]
    fn test_remove_and_show_scopes() {
        assert_eq!(
            parse(&["--remove", "2023-05"]).action().unwrap(),
            Action::Remove(Scope::Expression("2023-05".to_string()))
        );
        assert_eq!(
            parse(&["--show", "ALL"]).action().unwrap(),
            Action::Show(Scope::All)
        );
        assert_eq!(
            parse(&["--show", "all", "--from", "2023-01-01", "--to", "2023-02-01"])
                .action()
                .unwrap(),
            Action::Show(Scope::Range {
                from: "2023-01-01".to_string(),
                to: "2023-02-01".to_string()
            })
        );
    }

    #[test]
    fn test_range_without_all_is_rejected() {
        let args = parse(&["--remove", "2023", "--from", "2023-01-01", "--to", "2023-02-01"]);
        assert!(matches!(args.action(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_from_requires_to() {
        let result = CliArgs::try_parse_from(["daybook", "--show", "all", "--from", "2023-01-01"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_searches_collect_extra_words() {
        assert_eq!(
            parse(&["--search", "beach", "sun"]).action().unwrap(),
            Action::Search(vec!["beach".to_string(), "sun".to_string()])
        );
        assert_eq!(
            parse(&["--searchkeywords", "beach"]).action().unwrap(),
            Action::Search(vec!["beach".to_string()])
        );
        assert_eq!(
            parse(&["--searchtags", "work", "home"]).action().unwrap(),
            Action::SearchTags(vec!["work".to_string(), "home".to_string()])
        );
        assert_eq!(
            parse(&["--searchfields", "mood"]).action().unwrap(),
            Action::SearchFields(vec!["mood".to_string()])
        );
    }

    #[test]
    fn test_listing_flags() {
        assert_eq!(parse(&["--tags"]).action().unwrap(), Action::Tags);
        assert_eq!(parse(&["--fields"]).action().unwrap(), Action::Fields);
        assert_eq!(
            parse(&["--check-update"]).action().unwrap(),
            Action::CheckUpdate
        );
    }

    #[test]
    fn test_output_styles() {
        assert_eq!(parse(&["--plaintext"]).output_style(), OutputStyle::Plaintext);
        assert_eq!(parse(&["--json"]).output_style(), OutputStyle::Json);
        assert!(CliArgs::try_parse_from(["daybook", "--json", "--plaintext"]).is_err());
    }

    #[test]
    fn test_storage_changes() {
        let args = parse(&["--encrypt"]);
        assert_eq!(args.action().unwrap(), Action::Rewrite);
        assert_eq!(
            args.storage_change(),
            StorageChange::Encrypt {
                from_encrypted: false
            }
        );
        assert!(!args.storage_change().reads_encrypted());

        let args = parse(&["--decrypt", "--encrypt"]);
        assert!(args.storage_change().reads_encrypted());

        let args = parse(&["--decrypt", "--show", "all"]);
        assert_eq!(args.storage_change(), StorageChange::KeepEncrypted);
        assert_eq!(args.action().unwrap(), Action::Show(Scope::All));

        let args = parse(&["--removepassword"]);
        assert_eq!(args.storage_change(), StorageChange::RemovePassword);
        assert!(args.storage_change().reads_encrypted());

        assert!(CliArgs::try_parse_from(["daybook", "--encrypt", "--removepassword"]).is_err());
    }

    #[test]
    fn test_use_and_logging_flags() {
        let args = parse(&["--use", "work", "-v", "--log-format", "json", "--tags"]);
        assert_eq!(args.use_journal.as_deref(), Some("work"));
        assert!(args.verbose);
        assert_eq!(args.log_format.as_deref(), Some("json"));

        assert!(CliArgs::try_parse_from(["daybook", "--log-format", "xml"]).is_err());
    }

    #[test]
    fn test_mutates() {
        assert!(Action::Add("x".to_string()).mutates());
        assert!(Action::Remove(Scope::All).mutates());
        assert!(!Action::Show(Scope::All).mutates());
        assert!(!Action::Tags.mutates());
    }
}
