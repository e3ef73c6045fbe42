/*!
# Daybook

Daybook is a one-line personal journal. Every entry is written as a single line
of text: an optional date expression, a title, free content, `+tags` and
`@key=value` fields. Entries are kept in a JSON file, optionally encrypted with
a password, and can be shown, searched and removed by date, keyword, tag or field.

## Core Features

- Add entries dated today, yesterday, on a weekday or an explicit date and time
- Show or remove the entries of a day, a month, a year or a date range
- Search by keyword, tag or field key, and list tag and field usage
- Encrypt a journal with a password, or remove the password again
- Keep several journals side by side in one directory

## Architecture

- `cli`: Command-line interface handling using clap
- `config`: Configuration loading and validation
- `errors`: Error handling infrastructure
- `journal_core`: Date expressions, entry composition and matching, without I/O
- `journal`: The ordered entry collection and its queries
- `journal_io`: The on-disk format and the locked journal file
- `crypto`: Password-derived keys and authenticated encryption
- `display`: Terminal rendering of query results
- `ops`: One command applied to a journal file
- `update`: Lookup of the newest published release

## Usage Example

```rust,no_run
use chrono::Local;
use daybook::cli::{Action, Scope, StorageChange};
use daybook::display::{OutputStyle, Paint};
use daybook::ops::{run_journal_command, RunOptions};
use daybook::Config;

fn main() -> daybook::AppResult<()> {
    let config = Config::load()?;
    let options = RunOptions {
        storage: StorageChange::Plain,
        style: OutputStyle::Pretty,
        paint: Paint::detect(),
    };

    run_journal_command(
        &Action::Add("Started a journal. +meta".to_string()),
        &config,
        options,
        Local::now(),
    )?;

    let report = run_journal_command(
        &Action::Show(Scope::Expression("today".to_string())),
        &config,
        options,
        Local::now(),
    )?;
    print!("{}", report.output);
    Ok(())
}
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Constants used throughout the application
pub mod constants;
/// Password-derived keys and journal encryption
pub mod crypto;
/// Terminal rendering
pub mod display;
/// Error types and utilities for error handling
pub mod errors;
/// The in-memory journal
pub mod journal;
/// Pure entry and date logic
pub mod journal_core;
/// Journal files on disk
pub mod journal_io;
/// Commands applied to a journal file
pub mod ops;
/// Newest-release lookup
pub mod update;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use journal::Journal;
pub use journal_core::Entry;
