//! The load, execute and save cycle of one invocation.

use super::execute::{execute, Report};
use crate::cli::{Action, StorageChange};
use crate::config::Config;
use crate::crypto::{obtain_existing_key, obtain_new_key};
use crate::display::{OutputStyle, Paint};
use crate::errors::AppResult;
use crate::journal_io::{ensure_journal_directory_exists, JournalFile, StoreCodec};
use chrono::{DateTime, Local, Timelike};
use tracing::{debug, info};

/// Everything besides the action that shapes a run.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// How the journal is read and written back.
    pub storage: StorageChange,
    /// Layout of entry listings.
    pub style: OutputStyle,
    /// Whether output is coloured.
    pub paint: Paint,
}

/// Loads the configured journal, applies `action` and saves the result.
///
/// The journal file stays locked from load to save. Nothing is written
/// unless the action succeeds and the output key could be obtained, so a
/// failed command leaves the file as it was.
///
/// # Errors
///
/// - `AppError::Config` for an unusable configuration
/// - `AppError::Lock` when another process holds the journal
/// - `AppError::Crypto` for password problems, including a mismatch on `--encrypt`
/// - `AppError::Journal` from loading or from the action itself
pub fn run_journal_command(
    action: &Action,
    config: &Config,
    options: RunOptions,
    now: DateTime<Local>,
) -> AppResult<Report> {
    config.validate()?;
    ensure_journal_directory_exists(&config.journal_dir)?;

    let mut file = JournalFile::open(&config.journal_path())?;
    debug!("Locked {}", file.path().display());

    let password = config.password.as_deref();
    let read_codec = if options.storage.reads_encrypted() {
        StoreCodec::Encrypted(obtain_existing_key(password)?)
    } else {
        StoreCodec::Plain
    };

    let stamp = now.to_rfc3339();
    let naive_now = now.naive_local();
    let naive_now = naive_now.with_nanosecond(0).unwrap_or(naive_now);

    let mut journal = file.load(&read_codec, &stamp, config.duplicate_policy)?;
    let report = execute(action, &mut journal, naive_now, options.style, options.paint)?;

    let write_codec = match options.storage {
        StorageChange::Plain | StorageChange::RemovePassword => StoreCodec::Plain,
        StorageChange::KeepEncrypted => read_codec,
        StorageChange::Encrypt { .. } => StoreCodec::Encrypted(obtain_new_key(password)?),
    };

    file.save(&write_codec, &journal)?;
    if action.mutates() {
        info!("{} entries changed", report.changed);
    }
    Ok(report)
}
