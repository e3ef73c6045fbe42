//! Journal file I/O.
//!
//! This module owns everything that touches the journal on disk: resolving
//! its path, creating the directory, holding an exclusive lock for the length
//! of a command, and loading and saving through a [`StoreCodec`].

pub mod codec;

pub use codec::StoreCodec;

use crate::constants::{EMPTY_JOURNAL_MARKER, JOURNAL_FILE_EXTENSION};
#[cfg(unix)]
use crate::constants::{DEFAULT_DIR_PERMISSIONS, DEFAULT_FILE_PERMISSIONS};
use crate::errors::{AppError, AppResult, LockError};
use crate::journal::{DuplicatePolicy, Journal};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Joins the journal directory and file name, adding `.json` when missing.
///
/// ```
/// use daybook::journal_io::journal_path;
/// use std::path::Path;
///
/// let dir = Path::new("/home/me/.daybook");
/// assert_eq!(journal_path(dir, "work"), Path::new("/home/me/.daybook/work.json"));
/// assert_eq!(journal_path(dir, "work.json"), Path::new("/home/me/.daybook/work.json"));
/// ```
pub fn journal_path(journal_dir: &Path, file_name: &str) -> PathBuf {
    if file_name.ends_with(JOURNAL_FILE_EXTENSION) {
        journal_dir.join(file_name)
    } else {
        journal_dir.join(format!("{}{}", file_name, JOURNAL_FILE_EXTENSION))
    }
}

/// Ensures the journal directory exists, creating it if necessary.
///
/// Newly created directories are restricted to the owner (0o700 on Unix).
///
/// # Errors
///
/// Returns:
/// - `AppError::Config` if the provided path is not an absolute path
/// - `AppError::Io` if the directory creation fails
pub fn ensure_journal_directory_exists(journal_dir: &Path) -> AppResult<()> {
    if !journal_dir.is_absolute() {
        return Err(AppError::Config(format!(
            "Journal directory path must be absolute: {}",
            journal_dir.display()
        )));
    }

    if !journal_dir.exists() {
        fs::create_dir_all(journal_dir).map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create journal directory: {}", e),
            ))
        })?;

        #[cfg(unix)]
        {
            let permissions = fs::Permissions::from_mode(DEFAULT_DIR_PERMISSIONS);
            fs::set_permissions(journal_dir, permissions).map_err(|e| {
                AppError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to set secure permissions on journal directory: {}",
                        e
                    ),
                ))
            })?;
            debug!("Set 0o700 permissions on journal directory");
        }
    }
    Ok(())
}

/// An open journal file, exclusively locked until dropped.
#[derive(Debug)]
pub struct JournalFile {
    path: PathBuf,
    file: File,
}

impl JournalFile {
    /// Opens (creating if needed) and locks the journal file at `path`.
    ///
    /// # Errors
    ///
    /// - [`LockError::FileBusy`] if another process holds the lock
    /// - [`LockError::AcquisitionFailed`] if locking fails for another reason
    /// - `AppError::Io` if the file cannot be opened
    pub fn open(path: &Path) -> AppResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        #[cfg(unix)]
        {
            let mut permissions = file.metadata()?.permissions();
            permissions.set_mode(DEFAULT_FILE_PERMISSIONS);
            file.set_permissions(permissions).map_err(|e| {
                AppError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to set secure permissions on journal file: {}", e),
                ))
            })?;
        }

        file.try_lock_exclusive().map_err(|e| {
            if e.kind() == fs2::lock_contended_error().kind() {
                LockError::FileBusy {
                    path: path.to_path_buf(),
                }
            } else {
                LockError::AcquisitionFailed {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        debug!("Locked journal file {}", path.display());

        Ok(JournalFile {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Path of the locked file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the journal.
    ///
    /// An empty file, or one holding only `[]`, is a fresh journal created at
    /// `now`. Otherwise the bytes are decoded with `codec` and `last_loaded`
    /// is set to `now`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Journal(CorruptStore)` when decoding fails, and
    /// `AppError::Io` when reading fails.
    pub fn load(
        &mut self,
        codec: &StoreCodec,
        now: &str,
        policy: DuplicatePolicy,
    ) -> AppResult<Journal> {
        let mut bytes = Vec::new();
        self.file.seek(SeekFrom::Start(0))?;
        self.file.read_to_end(&mut bytes)?;

        let journal = if is_fresh(&bytes) {
            info!("Starting a new journal at {}", self.path.display());
            Journal::new(now)
        } else {
            let journal = codec.decode(&bytes, now)?;
            info!(
                "Loaded {} entries from {}",
                journal.len(),
                self.path.display()
            );
            journal
        };

        Ok(journal.with_duplicate_policy(policy))
    }

    /// Writes the journal atomically.
    ///
    /// The payload goes to a temporary file in the same directory, which then
    /// replaces the journal file.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` on any filesystem failure, or `AppError::Crypto`
    /// if sealing fails. The existing file is untouched on error.
    pub fn save(&self, codec: &StoreCodec, journal: &Journal) -> AppResult<()> {
        let bytes = codec.encode(journal)?;
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(&bytes)?;
        temp.as_file().sync_all()?;

        #[cfg(unix)]
        fs::set_permissions(
            temp.path(),
            fs::Permissions::from_mode(DEFAULT_FILE_PERMISSIONS),
        )?;

        temp.persist(&self.path).map_err(|e| AppError::Io(e.error))?;
        info!(
            "Saved {} entries to {} ({})",
            journal.len(),
            self.path.display(),
            if codec.is_encrypted() { "encrypted" } else { "plain" }
        );
        Ok(())
    }
}

impl Drop for JournalFile {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            debug!("Failed to unlock {}: {}", self.path.display(), e);
        }
    }
}

fn is_fresh(bytes: &[u8]) -> bool {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    text.is_empty() || text == EMPTY_JOURNAL_MARKER
}
