//! Reading journal passwords.
//!
//! Passwords come from the terminal via `rpassword`, or from a preset value
//! (the `DAYBOOK_PASSWORD` environment variable) for non-interactive use.

use super::cipher::JournalKey;
use crate::errors::{AppResult, CryptoError};
use tracing::debug;

fn prompt(label: &str) -> Result<String, CryptoError> {
    rpassword::prompt_password(label).map_err(|e| CryptoError::PassphrasePrompt(e.to_string()))
}

/// Checks that a new password was typed the same way twice and is not empty.
///
/// # Errors
///
/// - [`CryptoError::PassphraseMismatch`] if the two differ
/// - [`CryptoError::EmptyPassphrase`] if the password is empty
pub fn confirm_new_password(first: String, second: String) -> Result<String, CryptoError> {
    if first != second {
        return Err(CryptoError::PassphraseMismatch);
    }
    if first.is_empty() {
        return Err(CryptoError::EmptyPassphrase);
    }
    Ok(first)
}

/// Gets the key of an existing encrypted journal.
///
/// Uses `preset` when given, otherwise prompts once.
pub fn obtain_existing_key(preset: Option<&str>) -> AppResult<JournalKey> {
    let password = match preset {
        Some(password) => {
            debug!("Using preset password");
            password.to_string()
        }
        None => {
            debug!("Prompting for journal password");
            prompt("Password: ")?
        }
    };

    if password.is_empty() {
        return Err(CryptoError::EmptyPassphrase.into());
    }
    Ok(JournalKey::from_password(&password))
}

/// Gets the key for a journal about to be encrypted.
///
/// Uses `preset` when given, otherwise prompts twice for confirmation.
///
/// # Errors
///
/// Returns [`CryptoError::PassphraseMismatch`] when the two typed passwords
/// differ, in which case nothing must be written.
pub fn obtain_new_key(preset: Option<&str>) -> AppResult<JournalKey> {
    let password = match preset {
        Some(password) => {
            debug!("Using preset password for new encryption");
            confirm_new_password(password.to_string(), password.to_string())?
        }
        None => {
            debug!("Prompting for new journal password");
            let first = prompt("New password: ")?;
            let second = prompt("Repeat password: ")?;
            confirm_new_password(first, second)?
        }
    };
    Ok(JournalKey::from_password(&password))
}
