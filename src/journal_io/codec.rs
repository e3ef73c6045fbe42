//! Converting a [`Journal`] to and from the bytes kept on disk.
//!
//! The payload is a pretty-printed JSON document:
//!
//! ```json
//! { "days": [ ... ], "last_loaded": "...", "created": "...", "version": "..." }
//! ```
//!
//! With [`StoreCodec::Encrypted`] the JSON text is sealed before it is written
//! and opened before it is parsed.

use crate::crypto::{self, JournalKey};
use crate::errors::{AppError, AppResult, JournalError};
use crate::journal::Journal;
use crate::journal_core::entry::EntryRecord;
use crate::journal_core::Entry;
use serde::{Deserialize, Serialize};
use std::io;
use tracing::debug;

#[derive(Serialize)]
struct JournalDocumentRef<'a> {
    days: &'a [Entry],
    last_loaded: &'a str,
    created: &'a str,
    version: &'a str,
}

#[derive(Deserialize)]
struct JournalDocument {
    #[serde(default)]
    days: Option<Vec<EntryRecord>>,
    #[serde(default, alias = "LastLoaded")]
    last_loaded: String,
    #[serde(default)]
    created: String,
    #[serde(default)]
    version: String,
}

/// How journal bytes are wrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCodec {
    /// Plain UTF-8 JSON.
    Plain,
    /// JSON sealed with AES-256-GCM under the given key.
    Encrypted(JournalKey),
}

impl StoreCodec {
    /// True for [`StoreCodec::Encrypted`].
    pub fn is_encrypted(&self) -> bool {
        matches!(self, StoreCodec::Encrypted(_))
    }

    /// Serializes the journal, sealing it when encrypted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Crypto`] if sealing fails.
    pub fn encode(&self, journal: &Journal) -> AppResult<Vec<u8>> {
        let document = JournalDocumentRef {
            days: journal.entries(),
            last_loaded: journal.last_loaded(),
            created: journal.created(),
            version: journal.version(),
        };
        let json = serde_json::to_vec_pretty(&document)
            .map_err(|e| AppError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;

        match self {
            StoreCodec::Plain => Ok(json),
            StoreCodec::Encrypted(key) => {
                debug!("Sealing {} bytes of journal", json.len());
                Ok(crypto::seal(key, &json)?)
            }
        }
    }

    /// Parses journal bytes, opening them first when encrypted.
    ///
    /// The restored journal has `last_loaded` set to `loaded_at`.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::CorruptStore`] when the bytes cannot be opened,
    /// are not UTF-8 JSON of the expected shape, or hold an entry with a bad
    /// timestamp.
    pub fn decode(&self, bytes: &[u8], loaded_at: &str) -> Result<Journal, JournalError> {
        let opened;
        let plain = match self {
            StoreCodec::Plain => bytes,
            StoreCodec::Encrypted(key) => {
                opened = crypto::open(key, bytes)?;
                opened.as_slice()
            }
        };

        let text = std::str::from_utf8(plain)
            .map_err(|e| JournalError::CorruptStore(format!("journal is not UTF-8: {}", e)))?;
        let document: JournalDocument = serde_json::from_str(text)
            .map_err(|e| JournalError::CorruptStore(e.to_string()))?;

        let entries = document
            .days
            .unwrap_or_default()
            .into_iter()
            .map(Entry::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Decoded {} entries", entries.len());

        let mut journal = Journal::from_parts(
            entries,
            document.created,
            document.last_loaded,
            document.version,
        );
        journal.mark_loaded(loaded_at);
        Ok(journal)
    }
}
