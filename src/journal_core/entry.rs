//! The journal entry value type.

use crate::constants::TIMESTAMP_FORMAT;
use crate::errors::JournalError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One journal record: title, body, timestamp, tags and key-value fields.
///
/// Entries are immutable once created. `occurred_at` is not serialized; it is
/// derived from `timestamp` when a journal is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    title: String,
    content: String,
    timestamp: String,
    tags: Vec<String>,
    fields: BTreeMap<String, String>,
    #[serde(skip)]
    occurred_at: NaiveDateTime,
}

impl Entry {
    /// Creates an entry, formatting its timestamp from `occurred_at`.
    pub fn new(
        title: String,
        content: String,
        tags: Vec<String>,
        fields: BTreeMap<String, String>,
        occurred_at: NaiveDateTime,
    ) -> Self {
        Entry {
            title,
            content,
            timestamp: occurred_at.format(TIMESTAMP_FORMAT).to_string(),
            tags,
            fields,
            occurred_at,
        }
    }

    /// Text up to and including the first title delimiter.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Body text with tags and fields removed.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Canonical `YYYY-MM-DD HH:MM:SS` rendering of [`Entry::occurred_at`].
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Tags in the order they were written.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Custom fields by key.
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// When the entry happened, to the second.
    pub fn occurred_at(&self) -> NaiveDateTime {
        self.occurred_at
    }
}

/// An entry as stored in the journal payload, before its timestamp is checked.
///
/// `tags` and `fields` may be missing or `null` in older journals.
#[derive(Debug, Deserialize)]
pub struct EntryRecord {
    title: String,
    #[serde(default)]
    content: String,
    timestamp: String,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    fields: Option<BTreeMap<String, String>>,
}

impl TryFrom<EntryRecord> for Entry {
    type Error = JournalError;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        let occurred_at = NaiveDateTime::parse_from_str(&record.timestamp, TIMESTAMP_FORMAT)
            .map_err(|e| {
                JournalError::CorruptStore(format!(
                    "entry timestamp '{}' is invalid: {}",
                    record.timestamp, e
                ))
            })?;

        Ok(Entry {
            title: record.title,
            content: record.content,
            timestamp: record.timestamp,
            tags: record.tags.unwrap_or_default(),
            fields: record.fields.unwrap_or_default(),
            occurred_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_new_formats_timestamp() {
        let occurred_at = NaiveDate::from_ymd_opt(2023, 5, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let entry = Entry::new(
            "Wrote code.".to_string(),
            String::new(),
            vec![],
            BTreeMap::new(),
            occurred_at,
        );
        assert_eq!(entry.timestamp(), "2023-05-01 09:30:00");
        assert_eq!(entry.occurred_at(), occurred_at);
    }

    #[test]
    fn test_serialized_shape_omits_occurred_at() {
        let occurred_at = NaiveDate::from_ymd_opt(2023, 5, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut fields = BTreeMap::new();
        fields.insert("mood".to_string(), "good".to_string());
        let entry = Entry::new(
            "Title.".to_string(),
            "Body".to_string(),
            vec!["work".to_string()],
            fields,
            occurred_at,
        );

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "Title.",
                "content": "Body",
                "timestamp": "2023-05-01 00:00:00",
                "tags": ["work"],
                "fields": {"mood": "good"}
            })
        );
    }

    #[test]
    fn test_record_with_null_tags_and_fields() {
        let record: EntryRecord = serde_json::from_str(
            r#"{"title":"Old.","content":"","timestamp":"2020-01-02 03:04:05","tags":null}"#,
        )
        .unwrap();
        let entry = Entry::try_from(record).unwrap();
        assert!(entry.tags().is_empty());
        assert!(entry.fields().is_empty());
        assert_eq!(entry.occurred_at().to_string(), "2020-01-02 03:04:05");
    }

    #[test]
    fn test_record_with_bad_timestamp_is_corrupt() {
        let record: EntryRecord = serde_json::from_str(
            r#"{"title":"Old.","content":"","timestamp":"yesterday-ish"}"#,
        )
        .unwrap();
        match Entry::try_from(record) {
            Err(JournalError::CorruptStore(msg)) => assert!(msg.contains("yesterday-ish")),
            other => panic!("Expected CorruptStore, got {:?}", other),
        }
    }
}
