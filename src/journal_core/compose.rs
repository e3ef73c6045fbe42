//! Turning the text of a journal line into an [`Entry`].
//!
//! The line is split into a title and content at the first delimiter, then
//! `+tag` and `@key=value` annotations are cut out of the content. Each
//! annotation is removed through the span found while scanning for it, so text
//! that merely repeats an annotation elsewhere is left alone.

use super::entry::Entry;
use crate::constants::{FIELD_MARKER, FIELD_SEPARATOR, TAG_MARKER, TITLE_DELIMITERS};
use crate::errors::{JournalError, MalformedField};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// An entry together with the non-fatal problems found while composing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedEntry {
    /// The composed entry.
    pub entry: Entry,
    /// Field fragments that were dropped because they were not `key=value`.
    pub warnings: Vec<MalformedField>,
}

/// Builds an entry from the text left after the date expression.
///
/// # Errors
///
/// Returns [`JournalError::EmptyEntry`] when `remaining` is blank.
///
/// Every `@` opens a field, so one inside prose (an email address, say)
/// takes the text up to the next `@` or the end of the line with it. That
/// text is dropped from the content and reported as a [`MalformedField`]
/// unless it happens to read as `key=value`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use daybook::journal_core::compose;
///
/// let at = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let composed = compose("Wrote code. +work +golang @mood=good", at).unwrap();
///
/// assert_eq!(composed.entry.title(), "Wrote code.");
/// assert_eq!(composed.entry.content(), "");
/// assert_eq!(composed.entry.tags(), ["work", "golang"]);
/// assert_eq!(composed.entry.fields()["mood"], "good");
/// assert!(composed.warnings.is_empty());
/// ```
pub fn compose(remaining: &str, occurred_at: NaiveDateTime) -> Result<ComposedEntry, JournalError> {
    let text = remaining.trim();
    if text.is_empty() {
        return Err(JournalError::EmptyEntry);
    }

    let (title, body) = split_title(text);
    let (body, tags) = extract_tags(body);
    let (body, fields, warnings) = extract_fields(&body);

    for warning in &warnings {
        warn!("{}", warning);
    }

    let content = collapse_spaces(&body);
    debug!(
        "Composed entry with {} tags and {} fields",
        tags.len(),
        fields.len()
    );

    Ok(ComposedEntry {
        entry: Entry::new(title.to_string(), content, tags, fields, occurred_at),
        warnings,
    })
}

/// Splits at the first title delimiter, which stays with the title.
fn split_title(text: &str) -> (&str, &str) {
    match text
        .char_indices()
        .find(|(_, c)| TITLE_DELIMITERS.contains(c))
    {
        Some((index, delimiter)) => {
            let end = index + delimiter.len_utf8();
            (text[..end].trim(), &text[end..])
        }
        None => (text, ""),
    }
}

/// Removes every `+tag` span and returns the remaining text with the tags in order.
///
/// A tag runs until whitespace or the next `+`. A bare `+` is dropped without
/// producing a tag.
fn extract_tags(body: &str) -> (String, Vec<String>) {
    let mut kept = String::with_capacity(body.len());
    let mut tags = Vec::new();
    let mut rest = body;

    while let Some(start) = rest.find(TAG_MARKER) {
        kept.push_str(&rest[..start]);
        let after = &rest[start + TAG_MARKER.len_utf8()..];
        let end = after
            .find(|c: char| c.is_whitespace() || c == TAG_MARKER)
            .unwrap_or(after.len());
        if end > 0 {
            tags.push(after[..end].to_string());
        }
        rest = &after[end..];
    }
    kept.push_str(rest);

    (kept, tags)
}

/// Removes every `@` fragment, storing those of the form `key=value`.
///
/// A fragment runs from its `@` to the next `@` or the end of the text.
fn extract_fields(body: &str) -> (String, BTreeMap<String, String>, Vec<MalformedField>) {
    let mut fragments = body.split(FIELD_MARKER);
    let kept = fragments.next().unwrap_or_default().to_string();
    let mut fields = BTreeMap::new();
    let mut warnings = Vec::new();

    for fragment in fragments {
        let mut parts = fragment.split(FIELD_SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) if !key.trim().is_empty() => {
                fields.insert(key.trim().to_string(), value.trim().to_string());
            }
            _ => warnings.push(MalformedField {
                fragment: fragment.trim().to_string(),
            }),
        }
    }

    (kept, fields, warnings)
}

/// Trims and collapses runs of spaces into one.
fn collapse_spaces(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut previous_space = false;
    for c in text.trim().chars() {
        if c == ' ' {
            if previous_space {
                continue;
            }
            previous_space = true;
        } else {
            previous_space = false;
        }
        collapsed.push(c);
    }
    collapsed
}
