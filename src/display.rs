//! Rendering query results for the terminal.
//!
//! Every function here returns a `String`; nothing is printed. Colour is
//! applied through [`Paint`], which is [`Paint::Plain`] whenever stdout is not
//! a terminal.

use crate::errors::{AppError, AppResult};
use crate::journal_core::Entry;
use crate::update::UpdateStatus;
use crossterm::style::{Color, Stylize};
use std::collections::BTreeMap;
use std::io::{self, IsTerminal};

/// How entry listings are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    /// Labelled, multi-line blocks.
    #[default]
    Pretty,
    /// One line per entry.
    Plaintext,
    /// Pretty-printed JSON array.
    Json,
}

/// What a piece of text is, which decides its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Entry timestamps.
    Date,
    /// Field labels such as `Title:`.
    Label,
    /// Tags and field keys.
    Tag,
    /// Empty results and release notices.
    Notice,
    /// Error lines.
    Failure,
}

impl Role {
    fn color(self) -> Color {
        match self {
            Role::Date => Color::Blue,
            Role::Label => Color::Green,
            Role::Tag => Color::Magenta,
            Role::Notice => Color::Yellow,
            Role::Failure => Color::Red,
        }
    }
}

/// Whether text gets terminal colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    /// ANSI colours per [`Role`].
    Colored,
    /// Text unchanged.
    Plain,
}

impl Paint {
    /// Colours only when stdout is a terminal.
    pub fn detect() -> Self {
        if io::stdout().is_terminal() {
            Paint::Colored
        } else {
            Paint::Plain
        }
    }

    /// Applies the colour for `role` to `text`.
    pub fn apply(self, role: Role, text: &str) -> String {
        match self {
            Paint::Colored => text.with(role.color()).to_string(),
            Paint::Plain => text.to_string(),
        }
    }
}

fn tag_list(entry: &Entry) -> String {
    entry
        .tags()
        .iter()
        .map(|tag| format!("+{}", tag))
        .collect::<Vec<_>>()
        .join(" ")
}

fn field_list(entry: &Entry) -> String {
    entry
        .fields()
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders entries in the requested style.
///
/// # Errors
///
/// Returns `AppError::Io` only if JSON serialization fails.
///
/// ```
/// use chrono::NaiveDate;
/// use daybook::display::{format_entries, OutputStyle, Paint};
/// use daybook::journal_core::compose;
///
/// let at = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap().and_hms_opt(9, 30, 0).unwrap();
/// let entry = compose("Wrote code. fast +work @mood=good", at).unwrap().entry;
///
/// let line = format_entries(&[&entry], OutputStyle::Plaintext, Paint::Plain).unwrap();
/// assert_eq!(line, "[2023-05-01 09:30:00] Wrote code. fast +work mood=good\n");
/// ```
pub fn format_entries(entries: &[&Entry], style: OutputStyle, paint: Paint) -> AppResult<String> {
    match style {
        OutputStyle::Json => {
            let mut json = serde_json::to_string_pretty(entries)
                .map_err(|e| AppError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
            json.push('\n');
            Ok(json)
        }
        OutputStyle::Plaintext => Ok(entries
            .iter()
            .map(|entry| {
                let parts = [
                    format!("[{}]", entry.timestamp()),
                    entry.title().to_string(),
                    entry.content().to_string(),
                    tag_list(entry),
                    field_list(entry),
                ];
                let line = parts
                    .iter()
                    .filter(|part| !part.is_empty())
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(" ");
                line + "\n"
            })
            .collect()),
        OutputStyle::Pretty => {
            let mut out = String::new();
            for entry in entries {
                out.push('\n');
                out.push_str(&format!(
                    "{} {}\n",
                    paint.apply(Role::Date, "Date:"),
                    entry.timestamp()
                ));
                out.push_str(&format!(
                    "{} {}\n",
                    paint.apply(Role::Label, "Title:"),
                    entry.title()
                ));
                out.push_str(&format!(
                    "{} {}\n",
                    paint.apply(Role::Label, "Content:"),
                    entry.content()
                ));
                out.push_str(&format!(
                    "{} {}\n",
                    paint.apply(Role::Tag, "Tags:"),
                    tag_list(entry)
                ));
                out.push_str(&format!(
                    "{} {}\n",
                    paint.apply(Role::Tag, "Fields:"),
                    field_list(entry)
                ));
            }
            Ok(out)
        }
    }
}

/// One `tag count` line per tag, alphabetically.
pub fn format_tag_histogram(histogram: &BTreeMap<String, usize>, paint: Paint) -> String {
    histogram
        .iter()
        .map(|(tag, count)| format!("{} {}\n", paint.apply(Role::Tag, tag), count))
        .collect()
}

/// One `key value` line per field, entry by entry.
pub fn format_fields(fields: &[&BTreeMap<String, String>], paint: Paint) -> String {
    fields
        .iter()
        .flat_map(|map| map.iter())
        .map(|(key, value)| format!("{} {}\n", paint.apply(Role::Tag, key), value))
        .collect()
}

/// The running version, followed by the release check outcome when known.
pub fn format_version(current: &str, status: Option<&UpdateStatus>, paint: Paint) -> String {
    let mut out = format!("{} {}\n", paint.apply(Role::Label, "Version"), current);
    match status {
        Some(UpdateStatus::UpToDate) => out.push_str("This is the newest version\n"),
        Some(UpdateStatus::Available { latest }) => out.push_str(&format!(
            "{} {}\n",
            paint.apply(Role::Notice, "Newest version:"),
            latest
        )),
        None => {}
    }
    out
}

/// A notice for an empty query result.
pub fn format_notice(message: &str, paint: Paint) -> String {
    paint.apply(Role::Notice, message)
}

/// An error line for stderr.
pub fn format_error(error: &AppError, paint: Paint) -> String {
    paint.apply(Role::Failure, &format!("Error: {}", error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal_core::compose;
    use chrono::NaiveDate;

    fn entry(text: &str) -> Entry {
        let at = NaiveDate::from_ymd_opt(2023, 5, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        compose(text, at).unwrap().entry
    }

    #[test]
    fn test_plaintext_skips_empty_parts() {
        let plain = entry("Just a title");
        let out = format_entries(&[&plain], OutputStyle::Plaintext, Paint::Plain).unwrap();
        assert_eq!(out, "[2023-05-01 09:30:00] Just a title\n");
    }

    #[test]
    fn test_plaintext_one_line_per_entry() {
        let a = entry("One. +x");
        let b = entry("Two. @k=v @a=b");
        let out = format_entries(&[&a, &b], OutputStyle::Plaintext, Paint::Plain).unwrap();
        assert_eq!(
            out,
            "[2023-05-01 09:30:00] One. +x\n[2023-05-01 09:30:00] Two. a=b k=v\n"
        );
    }

    #[test]
    fn test_pretty_layout() {
        let e = entry("Run. Five km +sport +outdoors @time=25m");
        let out = format_entries(&[&e], OutputStyle::Pretty, Paint::Plain).unwrap();
        assert_eq!(
            out,
            "\nDate: 2023-05-01 09:30:00\nTitle: Run.\nContent: Five km\nTags: +sport +outdoors\nFields: time=25m\n"
        );
    }

    #[test]
    fn test_json_is_array_of_entries() {
        let e = entry("Json. body +t");
        let out = format_entries(&[&e], OutputStyle::Json, Paint::Plain).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["title"], "Json.");
        assert_eq!(value[0]["tags"][0], "t");
        assert!(out.starts_with("[\n  {"));
    }

    #[test]
    fn test_colored_output_wraps_labels() {
        let e = entry("Color.");
        let out = format_entries(&[&e], OutputStyle::Pretty, Paint::Colored).unwrap();
        assert!(out.contains("\u{1b}["));
        assert!(out.contains("Color."));
    }

    #[test]
    fn test_tag_histogram_and_fields() {
        let mut histogram = BTreeMap::new();
        histogram.insert("work".to_string(), 2);
        histogram.insert("home".to_string(), 1);
        assert_eq!(
            format_tag_histogram(&histogram, Paint::Plain),
            "home 1\nwork 2\n"
        );

        let mut first = BTreeMap::new();
        first.insert("mood".to_string(), "good".to_string());
        let mut second = BTreeMap::new();
        second.insert("weather".to_string(), "rain".to_string());
        assert_eq!(
            format_fields(&[&first, &second], Paint::Plain),
            "mood good\nweather rain\n"
        );
    }

    #[test]
    fn test_format_version() {
        assert_eq!(format_version("1.0.0", None, Paint::Plain), "Version 1.0.0\n");
        assert_eq!(
            format_version("1.0.0", Some(&UpdateStatus::UpToDate), Paint::Plain),
            "Version 1.0.0\nThis is the newest version\n"
        );
        let available = UpdateStatus::Available {
            latest: "1.2.0".to_string(),
        };
        assert!(format_version("1.0.0", Some(&available), Paint::Plain)
            .ends_with("Newest version: 1.2.0\n"));
    }

    #[test]
    fn test_format_error_plain() {
        let error = AppError::Config("bad".to_string());
        assert_eq!(
            format_error(&error, Paint::Plain),
            "Error: Configuration error: bad"
        );
    }
}
