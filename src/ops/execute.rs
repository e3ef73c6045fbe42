//! Applying one command-line action to a journal.

use crate::cli::{Action, Scope};
use crate::display::{self, OutputStyle, Paint};
use crate::errors::{AppError, AppResult, MalformedField};
use crate::journal::Journal;
use crate::journal_core::Entry;
use chrono::NaiveDateTime;
use tracing::{debug, info};

/// What an action produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    /// Text for stdout.
    pub output: String,
    /// Field fragments dropped while composing a new entry.
    pub warnings: Vec<MalformedField>,
    /// Number of entries added or removed.
    pub changed: usize,
}

/// Applies `action` to `journal`.
///
/// Queries render their results into [`Report::output`]; mutations leave it
/// empty. On error the journal is left as it was.
///
/// # Errors
///
/// Propagates the journal errors of the underlying operation, including
/// `NotFound` for empty results. [`Action::CheckUpdate`] and [`Action::Help`]
/// do not touch a journal and are rejected with `AppError::Config`.
pub fn execute(
    action: &Action,
    journal: &mut Journal,
    now: NaiveDateTime,
    style: OutputStyle,
    paint: Paint,
) -> AppResult<Report> {
    debug!("Executing {:?}", action);

    let report = match action {
        Action::Add(text) => {
            let warnings = journal.add_from_text(text, now)?;
            info!("Added entry");
            Report {
                warnings,
                changed: 1,
                ..Report::default()
            }
        }
        Action::Remove(scope) => {
            let changed = match scope {
                Scope::All => {
                    let count = journal.len();
                    journal.remove_all();
                    count
                }
                Scope::Range { from, to } => journal.remove_range(from, to)?,
                Scope::Expression(expression) => journal.remove_by_expression(expression, now)?,
            };
            Report {
                changed,
                ..Report::default()
            }
        }
        Action::Show(scope) => {
            let entries: Vec<&Entry> = match scope {
                Scope::All => journal.all()?.iter().collect(),
                Scope::Range { from, to } => journal.find_range(from, to)?,
                Scope::Expression(expression) => journal.find_by_expression(expression, now)?,
            };
            listing(display::format_entries(&entries, style, paint)?)
        }
        Action::Search(keywords) => {
            let entries = journal.find_by_keywords(keywords)?;
            listing(display::format_entries(&entries, style, paint)?)
        }
        Action::SearchTags(tags) => {
            let entries = journal.find_by_tags(tags)?;
            listing(display::format_entries(&entries, style, paint)?)
        }
        Action::SearchFields(keys) => {
            let entries = journal.find_by_fields(keys)?;
            listing(display::format_entries(&entries, style, paint)?)
        }
        Action::Tags => listing(display::format_tag_histogram(
            &journal.tag_histogram()?,
            paint,
        )),
        Action::Fields => listing(display::format_fields(&journal.field_values()?, paint)),
        Action::Rewrite => Report::default(),
        Action::CheckUpdate | Action::Help => {
            return Err(AppError::Config(format!(
                "{:?} does not operate on a journal",
                action
            )))
        }
    };

    Ok(report)
}

fn listing(output: String) -> Report {
    Report {
        output,
        ..Report::default()
    }
}
