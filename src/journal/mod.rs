//! The in-memory journal: an ordered collection of entries with its queries.
//!
//! Entries are kept sorted ascending by [`Entry::occurred_at`]; every mutation
//! re-establishes that order before returning. Removal and lookup by date are
//! scoped by a [`Resolution`]: a day, a month (of a given year) or a year.
//!
//! The journal knows nothing about files or encryption; see
//! [`crate::journal_io`] for persistence.


use crate::errors::{JournalError, MalformedField};
use crate::journal_core::matching::{matches_at, same_day, strictly_between};
use crate::journal_core::{compose, parse_date_expression, parse_plain_date, Entry, Resolution};
use chrono::NaiveDateTime;
use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;
use tracing::{debug, info};

/// Whether more than one entry may share a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Any number of entries per day.
    #[default]
    Allow,
    /// At most one entry per calendar day; further inserts fail.
    OnePerDay,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "allow" => Ok(DuplicatePolicy::Allow),
            "one-per-day" => Ok(DuplicatePolicy::OnePerDay),
            other => Err(format!(
                "unknown duplicate policy '{}', expected 'allow' or 'one-per-day'",
                other
            )),
        }
    }
}

/// A journal and its metadata.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use daybook::journal::Journal;
///
/// let now = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(14, 30, 0).unwrap();
/// let mut journal = Journal::new("2024-01-15T14:30:00+00:00");
///
/// journal.add_from_text("yesterday Long walk. +outdoors", now).unwrap();
/// journal.add_from_text("2023-12-24 Family dinner. @guests=8", now).unwrap();
///
/// let outdoors = journal.find_by_tags(&["outdoors"]).unwrap();
/// assert_eq!(outdoors.len(), 1);
/// assert_eq!(journal.entries()[0].title(), "Family dinner.");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Journal {
    entries: Vec<Entry>,
    created: String,
    last_loaded: String,
    version: String,
    duplicate_policy: DuplicatePolicy,
}

impl Journal {
    /// Creates an empty journal stamped with `created` and the running version.
    pub fn new(created: impl Into<String>) -> Self {
        let created = created.into();
        Journal {
            entries: Vec::new(),
            last_loaded: created.clone(),
            created,
            version: env!("CARGO_PKG_VERSION").to_string(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }

    /// Rebuilds a journal from stored parts, restoring the sort order.
    pub fn from_parts(
        mut entries: Vec<Entry>,
        created: String,
        last_loaded: String,
        version: String,
    ) -> Self {
        entries.sort_by_key(Entry::occurred_at);
        Journal {
            entries,
            created,
            last_loaded,
            version,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }

    /// Sets the duplicate-entry policy applied by [`Journal::insert`].
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Records when the journal was last loaded.
    pub fn mark_loaded(&mut self, at: impl Into<String>) {
        self.last_loaded = at.into();
    }

    /// All entries, oldest first. Never fails, unlike [`Journal::all`].
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the journal holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// When the journal was first created.
    pub fn created(&self) -> &str {
        &self.created
    }

    /// When the journal was last loaded.
    pub fn last_loaded(&self) -> &str {
        &self.last_loaded
    }

    /// Version of the program that created the journal.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Inserts an entry, keeping entries sorted by time.
    ///
    /// Entries with equal timestamps keep their insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::DuplicateDay`] under [`DuplicatePolicy::OnePerDay`]
    /// when an entry already exists on the same day.
    pub fn insert(&mut self, entry: Entry) -> Result<(), JournalError> {
        if self.duplicate_policy == DuplicatePolicy::OnePerDay
            && self
                .entries
                .iter()
                .any(|existing| same_day(existing.occurred_at(), entry.occurred_at()))
        {
            return Err(JournalError::DuplicateDay(
                entry.occurred_at().date().to_string(),
            ));
        }

        debug!("Inserting entry dated {}", entry.timestamp());
        self.entries.push(entry);
        self.entries.sort_by_key(Entry::occurred_at);
        Ok(())
    }

    /// Parses a journal line, composes the entry and inserts it.
    ///
    /// Returns the malformed-field warnings raised while composing.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::EmptyEntry`] when nothing follows the date, or
    /// [`JournalError::DuplicateDay`] as for [`Journal::insert`].
    pub fn add_from_text(
        &mut self,
        raw: &str,
        now: NaiveDateTime,
    ) -> Result<Vec<MalformedField>, JournalError> {
        let parsed = parse_date_expression(raw, now);
        let composed = compose(&parsed.remaining, parsed.occurred_at)?;
        self.insert(composed.entry)?;
        Ok(composed.warnings)
    }

    /// Removes every entry matching `target` at the given resolution.
    ///
    /// Returns the number of entries removed.
    ///
    /// # Errors
    ///
    /// - [`JournalError::InvalidRemovalScope`] unless the resolution is day, month or year
    /// - [`JournalError::NotFound`] when nothing matched; the journal is unchanged
    pub fn remove_matching(
        &mut self,
        target: NaiveDateTime,
        resolution: Resolution,
    ) -> Result<usize, JournalError> {
        let resolution = period_scope(resolution, resolution.as_str())?;
        let before = self.entries.len();
        self.entries
            .retain(|entry| matches_at(entry.occurred_at(), target, resolution) != Some(true));
        finish_removal(before, self.entries.len(), "entry not found")
    }

    /// Removes every entry strictly between the midnights of two `YYYY-MM-DD` dates.
    ///
    /// # Errors
    ///
    /// - [`JournalError::InvalidRange`] when a bound does not parse
    /// - [`JournalError::NotFound`] when nothing was in range
    pub fn remove_range(&mut self, start: &str, end: &str) -> Result<usize, JournalError> {
        let (start, end) = parse_range(start, end)?;
        let before = self.entries.len();
        self.entries
            .retain(|entry| !strictly_between(entry.occurred_at(), start, end));
        finish_removal(before, self.entries.len(), "entries not found")
    }

    /// Removes every entry.
    pub fn remove_all(&mut self) {
        info!("Removing all {} entries", self.entries.len());
        self.entries.clear();
    }

    /// Entries matching `target` at the given resolution.
    ///
    /// # Errors
    ///
    /// As for [`Journal::remove_matching`].
    pub fn find_matching(
        &self,
        target: NaiveDateTime,
        resolution: Resolution,
    ) -> Result<Vec<&Entry>, JournalError> {
        let resolution = period_scope(resolution, resolution.as_str())?;
        let found = self
            .entries
            .iter()
            .filter(|entry| matches_at(entry.occurred_at(), target, resolution) == Some(true))
            .collect();
        non_empty(found, "no entries found")
    }

    /// Entries strictly between the midnights of two `YYYY-MM-DD` dates.
    ///
    /// # Errors
    ///
    /// As for [`Journal::remove_range`].
    pub fn find_range(&self, start: &str, end: &str) -> Result<Vec<&Entry>, JournalError> {
        let (start, end) = parse_range(start, end)?;
        let found = self
            .entries
            .iter()
            .filter(|entry| strictly_between(entry.occurred_at(), start, end))
            .collect();
        non_empty(found, "no entries found between those dates")
    }

    /// Entries whose title or content contains any keyword (case-sensitive).
    ///
    /// Each matching entry appears once.
    pub fn find_by_keywords<S: AsRef<str>>(
        &self,
        keywords: &[S],
    ) -> Result<Vec<&Entry>, JournalError> {
        let found = self
            .entries
            .iter()
            .filter(|entry| {
                keywords.iter().any(|keyword| {
                    let keyword = keyword.as_ref();
                    entry.title().contains(keyword) || entry.content().contains(keyword)
                })
            })
            .collect();
        non_empty(found, "no entries found with the keyword")
    }

    /// Entries carrying at least one of `tags`.
    pub fn find_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> Result<Vec<&Entry>, JournalError> {
        let wanted: HashSet<&str> = tags.iter().map(|tag| tag.as_ref()).collect();
        let found = self
            .entries
            .iter()
            .filter(|entry| entry.tags().iter().any(|tag| wanted.contains(tag.as_str())))
            .collect();
        non_empty(found, "no entries found with the tag")
    }

    /// Entries defining at least one of the field `keys`, whatever the value.
    pub fn find_by_fields<S: AsRef<str>>(&self, keys: &[S]) -> Result<Vec<&Entry>, JournalError> {
        let found = self
            .entries
            .iter()
            .filter(|entry| keys.iter().any(|key| entry.fields().contains_key(key.as_ref())))
            .collect();
        non_empty(found, "no entries found with the field")
    }

    /// Every entry, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::NotFound`] when the journal is empty.
    pub fn all(&self) -> Result<&[Entry], JournalError> {
        if self.entries.is_empty() {
            return Err(JournalError::NotFound("no entries found".to_string()));
        }
        Ok(&self.entries)
    }

    /// How many times each tag is used across all entries.
    pub fn tag_histogram(&self) -> Result<BTreeMap<String, usize>, JournalError> {
        let mut histogram = BTreeMap::new();
        for tag in self.entries.iter().flat_map(|entry| entry.tags()) {
            *histogram.entry(tag.clone()).or_insert(0) += 1;
        }

        if histogram.is_empty() {
            return Err(JournalError::NotFound("no tags found".to_string()));
        }
        Ok(histogram)
    }

    /// The field map of every entry that has fields, oldest first.
    pub fn field_values(&self) -> Result<Vec<&BTreeMap<String, String>>, JournalError> {
        let found = self
            .entries
            .iter()
            .map(Entry::fields)
            .filter(|fields| !fields.is_empty())
            .collect();
        non_empty(found, "no fields found")
    }

    /// Entries selected by a date expression such as `2023-05`, `yesterday` or `friday`.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::InvalidRemovalScope`] when the expression is not a
    /// date or carries a time, and [`JournalError::NotFound`] on no match.
    pub fn find_by_expression(
        &self,
        expression: &str,
        now: NaiveDateTime,
    ) -> Result<Vec<&Entry>, JournalError> {
        let (target, resolution) = resolve_scope(expression, now)?;
        self.find_matching(target, resolution)
    }

    /// Removes the entries selected by a date expression.
    ///
    /// # Errors
    ///
    /// As for [`Journal::find_by_expression`].
    pub fn remove_by_expression(
        &mut self,
        expression: &str,
        now: NaiveDateTime,
    ) -> Result<usize, JournalError> {
        let (target, resolution) = resolve_scope(expression, now)?;
        self.remove_matching(target, resolution)
    }
}

fn resolve_scope(
    expression: &str,
    now: NaiveDateTime,
) -> Result<(NaiveDateTime, Resolution), JournalError> {
    let parsed = parse_date_expression(expression, now);
    let resolution = period_scope(parsed.resolution, expression)?;
    Ok((parsed.occurred_at, resolution))
}

/// Accepts only resolutions that select a whole calendar period.
fn period_scope(resolution: Resolution, shown_as: &str) -> Result<Resolution, JournalError> {
    match resolution {
        Resolution::Day | Resolution::Month | Resolution::Year => Ok(resolution),
        Resolution::Minute | Resolution::Unresolved => {
            Err(JournalError::InvalidRemovalScope(shown_as.to_string()))
        }
    }
}

fn parse_range(start: &str, end: &str) -> Result<(NaiveDateTime, NaiveDateTime), JournalError> {
    let bound = |name: &'static str, value: &str| {
        parse_plain_date(value)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or_else(|| JournalError::InvalidRange {
                bound: name,
                value: value.to_string(),
            })
    };
    Ok((bound("start", start)?, bound("end", end)?))
}

fn finish_removal(before: usize, after: usize, message: &str) -> Result<usize, JournalError> {
    let removed = before - after;
    if removed == 0 {
        return Err(JournalError::NotFound(message.to_string()));
    }
    info!("Removed {} entries", removed);
    Ok(removed)
}

fn non_empty<T>(found: Vec<T>, message: &str) -> Result<Vec<T>, JournalError> {
    if found.is_empty() {
        return Err(JournalError::NotFound(message.to_string()));
    }
    Ok(found)
}
