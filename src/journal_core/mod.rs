//! Core journal functionality without I/O operations.
//!
//! This module contains the pure logic behind a journal line: recognising the
//! date expression it starts with, splitting the rest into title, content, tags
//! and fields, and comparing instants at a given resolution. Nothing here
//! touches the filesystem or the terminal.
//!
//! ```
//! use chrono::NaiveDate;
//! use daybook::journal_core::{compose, parse_date_expression, Resolution};
//!
//! let now = NaiveDate::from_ymd_opt(2024, 1, 15)
//!     .unwrap()
//!     .and_hms_opt(14, 30, 0)
//!     .unwrap();
//!
//! let parsed = parse_date_expression("2023-05-01 09.30 Wrote code. +work", now);
//! assert_eq!(parsed.resolution, Resolution::Minute);
//!
//! let composed = compose(&parsed.remaining, parsed.occurred_at).unwrap();
//! assert_eq!(composed.entry.title(), "Wrote code.");
//! assert_eq!(composed.entry.tags(), ["work"]);
//! ```

pub mod compose;
pub mod date_expr;
pub mod entry;
pub mod matching;

pub use compose::{compose, ComposedEntry};
pub use date_expr::{parse_date_expression, parse_plain_date, ParsedDate, Resolution};
pub use entry::Entry;
