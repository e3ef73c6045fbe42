//! User-facing journal operations.
//!
//! `execute` applies one [`Action`](crate::cli::Action) to a loaded journal
//! and renders its result; `command` wraps it in the load and save cycle of a
//! journal file.

pub mod command;
pub mod execute;

pub use command::{run_journal_command, RunOptions};
pub use execute::{execute, Report};
