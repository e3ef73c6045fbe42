#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub const TEST_PASSWORD: &str = "test-password";

/// Creates a `Command` for the `daybook` binary with a clean, non-interactive
/// environment pointed at `journal_dir`.
pub fn base_daybook_command(journal_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("daybook").expect("daybook binary not built");
    configure_daybook_command(&mut cmd, journal_dir);
    cmd
}

/// Applies the standard non-interactive environment to an existing `Command`.
pub fn configure_daybook_command(cmd: &mut Command, journal_dir: &Path) {
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
        cmd.env("PATH", path);
    }
    if let Ok(tmpdir) = std::env::var("TMPDIR") {
        cmd.env("TMPDIR", tmpdir);
    }
    cmd.env("HOME", journal_dir)
        .env("DAYBOOK_DIR", journal_dir)
        .env("DAYBOOK_PASSWORD", TEST_PASSWORD);
}
