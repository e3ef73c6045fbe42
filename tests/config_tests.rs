use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::tempdir;

use daybook::config::Config;
use daybook::errors::AppError;
use daybook::journal::DuplicatePolicy;

const VARS: [&str; 5] = [
    "DAYBOOK_DIR",
    "DAYBOOK_FILE",
    "DAYBOOK_DUPLICATES",
    "DAYBOOK_LOG_FORMAT",
    "DAYBOOK_PASSWORD",
];

/// Clears the daybook variables and returns their previous values.
fn clear_vars() -> Vec<(&'static str, Option<String>)> {
    VARS.iter()
        .map(|name| {
            let previous = env::var(name).ok();
            env::remove_var(name);
            (*name, previous)
        })
        .collect()
}

fn restore_vars(saved: Vec<(&'static str, Option<String>)>) {
    for (name, value) in saved {
        match value {
            Some(val) => env::set_var(name, val),
            None => env::remove_var(name),
        }
    }
}

#[test]
#[serial]
fn test_config_load_with_environment_vars() {
    let saved = clear_vars();
    let temp_dir = tempdir().unwrap();
    let dir_path = temp_dir.path().to_string_lossy().to_string();

    env::set_var("DAYBOOK_DIR", &dir_path);
    env::set_var("DAYBOOK_FILE", "work");
    env::set_var("DAYBOOK_DUPLICATES", "one-per-day");
    env::set_var("DAYBOOK_LOG_FORMAT", "json");
    env::set_var("DAYBOOK_PASSWORD", "secret");

    let config = Config::load().unwrap();
    assert_eq!(config.journal_dir, PathBuf::from(&dir_path));
    assert_eq!(config.journal_path(), temp_dir.path().join("work.json"));
    assert_eq!(config.duplicate_policy, DuplicatePolicy::OnePerDay);
    assert_eq!(config.log_format, "json");
    assert_eq!(config.password.as_deref(), Some("secret"));
    assert!(config.validate().is_ok());

    // The password never shows up in debug output
    assert!(!format!("{:?}", config).contains("secret"));

    restore_vars(saved);
}

#[test]
#[serial]
fn test_config_defaults_under_home() {
    let saved = clear_vars();
    let original_home = env::var("HOME").ok();
    let temp_dir = tempdir().unwrap();
    env::set_var("HOME", temp_dir.path());

    let config = Config::load().unwrap();
    assert_eq!(config.journal_dir, temp_dir.path().join(".daybook"));
    assert_eq!(config.journal_path(), temp_dir.path().join(".daybook").join("journal.json"));
    assert_eq!(config.duplicate_policy, DuplicatePolicy::Allow);
    assert_eq!(config.log_format, "text");
    assert!(config.password.is_none());

    match original_home {
        Some(val) => env::set_var("HOME", val),
        None => env::remove_var("HOME"),
    }
    restore_vars(saved);
}

#[test]
#[serial]
fn test_config_rejects_bad_values() {
    let saved = clear_vars();
    let temp_dir = tempdir().unwrap();
    env::set_var("DAYBOOK_DIR", temp_dir.path());

    env::set_var("DAYBOOK_DUPLICATES", "sometimes");
    assert!(matches!(Config::load(), Err(AppError::Config(_))));
    env::remove_var("DAYBOOK_DUPLICATES");

    env::set_var("DAYBOOK_LOG_FORMAT", "xml");
    assert!(matches!(Config::load(), Err(AppError::Config(_))));
    env::remove_var("DAYBOOK_LOG_FORMAT");

    env::set_var("DAYBOOK_FILE", "../escape.json");
    assert!(matches!(Config::load(), Err(AppError::Config(_))));

    restore_vars(saved);
}

#[test]
fn test_use_journal_switches_file() {
    let mut config = Config {
        journal_dir: PathBuf::from("/journals"),
        ..Config::default()
    };
    config.use_journal("dreams").unwrap();
    assert_eq!(config.journal_path(), PathBuf::from("/journals/dreams.json"));

    config.use_journal("travel.json").unwrap();
    assert_eq!(config.journal_path(), PathBuf::from("/journals/travel.json"));

    assert!(config.use_journal("a/b").is_err());
    assert!(config.use_journal("").is_err());
}

#[test]
#[serial]
fn test_log_format_override_skips_environment() {
    let saved = clear_vars();
    let temp_dir = tempdir().unwrap();
    env::set_var("DAYBOOK_DIR", temp_dir.path());
    env::set_var("DAYBOOK_LOG_FORMAT", "xml");

    let overridden = Config::load_with_log_format(Some("text"));
    let from_env = Config::load();

    restore_vars(saved);

    assert_eq!(overridden.unwrap().log_format, "text");
    assert!(matches!(from_env, Err(AppError::Config(_))));
}
