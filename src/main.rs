/*!
# Daybook - A One-Line Journal

This file contains the main application flow: it parses the command line,
loads configuration, installs logging and hands the requested action to the
journal operations, printing whatever they produce.

## Usage

```
daybook [OPTIONS] [TEXT]...

  daybook yesterday 18.30 Dinner with Sam. Pasta +friends @place=home
  daybook --show 2023-05
  daybook --show all --from 2023-01-01 --to 2023-02-01
  daybook --searchtags friends
  daybook --remove today
  daybook --encrypt
```

## Configuration

- `DAYBOOK_DIR`: directory holding the journals (defaults to `~/.daybook`)
- `DAYBOOK_FILE`: journal file name (defaults to `journal.json`)
- `DAYBOOK_DUPLICATES`: `allow` or `one-per-day`
- `DAYBOOK_LOG_FORMAT`: `text` or `json`
- `DAYBOOK_PASSWORD`: password for encrypted journals, skips the prompt
- `RUST_LOG`: overrides the log filter
*/

use chrono::Local;
use clap::CommandFactory;
use daybook::cli::{Action, CliArgs};
use daybook::config::Config;
use daybook::constants::{
    DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON, REPOSITORY_URL, VERBOSE_LOG_LEVEL,
};
use daybook::display::{self, Paint};
use daybook::errors::AppResult;
use daybook::ops::{run_journal_command, RunOptions};
use daybook::update::ReleaseClient;
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

fn install_tracing(verbose: bool, format: &str) {
    // RUST_LOG wins over the verbosity flag.
    let level = if verbose {
        VERBOSE_LOG_LEVEL
    } else {
        DEFAULT_LOG_LEVEL
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let _ = if format == LOG_FORMAT_JSON {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}

fn check_update(paint: Paint) -> String {
    let current = env!("CARGO_PKG_VERSION");
    let status = ReleaseClient::new(REPOSITORY_URL).and_then(|client| client.check(current));
    match status {
        Ok(status) => display::format_version(current, Some(&status), paint),
        Err(e) => {
            warn!("Release check failed: {}", e);
            format!(
                "{}{}\n",
                display::format_version(current, None, paint),
                display::format_notice(&e.to_string(), paint)
            )
        }
    }
}

fn run(args: &CliArgs, paint: Paint) -> AppResult<()> {
    let mut config = Config::load_with_log_format(args.log_format.as_deref())?;
    install_tracing(args.verbose, &config.log_format);
    debug!("CLI arguments: {:?}", args);
    debug!("Configuration: {:?}", config);

    let action = args.action()?;
    match action {
        Action::Help => {
            CliArgs::command().print_help()?;
            return Ok(());
        }
        Action::CheckUpdate => {
            print!("{}", check_update(paint));
            return Ok(());
        }
        _ => {}
    }

    if let Some(name) = &args.use_journal {
        config.use_journal(name)?;
    }

    let options = RunOptions {
        storage: args.storage_change(),
        style: args.output_style(),
        paint,
    };
    info!("Running {:?}", action);
    let report = run_journal_command(&action, &config, options, Local::now())?;
    print!("{}", report.output);
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let paint = Paint::detect();

    match run(&args, paint) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_not_found() => {
            println!("{}", display::format_notice(&e.to_string(), paint));
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("{}", display::format_error(&e, paint));
            ExitCode::from(2)
        }
    }
}
