//! Process entry: argument parsing, config layering, logging, and the
//! runtime that drives one run.
use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app::{self, RunOptions};
use crate::args::TesterArgs;
use crate::domain::TestStatus;
use crate::error::{AppError, AppResult, TransportError};
use crate::system::logger::{LogOptions, init_logging};

/// Default config filenames checked when no CLI args are provided.
const DEFAULT_CONFIG_FILES: [&str; 2] = ["stresstea.toml", "stresstea.json"];

/// Parses the command line, runs the test, and prints the summary.
///
/// # Errors
///
/// Returns an error for invalid arguments or configuration, for setup
/// failures, and when the run itself ends in the error state.
pub fn run() -> AppResult<()> {
    let (mut args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };
    apply_config(&mut args, &matches)?;
    let config = Arc::new(crate::config::build_test_config(&args)?);

    let headless = args.no_ui || !std::io::stdout().is_terminal();
    init_logging(&LogOptions {
        verbose: args.verbose,
        no_color: args.no_color,
        ui_active: !headless,
        log_file: args.log_file.clone(),
    })?;
    if headless && !args.no_ui {
        tracing::info!("UI disabled because stdout is not a TTY.");
    }

    let options = RunOptions {
        headless,
        no_color: args.no_color,
        refresh: Duration::from_millis(args.refresh_ms.get()),
        linger: args.linger && !headless,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let outcome = runtime.block_on(app::run(config, options))?;

    app::print_summary(&outcome);
    if outcome.status == TestStatus::Error {
        return Err(AppError::transport(TransportError::PoolFailed {
            reason: outcome
                .failure
                .unwrap_or_else(|| "run ended in error state".to_owned()),
        }));
    }
    Ok(())
}

fn parse_args() -> AppResult<Option<(TesterArgs, ArgMatches)>> {
    let mut cmd = TesterArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = TesterArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

fn apply_config(args: &mut TesterArgs, matches: &ArgMatches) -> AppResult<()> {
    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(args, matches, &config)?;
    }
    Ok(())
}
