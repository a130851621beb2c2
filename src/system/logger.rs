use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::error::AppResult;

/// Where and how loudly the subscriber writes.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub verbose: bool,
    pub no_color: bool,
    /// The dashboard owns the terminal, so default to `warn`.
    pub ui_active: bool,
    pub log_file: Option<String>,
}

fn default_level(options: &LogOptions) -> &'static str {
    if options.verbose {
        "debug"
    } else if options.ui_active {
        "warn"
    } else {
        "info"
    }
}

fn build_filter(options: &LogOptions) -> EnvFilter {
    let fallback = default_level(options);
    std::env::var("STRESSTEA_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| EnvFilter::new(fallback),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
}

/// Installs the global `tracing` subscriber. A second call is a no-op.
///
/// # Errors
///
/// Returns an error when the log file cannot be opened.
pub fn init_logging(options: &LogOptions) -> AppResult<()> {
    let filter = build_filter(options);

    let result = if let Some(path) = options.log_file.as_deref() {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_ansi(!options.no_color)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };

    if let Err(err) = result {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, AppResult};

    #[test]
    fn init_logging_is_idempotent() -> AppResult<()> {
        let options = LogOptions::default();
        init_logging(&options)?;
        init_logging(&options)?;
        Ok(())
    }

    #[test]
    fn dashboard_defaults_to_warn() -> AppResult<()> {
        let options = LogOptions {
            ui_active: true,
            ..LogOptions::default()
        };
        if default_level(&options) != "warn" {
            return Err(AppError::validation("Expected warn while the dashboard runs"));
        }
        let verbose = LogOptions {
            verbose: true,
            ui_active: true,
            ..LogOptions::default()
        };
        if default_level(&verbose) != "debug" {
            return Err(AppError::validation("Expected verbose to win"));
        }
        Ok(())
    }
}
