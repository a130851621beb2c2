use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveU64, PositiveUsize, TesterArgs, parse_header};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, HeadersValue};

/// Applies configuration values to CLI arguments. Values the user typed on
/// the command line are left untouched.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(
    args: &mut TesterArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "url")
        && let Some(target) = config.target.clone()
    {
        args.url = Some(target);
    }

    if !is_cli(matches, "target_duration")
        && let Some(duration) = config.duration.as_ref()
    {
        args.target_duration = duration.to_duration()?;
    }

    if !is_cli(matches, "rate")
        && let Some(rate) = config.rate
    {
        args.rate = ensure_positive_u64(rate, "rate")?;
    }

    if !is_cli(matches, "concurrency")
        && let Some(concurrency) = config.concurrency
    {
        args.concurrency = ensure_positive_usize(concurrency, "concurrency")?;
    }

    if !is_cli(matches, "protocol")
        && let Some(protocol) = config.protocol
    {
        args.protocol = protocol;
    }

    if !is_cli(matches, "method")
        && let Some(method) = config.method
    {
        args.method = method;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        args.headers = parse_headers(headers)?;
    }

    if !is_cli(matches, "data")
        && let Some(body) = config.body.clone()
    {
        args.data = Some(body);
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = timeout.to_duration().map_err(|err| match err {
            AppError::Validation(source) => {
                AppError::config(ConfigError::InvalidTimeout { source })
            }
            other => other,
        })?;
    }

    if let Some(ui) = config.ui.as_ref() {
        if !is_cli(matches, "refresh_ms")
            && let Some(refresh_ms) = ui.refresh_ms
        {
            args.refresh_ms = ensure_positive_u64(refresh_ms, "ui.refresh_ms")?;
        }
        if !is_cli(matches, "no_color")
            && let Some(no_color) = ui.no_color
        {
            args.no_color = no_color;
        }
        if !is_cli(matches, "linger")
            && let Some(linger) = ui.linger
        {
            args.linger = linger;
        }
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn ensure_positive_u64(value: u64, field: &'static str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value)
        .ok()
        .ok_or_else(|| AppError::config(ConfigError::FieldMustBePositive { field }))
}

fn ensure_positive_usize(value: usize, field: &'static str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value)
        .ok()
        .ok_or_else(|| AppError::config(ConfigError::FieldMustBePositive { field }))
}

fn parse_headers(headers: &HeadersValue) -> AppResult<Vec<(String, String)>> {
    match headers {
        HeadersValue::Map(map) => Ok(map
            .iter()
            .map(|(key, value)| (key.trim().to_owned(), value.trim().to_owned()))
            .collect()),
        HeadersValue::List(lines) => {
            let mut parsed = Vec::with_capacity(lines.len());
            for line in lines {
                parsed.push(
                    parse_header(line)
                        .map_err(|err| AppError::config(ConfigError::InvalidHeader { source: err }))?,
                );
            }
            Ok(parsed)
        }
    }
}
