use std::time::Duration;

use url::Url;

use crate::args::TesterArgs;
use crate::domain::TestConfig;
use crate::error::{AppError, AppResult, ValidationError};

/// Validates merged arguments and freezes them into a [`TestConfig`].
///
/// # Errors
///
/// Returns an error when the target is missing or does not parse, or when
/// a numeric setting is zero.
pub fn build_test_config(args: &TesterArgs) -> AppResult<TestConfig> {
    let target = args
        .url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| AppError::validation(ValidationError::MissingUrl))?;

    Url::parse(target).map_err(|err| {
        AppError::validation(ValidationError::InvalidTargetUrl {
            url: target.to_owned(),
            source: err,
        })
    })?;

    if args.target_duration == Duration::ZERO {
        return Err(AppError::validation(ValidationError::MustBePositive {
            field: "duration",
        }));
    }
    if args.request_timeout == Duration::ZERO {
        return Err(AppError::validation(ValidationError::MustBePositive {
            field: "timeout",
        }));
    }

    Ok(TestConfig {
        target: target.to_owned(),
        protocol: args.protocol.to_domain(),
        method: args.method.to_method(),
        headers: args.headers.clone(),
        body: args.data.clone(),
        duration: args.target_duration,
        rate: args.rate.get(),
        concurrency: args.concurrency.get(),
        request_timeout: args.request_timeout,
    })
}
