use super::*;
use crate::error::{AppError, AppResult};
use clap::Parser;
use std::time::Duration;

#[test]
fn parse_args_defaults() -> AppResult<()> {
    let args = TesterArgs::try_parse_from(["stresstea", "-u", "http://localhost"])
        .map_err(|err| AppError::validation(format!("Expected parse success: {}", err)))?;

    if args.target_duration != Duration::from_secs(30) {
        return Err(AppError::validation("Unexpected default duration"));
    }
    if args.rate.get() != 100 {
        return Err(AppError::validation("Unexpected default rate"));
    }
    if args.concurrency.get() != 10 {
        return Err(AppError::validation("Unexpected default concurrency"));
    }
    if args.protocol != Protocol::Http {
        return Err(AppError::validation("Expected Protocol::Http"));
    }
    if args.method != HttpMethod::Get {
        return Err(AppError::validation("Expected HttpMethod::Get"));
    }
    if args.request_timeout != Duration::from_secs(30) {
        return Err(AppError::validation("Unexpected default timeout"));
    }
    if args.refresh_ms.get() != 100 {
        return Err(AppError::validation("Unexpected default refresh_ms"));
    }
    if args.no_ui || args.linger || args.verbose {
        return Err(AppError::validation("Expected boolean flags to be off"));
    }
    Ok(())
}

#[test]
fn parse_args_concurrent_alias() -> AppResult<()> {
    let args =
        TesterArgs::try_parse_from(["stresstea", "-u", "http://localhost", "--concurrent", "7"])
            .map_err(|err| AppError::validation(format!("Expected Ok, got Err: {}", err)))?;
    if args.concurrency.get() != 7 {
        return Err(AppError::validation("Unexpected concurrency"));
    }
    Ok(())
}

#[test]
fn parse_args_protocol_and_method_ignore_case() -> AppResult<()> {
    let args = TesterArgs::try_parse_from([
        "stresstea",
        "-u",
        "http://localhost",
        "--protocol",
        "GRPC",
        "-X",
        "Post",
    ])
    .map_err(|err| AppError::validation(format!("Expected parse success: {}", err)))?;

    if args.protocol != Protocol::Grpc {
        return Err(AppError::validation("Expected Protocol::Grpc"));
    }
    if args.method.to_method() != reqwest::Method::POST {
        return Err(AppError::validation("Expected POST"));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_zero_rate() -> AppResult<()> {
    match TesterArgs::try_parse_from(["stresstea", "-u", "http://localhost", "--rate", "0"]) {
        Ok(_) => Err(AppError::validation("Expected zero rate to be rejected")),
        Err(_) => Ok(()),
    }
}

#[test]
fn parse_args_rejects_zero_concurrency() -> AppResult<()> {
    match TesterArgs::try_parse_from(["stresstea", "-u", "http://localhost", "-c", "0"]) {
        Ok(_) => Err(AppError::validation(
            "Expected zero concurrency to be rejected",
        )),
        Err(_) => Ok(()),
    }
}

#[test]
fn parse_args_rejects_unknown_protocol() -> AppResult<()> {
    match TesterArgs::try_parse_from(["stresstea", "-u", "http://localhost", "-p", "ftp"]) {
        Ok(_) => Err(AppError::validation("Expected unknown protocol error")),
        Err(_) => Ok(()),
    }
}

#[test]
fn parse_args_collects_headers() -> AppResult<()> {
    let args = TesterArgs::try_parse_from([
        "stresstea",
        "-u",
        "http://localhost",
        "-H",
        "Content-Type: application/json",
        "-H",
        "X-Trace:abc",
    ])
    .map_err(|err| AppError::validation(format!("Expected parse success: {}", err)))?;

    let expected = vec![
        ("Content-Type".to_owned(), "application/json".to_owned()),
        ("X-Trace".to_owned(), "abc".to_owned()),
    ];
    if args.headers != expected {
        return Err(AppError::validation(format!(
            "Unexpected headers: {:?}",
            args.headers
        )));
    }
    Ok(())
}

#[test]
fn parse_header_rejects_missing_colon() -> AppResult<()> {
    match parse_header("NoColonHere") {
        Ok(_) => Err(AppError::validation("Expected header parse failure")),
        Err(_) => Ok(()),
    }
}

#[test]
fn parse_header_rejects_empty_key() -> AppResult<()> {
    match parse_header(": value") {
        Ok(_) => Err(AppError::validation("Expected empty key to be rejected")),
        Err(_) => Ok(()),
    }
}

#[test]
fn parse_duration_arg_units() -> AppResult<()> {
    let cases = [
        ("250ms", Duration::from_millis(250)),
        ("10s", Duration::from_secs(10)),
        ("2m", Duration::from_secs(120)),
        ("1h", Duration::from_secs(3600)),
        ("15", Duration::from_secs(15)),
    ];
    for (input, expected) in cases {
        let parsed = parse_duration_arg(input)?;
        if parsed != expected {
            return Err(AppError::validation(format!(
                "Unexpected duration for {}: {:?}",
                input, parsed
            )));
        }
    }
    Ok(())
}

#[test]
fn parse_duration_arg_rejects_bad_input() -> AppResult<()> {
    for input in ["", "ms", "10d", "0s"] {
        if parse_duration_arg(input).is_ok() {
            return Err(AppError::validation(format!(
                "Expected duration '{}' to be rejected",
                input
            )));
        }
    }
    Ok(())
}
