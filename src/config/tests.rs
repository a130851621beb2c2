use super::types::{ConfigFile, DurationValue, HeadersValue};
use super::{apply_config, build_test_config, load_config_file};
use clap::{ArgMatches, CommandFactory, FromArgMatches};
use std::time::Duration;
use tempfile::tempdir;

use crate::args::{HttpMethod, Protocol, TesterArgs};
use crate::domain::ProtocolKind;

fn parse_with_matches(argv: &[&str]) -> Result<(TesterArgs, ArgMatches), String> {
    let matches = TesterArgs::command()
        .try_get_matches_from(argv)
        .map_err(|err| format!("parse failed: {}", err))?;
    let args = TesterArgs::from_arg_matches(&matches)
        .map_err(|err| format!("from_arg_matches failed: {}", err))?;
    Ok((args, matches))
}

#[test]
fn parse_toml_config_with_ui_table() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("stresstea.toml");
    let content = r#"
target = "http://localhost:3000/health"
duration = "2m"
rate = 250
concurrent = 8
method = "post"
body = "{}"
timeout = "500ms"

[headers]
"Content-Type" = "application/json"

[ui]
refresh_ms = 250
linger = true
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.target.as_deref() != Some("http://localhost:3000/health") {
        return Err("Unexpected target".to_owned());
    }
    if config.concurrency != Some(8) {
        return Err("Expected concurrent alias to populate concurrency".to_owned());
    }
    if config.method != Some(HttpMethod::Post) {
        return Err("Unexpected method".to_owned());
    }
    match config.headers.as_ref() {
        Some(HeadersValue::Map(map)) if map.len() == 1 => {}
        other => return Err(format!("Unexpected headers: {:?}", other)),
    }
    let ui = config.ui.as_ref().ok_or_else(|| "Expected ui".to_owned())?;
    if ui.refresh_ms != Some(250) || ui.linger != Some(true) {
        return Err("Unexpected ui table".to_owned());
    }
    Ok(())
}

#[test]
fn parse_json_config_with_header_list() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("stresstea.json");
    let content = r#"{
  "url": "http://localhost:8080",
  "duration": 5,
  "protocol": "grpc",
  "headers": ["X-One: 1", "X-Two: 2"]
}"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.protocol != Some(Protocol::Grpc) {
        return Err("Unexpected protocol".to_owned());
    }
    match config.duration {
        Some(DurationValue::Seconds(5)) => {}
        other => return Err(format!("Unexpected duration: {:?}", other)),
    }
    match config.headers {
        Some(HeadersValue::List(lines)) if lines.len() == 2 => Ok(()),
        other => Err(format!("Unexpected headers: {:?}", other)),
    }
}

#[test]
fn load_config_rejects_unknown_extension() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("stresstea.yaml");
    std::fs::write(&path, "rate: 1").map_err(|err| format!("write failed: {}", err))?;
    match load_config_file(&path) {
        Ok(_) => Err("Expected unsupported extension".to_owned()),
        Err(err) if err.to_string().contains("yaml") => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
    }
}

#[test]
fn load_config_rejects_unknown_keys() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("stresstea.toml");
    std::fs::write(&path, "burst = 10\n").map_err(|err| format!("write failed: {}", err))?;
    if load_config_file(&path).is_ok() {
        return Err("Expected unknown key to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn cli_values_take_precedence_over_config() -> Result<(), String> {
    let (mut args, matches) =
        parse_with_matches(&["stresstea", "-u", "http://cli.local", "--rate", "42"])?;
    let config = ConfigFile {
        target: Some("http://config.local".to_owned()),
        rate: Some(7),
        concurrency: Some(3),
        ..ConfigFile::default()
    };

    apply_config(&mut args, &matches, &config).map_err(|err| err.to_string())?;

    if args.url.as_deref() != Some("http://cli.local") {
        return Err("CLI url should win".to_owned());
    }
    if args.rate.get() != 42 {
        return Err("CLI rate should win".to_owned());
    }
    if args.concurrency.get() != 3 {
        return Err("Config concurrency should fill the default".to_owned());
    }
    Ok(())
}

#[test]
fn apply_config_rejects_zero_rate() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&["stresstea", "-u", "http://localhost"])?;
    let config = ConfigFile {
        rate: Some(0),
        ..ConfigFile::default()
    };
    match apply_config(&mut args, &matches, &config) {
        Ok(()) => Err("Expected zero rate to be rejected".to_owned()),
        Err(_) => Ok(()),
    }
}

#[test]
fn apply_config_rejects_bad_header_line() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&["stresstea", "-u", "http://localhost"])?;
    let config = ConfigFile {
        headers: Some(HeadersValue::List(vec!["missing-colon".to_owned()])),
        ..ConfigFile::default()
    };
    match apply_config(&mut args, &matches, &config) {
        Ok(()) => Err("Expected header error".to_owned()),
        Err(err) if err.to_string().contains("header") => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
    }
}

#[test]
fn build_test_config_requires_url() -> Result<(), String> {
    let (args, _) = parse_with_matches(&["stresstea"])?;
    match build_test_config(&args) {
        Ok(_) => Err("Expected missing URL error".to_owned()),
        Err(err) if err.to_string().contains("Missing URL") => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
    }
}

#[test]
fn build_test_config_rejects_unparseable_url() -> Result<(), String> {
    let (args, _) = parse_with_matches(&["stresstea", "-u", "not a url"])?;
    if build_test_config(&args).is_ok() {
        return Err("Expected invalid URL error".to_owned());
    }
    Ok(())
}

#[test]
fn build_test_config_resolves_fields() -> Result<(), String> {
    let (args, _) = parse_with_matches(&[
        "stresstea",
        "-u",
        "http://localhost:9000/api",
        "-t",
        "3",
        "-r",
        "20",
        "-c",
        "4",
        "-X",
        "put",
        "-d",
        "payload",
        "--timeout",
        "750ms",
    ])?;
    let config = build_test_config(&args).map_err(|err| err.to_string())?;

    if config.duration != Duration::from_secs(3) {
        return Err("Unexpected duration".to_owned());
    }
    if config.rate != 20 || config.concurrency != 4 {
        return Err("Unexpected rate or concurrency".to_owned());
    }
    if config.method_name() != "PUT" {
        return Err(format!("Unexpected method: {}", config.method_name()));
    }
    if config.body.as_deref() != Some("payload") {
        return Err("Unexpected body".to_owned());
    }
    if config.protocol != ProtocolKind::Http {
        return Err("Unexpected protocol".to_owned());
    }
    if config.request_timeout != Duration::from_millis(750) {
        return Err("Unexpected timeout".to_owned());
    }
    Ok(())
}
