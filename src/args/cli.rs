use clap::Parser;
use std::time::Duration;

use super::parsers::{parse_duration_arg, parse_header, parse_positive_u64, parse_positive_usize};
use super::types::{HttpMethod, PositiveU64, PositiveUsize, Protocol};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Rate-controlled HTTP load generator with a live terminal dashboard."
)]
pub struct TesterArgs {
    /// Target URL (or set `target` in the config file)
    #[arg(long, short)]
    pub url: Option<String>,

    /// Duration of test (bare seconds, or with ms/s/m/h suffix)
    #[arg(
        long = "duration",
        short = 't',
        default_value = "30",
        value_parser = parse_duration_arg
    )]
    pub target_duration: Duration,

    /// Global target rate in requests per second
    #[arg(long = "rate", short = 'r', default_value = "100", value_parser = parse_positive_u64)]
    pub rate: PositiveU64,

    /// Number of concurrent workers
    #[arg(
        long = "concurrency",
        short = 'c',
        alias = "concurrent",
        default_value = "10",
        value_parser = parse_positive_usize
    )]
    pub concurrency: PositiveUsize,

    /// Transport protocol
    #[arg(long, short = 'p', default_value = "http", ignore_case = true)]
    pub protocol: Protocol,

    /// HTTP method to use
    #[arg(long, short = 'X', default_value = "get", ignore_case = true)]
    pub method: HttpMethod,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request body
    #[arg(long, short = 'd')]
    pub data: Option<String>,

    /// Request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", default_value = "30s", value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Path to a TOML or JSON config file
    #[arg(long, short = 'f')]
    pub config: Option<String>,

    /// Disable the dashboard and log progress instead
    #[arg(long = "no-ui")]
    pub no_ui: bool,

    /// Disable colored output
    #[arg(long = "no-color", env = "NO_COLOR")]
    pub no_color: bool,

    /// Dashboard refresh interval in milliseconds
    #[arg(long = "refresh-ms", default_value = "100", value_parser = parse_positive_u64)]
    pub refresh_ms: PositiveU64,

    /// Keep the dashboard open after the run ends until 'q' is pressed
    #[arg(long)]
    pub linger: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long = "log-file")]
    pub log_file: Option<String>,
}
