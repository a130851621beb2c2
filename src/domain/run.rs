use std::time::Duration;

use reqwest::Method;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolKind {
    Http,
    Grpc,
}

impl ProtocolKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ProtocolKind::Http => "http",
            ProtocolKind::Grpc => "grpc",
        }
    }
}

/// Resolved settings for one run. Built once by `config::build_test_config`
/// and shared behind an `Arc`; nothing mutates it after construction.
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub target: String,
    pub protocol: ProtocolKind,
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub duration: Duration,
    /// Global target rate in requests per second.
    pub rate: u64,
    /// Number of workers.
    pub concurrency: usize,
    pub request_timeout: Duration,
}

impl TestConfig {
    #[must_use]
    pub fn method_name(&self) -> &str {
        self.method.as_str()
    }
}
