use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Url};
use tokio::time::Instant;

use crate::domain::{ProtocolKind, TestConfig};
use crate::error::{AppError, AppResult, TransportError};
use crate::metrics::ExchangeResult;

use super::Transport;

const IDLE_TIMEOUT: Duration = Duration::from_secs(90);
const DEFAULT_USER_AGENT: &str = concat!("stresstea/", env!("CARGO_PKG_VERSION"));

/// HTTP transport sharing one pooled `reqwest::Client` across workers.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<String>,
}

impl HttpTransport {
    /// Builds the client and validates target and headers.
    ///
    /// # Errors
    ///
    /// Returns an error for unparseable URLs, non-HTTP schemes, invalid
    /// header names or values, and client construction failures.
    pub fn new(config: &TestConfig) -> AppResult<Self> {
        let url = Url::parse(&config.target).map_err(|err| {
            AppError::transport(TransportError::InvalidUrl {
                url: config.target.clone(),
                source: err,
            })
        })?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(AppError::transport(TransportError::UnsupportedScheme {
                    scheme: other.to_owned(),
                    protocol: "http",
                }));
            }
        }

        let headers = build_header_map(&config.headers)?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .pool_max_idle_per_host(config.concurrency)
            .pool_idle_timeout(IDLE_TIMEOUT)
            .tcp_keepalive(IDLE_TIMEOUT)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| AppError::transport(TransportError::BuildClientFailed { source: err }))?;

        Ok(Self {
            client,
            method: config.method.clone(),
            url,
            headers,
            body: config.body.clone(),
        })
    }
}

fn build_header_map(headers: &[(String, String)]) -> AppResult<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|err| {
            AppError::transport(TransportError::InvalidHeaderName {
                header: key.clone(),
                source: err,
            })
        })?;
        let value = HeaderValue::from_str(value).map_err(|err| {
            AppError::transport(TransportError::InvalidHeaderValue {
                header: key.clone(),
                source: err,
            })
        })?;
        map.insert(name, value);
    }
    Ok(map)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self) -> ExchangeResult {
        let dispatched_at = Instant::now();

        let mut builder = self
            .client
            .request(self.method.clone(), self.url.clone())
            .headers(self.headers.clone());
        if let Some(body) = self.body.as_ref() {
            builder = builder.body(body.clone());
        }
        let request = match builder.build() {
            Ok(request) => request,
            Err(err) => {
                return ExchangeResult::failure(
                    dispatched_at,
                    dispatched_at.elapsed(),
                    format!("failed to build request: {}", err),
                );
            }
        };

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                return ExchangeResult::failure(
                    dispatched_at,
                    dispatched_at.elapsed(),
                    format!("failed to execute request: {}", err),
                );
            }
        };

        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(body) => ExchangeResult::success(
                dispatched_at,
                dispatched_at.elapsed(),
                status,
                u64::try_from(body.len()).unwrap_or(u64::MAX),
            ),
            Err(err) => ExchangeResult::failure(
                dispatched_at,
                dispatched_at.elapsed(),
                format!("failed to read response: {}", err),
            ),
        }
    }

    fn protocol(&self) -> ProtocolKind {
        ProtocolKind::Http
    }
}
