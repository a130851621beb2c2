use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Unsupported protocol '{protocol}'. Supported: {supported}.")]
    UnsupportedProtocol {
        protocol: String,
        supported: String,
    },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unsupported URL scheme '{scheme}' for {protocol}.")]
    UnsupportedScheme {
        scheme: String,
        protocol: &'static str,
    },
    #[error("Invalid header name '{header}': {source}")]
    InvalidHeaderName {
        header: String,
        #[source]
        source: reqwest::header::InvalidHeaderName,
    },
    #[error("Invalid header value for '{header}': {source}")]
    InvalidHeaderValue {
        header: String,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("Worker pool terminated abnormally: {reason}")]
    PoolFailed { reason: String },
}
