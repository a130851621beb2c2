//! Transport seam: one exchange per call, selected once at setup.
mod http;

#[cfg(test)]
pub(crate) mod fake;

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{ProtocolKind, TestConfig};
use crate::error::{AppError, AppResult, TransportError};
use crate::metrics::ExchangeResult;

pub use http::HttpTransport;

const SUPPORTED_PROTOCOLS: &str = "http";

/// Performs a single request/response exchange. Implementations never
/// return an error: failures are folded into [`ExchangeResult::failure`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self) -> ExchangeResult;

    fn protocol(&self) -> ProtocolKind;
}

/// Selects and builds the transport for `config.protocol`.
///
/// # Errors
///
/// Returns `UnsupportedProtocol` for protocols without an implementation,
/// and setup errors from the chosen transport.
pub fn build_transport(config: &TestConfig) -> AppResult<Arc<dyn Transport>> {
    match config.protocol {
        ProtocolKind::Http => {
            let transport = HttpTransport::new(config)?;
            tracing::debug!(
                "HTTP transport ready: {} {}",
                config.method_name(),
                config.target
            );
            Ok(Arc::new(transport))
        }
        ProtocolKind::Grpc => Err(AppError::transport(TransportError::UnsupportedProtocol {
            protocol: config.protocol.as_str().to_owned(),
            supported: SUPPORTED_PROTOCOLS.to_owned(),
        })),
    }
}
