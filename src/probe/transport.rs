//! HTTP transport used by the runner.
//!
//! The runner only needs "send request, get status + body or error". The
//! [`Transport`] trait is that seam; [`ReqwestTransport`] is the real client.

use std::future::Future;

use futures_util::future::BoxFuture;
use reqwest::{Method, StatusCode};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Request issued on every attempt.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub method: Method,
    pub url: Url,
}

/// Response head plus a body that is only read when needed.
pub struct Reply {
    pub status: StatusCode,
    pub body: BoxFuture<'static, Result<String, TransportError>>,
}

impl Reply {
    /// Reply whose body is already in memory.
    pub fn ready(status: StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();
        Self {
            status,
            body: Box::pin(async move { Ok(body) }),
        }
    }
}

impl std::fmt::Debug for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reply").field("status", &self.status).finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The cancellation token fired before the exchange finished.
    #[error("request cancelled")]
    Cancelled,

    #[error("{0}")]
    Failed(String),
}

/// Sends one request, giving up when `cancel` fires.
pub trait Transport {
    fn send(
        &self,
        request: &ProbeRequest,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Reply, TransportError>> + Send;
}

/// Transport backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        // No client-level timeout: the attempt deadline bounds the exchange.
        let client = reqwest::Client::builder()
            .user_agent(concat!("ping-probe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Failed(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn send(
        &self,
        request: &ProbeRequest,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Reply, TransportError>> + Send {
        let pending = self
            .client
            .request(request.method.clone(), request.url.clone())
            .send();
        let cancel = cancel.clone();

        async move {
            // Dropping `pending` on cancellation aborts the connection.
            let response = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(TransportError::Cancelled),
                result = pending => result.map_err(describe_error)?,
            };

            let status = response.status();
            let body = Box::pin(async move {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Err(TransportError::Cancelled),
                    text = response.text() => text.map_err(describe_error),
                }
            });

            Ok(Reply { status, body })
        }
    }
}

/// Flatten a reqwest error and its causes into one message.
fn describe_error(err: reqwest::Error) -> TransportError {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    TransportError::Failed(message)
}
