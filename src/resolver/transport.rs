// HTTP transport seam over reqwest

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{info, warn};

use super::traits::ResolverConfig;

/// Transport-level failure. Strategies translate these into the
/// user-facing error taxonomy; raw reqwest errors stop here.
#[derive(Debug)]
pub enum TransportError {
    /// Deadline expired (configured seconds)
    Timeout(u64),
    /// Connection or HTTP-level failure
    Http(String),
    /// Response body was not the expected JSON
    Decode(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout(secs) => write!(f, "timed out after {}s", secs),
            Self::Http(msg) => write!(f, "http error: {}", msg),
            Self::Decode(msg) => write!(f, "decode error: {}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

/// Narrow wire interface used by the strategies. Tests substitute a stub
/// returning canned JSON.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// GET with query parameters, expecting a JSON body back
    async fn get_json(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, TransportError>;

    /// POST a JSON body, expecting a JSON body back
    async fn post_json(&self, endpoint: &str, body: &Value) -> Result<Value, TransportError>;
}

/// Production transport: one reqwest client carrying the configured
/// timeout and optional proxy.
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout_seconds: u64,
}

impl ReqwestTransport {
    pub fn new(config: &ResolverConfig) -> Self {
        let mut builder =
            reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_seconds));

        if let Some(proxy_url) = config.proxy.as_deref() {
            match reqwest::Proxy::all(proxy_url) {
                Ok(proxy) => {
                    info!("[Transport] routing upstream calls via {}", proxy_url);
                    builder = builder.proxy(proxy);
                }
                Err(e) => warn!("[Transport] invalid proxy URL {}: {}", proxy_url, e),
            }
        }

        let client = match builder.build() {
            Ok(client) => client,
            Err(e) => {
                warn!("[Transport] client options rejected, using defaults: {}", e);
                reqwest::Client::new()
            }
        };

        Self {
            client,
            timeout_seconds: config.timeout_seconds,
        }
    }

    fn classify(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout_seconds)
        } else if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else {
            TransportError::Http(err.to_string())
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get_json(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, TransportError> {
        let response = self
            .client
            .get(endpoint)
            .query(query)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        response.json::<Value>().await.map_err(|e| self.classify(e))
    }

    async fn post_json(&self, endpoint: &str, body: &Value) -> Result<Value, TransportError> {
        let response = self
            .client
            .post(endpoint)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        response.json::<Value>().await.map_err(|e| self.classify(e))
    }
}
