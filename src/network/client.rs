//! HTTP client for making requests to the search API

use crate::config::OutgoingSettings;
use crate::engines::{EngineRequest, EngineResponse};
use crate::error::{Result, SearchError};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Something that can carry one engine request to the upstream and back
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the request, bounded by `timeout`
    async fn execute(&self, request: EngineRequest, timeout: Duration) -> Result<EngineResponse>;
}

/// HTTP client wrapper around reqwest
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let mut builder = Client::builder().gzip(true).brotli(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| SearchError::ClientUnavailable(error_chain(&e)))?;

        Ok(Self {
            client,
            user_agent: format!("sougou-search/{}", crate::VERSION),
        })
    }

    /// Parse response into EngineResponse
    async fn parse_response(response: Response, timeout: Duration) -> Result<EngineResponse> {
        let status = response.status().as_u16();
        let url = response.url().to_string();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.to_string(), v.to_string());
            }
        }

        let text = response
            .text()
            .await
            .map_err(|e| classify(e, timeout))?;

        Ok(EngineResponse {
            status,
            headers,
            text,
            url,
        })
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn execute(&self, request: EngineRequest, timeout: Duration) -> Result<EngineResponse> {
        let mut req_builder = self.client.get(&request.url).timeout(timeout);

        if !request
            .headers
            .keys()
            .any(|k| k.eq_ignore_ascii_case("user-agent"))
        {
            req_builder = req_builder.header("User-Agent", &self.user_agent);
        }

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        debug!("GET {} ({} params)", request.url, request.params.len());

        let response = req_builder
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        Self::parse_response(response, timeout).await
    }
}

fn classify(err: reqwest::Error, timeout: Duration) -> SearchError {
    if err.is_timeout() {
        SearchError::Timeout(timeout)
    } else {
        SearchError::Transport(error_chain(&err))
    }
}

/// Render an error together with its sources, outermost first
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
        assert!(client.unwrap().user_agent.starts_with("sougou-search/"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let client = HttpClient::new().unwrap();
        // Port 9 (discard) is not expected to accept HTTP on loopback
        let request = EngineRequest::get("http://127.0.0.1:9/rsrc/i/prosearch");
        let err = client
            .execute(request, Duration::from_secs(2))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Transport(_) | SearchError::Timeout(_)));
    }
}
