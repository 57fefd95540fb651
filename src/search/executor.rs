//! Search execution

use super::models::SearchRequest;
use crate::config::Settings;
use crate::engines::{RequestParams, Sougou};
use crate::error::{Result, SearchError};
use crate::network::{HttpClient, RetryTransport, Transport};
use crate::results::{Envelope, ErrorResponse, SearchResponse};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Client that performs one upstream search per call
#[derive(Clone)]
pub struct SearchClient {
    engine: Sougou,
    transport: Arc<dyn Transport>,
}

impl SearchClient {
    /// Build a client over the real HTTP transport
    pub fn new(settings: &Settings) -> Result<Self> {
        let http = HttpClient::with_settings(&settings.outgoing)?;
        let transport = RetryTransport::from_settings(http, &settings.outgoing);
        let engine = Sougou::new(&settings.upstream, settings.credentials.clone());
        Ok(Self::with_transport(engine, transport))
    }

    /// Build a client over any transport
    pub fn with_transport(engine: Sougou, transport: impl Transport + 'static) -> Self {
        Self {
            engine,
            transport: Arc::new(transport),
        }
    }

    /// Run the search and fold any failure into an error envelope
    pub async fn execute(&self, request: &SearchRequest) -> Envelope {
        match self.search(request).await {
            Ok(response) => Envelope::Success(response),
            Err(err) => {
                warn!("Search failed [{}]: {}", err.code(), err);
                Envelope::Failure(ErrorResponse::from_error(request.query.clone(), &err))
            }
        }
    }

    /// Run the search, returning the typed error on failure
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let (query, limit) = request.validate()?;
        let max_results = request.effective_max_results();

        let params = RequestParams::new(query);
        let engine_request = self.engine.request(&params)?;

        info!("Executing search '{}' (max {} results)", query, max_results);
        let start = Instant::now();

        // Bounds the whole exchange, retries included
        let response = match timeout(limit, self.transport.execute(engine_request, limit)).await {
            Ok(response) => response?,
            Err(_) => return Err(SearchError::Timeout(limit)),
        };

        debug!(
            "{} responded with status {} in {}ms",
            self.engine.name(),
            response.status,
            start.elapsed().as_millis()
        );

        let results = self.engine.response(response, max_results)?;
        Ok(SearchResponse::new(request.query.clone(), results))
    }
}
