//! Search request data model

use crate::error::{Result, SearchError};
use crate::{DEFAULT_MAX_RESULTS, DEFAULT_TIMEOUT, MAX_RESULTS_LIMIT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Output format for the rendered envelope
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
}

/// One search invocation as the caller described it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRequest {
    /// The search query string, as given
    pub query: String,
    /// Requested result cap, clamped on use
    pub max_results: i64,
    /// Output format
    pub format: OutputFormat,
    /// Upper bound on the network round trip, in seconds
    pub timeout_seconds: f64,
}

impl SearchRequest {
    /// Create a request with default options
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: DEFAULT_MAX_RESULTS as i64,
            format: OutputFormat::default(),
            timeout_seconds: DEFAULT_TIMEOUT,
        }
    }

    /// Set the result cap
    pub fn with_max_results(mut self, max_results: i64) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Result cap coerced into `[1, MAX_RESULTS_LIMIT]`
    pub fn effective_max_results(&self) -> usize {
        self.max_results.clamp(1, MAX_RESULTS_LIMIT as i64) as usize
    }

    /// Validate before any network activity, returning the trimmed query
    /// and the timeout to apply
    pub fn validate(&self) -> Result<(&str, Duration)> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(SearchError::Validation("query must not be empty".to_string()));
        }
        let invalid = || {
            SearchError::Validation(format!(
                "timeout must be a positive number of seconds, got {}",
                self.timeout_seconds
            ))
        };
        if self.timeout_seconds <= 0.0 {
            return Err(invalid());
        }
        // Rejects NaN, infinity and values too large for a Duration
        let timeout = Duration::try_from_secs_f64(self.timeout_seconds).map_err(|_| invalid())?;
        Ok((query, timeout))
    }
}
