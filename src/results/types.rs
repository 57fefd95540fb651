//! Result and envelope type definitions

use crate::error::{ErrorCode, SearchError};
use serde::{Deserialize, Serialize};
use url::Url;

/// Provider literal stamped on every result
pub const SOURCE: &str = "sougou";

/// Result-set literal reported in the `type` field
pub const RESULT_TYPE_WEB: &str = "web";

/// A single search hit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// The title of the result
    pub title: String,
    /// Absolute URL of the result
    pub url: String,
    /// Body excerpt
    #[serde(default)]
    pub snippet: String,
    /// Provider that returned this result
    #[serde(default = "default_source")]
    pub source: String,
    /// Upstream relevance score, higher is more relevant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Domain or site name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    /// Publication date, passed through as given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Site icon URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    /// Image URLs attached to the hit
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

fn default_source() -> String {
    SOURCE.to_string()
}

impl SearchResult {
    /// Create a new result
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: String::new(),
            source: default_source(),
            score: None,
            site: None,
            date: None,
            favicon: None,
            images: Vec::new(),
        }
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = Some(site.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Site name, falling back to the URL host
    pub fn display_site(&self) -> Option<String> {
        self.site.clone().or_else(|| {
            Url::parse(&self.url)
                .ok()
                .and_then(|u| u.host_str().map(str::to_string))
        })
    }
}

/// Successful envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub success: bool,
    /// The query as the caller sent it
    pub query: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub count: usize,
    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    /// Build a web response; `count` always tracks `results`
    pub fn new(query: impl Into<String>, results: Vec<SearchResult>) -> Self {
        Self {
            success: true,
            query: query.into(),
            kind: RESULT_TYPE_WEB.to_string(),
            count: results.len(),
            results,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Failed envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: ErrorCode,
    pub query: String,
}

impl ErrorResponse {
    pub fn new(query: impl Into<String>, error_code: ErrorCode, error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            error_code,
            query: query.into(),
        }
    }

    pub fn from_error(query: impl Into<String>, err: &SearchError) -> Self {
        Self::new(query, err.code(), err.to_string())
    }
}

/// Top-level output of one invocation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Envelope {
    Success(SearchResponse),
    Failure(ErrorResponse),
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn query(&self) -> &str {
        match self {
            Self::Success(r) => &r.query,
            Self::Failure(e) => &e.query,
        }
    }

    /// Error code of a failed envelope
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Success(_) => None,
            Self::Failure(e) => Some(e.error_code),
        }
    }
}

impl From<SearchResponse> for Envelope {
    fn from(response: SearchResponse) -> Self {
        Self::Success(response)
    }
}

impl From<ErrorResponse> for Envelope {
    fn from(error: ErrorResponse) -> Self {
        Self::Failure(error)
    }
}
