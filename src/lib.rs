//! Sougou-Search: a command-line client for the Sougou AI Search API
//!
//! Validates a query, performs one signed request against the upstream
//! search endpoint and maps the answer into a fixed JSON envelope.

pub mod config;
pub mod engines;
pub mod error;
pub mod network;
pub mod render;
pub mod results;
pub mod search;

pub use config::{Credentials, Settings};
pub use error::{ErrorCode, SearchError};
pub use results::{Envelope, ErrorResponse, SearchResponse, SearchResult};
pub use search::{OutputFormat, SearchClient, SearchRequest};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default upstream base URL
pub const DEFAULT_BASE_URL: &str = "http://api.tianji.woa.com";

/// Path of the search endpoint
pub const DEFAULT_SEARCH_PATH: &str = "/rsrc/i/prosearch";

/// Default number of results
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Hard cap on the number of results
pub const MAX_RESULTS_LIMIT: usize = 30;

/// Default timeout for the upstream request in seconds
pub const DEFAULT_TIMEOUT: f64 = 20.0;
