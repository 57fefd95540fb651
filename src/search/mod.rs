//! Search orchestration module
//!
//! Validates a request, performs the single upstream call and shapes the
//! envelope.

mod executor;
mod models;

pub use executor::SearchClient;
pub use models::*;
