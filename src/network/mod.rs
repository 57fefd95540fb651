//! HTTP networking module
//!
//! Provides the transport used to reach the upstream search API.

mod client;
mod retry;

pub use client::{HttpClient, Transport};
pub use retry::RetryTransport;
