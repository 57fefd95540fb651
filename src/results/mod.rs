//! Result and envelope types
//!
//! Defines the structures emitted to the caller for every invocation.

mod types;

pub use types::*;
