//! Search engine module
//!
//! Builds upstream requests and maps upstream responses into results.

mod types;

pub mod sougou;

pub use sougou::Sougou;
pub use types::*;
