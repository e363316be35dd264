//! Letter Lens: rule-based classification of scanned UK government letters.

pub mod api;
pub mod config;
pub mod error;
pub mod pipeline;
