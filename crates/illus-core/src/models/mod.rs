//! Data models and configuration.

pub mod config;
pub mod record;

pub use config::{CustomRule, IllusConfig};
pub use record::{ExtractedFields, ExtractedRecord, Field, NOT_AVAILABLE};
