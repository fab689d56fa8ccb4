//! Core types for bucketform.
//!
//! This crate provides the data model shared by the scanner and the CLI:
//! generation config, exclusion rules, bucket object descriptors and the
//! Terraform document they are rendered into.

mod config;
mod document;
mod error;
mod exclude;
mod object;
mod output;

pub use config::{DEFAULT_CACHE_CONTROL, DEFAULT_SNIFF_LIMIT, GenerateConfig, GenerateConfigBuilder};
pub use document::{BucketDocument, ResourceBlock};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use exclude::{ExcludeRule, ExcludeSet};
pub use object::{ObjectDescriptor, ResourceId, etag_expression, format_http_date};
pub use output::{ScanOutput, ScanStats};
