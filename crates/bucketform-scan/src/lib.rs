//! Directory scanning engine for bucketform.
//!
//! Walks a directory tree and classifies every file into an
//! `aws_s3_bucket_object` resource. Key features:
//!
//! - **Deterministic traversal** via jwalk in serial, sorted mode
//! - **Exclusion rules** matched per segment or against the full key
//! - **Content type inference** from extension or leading bytes
//! - **Non-fatal errors**: unreadable entries become warnings
//!
//! # Example
//!
//! ```rust,no_run
//! use bucketform_scan::{GenerateConfig, JwalkScanner};
//!
//! let config = GenerateConfig::new("/path/to/site", "my-bucket");
//! let output = JwalkScanner::new().scan(&config);
//!
//! for warning in &output.warnings {
//!     eprintln!("{warning}");
//! }
//! println!("{} objects", output.objects.len());
//! ```

pub mod content;
mod scanner;

pub use scanner::{JwalkScanner, relative_path_bytes};

// Re-export core types for convenience
pub use bucketform_core::{
    BucketDocument, ExcludeRule, ExcludeSet, GenerateConfig, ObjectDescriptor, ResourceId,
    ScanError, ScanOutput, ScanStats, ScanWarning, WarningKind,
};
