//! Scan results and statistics.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::document::BucketDocument;
use crate::error::ScanWarning;
use crate::object::{ObjectDescriptor, ResourceId};

/// Summary counters for a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Objects emitted.
    pub total_objects: u64,
    /// Directories walked past.
    pub total_dirs: u64,
    /// Files dropped by an exclusion rule.
    pub excluded: u64,
    /// Entries skipped because of an error.
    pub skipped: u64,
    /// Objects that replaced an earlier one with the same identifier.
    pub collisions: u64,
}

impl ScanStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Everything a scan produced.
#[derive(Debug, Clone)]
pub struct ScanOutput {
    /// Objects keyed by resource identifier.
    pub objects: BTreeMap<ResourceId, ObjectDescriptor>,

    /// Summary statistics.
    pub stats: ScanStats,

    /// Entries that were skipped, in traversal order.
    pub warnings: Vec<ScanWarning>,

    /// Duration of the scan.
    pub scan_duration: Duration,
}

impl ScanOutput {
    /// Turn the objects into the document written to stdout.
    pub fn into_document(self) -> BucketDocument {
        BucketDocument::from_objects(self.objects)
    }
}
