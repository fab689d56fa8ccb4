//! Bucket object resources and their identifiers.

use std::fmt;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

/// Terraform resource name for one object.
///
/// This is the hex SHA-1 of the object's relative path, so it stays the same
/// across runs for as long as the file keeps its path, whatever its content.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Derive the identifier from the raw bytes of a `/`-separated relative
    /// path.
    ///
    /// Hashing the bytes rather than the display key keeps names that are
    /// not valid UTF-8 distinct.
    pub fn from_bytes(path: &[u8]) -> Self {
        let digest = Sha1::digest(path);
        Self(hex::encode(digest))
    }

    /// Get the identifier as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Arguments of one `aws_s3_bucket_object` resource.
///
/// Fields are declared in alphabetical order, which is the order they are
/// written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    /// Target bucket.
    pub bucket: String,
    /// Cache-Control header value.
    pub cache_control: String,
    /// Inferred MIME type.
    pub content_type: String,
    /// Interpolation evaluated by Terraform, see [`etag_expression`].
    pub etag: String,
    /// Object key, the `/`-separated path relative to the root.
    pub key: String,
    /// Modification time as an HTTP-date.
    pub last_modified: String,
    /// Absolute, symlink-resolved path of the file on disk.
    pub source: String,
}

/// Build the `etag` interpolation for a source path.
///
/// The hash itself is left to Terraform: `${md5(file("<source>"))}`.
/// The path is quoted with Rust's `{:?}` escaping, which agrees with Go's
/// `%q` for printable paths but differs for control characters
/// (`\u{1b}` rather than `\x1b`).
pub fn etag_expression(source: &str) -> String {
    format!("${{md5(file({source:?}))}}")
}

/// Format a timestamp as an HTTP-date (`Mon, 02 Jan 2006 15:04:05 GMT`).
pub fn format_http_date(time: SystemTime) -> String {
    let time: DateTime<Utc> = time.into();
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
