//! Generation configuration types.

use std::path::PathBuf;

use derive_builder::Builder;

use crate::exclude::ExcludeSet;

/// Bytes read from each file for content sniffing.
pub const DEFAULT_SNIFF_LIMIT: usize = 1024 * 1024;

/// Cache-Control header stamped on every object.
pub const DEFAULT_CACHE_CONTROL: &str = "max-age=86400, stale-while-revalidate=3600";

/// Configuration for a generation run.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct GenerateConfig {
    /// Root directory to walk.
    pub root: PathBuf,

    /// Bucket name copied into every object.
    pub bucket: String,

    /// Rules for files to leave out.
    #[builder(default)]
    pub exclude: ExcludeSet,

    /// Maximum number of bytes read for content sniffing.
    #[builder(default = "DEFAULT_SNIFF_LIMIT")]
    pub sniff_limit: usize,

    /// Cache-Control value for every object.
    #[builder(default = "DEFAULT_CACHE_CONTROL.to_string()")]
    pub cache_control: String,
}

impl GenerateConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                return Err("Root path cannot be empty".to_string());
            }
            None => return Err("Root path is required".to_string()),
            _ => {}
        }
        // An empty bucket name is passed through as given.
        if self.bucket.is_none() {
            return Err("Bucket name is required".to_string());
        }
        Ok(())
    }
}

impl GenerateConfig {
    /// Create a new config builder.
    pub fn builder() -> GenerateConfigBuilder {
        GenerateConfigBuilder::default()
    }

    /// Create a config with no exclusions and default limits.
    pub fn new(root: impl Into<PathBuf>, bucket: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            bucket: bucket.into(),
            exclude: ExcludeSet::new(),
            sniff_limit: DEFAULT_SNIFF_LIMIT,
            cache_control: DEFAULT_CACHE_CONTROL.to_string(),
        }
    }
}
