//! JWalk-based directory scanner.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;
use std::time::Instant;

use jwalk::{DirEntry, Parallelism, WalkDir};
use tracing::{debug, trace};

use bucketform_core::{
    GenerateConfig, ObjectDescriptor, ResourceId, ScanOutput, ScanStats, ScanWarning,
    WarningKind, etag_expression, format_http_date,
};

use crate::content::detect_content_type;

/// Scanner that turns a directory tree into bucket objects.
///
/// Walks serially in lexical depth-first order, so two runs over an
/// unchanged tree see entries in the same order.
#[derive(Debug, Default)]
pub struct JwalkScanner;

/// Result of classifying one file entry.
enum Classified {
    Object(ResourceId, ObjectDescriptor),
    Excluded,
}

impl JwalkScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self
    }

    /// Scan the configured root.
    ///
    /// Per-entry failures never abort the walk: the entry is left out and
    /// recorded in [`ScanOutput::warnings`].
    pub fn scan(&self, config: &GenerateConfig) -> ScanOutput {
        self.scan_entries(config, walker(&config.root))
    }

    /// Fold walker results into objects, counters and warnings.
    fn scan_entries<I>(&self, config: &GenerateConfig, entries: I) -> ScanOutput
    where
        I: IntoIterator<Item = jwalk::Result<DirEntry<((), ())>>>,
    {
        let start = Instant::now();
        let root = config.root.as_path();

        let mut objects = BTreeMap::new();
        let mut stats = ScanStats::new();
        let mut warnings = Vec::new();

        for entry_result in entries {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    warnings.push(walk_warning(root, &err));
                    stats.skipped += 1;
                    continue;
                }
            };

            // Directories are implied by the keys of the files inside them.
            if entry.file_type().is_dir() {
                stats.total_dirs += 1;
                if let Some(err) = &entry.read_children_error {
                    warnings.push(walk_warning(&entry.path(), err));
                    stats.skipped += 1;
                }
                continue;
            }

            let path = entry.path();
            match self.classify(config, &path) {
                Ok(Classified::Object(id, descriptor)) => {
                    trace!(id = %id, key = %descriptor.key, "object");
                    if let Some(previous) = objects.insert(id.clone(), descriptor) {
                        debug!(id = %id, replaced = %previous.key, "resource id collision");
                        stats.collisions += 1;
                    } else {
                        stats.total_objects += 1;
                    }
                }
                Ok(Classified::Excluded) => stats.excluded += 1,
                Err(warning) => {
                    warnings.push(warning);
                    stats.skipped += 1;
                }
            }
        }

        let scan_duration = start.elapsed();
        debug!(
            root = %root.display(),
            objects = stats.total_objects,
            excluded = stats.excluded,
            skipped = stats.skipped,
            elapsed_ms = scan_duration.as_millis() as u64,
            "scan complete"
        );

        ScanOutput {
            objects,
            stats,
            warnings,
            scan_duration,
        }
    }

    /// Turn a single non-directory entry into an object.
    fn classify(&self, config: &GenerateConfig, path: &Path) -> Result<Classified, ScanWarning> {
        let source = fs::canonicalize(path).map_err(|e| ScanWarning::broken_symlink(path, &e))?;

        let raw_key = relative_path_bytes(&config.root, path)
            .ok_or_else(|| ScanWarning::new(path, "not below the scan root", WarningKind::RelativePath))?;
        let key = String::from_utf8_lossy(&raw_key).into_owned();

        if let Some(rule) = config.exclude.first_match(&key) {
            debug!(key = %key, pattern = rule.pattern(), "excluded");
            return Ok(Classified::Excluded);
        }

        let mut file = File::open(&source).map_err(|e| ScanWarning::open_error(&source, &e))?;
        let metadata = file
            .metadata()
            .map_err(|e| ScanWarning::metadata_error(&source, &e))?;
        let modified = metadata
            .modified()
            .map_err(|e| ScanWarning::metadata_error(&source, &e))?;
        let head = read_head(&mut file, config.sniff_limit)
            .map_err(|e| ScanWarning::read_error(&source, &e))?;
        drop(file);

        let content_type = detect_content_type(&key, &source, &head);
        let source = source.to_string_lossy().into_owned();

        let id = ResourceId::from_bytes(&raw_key);
        let descriptor = ObjectDescriptor {
            bucket: config.bucket.clone(),
            cache_control: config.cache_control.clone(),
            content_type,
            etag: etag_expression(&source),
            key,
            last_modified: format_http_date(modified),
            source,
        };

        Ok(Classified::Object(id, descriptor))
    }
}

/// Serial, sorted walker over everything below `root`, hidden entries
/// included and symlinks left unfollowed.
fn walker(root: &Path) -> WalkDir {
    WalkDir::new(root)
        .parallelism(Parallelism::Serial)
        .sort(true)
        .skip_hidden(false)
        .follow_links(false)
        .min_depth(0)
}

/// Warning for an entry or directory listing the walker failed to read.
fn walk_warning(fallback: &Path, err: &jwalk::Error) -> ScanWarning {
    let path = err.path().unwrap_or(fallback).to_path_buf();
    let message = match err.io_error() {
        Some(io_err) => io_err.to_string(),
        None => err.to_string(),
    };
    ScanWarning::new(path, message, WarningKind::ReadError)
}

/// Read up to `limit` bytes from the start of a file.
///
/// Hitting end-of-file early is not an error; short and empty files give
/// back whatever was there.
fn read_head(file: &mut File, limit: usize) -> io::Result<Vec<u8>> {
    let mut head = Vec::new();
    file.by_ref().take(limit as u64).read_to_end(&mut head)?;
    Ok(head)
}

/// Build the `/`-separated path of `path` relative to `root` as raw bytes.
///
/// Returns `None` for paths outside `root` and for `root` itself.
pub fn relative_path_bytes(root: &Path, path: &Path) -> Option<Vec<u8>> {
    let relative = path.strip_prefix(root).ok()?;

    let mut bytes = Vec::new();
    for (i, component) in relative.components().enumerate() {
        if i > 0 {
            bytes.push(b'/');
        }
        bytes.extend_from_slice(&os_bytes(component.as_os_str()));
    }

    if bytes.is_empty() {
        return None;
    }
    Some(bytes)
}

#[cfg(unix)]
fn os_bytes(name: &OsStr) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(name.as_bytes())
}

#[cfg(not(unix))]
fn os_bytes(name: &OsStr) -> Cow<'_, [u8]> {
    match name.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}
