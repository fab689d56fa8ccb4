//! Exclusion rules for keeping files out of the generated document.

use globset::{GlobBuilder, GlobMatcher};

use crate::error::ScanError;

/// A single compiled exclusion pattern.
///
/// Patterns that contain a path separator are matched against the whole
/// root-relative key. Patterns without one are matched against every path
/// segment on its own, so `node_modules` drops anything below a
/// `node_modules` directory at any depth.
#[derive(Debug, Clone)]
pub enum ExcludeRule {
    /// Matched against the full relative key (`assets/*.map`).
    FullPath(GlobMatcher),
    /// Matched against each segment of the key (`*.svg`, `.git`).
    Segment(GlobMatcher),
}

impl ExcludeRule {
    /// Compile a pattern, picking the rule kind from its contents.
    ///
    /// `*` and `?` never match across a `/`.
    pub fn parse(pattern: &str) -> Result<Self, ScanError> {
        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| ScanError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?
            .compile_matcher();

        if pattern.contains('/') || pattern.contains(std::path::MAIN_SEPARATOR) {
            Ok(Self::FullPath(matcher))
        } else {
            Ok(Self::Segment(matcher))
        }
    }

    /// The pattern this rule was compiled from.
    pub fn pattern(&self) -> &str {
        match self {
            Self::FullPath(m) | Self::Segment(m) => m.glob().glob(),
        }
    }

    /// Check a `/`-separated relative key against this rule.
    pub fn is_match(&self, key: &str) -> bool {
        match self {
            Self::FullPath(m) => m.is_match(key),
            Self::Segment(m) => key.split('/').any(|segment| m.is_match(segment)),
        }
    }
}

/// Ordered set of exclusion rules.
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    rules: Vec<ExcludeRule>,
}

impl ExcludeSet {
    /// Create an empty set that excludes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a list of patterns, failing on the first invalid one.
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self, ScanError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = patterns
            .into_iter()
            .map(|p| ExcludeRule::parse(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Return the first rule matching `key`, if any.
    pub fn first_match(&self, key: &str) -> Option<&ExcludeRule> {
        self.rules.iter().find(|rule| rule.is_match(key))
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<ExcludeRule> for ExcludeSet {
    fn from_iter<I: IntoIterator<Item = ExcludeRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
