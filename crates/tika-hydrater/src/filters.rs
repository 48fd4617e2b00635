//! Known-benign stderr noise emitted by the JVM and Tika

use crate::error::ConfigError;
use regex::Regex;

/// Patterns removed from stderr before it is treated as a warning.
///
/// - `Picked up JAVA_TOOL_OPTIONS: ...` is the JVM echoing its runtime options.
/// - `INFO - Document is encrypted` and friends are informational only.
const BUILTIN_PATTERNS: &[&str] = &[r"Picked up[^\n]+\n", r"INFO -[^\n]+\n"];

/// Immutable list of stderr patterns to strip
#[derive(Debug, Clone)]
pub struct WarningFilters {
    patterns: Vec<Regex>,
}

impl WarningFilters {
    /// The built-in filters only
    pub fn builtin() -> Self {
        Self {
            patterns: BUILTIN_PATTERNS
                .iter()
                .map(|p| Regex::new(p).expect("builtin warning filter must compile"))
                .collect(),
        }
    }

    /// The built-in filters followed by `extra`
    pub fn with_patterns<S: AsRef<str>>(extra: &[S]) -> Result<Self, ConfigError> {
        let mut filters = Self::builtin();
        for pattern in extra {
            filters.patterns.push(Regex::new(pattern.as_ref())?);
        }
        Ok(filters)
    }

    /// Number of patterns in the list
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the list has no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Remove every match of every pattern, in order
    pub fn strip(&self, stderr: &str) -> String {
        self.patterns
            .iter()
            .fold(stderr.to_string(), |acc, re| re.replace_all(&acc, "").into_owned())
    }
}

impl Default for WarningFilters {
    fn default() -> Self {
        Self::builtin()
    }
}
