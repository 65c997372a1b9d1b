//! Comparison options.
//!
//! A [`DiffOptions`] value is constructed once per comparison, validated at
//! construction, and passed by reference through the whole walk. It is never
//! mutated by the engine, which keeps parallel directory comparison free of
//! shared state by construction.

use regex::Regex;
use tensordiff_types::ConfigError;

/// Immutable configuration for one comparison call.
///
/// All setters validate their input, so a constructed `DiffOptions` is always
/// well-formed and the engine itself has no failure mode.
#[derive(Clone, Debug, Default)]
pub struct DiffOptions {
    epsilon: f64,
    path_filter: Option<String>,
    ignore_keys: Option<Regex>,
}

impl DiffOptions {
    /// Defaults: exact numeric equality, no filter, no ignored keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the numeric tolerance. Two numbers within `epsilon` of each other
    /// compare equal; zero means exact equality.
    pub fn with_epsilon(mut self, epsilon: f64) -> Result<Self, ConfigError> {
        if !(epsilon >= 0.0) {
            return Err(ConfigError::NegativeEpsilon(epsilon));
        }
        self.epsilon = epsilon;
        Ok(self)
    }

    /// Keep only entries whose path equals `filter` or extends it at a
    /// segment boundary. The empty filter keeps everything.
    pub fn with_path_filter(mut self, filter: impl Into<String>) -> Self {
        self.path_filter = Some(filter.into());
        self
    }

    /// Skip mapping keys matching `pattern` on both sides of the comparison.
    pub fn with_ignore_keys(mut self, pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern)
            .map_err(|e| ConfigError::InvalidIgnorePattern(e.to_string()))?;
        self.ignore_keys = Some(regex);
        Ok(self)
    }

    /// A copy with the path filter cleared.
    ///
    /// Directory comparison re-roots per-file entries under the file's
    /// relative path and filters once over the merged list, so the per-pair
    /// engine calls must run unfiltered.
    pub fn without_path_filter(&self) -> Self {
        let mut options = self.clone();
        options.path_filter = None;
        options
    }

    /// The numeric tolerance.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// The path filter, if any.
    pub fn path_filter(&self) -> Option<&str> {
        self.path_filter.as_deref()
    }

    /// Returns `true` if `key` should be skipped during mapping comparison.
    pub fn is_ignored_key(&self, key: &str) -> bool {
        self.ignore_keys
            .as_ref()
            .is_some_and(|regex| regex.is_match(key))
    }
}
