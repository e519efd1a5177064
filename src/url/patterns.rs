use crate::ConfigError;
use regex::Regex;

/// An ordered list of regular expressions matched against whole strings
///
/// Used both for ignored addresses and ignored words. A pattern only matches
/// when it covers the full input, so `example\.com` does not match
/// `https://example.com/`.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    compiled: Vec<Regex>,
}

impl PatternSet {
    /// Compiles every pattern, anchored at both ends
    ///
    /// # Returns
    ///
    /// * `Ok(PatternSet)` - All patterns compiled
    /// * `Err(ConfigError::InvalidPattern)` - The first pattern that failed to compile
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ConfigError> {
        let mut compiled = Vec::with_capacity(patterns.len());

        for pattern in patterns {
            let pattern = pattern.as_ref();
            let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| {
                ConfigError::InvalidPattern(format!("'{}': {}", pattern, e))
            })?;
            compiled.push(regex);
        }

        Ok(Self { compiled })
    }

    /// Returns true if any pattern matches the whole of `candidate`
    pub fn matches_any(&self, candidate: &str) -> bool {
        self.compiled.iter().any(|regex| regex.is_match(candidate))
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}
