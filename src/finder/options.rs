//! Options for a single search
//!
//! This module provides the per-search knobs passed to
//! [`FileFinder::search`](crate::FileFinder::search).

use crate::config::Config;

/// Options for a single search call
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Whether to descend into subdirectories
    pub recursive: bool,

    /// Stop after this many matches (None for unlimited)
    pub max_results: Option<usize>,
}

impl SearchOptions {
    /// Create new SearchOptions with default values
    pub fn new() -> Self {
        Self {
            recursive: true,
            max_results: None,
        }
    }

    /// Set whether to descend into subdirectories
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set the maximum number of results to return
    pub fn with_max_results(mut self, max_results: Option<usize>) -> Self {
        self.max_results = max_results;
        self
    }

    /// Create SearchOptions from environment configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new().with_max_results(config.default_max_results)
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_options_defaults() {
        let options = SearchOptions::new();
        assert!(options.recursive);
        assert_eq!(options.max_results, None);
    }

    #[test]
    fn test_search_options_with_recursive() {
        let options = SearchOptions::new().with_recursive(false);
        assert!(!options.recursive);
    }

    #[test]
    fn test_search_options_with_max_results() {
        let options = SearchOptions::new().with_max_results(Some(10));
        assert_eq!(options.max_results, Some(10));
    }
}
