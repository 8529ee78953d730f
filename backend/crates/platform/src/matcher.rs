//! Path Exclusion Matcher
//!
//! Paths the edge tier never intercepts (API namespace, asset namespaces,
//! favicon), compiled into one anchored pattern.

use regex::Regex;

/// Decides which request paths the edge guard looks at
#[derive(Debug, Clone)]
pub struct PathMatcher {
    excluded: Option<Regex>,
}

impl PathMatcher {
    /// Build from leading path segments such as `api` or `_next/static`.
    ///
    /// A segment matches itself and everything below it: `api` excludes
    /// `/api` and `/api/patients` but not `/apiary`.
    pub fn new<I, S>(excluded: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let alternatives: Vec<String> = excluded
            .into_iter()
            .map(|segment| segment.as_ref().trim_matches('/').to_string())
            .filter(|segment| !segment.is_empty())
            .map(|segment| regex::escape(&segment))
            .collect();

        if alternatives.is_empty() {
            return Ok(Self { excluded: None });
        }

        let pattern = format!("^/(?:{})(?:/|$)", alternatives.join("|"));
        Ok(Self {
            excluded: Some(Regex::new(&pattern)?),
        })
    }

    /// The compiled exclusion pattern, if any
    pub fn pattern(&self) -> Option<&str> {
        self.excluded.as_ref().map(Regex::as_str)
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.excluded
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(path))
    }

    /// `true` when the edge guard should inspect this path
    pub fn intercepts(&self, path: &str) -> bool {
        !self.is_excluded(path)
    }
}
