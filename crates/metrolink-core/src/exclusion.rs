//! Exclusion matcher over absolute paths.
//!
//! Combines per-package patterns into one compiled alternation, the way
//! Metro merges its blockList entries. Callers must escape any literal path
//! fragments before handing patterns in.

use regex_lite::Regex;

/// A compiled set of exclusion patterns.
///
/// An empty pattern list matches nothing.
#[derive(Debug, Clone)]
pub struct ExclusionList {
    patterns: Vec<String>,
    combined: Option<Regex>,
}

impl ExclusionList {
    /// Compile the given patterns into one matcher.
    pub fn new(patterns: Vec<String>) -> Result<Self, regex_lite::Error> {
        let combined = if patterns.is_empty() {
            None
        } else {
            let joined = patterns
                .iter()
                .map(|p| format!("({p})"))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&joined)?)
        };

        Ok(Self { patterns, combined })
    }

    /// Whether `path` is excluded.
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.combined.as_ref().is_some_and(|re| re.is_match(path))
    }

    /// The source patterns, in insertion order.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
