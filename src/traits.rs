use crate::error::ScanError;
use crate::request::SearchRequest;
use crate::results::{MatchResult, Results};

/// Decides whether a single line of extracted text is a match.
///
/// The builder installs a term matcher built from `.term()`,
/// `.case_sensitive()` and `.whole_word()`. Implement this for anything
/// else: word lists, metadata-aware checks, external engines.
///
/// # Example
///
/// ```rust
/// use textseek::Matcher;
///
/// struct AnyOf(Vec<String>);
///
/// impl Matcher for AnyOf {
///     fn is_match(&self, line: &str) -> bool {
///         self.0.iter().any(|w| line.contains(w.as_str()))
///     }
/// }
///
/// assert!(AnyOf(vec!["invoice".into()]).is_match("invoice 42"));
/// ```
pub trait Matcher {
    /// Returns `true` if `line` contains a match.
    fn is_match(&self, line: &str) -> bool;
}

/// Presentation seam for a running scan.
///
/// The scanner never prints anything itself. Everything a user sees
/// (banner aside) goes through a reporter, so the scanning logic can be
/// driven from tests without a terminal.
///
/// Only [`on_match`](Reporter::on_match) is required.
pub trait Reporter {
    /// Called once before the first file is opened.
    fn on_start(&mut self, _request: &SearchRequest) {}

    /// Called for every match, in traversal order.
    fn on_match(&mut self, result: &MatchResult);

    /// Called for every file or directory entry that had to be skipped.
    fn on_skip(&mut self, _error: &ScanError) {}

    /// Called once after the last file has been scanned.
    fn on_end(&mut self, _results: &Results) {}
}
