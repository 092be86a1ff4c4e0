use std::path::PathBuf;

use crate::engine::Scanner;
use crate::entry::Extensions;
use crate::error::ScanError;
use crate::report::NullReporter;
use crate::request::{Granularity, MatchMode, SearchRequest};
use crate::results::Results;
use crate::traits::{Matcher, Reporter};

// ---------------------------------------------------------------------------
// SearchBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a scan.
///
/// Created via [`textseek::search()`](crate::search). Configure with chained
/// builder methods, then call [`run()`](SearchBuilder::run) to execute, or
/// [`build()`](SearchBuilder::build) to iterate lazily.
///
/// # Example
///
/// ```rust,ignore
/// let results = textseek::search()
///     .root("/srv/docs")
///     .term("invoice")
///     .whole_word(true)
///     .reporter(ConsoleReporter::stdout(true))
///     .run()?;
/// ```
pub struct SearchBuilder {
    root:            Option<PathBuf>,
    term:            String,
    mode:            MatchMode,
    extensions:      Extensions,
    granularity:     Granularity,
    max_depth:       Option<usize>,
    matcher:         Option<Box<dyn Matcher>>,
    reporter:        Option<Box<dyn Reporter>>,
    collect_matches: bool,
    collect_errors:  bool,
}

impl Default for SearchBuilder {
    fn default() -> Self {
        Self {
            root:            None,
            term:            String::new(),
            mode:            MatchMode::default(),
            extensions:      Extensions::default(),
            granularity:     Granularity::Line,
            max_depth:       None,
            matcher:         None,
            reporter:        None,
            collect_matches: false,
            collect_errors:  false,
        }
    }
}

impl SearchBuilder {
    // ── Input ─────────────────────────────────────────────────────────────

    /// Directory to scan. Must exist and be a directory.
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// The word or phrase to look for.
    pub fn term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    // ── Matching ──────────────────────────────────────────────────────────

    /// Compare case-sensitively. Off by default.
    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.mode.case_sensitive = yes;
        self
    }

    /// Only match the term as a whole word. Off by default.
    pub fn whole_word(mut self, yes: bool) -> Self {
        self.mode.whole_word = yes;
        self
    }

    /// Replace the built-in term matcher.
    ///
    /// `.term()` is still required and is what reporters display, but lines
    /// are tested with `m` instead. Case and word options are ignored.
    pub fn with_matcher(mut self, m: impl Matcher + 'static) -> Self {
        self.matcher = Some(Box::new(m));
        self
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Replace the recognized extension set. Entries may carry a leading dot.
    pub fn extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = Extensions::new(exts);
        self
    }

    /// Maximum traversal depth. `1` means files directly under the root.
    /// Unlimited by default.
    pub fn max_depth(mut self, d: usize) -> Self {
        self.max_depth = Some(d);
        self
    }

    /// Report one result per matching file instead of one per line.
    pub fn per_file(mut self, yes: bool) -> Self {
        self.granularity = if yes { Granularity::File } else { Granularity::Line };
        self
    }

    // ── Output ────────────────────────────────────────────────────────────

    /// Receive matches and skipped files as they happen.
    pub fn reporter(mut self, r: impl Reporter + 'static) -> Self {
        self.reporter = Some(Box::new(r));
        self
    }

    /// Collect matches into [`Results::found`].
    ///
    /// Disabled by default; results are streamed to the reporter.
    pub fn collect_matches(mut self, yes: bool) -> Self {
        self.collect_matches = yes;
        self
    }

    /// Collect skipped-file errors into [`Results::errors`].
    pub fn collect_errors(mut self, yes: bool) -> Self {
        self.collect_errors = yes;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Validate the configuration and return a [`Scanner`].
    ///
    /// No file is opened here; the root is only checked to be a directory.
    ///
    /// # Errors
    ///
    /// [`ScanError::MissingRoot`] if no root was set,
    /// [`ScanError::InvalidRoot`] if it is not an existing directory,
    /// [`ScanError::EmptyTerm`] if the term is blank.
    pub fn build(self) -> Result<Scanner, ScanError> {
        let root = self.root.ok_or(ScanError::MissingRoot)?;
        if !root.is_dir() {
            return Err(ScanError::InvalidRoot(root));
        }
        if self.term.trim().is_empty() {
            return Err(ScanError::EmptyTerm);
        }

        let matcher: Box<dyn Matcher> = match self.matcher {
            Some(m) => m,
            None    => Box::new(TermMatcher::new(&self.term, self.mode)),
        };

        Ok(Scanner {
            request: SearchRequest {
                root,
                term:        self.term,
                mode:        self.mode,
                extensions:  self.extensions,
                granularity: self.granularity,
                max_depth:   self.max_depth,
            },
            matcher,
            collect_matches: self.collect_matches,
            collect_errors:  self.collect_errors,
        })
    }

    /// Execute the scan and return the totals.
    ///
    /// Blocks until every candidate has been scanned. Per-file failures are
    /// passed to the reporter and counted in [`ScanStats::skipped`](crate::ScanStats);
    /// only the startup errors listed on [`build()`](SearchBuilder::build)
    /// are returned as `Err`.
    pub fn run(mut self) -> Result<Results, ScanError> {
        let mut reporter = self
            .reporter
            .take()
            .unwrap_or_else(|| Box::new(NullReporter));
        let scanner = self.build()?;
        Ok(scanner.run(reporter.as_mut()))
    }
}

// ---------------------------------------------------------------------------
// Built-in matcher
// ---------------------------------------------------------------------------

/// Substring search for a fixed term, optionally case-insensitive and
/// optionally restricted to whole words.
pub(crate) struct TermMatcher {
    needle: String,
    mode:   MatchMode,
}

impl TermMatcher {
    pub(crate) fn new(term: &str, mode: MatchMode) -> Self {
        let needle = if mode.case_sensitive {
            term.to_string()
        } else {
            term.to_lowercase()
        };
        Self { needle, mode }
    }
}

impl Matcher for TermMatcher {
    fn is_match(&self, line: &str) -> bool {
        if self.mode.case_sensitive {
            self.find_in(line)
        } else {
            self.find_in(&line.to_lowercase())
        }
    }
}

impl TermMatcher {
    fn find_in(&self, haystack: &str) -> bool {
        if !self.mode.whole_word {
            return haystack.contains(&self.needle);
        }
        haystack
            .match_indices(&self.needle)
            .any(|(start, m)| is_word_bounded(haystack, start, start + m.len()))
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `haystack[start..end]` is neither preceded nor followed by a word character.
fn is_word_bounded(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack[..start].chars().next_back();
    let after = haystack[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(term: &str, case_sensitive: bool, whole_word: bool) -> TermMatcher {
        TermMatcher::new(term, MatchMode { case_sensitive, whole_word })
    }

    #[test]
    fn default_mode_ignores_case() {
        let m = matcher("World", false, false);
        assert!(m.is_match("hello world"));
        assert!(m.is_match("HELLO WORLD"));
        assert!(!m.is_match("hello word"));
    }

    #[test]
    fn case_sensitive_mode_is_exact() {
        let m = matcher("world", true, false);
        assert!(m.is_match("hello world"));
        assert!(!m.is_match("hello World"));
    }

    #[test]
    fn whole_word_requires_boundaries() {
        let m = matcher("world", false, true);
        assert!(m.is_match("hello world"));
        assert!(m.is_match("world, hello"));
        assert!(m.is_match("(world)"));
        assert!(!m.is_match("worldwide news"));
        assert!(!m.is_match("underworld"));
        assert!(!m.is_match("world_cup"));
    }

    #[test]
    fn whole_word_checks_every_occurrence() {
        let m = matcher("cat", false, true);
        assert!(m.is_match("concatenate the cat"));
    }

    #[test]
    fn phrases_match_across_spaces() {
        let m = matcher("exact sentence", false, true);
        assert!(m.is_match("find the Exact Sentence here"));
    }

    #[test]
    fn build_rejects_blank_term() {
        let dir = tempfile::tempdir().unwrap();
        let err = crate::search()
            .root(dir.path())
            .term("   ")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, ScanError::EmptyTerm));
    }

    #[test]
    fn build_requires_root() {
        let err = crate::search().term("x").build().err().unwrap();
        assert!(matches!(err, ScanError::MissingRoot));
        assert!(!err.is_recoverable());
    }
}
