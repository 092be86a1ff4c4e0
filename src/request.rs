use std::path::PathBuf;

use crate::entry::Extensions;

/// The configuration of a single scan.
///
/// Built and validated by [`SearchBuilder`](crate::SearchBuilder); immutable
/// for the duration of the run.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Directory the scan starts from. Always an existing directory.
    pub root: PathBuf,

    /// The word or phrase to look for. Never blank.
    pub term: String,

    pub mode: MatchMode,

    pub extensions: Extensions,

    pub granularity: Granularity,

    /// Maximum traversal depth. `1` means files directly under `root`.
    pub max_depth: Option<usize>,
}

/// How the built-in matcher compares the term against a line.
///
/// The default is a case-insensitive substring search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchMode {
    pub case_sensitive: bool,

    /// Only accept occurrences bounded by non-word characters.
    pub whole_word: bool,
}

/// What a single [`MatchResult`](crate::MatchResult) stands for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Granularity {
    /// One result per matching line, with line number and text.
    #[default]
    Line,

    /// One result per matching file, without line data.
    File,
}
