use std::path::PathBuf;
use std::time::Duration;

use crate::entry::FileCandidate;
use crate::error::ScanError;

/// A single match: the file, and where in it the term occurred.
///
/// Line data is absent when the scan runs at file granularity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub path: PathBuf,

    /// 1-based page number. PDFs only.
    pub page: Option<usize>,

    /// 1-based line number, counted within the page for PDFs.
    pub line_number: Option<usize>,

    /// The matching line, trimmed.
    pub line: Option<String>,
}

/// The outcome of scanning one candidate.
///
/// A file that was read successfully but contains no match has an empty
/// `Ok` vector; a file that could not be read carries the reason.
#[derive(Debug)]
pub struct FileReport {
    pub candidate: FileCandidate,
    pub outcome: Result<Vec<MatchResult>, ScanError>,
}

impl FileReport {
    pub fn is_skipped(&self) -> bool {
        self.outcome.is_err()
    }

    pub fn matches(&self) -> &[MatchResult] {
        match &self.outcome {
            Ok(m) => m.as_slice(),
            Err(_) => &[],
        }
    }
}

/// The output of a completed scan.
///
/// `found` and `errors` are both opt-in. Enable them on the builder:
/// `.collect_matches(true)` and `.collect_errors(true)`.
#[derive(Debug, Default)]
pub struct Results {
    /// Total number of matches.
    pub matches: usize,

    /// Matches in traversal order.
    /// Only populated if `.collect_matches(true)` was set on the builder.
    pub found: Vec<MatchResult>,

    pub stats: ScanStats,

    /// Skipped files and unreadable walk entries.
    /// Only populated if `.collect_errors(true)` was set on the builder.
    pub errors: Vec<ScanError>,
}

/// Counters for a completed scan.
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    /// Regular files encountered, recognized or not.
    pub files: usize,

    /// Directories encountered, the root included.
    pub dirs: usize,

    /// Files with a recognized extension.
    pub candidates: usize,

    /// Files and walk entries that could not be read.
    pub skipped: usize,

    /// Candidates with at least one match.
    pub files_matched: usize,

    /// Wall-clock time from scan start to completion.
    pub duration: Duration,
}
