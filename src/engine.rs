use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use ignore::{Walk, WalkBuilder};

use crate::entry::FileCandidate;
use crate::error::ScanError;
use crate::extract::{self, Document};
use crate::request::{Granularity, SearchRequest};
use crate::results::{FileReport, MatchResult, Results, ScanStats};
use crate::traits::{Matcher, Reporter};

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// A validated, ready-to-run scan.
///
/// Created by [`SearchBuilder::build()`](crate::SearchBuilder::build). Each
/// call to [`files()`](Scanner::files), [`matches()`](Scanner::matches) or
/// [`run()`](Scanner::run) walks the tree afresh; a single iterator cannot
/// be rewound.
pub struct Scanner {
    pub(crate) request:         SearchRequest,
    pub(crate) matcher:         Box<dyn Matcher>,
    pub(crate) collect_matches: bool,
    pub(crate) collect_errors:  bool,
}

impl Scanner {
    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    /// Lazily walk the tree and scan each candidate in turn.
    ///
    /// Yields one [`FileReport`] per candidate, and an `Err` for each walk
    /// entry that could not be read (an unreadable directory, a symlink
    /// loop). Neither kind of error stops the walk.
    pub fn files(&self) -> FileScan<'_> {
        FileScan {
            walk:    walker(&self.request.root, self.request.max_depth),
            scanner: self,
            stats:   ScanStats::default(),
            start:   Instant::now(),
        }
    }

    /// Lazily yield every match, skipping files that could not be read.
    pub fn matches(&self) -> impl Iterator<Item = MatchResult> + '_ {
        self.files()
            .filter_map(|res| res.ok().and_then(|report| report.outcome.ok()))
            .flatten()
    }

    /// Drive the whole scan through `reporter` and return the totals.
    pub fn run(&self, reporter: &mut dyn Reporter) -> Results {
        reporter.on_start(&self.request);

        let mut matches = 0;
        let mut found   = Vec::new();
        let mut errors  = Vec::new();

        let mut scan = self.files();
        for res in scan.by_ref() {
            match res {
                Ok(FileReport { outcome: Ok(hits), .. }) => {
                    for hit in hits {
                        matches += 1;
                        reporter.on_match(&hit);
                        if self.collect_matches {
                            found.push(hit);
                        }
                    }
                }
                Ok(FileReport { outcome: Err(err), .. }) | Err(err) => {
                    reporter.on_skip(&err);
                    if self.collect_errors {
                        errors.push(err);
                    }
                }
            }
        }

        let stats = scan.stats();
        log::info!(
            "scanned {} of {} files in {:.3}s: {} matches in {} files, {} skipped",
            stats.candidates,
            stats.files,
            stats.duration.as_secs_f64(),
            matches,
            stats.files_matched,
            stats.skipped,
        );

        let results = Results {
            matches,
            found,
            stats,
            errors,
        };
        reporter.on_end(&results);
        results
    }

    fn scan_file(&self, candidate: &FileCandidate) -> Result<Vec<MatchResult>, ScanError> {
        let doc = extract::extract(candidate)?;
        Ok(match_document(
            &candidate.path,
            &doc,
            self.matcher.as_ref(),
            self.request.granularity,
        ))
    }
}

// ---------------------------------------------------------------------------
// FileScan
// ---------------------------------------------------------------------------

/// Iterator returned by [`Scanner::files()`].
///
/// Counters accumulate as the iterator advances; read them with
/// [`stats()`](FileScan::stats) once it is exhausted.
pub struct FileScan<'a> {
    walk:    Walk,
    scanner: &'a Scanner,
    stats:   ScanStats,
    start:   Instant,
}

impl FileScan<'_> {
    /// Counters so far, with the elapsed time since the scan started.
    pub fn stats(&self) -> ScanStats {
        ScanStats {
            duration: self.start.elapsed(),
            ..self.stats.clone()
        }
    }
}

impl Iterator for FileScan<'_> {
    type Item = Result<FileReport, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walk.next()? {
                Ok(e) => e,
                Err(e) => {
                    let err = map_ignore_error(e);
                    log::debug!("skipping: {err}");
                    self.stats.skipped += 1;
                    return Some(Err(err));
                }
            };

            let ft = match entry.file_type() {
                Some(ft) => ft,
                None     => continue,
            };

            if ft.is_dir() {
                self.stats.dirs += 1;
                continue;
            }
            // Symlinked directories are not descended into, but a link to a
            // regular file is scanned like the file itself.
            if !ft.is_file() && !(ft.is_symlink() && links_to_file(entry.path())) {
                continue;
            }
            self.stats.files += 1;

            // Unrecognized files are never opened.
            let candidate = match self.scanner.request.extensions.classify(entry.path()) {
                Some(c) => c,
                None    => continue,
            };
            self.stats.candidates += 1;

            log::debug!("scanning {}", candidate.path.display());
            let outcome = self.scanner.scan_file(&candidate);

            match &outcome {
                Ok(hits) if !hits.is_empty() => self.stats.files_matched += 1,
                Ok(_) => {}
                Err(err) => {
                    log::debug!("skipping: {err}");
                    self.stats.skipped += 1;
                }
            }

            return Some(Ok(FileReport { candidate, outcome }));
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sequential walker over `root`, sorted by file name so repeated runs over
/// an unchanged tree visit files in the same order.
fn walker(root: &Path, max_depth: Option<usize>) -> Walk {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .ignore(false)
        .parents(false)
        .hidden(false)
        .follow_links(false)
        .same_file_system(false)
        .max_depth(max_depth)
        .sort_by_file_name(|a, b| a.cmp(b));

    builder.build()
}

/// Whether `path` resolves to a regular file. Dangling links do not.
fn links_to_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// Test every line of `doc` against `matcher`.
///
/// At file granularity the first hit ends the search.
pub(crate) fn match_document(
    path: &Path,
    doc: &Document,
    matcher: &dyn Matcher,
    granularity: Granularity,
) -> Vec<MatchResult> {
    let mut hits = Vec::new();

    for (page_idx, text) in doc.pages.iter().enumerate() {
        for (line_idx, line) in text.lines().enumerate() {
            if !matcher.is_match(line) {
                continue;
            }

            if granularity == Granularity::File {
                return vec![MatchResult {
                    path:        path.to_path_buf(),
                    page:        None,
                    line_number: None,
                    line:        None,
                }];
            }

            hits.push(MatchResult {
                path:        path.to_path_buf(),
                page:        doc.paged.then_some(page_idx + 1),
                line_number: Some(line_idx + 1),
                line:        Some(line.trim().to_string()),
            });
        }
    }

    hits
}

fn map_ignore_error(e: ignore::Error) -> ScanError {
    match e {
        ignore::Error::WithPath { path, err } => match *err {
            ignore::Error::Io(io_err) => ScanError::from_io(path, io_err),
            other => ScanError::Walk(format!("{}: {}", path.display(), other)),
        },
        ignore::Error::WithDepth { err, .. } => map_ignore_error(*err),
        ignore::Error::Loop { child, .. } => ScanError::SymlinkLoop(child),
        ignore::Error::Io(io_err) => ScanError::Io {
            path:   PathBuf::new(),
            source: io_err,
        },
        other => ScanError::Walk(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Contains(&'static str);

    impl Matcher for Contains {
        fn is_match(&self, line: &str) -> bool {
            line.contains(self.0)
        }
    }

    #[test]
    fn pdf_lines_are_numbered_per_page() {
        let doc = Document {
            pages: vec!["cover\ninvoice 41".into(), "total\n\ninvoice 42".into()],
            paged: true,
        };
        let hits = match_document(Path::new("c.pdf"), &doc, &Contains("invoice"), Granularity::Line);

        assert_eq!(hits.len(), 2);
        assert_eq!((hits[0].page, hits[0].line_number), (Some(1), Some(2)));
        assert_eq!((hits[1].page, hits[1].line_number), (Some(2), Some(3)));
        assert_eq!(hits[1].line.as_deref(), Some("invoice 42"));
    }

    #[test]
    fn file_granularity_stops_at_first_hit() {
        let doc = Document {
            pages: vec!["a hit\nanother hit\n".into()],
            paged: false,
        };
        let hits = match_document(Path::new("a.txt"), &doc, &Contains("hit"), Granularity::File);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].line_number, None);
        assert_eq!(hits[0].page, None);
    }

    fn io(kind: std::io::ErrorKind) -> std::io::Error {
        std::io::Error::from(kind)
    }

    #[test]
    fn unreadable_directory_maps_to_permission_denied() {
        let err = map_ignore_error(ignore::Error::WithPath {
            path: PathBuf::from("/srv/locked"),
            err:  Box::new(ignore::Error::Io(io(std::io::ErrorKind::PermissionDenied))),
        });

        assert!(matches!(err, ScanError::PermissionDenied(ref p) if p == Path::new("/srv/locked")));
        assert!(err.is_recoverable());
    }

    #[test]
    fn other_io_failures_keep_their_path() {
        let err = map_ignore_error(ignore::Error::WithPath {
            path: PathBuf::from("/srv/gone"),
            err:  Box::new(ignore::Error::Io(io(std::io::ErrorKind::NotFound))),
        });

        assert!(matches!(err, ScanError::Io { ref path, .. } if path == Path::new("/srv/gone")));
        assert!(err.is_recoverable());
    }

    #[test]
    fn depth_wrapper_is_unwrapped() {
        let err = map_ignore_error(ignore::Error::WithDepth {
            depth: 3,
            err:   Box::new(ignore::Error::WithPath {
                path: PathBuf::from("/srv/a/b/c"),
                err:  Box::new(ignore::Error::Io(io(std::io::ErrorKind::PermissionDenied))),
            }),
        });

        assert!(matches!(err, ScanError::PermissionDenied(_)));
    }

    #[test]
    fn symlink_loop_is_recoverable() {
        let err = map_ignore_error(ignore::Error::Loop {
            ancestor: PathBuf::from("/srv"),
            child:    PathBuf::from("/srv/loop"),
        });

        assert!(matches!(err, ScanError::SymlinkLoop(ref p) if p == Path::new("/srv/loop")));
        assert!(err.is_recoverable());
        assert_eq!(err.path(), Some(&PathBuf::from("/srv/loop")));
    }

    #[test]
    fn unclassified_walk_errors_become_walk_errors() {
        let err = map_ignore_error(ignore::Error::WithPath {
            path: PathBuf::from("/srv/x"),
            err:  Box::new(ignore::Error::UnrecognizedFileType("foo".into())),
        });

        assert!(matches!(err, ScanError::Walk(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn crlf_lines_are_trimmed() {
        let doc = Document {
            pages: vec!["one\r\n  two hit  \r\n".into()],
            paged: false,
        };
        let hits = match_document(Path::new("a.txt"), &doc, &Contains("hit"), Granularity::Line);
        assert_eq!(hits[0].line.as_deref(), Some("two hit"));
        assert_eq!(hits[0].line_number, Some(2));
    }
}
