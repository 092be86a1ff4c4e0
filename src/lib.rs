//! # textseek
//!
//! Search a directory tree of text files and PDFs for a word or phrase.
//!
//! The scan is a single sequential pipeline: walk the tree, keep files with
//! a recognized extension, extract their text, test each line, report each
//! match. Files that cannot be read are skipped and reported; they never
//! stop the scan.
//!
//! textseek owns the walk, the extraction, the matching and the contracts
//! ([`Matcher`], [`Reporter`]). Presentation belongs to the reporter; the
//! crate ships a [`ConsoleReporter`] for terminals.
//!
//! # Quick Start
//!
//! ```rust
//! use std::fs;
//!
//! let dir = tempfile::tempdir().unwrap();
//! fs::write(dir.path().join("a.txt"), "hello world").unwrap();
//! fs::write(dir.path().join("b.bin"), [0u8, 159, 146, 150]).unwrap();
//!
//! let results = textseek::search()
//!     .root(dir.path())
//!     .term("world")
//!     .collect_matches(true)
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(results.matches, 1);
//! assert_eq!(results.found[0].line_number, Some(1));
//! ```
//!
//! # Lazy iteration
//!
//! [`SearchBuilder::build`] returns a [`Scanner`] whose iterators walk the
//! tree on demand:
//!
//! ```rust
//! # let dir = tempfile::tempdir().unwrap();
//! # std::fs::write(dir.path().join("notes.md"), "invoice 42\n").unwrap();
//! let scanner = textseek::search()
//!     .root(dir.path())
//!     .term("invoice")
//!     .build()
//!     .unwrap();
//!
//! for hit in scanner.matches() {
//!     println!("{}:{:?}", hit.path.display(), hit.line_number);
//! }
//! ```

#![forbid(unsafe_code)]

pub mod engine;

mod builder;
mod entry;
mod error;
mod extract;
mod report;
mod request;
mod results;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::SearchBuilder;
pub use engine::{FileScan, Scanner};
pub use entry::{DocumentKind, Extensions, FileCandidate, DEFAULT_EXTENSIONS};
pub use error::ScanError;
pub use report::{ConsoleReporter, NullReporter};
pub use request::{Granularity, MatchMode, SearchRequest};
pub use results::{FileReport, MatchResult, Results, ScanStats};
pub use traits::{Matcher, Reporter};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`SearchBuilder`] to configure and run a scan.
pub fn search() -> SearchBuilder {
    SearchBuilder::default()
}
