use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Extensions scanned when the caller does not supply its own set.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "html", "htm", "txt", "css", "js", "py", "md", "xml", "json", "log", "csv", "sh", "yml",
    "yaml", "conf", "pdf",
];

/// A file selected for scanning because its extension is recognized.
///
/// Produced transiently by the traversal and dropped once the file has
/// been scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    /// Full path to the file.
    pub path: PathBuf,

    /// Lowercased extension, without the leading dot.
    pub extension: String,

    /// How the file's text is extracted.
    pub kind: DocumentKind,
}

/// How a candidate's content is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Read as UTF-8, replacing invalid sequences.
    Text,

    /// Text extracted page by page from a PDF.
    Pdf,
}

impl DocumentKind {
    fn for_extension(ext: &str) -> Self {
        if ext == "pdf" {
            Self::Pdf
        } else {
            Self::Text
        }
    }
}

/// The set of recognized extensions. Lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extensions {
    set: BTreeSet<String>,
}

impl Default for Extensions {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS.iter().copied())
    }
}

impl Extensions {
    /// Build a set from extensions given with or without a leading dot.
    /// Blank entries are ignored.
    pub fn new<I, S>(exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = exts
            .into_iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { set }
    }

    pub fn contains(&self, ext: &str) -> bool {
        self.set.contains(&ext.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.set.iter().map(String::as_str)
    }

    /// Turn `path` into a candidate if its extension is in the set.
    pub fn classify(&self, path: &Path) -> Option<FileCandidate> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        if !self.set.contains(&extension) {
            return None;
        }
        Some(FileCandidate {
            path: path.to_path_buf(),
            kind: DocumentKind::for_extension(&extension),
            extension,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_is_case_insensitive() {
        let exts = Extensions::default();
        let c = exts.classify(Path::new("/tmp/REPORT.PDF")).unwrap();
        assert_eq!(c.extension, "pdf");
        assert_eq!(c.kind, DocumentKind::Pdf);
        assert!(exts.classify(Path::new("/tmp/notes.Md")).is_some());
    }

    #[test]
    fn unrecognized_and_extensionless_files_are_rejected() {
        let exts = Extensions::default();
        assert!(exts.classify(Path::new("b.bin")).is_none());
        assert!(exts.classify(Path::new("Makefile")).is_none());
        assert!(exts.classify(Path::new(".txt")).is_none());
    }

    #[test]
    fn custom_sets_accept_leading_dots() {
        let exts = Extensions::new([".RS", "toml", " "]);
        assert!(exts.contains("rs"));
        assert!(exts.contains("TOML"));
        assert!(!exts.contains("txt"));
        assert_eq!(exts.iter().count(), 2);
    }
}
