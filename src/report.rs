use std::io::{self, Write};
use std::path::Path;

use colored::{ColoredString, Colorize};

use crate::error::ScanError;
use crate::request::SearchRequest;
use crate::results::{MatchResult, Results};
use crate::traits::Reporter;

/// Reporter that discards everything. Used when none is configured.
pub struct NullReporter;

impl Reporter for NullReporter {
    fn on_match(&mut self, _result: &MatchResult) {}
}

/// Human-readable terminal output.
///
/// With color enabled, each matching path is tinted by file type and
/// wrapped in an OSC 8 hyperlink so terminals that support it can open the
/// file on click. With color disabled the output is plain text, suitable
/// for pipes.
pub struct ConsoleReporter<W: Write> {
    out:       W,
    use_color: bool,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout(use_color: bool) -> Self {
        Self::new(io::stdout(), use_color)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, use_color: bool) -> Self {
        Self { out, use_color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_path(&self, path: &Path) -> String {
        let shown = path.display().to_string();
        if !self.use_color {
            return shown;
        }
        let tinted = extension_color(path)(&shown).to_string();
        format!(
            "\x1b]8;;file://{}\x1b\\{}\x1b]8;;\x1b\\",
            percent_encode_path(&shown),
            tinted
        )
    }

    /// Output is decorative; a closed pipe must not abort the scan.
    fn emit(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}") {
            log::debug!("failed to write report line: {e}");
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_start(&mut self, request: &SearchRequest) {
        let line = format!(
            "Searching for '{}' under '{}'...",
            request.term,
            request.root.display()
        );
        self.emit(&line);
        self.emit("");
    }

    fn on_match(&mut self, result: &MatchResult) {
        let mut line = self.format_path(&result.path);

        if let Some(n) = result.line_number {
            line.push_str(&self.colorize(&format!(":{n}"), |s| s.bright_black()));
        }
        if let Some(p) = result.page {
            line.push_str(&self.colorize(&format!(" (page {p})"), |s| s.bright_black()));
        }
        if let Some(text) = &result.line {
            line.push_str("  ");
            line.push_str(text);
        }

        self.emit(&line);
    }

    fn on_skip(&mut self, error: &ScanError) {
        let line = self.colorize(&format!("  Warning: {error}"), |s| s.yellow());
        self.emit(&line);
    }

    fn on_end(&mut self, results: &Results) {
        self.emit("");
        let summary = if results.matches == 0 {
            "No files found containing the specified sentence.".to_string()
        } else {
            format!(
                "Found {} {} in {} {}.",
                results.matches,
                plural(results.matches, "match", "matches"),
                results.stats.files_matched,
                plural(results.stats.files_matched, "file", "files"),
            )
        };
        let summary = self.colorize(&summary, |s| s.bold());
        self.emit(&summary);

        if results.stats.skipped > 0 {
            let skipped = format!(
                "Skipped {} unreadable {}.",
                results.stats.skipped,
                plural(results.stats.skipped, "entry", "entries"),
            );
            let skipped = self.colorize(&skipped, |s| s.yellow());
            self.emit(&skipped);
        }

        if let Err(e) = self.out.flush() {
            log::debug!("failed to flush report: {e}");
        }
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}

/// Tint for a path, by file type.
fn extension_color(path: &Path) -> fn(&str) -> ColoredString {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "html" | "htm" => |s: &str| s.green(),
        "css" | "conf" => |s: &str| s.blue(),
        "js" | "xml" | "json" => |s: &str| s.red(),
        "py" | "sh" => |s: &str| s.cyan(),
        "md" | "yml" | "yaml" => |s: &str| s.magenta(),
        "log" | "pdf" => |s: &str| s.yellow(),
        _ => |s: &str| s.white(),
    }
}

/// Percent-encode a path for a `file://` URL, leaving `/` and unreserved
/// characters alone.
fn percent_encode_path(path: &str) -> String {
    let mut encoded = String::with_capacity(path.len());
    for b in path.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                encoded.push(b as char)
            }
            _ => encoded.push_str(&format!("%{b:02X}")),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn hit(path: &str, page: Option<usize>, line: usize, text: &str) -> MatchResult {
        MatchResult {
            path:        PathBuf::from(path),
            page,
            line_number: Some(line),
            line:        Some(text.into()),
        }
    }

    fn render(f: impl FnOnce(&mut ConsoleReporter<Vec<u8>>)) -> String {
        let mut r = ConsoleReporter::new(Vec::new(), false);
        f(&mut r);
        String::from_utf8(r.into_inner()).unwrap()
    }

    #[test]
    fn plain_match_line() {
        let out = render(|r| r.on_match(&hit("/docs/a.txt", None, 3, "hello world")));
        assert_eq!(out, "/docs/a.txt:3  hello world\n");
    }

    #[test]
    fn pdf_match_names_the_page() {
        let out = render(|r| r.on_match(&hit("/docs/c.pdf", Some(2), 1, "invoice 42")));
        assert_eq!(out, "/docs/c.pdf:1 (page 2)  invoice 42\n");
    }

    #[test]
    fn summary_for_no_matches() {
        let out = render(|r| r.on_end(&Results::default()));
        assert!(out.contains("No files found containing the specified sentence."));
        assert!(!out.contains("Skipped"));
    }

    #[test]
    fn summary_counts_matches_and_skips() {
        let mut results = Results::default();
        results.matches = 3;
        results.stats.files_matched = 1;
        results.stats.skipped = 2;
        let out = render(|r| r.on_end(&results));
        assert!(out.contains("Found 3 matches in 1 file."));
        assert!(out.contains("Skipped 2 unreadable entries."));
    }

    #[test]
    fn colored_output_wraps_path_in_hyperlink() {
        let mut r = ConsoleReporter::new(Vec::new(), true);
        r.on_match(&hit("/my docs/a.txt", None, 1, "x"));
        let out = String::from_utf8(r.into_inner()).unwrap();
        assert!(out.starts_with("\x1b]8;;file:///my%20docs/a.txt\x1b\\"));
    }

    #[test]
    fn percent_encoding_keeps_separators() {
        assert_eq!(percent_encode_path("/a b/ü.txt"), "/a%20b/%C3%BC.txt");
    }
}
