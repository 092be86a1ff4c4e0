use std::fs;
use std::panic;
use std::path::Path;

use crate::entry::{DocumentKind, FileCandidate};
use crate::error::ScanError;

/// Extracted text of one candidate.
///
/// Plain text files are a single unnumbered page. PDFs keep their page
/// structure so matches can name the page they were found on.
#[derive(Debug)]
pub struct Document {
    pub pages: Vec<String>,
    pub paged: bool,
}

/// Read `candidate` and extract its text.
///
/// The file handle is opened and closed within this call.
pub fn extract(candidate: &FileCandidate) -> Result<Document, ScanError> {
    match candidate.kind {
        DocumentKind::Text => read_text(&candidate.path).map(|text| Document {
            pages: vec![text],
            paged: false,
        }),
        DocumentKind::Pdf => read_pdf(&candidate.path).map(|pages| Document {
            pages,
            paged: true,
        }),
    }
}

fn read_text(path: &Path) -> Result<String, ScanError> {
    let bytes = fs::read(path).map_err(|e| ScanError::from_io(path.to_path_buf(), e))?;
    decode_text(path, &bytes)
}

/// Decode raw bytes as text, replacing invalid UTF-8.
///
/// A NUL byte marks the content as binary.
pub(crate) fn decode_text(path: &Path, bytes: &[u8]) -> Result<String, ScanError> {
    if bytes.contains(&0) {
        return Err(ScanError::NotText(path.to_path_buf()));
    }
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

fn read_pdf(path: &Path) -> Result<Vec<String>, ScanError> {
    let bytes = fs::read(path).map_err(|e| ScanError::from_io(path.to_path_buf(), e))?;

    // pdf-extract panics on some malformed inputs instead of returning Err.
    // The panic is contained here, but the process-wide panic hook still
    // prints its message to stderr; the hook is global, so it is left alone.
    let extracted = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(&bytes));

    match extracted {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(ScanError::Pdf {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
        Err(payload) => Err(ScanError::Pdf {
            path: path.to_path_buf(),
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "PDF parser panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nul_bytes_mark_binary_content() {
        let err = decode_text(Path::new("x.txt"), b"abc\0def").unwrap_err();
        assert!(matches!(err, ScanError::NotText(_)));
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let text = decode_text(Path::new("x.txt"), b"caf\xe9 latte").unwrap();
        assert!(text.contains("latte"));
    }

    #[test]
    fn garbage_pdf_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"this is not a pdf").unwrap();
        assert!(matches!(read_pdf(&path), Err(ScanError::Pdf { .. })));
    }
}
