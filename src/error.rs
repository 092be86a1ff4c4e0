use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    // Startup
    #[error("no root directory provided")]
    MissingRoot,

    #[error("folder not found: {}", .0.display())]
    InvalidRoot(PathBuf),

    #[error("search term cannot be empty")]
    EmptyTerm,

    // Per file
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a text file: {}", .0.display())]
    NotText(PathBuf),

    #[error("could not read PDF {}: {message}", path.display())]
    Pdf { path: PathBuf, message: String },

    // Traversal
    #[error("symlink loop: {}", .0.display())]
    SymlinkLoop(PathBuf),

    #[error("walk error: {0}")]
    Walk(String),
}

impl ScanError {
    /// The path this error occurred at, if applicable.
    /// Reporters use this to present "Skipped: <path>" without matching on variants.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::InvalidRoot(p)
            | Self::PermissionDenied(p)
            | Self::NotText(p)
            | Self::SymlinkLoop(p)
            | Self::Io { path: p, .. }
            | Self::Pdf { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether the scan can continue after this error.
    ///
    /// Per-file errors are recoverable: the file is skipped and the walk
    /// keeps going. Startup errors (bad root, empty term) are fatal.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::MissingRoot | Self::InvalidRoot(_) | Self::EmptyTerm
        )
    }

    pub(crate) fn from_io(path: PathBuf, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            Self::PermissionDenied(path)
        } else {
            Self::Io { path, source: err }
        }
    }
}
