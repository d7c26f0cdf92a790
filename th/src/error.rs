//! Renamer error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while planning or applying renames
#[derive(Debug, Error)]
pub enum RenameError {
    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Failed to walk directory tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Target already exists: {} -> {}", from.display(), to.display())]
    TargetExists { from: PathBuf, to: PathBuf },

    #[error("Failed to rename {} -> {}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report: {0}")]
    Output(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_exists_message() {
        let err = RenameError::TargetExists {
            from: PathBuf::from("site/index.tmpl"),
            to: PathBuf::from("site/index.html"),
        };

        let msg = err.to_string();
        assert!(msg.contains("site/index.tmpl"));
        assert!(msg.contains("site/index.html"));
    }

    #[test]
    fn test_rename_error_keeps_source() {
        use std::error::Error as _;

        let err = RenameError::Rename {
            from: PathBuf::from("a.tmpl"),
            to: PathBuf::from("a.html"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        assert!(err.to_string().contains("a.tmpl -> a.html"));
        let source = err.source().expect("rename error should carry its io source");
        assert_eq!(source.to_string(), "denied");
    }
}
