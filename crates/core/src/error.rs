use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal outcomes of a resolution run.
///
/// Absent files, placeholder credentials and missing keys are not errors;
/// they resolve to defaults where they are detected.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed properties file {} at line {line}: {message}", path.display())]
    MalformedProperties {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

impl ResolveError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ResolveError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            ResolveError::Io { path, .. } => path,
            ResolveError::MalformedProperties { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_io_error_display() {
        let err = ResolveError::io(
            "app/google-services.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        );

        let msg = err.to_string();
        assert!(msg.contains("app/google-services.json"));
        assert!(msg.contains("permission denied"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_malformed_properties_display() {
        let err = ResolveError::MalformedProperties {
            path: PathBuf::from("local.properties"),
            line: 3,
            message: "Malformed \\uxxxx encoding".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Malformed properties file local.properties at line 3: Malformed \\uxxxx encoding"
        );
        assert_eq!(err.path(), &PathBuf::from("local.properties"));
    }
}
