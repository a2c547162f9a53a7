use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the splicing helpers
#[derive(Error, Debug)]
pub enum SpliceError {
    #[error("IO error: {source}")]
    Io {
        source: std::io::Error,
        path: Option<PathBuf>,
    },

    #[error("can't find {marker:?}{}", PathSuffix(.path))]
    MarkerNotFound {
        marker: String,
        path: Option<PathBuf>,
    },

    #[error("Entropy source failed: {message}")]
    Entropy { message: String },

    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

/// Renders ` in <path>` when a path is known
struct PathSuffix<'a>(&'a Option<PathBuf>);

impl fmt::Display for PathSuffix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(path) => write!(f, " in {}", path.display()),
            None => Ok(()),
        }
    }
}

impl SpliceError {
    /// Create a new IO error with path context
    pub fn io_error(err: std::io::Error, path: Option<impl Into<PathBuf>>) -> Self {
        Self::Io {
            source: err,
            path: path.map(|p| p.into()),
        }
    }

    /// Create a marker-not-found error for in-memory content
    pub fn marker_not_found(marker: impl Into<String>) -> Self {
        Self::MarkerNotFound {
            marker: marker.into(),
            path: None,
        }
    }

    /// Create a new entropy error
    pub fn entropy(message: impl Into<String>) -> Self {
        Self::Entropy {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Attach the file the error happened in, keeping any path already recorded
    pub fn in_file(self, file: impl Into<PathBuf>) -> Self {
        match self {
            Self::MarkerNotFound { marker, path: None } => Self::MarkerNotFound {
                marker,
                path: Some(file.into()),
            },
            Self::Io { source, path: None } => Self::Io {
                source,
                path: Some(file.into()),
            },
            other => other,
        }
    }

    /// Whether this error reports a missing marker
    pub fn is_marker_not_found(&self) -> bool {
        matches!(self, Self::MarkerNotFound { .. })
    }

    /// Path associated with the error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } | Self::MarkerNotFound { path, .. } => path.as_ref(),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SpliceError {
    fn from(error: std::io::Error) -> Self {
        SpliceError::io_error(error, None::<PathBuf>)
    }
}

impl From<toml::de::Error> for SpliceError {
    fn from(error: toml::de::Error) -> Self {
        SpliceError::config(error.to_string())
    }
}

/// Result type alias using SpliceError
pub type SpliceResult<T> = Result<T, SpliceError>;

/// Contextual error mapping function
pub fn map_io_err<P: Into<PathBuf>>(path: P) -> impl FnOnce(std::io::Error) -> SpliceError {
    let path = path.into();
    move |err| SpliceError::io_error(err, Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_not_found_message_quotes_marker() {
        let err = SpliceError::marker_not_found("import (");
        assert_eq!(err.to_string(), "can't find \"import (\"");
        assert!(err.is_marker_not_found());
    }

    #[test]
    fn test_marker_not_found_with_path() {
        let err = SpliceError::marker_not_found("// TODO").in_file("api/v1/ship_webhook.go");
        assert_eq!(
            err.to_string(),
            "can't find \"// TODO\" in api/v1/ship_webhook.go"
        );
        assert_eq!(err.path(), Some(&PathBuf::from("api/v1/ship_webhook.go")));
    }

    #[test]
    fn test_in_file_keeps_existing_path() {
        let err = SpliceError::io_error(
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            Some("first.go"),
        )
        .in_file("second.go");
        assert_eq!(err.path(), Some(&PathBuf::from("first.go")));
    }

    #[test]
    fn test_map_io_err_records_path() {
        let err = map_io_err("main.go")(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(matches!(err, SpliceError::Io { .. }));
        assert_eq!(err.path(), Some(&PathBuf::from("main.go")));
    }
}
