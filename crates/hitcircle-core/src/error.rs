use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unexpected end of replay data at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("Malformed length prefix at offset {offset}: {message}")]
    MalformedLength { offset: usize, message: String },

    #[error("Invalid session config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    /// Check if this error comes from a truncated or malformed binary buffer
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Error::UnexpectedEof { .. } | Error::MalformedLength { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.is_not_found());

        let other_io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err2 = Error::Io(other_io_err);
        assert!(!err2.is_not_found());
    }

    #[test]
    fn test_error_is_format_error() {
        let eof = Error::UnexpectedEof {
            offset: 3,
            needed: 4,
            remaining: 1,
        };
        assert!(eof.is_format_error());
        assert_eq!(
            eof.to_string(),
            "Unexpected end of replay data at offset 3: needed 4 bytes, 1 remaining"
        );

        let config = Error::InvalidConfig("hit window".to_string());
        assert!(!config.is_format_error());
    }
}
