//! # Error Types
//!
//! Domain-specific failures for the DeepGuard analysis pipeline. The split
//! between [`ValidationError`] and the backend error kinds is load-bearing:
//! the HTTP layer maps validation failures to 400 and everything else to
//! 500, passing the underlying message through verbatim.

use thiserror::Error;

/// Failures caused by the client's input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The multipart request carried no `file` field.
    #[error("No file provided")]
    MissingFile,

    /// The uploaded part had an empty filename.
    #[error("No file selected")]
    EmptyFilename,

    /// The declared extension is outside the allow-set.
    #[error("Unsupported file type '{extension}'. Allowed: JPG, PNG, WEBP, BMP, GIF")]
    UnsupportedType { extension: String },

    /// The spooled upload exceeds the size limit.
    #[error("File too large ({size_mb:.1} MB). Max allowed: {max_mb} MB")]
    FileTooLarge { size_mb: f64, max_mb: u64 },

    /// The request body carried no `url` field.
    #[error("No URL provided")]
    MissingUrl,

    /// The `url` field was present but blank.
    #[error("URL cannot be empty")]
    EmptyUrl,

    /// The URL does not use an http(s) scheme.
    #[error("Invalid URL. Must start with http:// or https://")]
    InvalidUrlScheme,
}

/// Failures while acquiring or decoding the image to analyze.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The network fetch failed or returned a non-success status.
    #[error("Failed to download {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    /// The response did not declare an image content type.
    #[error("URL does not point to an image (Content-Type: {content_type})")]
    NotAnImage { content_type: String },

    /// The bytes could not be decoded as a supported image encoding.
    #[error("Could not decode image data: {reason}")]
    DecodeFailed { reason: String },

    /// Re-encoding the decoded image for spooling failed.
    #[error("Could not encode image: {reason}")]
    EncodeFailed { reason: String },

    /// Writing or inspecting the spooled temporary file failed.
    #[error("Failed to spool image at {path}: {source}")]
    Spool {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failures of the external classification capability.
#[derive(Debug, Clone, Error)]
pub enum ClassifierError {
    /// The capability was not successfully initialized at startup. This is
    /// a user-facing condition distinct from a per-request failure.
    #[error("AI model is not available: {reason}")]
    Unavailable { reason: String },

    /// The classification call itself failed. No retries are performed.
    #[error("Classification request failed: {reason}")]
    RequestFailed { reason: String },

    /// The capability answered with something we could not interpret.
    #[error("Classifier returned a malformed response: {reason}")]
    MalformedResponse { reason: String },

    /// The returned score pair was non-finite or not normalizable.
    #[error("Classifier returned unusable scores: {reason}")]
    InvalidScores { reason: String },
}

/// Failures of the bounded history store.
#[derive(Debug, Clone, Error)]
pub enum HistoryError {
    #[error("History lock poisoned: {reason}")]
    LockPoisoned { reason: String },
}

/// Umbrella error for a single analysis request.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error(transparent)]
    History(#[from] HistoryError),
}

impl AnalysisError {
    /// True when the failure was caused by the client's input rather than
    /// the backend. Drives the 400/500 split at the transport boundary.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AnalysisError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_name_the_constraint() {
        let err = ValidationError::UnsupportedType {
            extension: ".txt".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported file type '.txt'. Allowed: JPG, PNG, WEBP, BMP, GIF"
        );

        let err = ValidationError::FileTooLarge {
            size_mb: 10.5,
            max_mb: 10,
        };
        assert_eq!(err.to_string(), "File too large (10.5 MB). Max allowed: 10 MB");
    }

    #[test]
    fn client_error_split_follows_the_taxonomy() {
        assert!(AnalysisError::from(ValidationError::EmptyUrl).is_client_error());
        assert!(
            !AnalysisError::from(ClassifierError::Unavailable {
                reason: "endpoint unreachable".to_string(),
            })
            .is_client_error()
        );
        assert!(
            !AnalysisError::from(ResourceError::NotAnImage {
                content_type: "text/html".to_string(),
            })
            .is_client_error()
        );
    }
}
