use thiserror::Error;

/// Typed error enum for storage lookups
///
/// Lets the source resolver log why a stored file could not be used before it
/// falls back to the direct URL.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    /// The object does not exist (404)
    #[error("Stored object not found: {bucket}/{path}")]
    NotFound { bucket: String, path: String },

    /// Client error (400-499, excluding 404)
    /// Usually permanent, e.g. a private bucket or a bad API key
    #[error("Client error: {message} (status: {status})")]
    ClientError { status: u16, message: String },

    /// Server error (500+)
    #[error("Server error: {message} (status: {status})")]
    ServerError { status: u16, message: String },

    /// Network/connection errors (timeout, connection refused, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// The configured base URL or object path does not form a valid URL
    #[error("Invalid storage URL: {0}")]
    InvalidUrl(String),

    /// The backend answered without a public URL
    #[error("No public URL returned for {0}")]
    MissingPublicUrl(String),
}

impl StorageError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            StorageError::Network(format!("Request timeout: {}", error))
        } else if error.is_connect() {
            StorageError::Network(format!("Connection failed: {}", error))
        } else {
            StorageError::Network(error.to_string())
        }
    }

    /// Create an error from an HTTP status code for a lookup of `bucket/path`
    pub fn from_status(status: u16, bucket: &str, path: &str) -> Self {
        match status {
            404 => StorageError::NotFound {
                bucket: bucket.to_string(),
                path: path.to_string(),
            },
            400..=499 => StorageError::ClientError {
                status,
                message: format!("lookup of {}/{} rejected", bucket, path),
            },
            500..=599 => StorageError::ServerError {
                status,
                message: format!("lookup of {}/{} failed", bucket, path),
            },
            _ => StorageError::MissingPublicUrl(format!("{}/{} (HTTP {})", bucket, path, status)),
        }
    }
}
