use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::backends::{StorageBackend, StorageError};
use crate::config::StorageConfig;
use crate::constants::DEFAULT_MEDIA_EXTENSION;
use crate::models::PlayerProps;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("Failed to get the public URL of stored file {object_path}: {source}")]
    StoredFile {
        object_path: String,
        #[source]
        source: StorageError,
    },

    #[error("No video source available")]
    NoSource,
}

/// Where a resolved URL came from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOrigin {
    StoredFile { object_path: String },
    DirectUrl,
    /// The stored file lookup failed and the direct URL was used instead.
    Fallback { reason: ResolveError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSource {
    pub url: String,
    pub origin: SourceOrigin,
}

/// True when `path` ends in a dot followed by ASCII letters or digits.
pub fn has_extension(path: &str) -> bool {
    match path.rsplit_once('.') {
        Some((_, extension)) => {
            !extension.is_empty() && extension.chars().all(|c| c.is_ascii_alphanumeric())
        }
        None => false,
    }
}

/// Append `.mp4` only when the name carries no extension at all.
pub fn ensure_mp4_extension(path: &str) -> String {
    if path.is_empty() || has_extension(path) {
        path.to_string()
    } else {
        format!("{}.{}", path, DEFAULT_MEDIA_EXTENSION)
    }
}

/// Turns the caller's descriptor fields into one playable URL.
#[derive(Clone, Debug)]
pub struct SourceResolver {
    storage: Arc<dyn StorageBackend>,
    bucket: String,
    object_prefix: String,
}

impl SourceResolver {
    pub fn new(storage: Arc<dyn StorageBackend>, config: &StorageConfig) -> Self {
        Self {
            storage,
            bucket: config.bucket.clone(),
            object_prefix: config.object_prefix.trim_matches('/').to_string(),
        }
    }

    pub fn object_path(&self, file_name: &str) -> String {
        let file_name = ensure_mp4_extension(file_name.trim_start_matches('/'));
        if self.object_prefix.is_empty() {
            file_name
        } else {
            format!("{}/{}", self.object_prefix, file_name)
        }
    }

    pub async fn resolve(&self, props: &PlayerProps) -> Result<ResolvedSource, ResolveError> {
        let descriptor = props.effective_descriptor();

        if let Some(file_name) = descriptor.stored_file() {
            let object_path = self.object_path(file_name);

            match self.storage.get_public_url(&self.bucket, &object_path).await {
                Ok(url) => {
                    info!("Resolved stored file {} to {}", object_path, url);
                    return Ok(ResolvedSource {
                        url: url.to_string(),
                        origin: SourceOrigin::StoredFile { object_path },
                    });
                }
                Err(source) => {
                    let error = ResolveError::StoredFile {
                        object_path,
                        source,
                    };
                    warn!("{}", error);

                    return match direct_url(descriptor.fallback_url()) {
                        Some(url) => {
                            info!("Falling back to direct URL {}", url);
                            Ok(ResolvedSource {
                                url,
                                origin: SourceOrigin::Fallback { reason: error },
                            })
                        }
                        None => Err(error),
                    };
                }
            }
        }

        match direct_url(descriptor.fallback_url()) {
            Some(url) => {
                debug!("Using direct URL {}", url);
                Ok(ResolvedSource {
                    url,
                    origin: SourceOrigin::DirectUrl,
                })
            }
            None => {
                warn!("No video source available");
                Err(ResolveError::NoSource)
            }
        }
    }
}

fn direct_url(fallback: Option<&str>) -> Option<String> {
    fallback.map(ensure_mp4_extension)
}
