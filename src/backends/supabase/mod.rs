mod errors;

pub use errors::StorageError;

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{debug, warn};
use url::Url;

use super::traits::StorageBackend;
use crate::config::StorageConfig;

/// Characters left untouched inside a single object path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Public-bucket access to the hosted backend's object storage.
///
/// Public URLs are derived locally the way the hosted client library does it:
/// `{base}/storage/v1/object/public/{bucket}/{path}`. When `verify_objects` is set
/// the object is probed with a `HEAD` request first so a missing upload surfaces
/// as [`StorageError::NotFound`] instead of a broken media element.
#[derive(Clone, Debug)]
pub struct SupabaseStorage {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
    verify_objects: bool,
}

impl SupabaseStorage {
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| StorageError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(StorageError::from_reqwest)?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            verify_objects: config.verify_objects,
        })
    }

    /// Build the public URL without contacting the backend.
    pub fn public_url(&self, bucket: &str, object_path: &str) -> Result<Url, StorageError> {
        let encoded_path = object_path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/");

        if encoded_path.is_empty() {
            return Err(StorageError::MissingPublicUrl(format!("{}/", bucket)));
        }

        let url = format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            utf8_percent_encode(bucket, PATH_SEGMENT),
            encoded_path
        );

        Url::parse(&url).map_err(|e| StorageError::InvalidUrl(format!("{}: {}", url, e)))
    }

    async fn verify(&self, url: &Url, bucket: &str, object_path: &str) -> Result<(), StorageError> {
        let mut request = self.client.head(url.clone());
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }

        let response = request.send().await.map_err(StorageError::from_reqwest)?;
        let status = response.status();

        if status.is_success() {
            debug!("Stored object {}/{} is reachable", bucket, object_path);
            Ok(())
        } else {
            warn!(
                "Stored object {}/{} answered HTTP {}",
                bucket, object_path, status
            );
            Err(StorageError::from_status(status.as_u16(), bucket, object_path))
        }
    }
}

#[async_trait]
impl StorageBackend for SupabaseStorage {
    async fn get_public_url(&self, bucket: &str, object_path: &str) -> Result<Url, StorageError> {
        let url = self.public_url(bucket, object_path)?;

        if self.verify_objects {
            self.verify(&url, bucket, object_path).await?;
        }

        Ok(url)
    }
}
