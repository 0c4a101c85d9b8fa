use async_trait::async_trait;
use url::Url;

use super::supabase::StorageError;

/// Object storage of the hosted backend. The player only ever asks it for public URLs.
#[async_trait]
pub trait StorageBackend: Send + Sync + std::fmt::Debug {
    /// Public URL of `object_path` inside `bucket`.
    async fn get_public_url(&self, bucket: &str, object_path: &str) -> Result<Url, StorageError>;
}
