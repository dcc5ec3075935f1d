use crate::error::ProviderError;
use crate::raw::RawRecord;
use async_trait::async_trait;
use movie_library_models::SearchHit;

/// External movie-metadata lookup: free-text search plus full-record
/// fetch by surrogate id.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, ProviderError>;

    async fn fetch(&self, surrogate_id: &str) -> Result<RawRecord, ProviderError>;
}
