use crate::error::ProviderError;
use crate::imdb::api;
use crate::raw::RawRecord;
use crate::traits::MetadataProvider;
use async_trait::async_trait;
use movie_library_models::SearchHit;
use reqwest::Client;
use std::time::Duration;

/// Browser-like user agent; the provider rejects obviously scripted
/// clients with 403/405.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Process-lifetime client for the IMDb-backed metadata service.
#[derive(Clone)]
pub struct ImdbClient {
    client: Client,
    base_url: String,
}

impl ImdbClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MetadataProvider for ImdbClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, ProviderError> {
        api::search(&self.client, &self.base_url, query, limit).await
    }

    async fn fetch(&self, surrogate_id: &str) -> Result<RawRecord, ProviderError> {
        api::fetch(&self.client, &self.base_url, surrogate_id).await
    }
}
