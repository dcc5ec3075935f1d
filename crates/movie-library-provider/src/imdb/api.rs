use crate::error::ProviderError;
use crate::raw::RawRecord;
use movie_library_models::SearchHit;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: String,
    title: String,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    year: Option<u32>,
}

/// Free-text title search. Returns the provider's raw hit list in
/// provider order; an empty list is a normal response, not an error.
pub async fn search(
    client: &Client,
    base_url: &str,
    query: &str,
    limit: usize,
) -> Result<Vec<SearchHit>, ProviderError> {
    let url = format!(
        "{}/search/title?q={}&limit={}",
        base_url,
        urlencoding::encode(query),
        limit
    );
    debug!("searching provider: {}", url);

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Service { status, body });
    }

    let body = response.text().await?;
    let parsed: SearchResponse = parse_body(&body)?;
    Ok(parsed
        .results
        .into_iter()
        .map(|hit| SearchHit {
            id: hit.id,
            title: hit.title,
            kind: hit.kind,
            year: hit.year,
        })
        .collect())
}

/// Full-record fetch by surrogate id. The body is kept as a raw mapping;
/// normalization happens at the caller's boundary.
pub async fn fetch(
    client: &Client,
    base_url: &str,
    surrogate_id: &str,
) -> Result<RawRecord, ProviderError> {
    let url = format!("{}/title/{}", base_url, urlencoding::encode(surrogate_id));
    debug!("fetching provider record: {}", url);

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Service { status, body });
    }

    let body = response.text().await?;
    parse_body(&body)
}

/// A body that fails to parse is a malformed response, not a transport
/// fault, so retry loops abort instead of hammering a broken endpoint.
fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::MalformedResponse(e.to_string()))
}
