//! Drives a provider search and the user's pick from the candidate list.
//!
//! The provider intermittently returns empty hit lists and transient
//! HTTP faults for queries that would otherwise succeed, so the search
//! is retried up to a configured ceiling instead of looping forever.

use crate::output::Output;
use crate::{prompts, render};
use indicatif::ProgressBar;
use movie_library_config::SearchOptions;
use movie_library_models::{MovieRecord, SearchHit};
use movie_library_provider::{normalize_record, MetadataProvider, ProviderError};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("no search results for the query after {attempts} attempts")]
    SearchTimeout { attempts: u32 },

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("{0}")]
    Prompt(String),
}

/// Search the provider for `query` and let the user pick one candidate.
/// Returns `None` when the user cancels (blank or out-of-range input).
pub async fn pick_movie(
    provider: &dyn MetadataProvider,
    query: &str,
    options: &SearchOptions,
    output: &Output,
) -> Result<Option<MovieRecord>, SelectionError> {
    let hits = search_with_retry(provider, query, options).await?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Searching...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let collected = collect_candidates(provider, &hits, options).await;
    spinner.finish_and_clear();
    let mut candidates = collected?;

    if candidates.is_empty() {
        output.info("No movie results found for that title.");
        return Ok(None);
    }

    output.println("Please select one of the following options:\n");
    for (index, candidate) in candidates.iter().enumerate() {
        output.println(format!("{}.", index + 1));
        for line in render::provider_lines(candidate) {
            output.println(line);
        }
        output.println("");
    }
    output.println("Press Enter (or any other key) to cancel");

    let line = prompts::read_line(">>").map_err(|e| SelectionError::Prompt(e.to_string()))?;
    match parse_selection(&line, candidates.len()) {
        Some(index) => Ok(Some(candidates.swap_remove(index))),
        None => Ok(None),
    }
}

/// Retry the provider search until it yields a non-empty hit list or the
/// attempt ceiling is reached. Transient faults are reported and retried;
/// anything else aborts immediately.
async fn search_with_retry(
    provider: &dyn MetadataProvider,
    query: &str,
    options: &SearchOptions,
) -> Result<Vec<SearchHit>, SelectionError> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Searching...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let mut attempts = 0;
    let result = loop {
        attempts += 1;
        match provider.search(query, options.raw_hit_budget).await {
            Ok(hits) if !hits.is_empty() => break Ok(hits),
            Ok(_) => {
                debug!("empty search result list (attempt {})", attempts);
            }
            Err(e) if e.is_transient() => {
                warn!("search attempt {} failed: {}", attempts, e);
                spinner.println(format!("Search failed: {}. Retrying...", e));
            }
            Err(e) => break Err(SelectionError::Provider(e)),
        }

        if attempts >= options.max_attempts {
            break Err(SelectionError::SearchTimeout { attempts });
        }
    };

    spinner.finish_and_clear();
    result
}

/// Walk the raw hit list within the raw-hit budget, skip anything that is
/// not a movie with a year, and normalize full records for display until
/// the candidate cap is reached.
async fn collect_candidates(
    provider: &dyn MetadataProvider,
    hits: &[SearchHit],
    options: &SearchOptions,
) -> Result<Vec<MovieRecord>, SelectionError> {
    let mut candidates = Vec::new();

    for hit in hits.iter().take(options.raw_hit_budget) {
        if candidates.len() >= options.candidate_cap {
            break;
        }
        if !hit.qualifies_as_movie() {
            debug!("skipping non-movie hit {} ({:?})", hit.id, hit.kind);
            continue;
        }

        let raw = provider.fetch(&hit.id).await?;
        match normalize_record(&raw) {
            Ok(movie) => candidates.push(movie),
            Err(e) => debug!("skipping unusable record {}: {}", hit.id, e),
        }
    }

    Ok(candidates)
}

/// Map the user's line to a zero-based candidate index. Blank input,
/// non-numeric input, and numbers outside `[1, count]` all mean
/// "cancelled".
fn parse_selection(input: &str, count: usize) -> Option<usize> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|choice| (1..=count).contains(choice))
        .map(|choice| choice - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use movie_library_provider::RawRecord;
    use serde_json::{json, Value};
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    struct ScriptedProvider {
        searches: Mutex<VecDeque<Result<Vec<SearchHit>, ProviderError>>>,
        records: HashMap<String, Value>,
        fetches: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn new(searches: Vec<Result<Vec<SearchHit>, ProviderError>>) -> Self {
            Self {
                searches: Mutex::new(searches.into()),
                records: HashMap::new(),
                fetches: Mutex::new(Vec::new()),
            }
        }

        fn with_record(mut self, id: &str, record: Value) -> Self {
            self.records.insert(id.to_string(), record);
            self
        }
    }

    #[async_trait]
    impl MetadataProvider for ScriptedProvider {
        async fn search(
            &self,
            _query: &str,
            _limit: usize,
        ) -> Result<Vec<SearchHit>, ProviderError> {
            self.searches
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn fetch(&self, surrogate_id: &str) -> Result<RawRecord, ProviderError> {
            self.fetches.lock().unwrap().push(surrogate_id.to_string());
            let record = self
                .records
                .get(surrogate_id)
                .cloned()
                .unwrap_or_else(|| json!({}));
            match record {
                Value::Object(fields) => Ok(RawRecord::new(fields)),
                _ => unreachable!("test records are objects"),
            }
        }
    }

    fn movie_hit(id: &str, title: &str, year: u32) -> SearchHit {
        SearchHit {
            id: id.to_string(),
            title: title.to_string(),
            kind: Some("movie".to_string()),
            year: Some(year),
        }
    }

    fn movie_body(title: &str, year: u32) -> Value {
        json!({ "title": title, "year": year })
    }

    fn options(max_attempts: u32) -> SearchOptions {
        SearchOptions {
            max_attempts,
            raw_hit_budget: 20,
            candidate_cap: 10,
        }
    }

    #[tokio::test]
    async fn test_search_retries_empty_results_until_hits_arrive() {
        let provider = ScriptedProvider::new(vec![
            Ok(Vec::new()),
            Ok(Vec::new()),
            Ok(vec![movie_hit("tt1", "Heat", 1995)]),
        ]);

        let hits = search_with_retry(&provider, "Heat", &options(5))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_search_ceiling_surfaces_timeout() {
        let provider = ScriptedProvider::new((0..3).map(|_| Ok(Vec::new())).collect());

        let err = search_with_retry(&provider, "Heat", &options(3))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SelectionError::SearchTimeout { attempts: 3 }
        ));
    }

    #[tokio::test]
    async fn test_transient_errors_are_retried() {
        let provider = ScriptedProvider::new(vec![
            Err(ProviderError::Service {
                status: 503,
                body: "unavailable".to_string(),
            }),
            Ok(vec![movie_hit("tt1", "Heat", 1995)]),
        ]);

        let hits = search_with_retry(&provider, "Heat", &options(5))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_non_transient_error_aborts_immediately() {
        let provider = ScriptedProvider::new(vec![
            Err(ProviderError::MalformedResponse("not json".to_string())),
            Ok(vec![movie_hit("tt1", "Heat", 1995)]),
        ]);

        let err = search_with_retry(&provider, "Heat", &options(5))
            .await
            .unwrap_err();
        assert!(matches!(err, SelectionError::Provider(_)));
    }

    #[tokio::test]
    async fn test_tv_episodes_are_filtered_and_cap_still_reached() {
        // 12 raw hits: one TV episode, eleven movies. The presented list
        // excludes the episode and still fills all 10 candidate slots.
        let mut hits = Vec::new();
        let mut provider = ScriptedProvider::new(vec![]);
        for i in 0..12u32 {
            let id = format!("tt{:04}", i);
            if i == 2 {
                hits.push(SearchHit {
                    id: id.clone(),
                    title: "Some Episode".to_string(),
                    kind: Some("tv episode".to_string()),
                    year: Some(2010),
                });
            } else {
                hits.push(movie_hit(&id, &format!("Movie {}", i), 1990 + i));
            }
            provider = provider.with_record(&id, movie_body(&format!("Movie {}", i), 1990 + i));
        }

        let candidates = collect_candidates(&provider, &hits, &options(1))
            .await
            .unwrap();
        assert_eq!(candidates.len(), 10);
        assert!(!candidates.iter().any(|c| c.title == "Movie 2"));

        let fetched = provider.fetches.lock().unwrap();
        assert!(!fetched.contains(&"tt0002".to_string()));
    }

    #[tokio::test]
    async fn test_hits_without_year_are_skipped() {
        let hits = vec![
            SearchHit {
                id: "tt1".to_string(),
                title: "Undated".to_string(),
                kind: Some("movie".to_string()),
                year: None,
            },
            movie_hit("tt2", "Heat", 1995),
        ];
        let provider =
            ScriptedProvider::new(vec![]).with_record("tt2", movie_body("Heat", 1995));

        let candidates = collect_candidates(&provider, &hits, &options(1))
            .await
            .unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "Heat");
    }

    #[tokio::test]
    async fn test_raw_hit_budget_bounds_fetches() {
        let hits: Vec<SearchHit> = (0..6)
            .map(|i| movie_hit(&format!("tt{}", i), &format!("Movie {}", i), 2000))
            .collect();
        let mut provider = ScriptedProvider::new(vec![]);
        for i in 0..6 {
            provider = provider.with_record(
                &format!("tt{}", i),
                movie_body(&format!("Movie {}", i), 2000),
            );
        }

        let opts = SearchOptions {
            max_attempts: 1,
            raw_hit_budget: 2,
            candidate_cap: 10,
        };
        let candidates = collect_candidates(&provider, &hits, &opts).await.unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(provider.fetches.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_records_failing_normalization_are_skipped() {
        let hits = vec![
            movie_hit("tt1", "Broken", 2000),
            movie_hit("tt2", "Heat", 1995),
        ];
        // tt1's full record is missing its year entirely.
        let provider = ScriptedProvider::new(vec![])
            .with_record("tt1", json!({ "title": "Broken" }))
            .with_record("tt2", movie_body("Heat", 1995));

        let candidates = collect_candidates(&provider, &hits, &options(1))
            .await
            .unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "Heat");
    }

    #[test]
    fn test_parse_selection_bounds() {
        assert_eq!(parse_selection("1", 10), Some(0));
        assert_eq!(parse_selection(" 10 ", 10), Some(9));
        assert_eq!(parse_selection("11", 10), None);
        assert_eq!(parse_selection("0", 10), None);
        assert_eq!(parse_selection("", 10), None);
        assert_eq!(parse_selection("x", 10), None);
    }
}
