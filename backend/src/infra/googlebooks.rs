use crate::core::models::ApiEnvelope;
use crate::core::search::{CoverLookup, CoverSearchProvider, SearchError};
use crate::infra::cache::HttpCache;
use reqwest::blocking::Client;
use std::time::Duration;

const VOLUMES_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Restricted projection keeps upstream payloads small: titles, image
/// links and industry identifiers only.
const FIELD_PROJECTION: &str = "kind,items(volumeInfo/title),items(volumeInfo/subtitle),items(volumeInfo/imageLinks),items(volumeInfo/industryIdentifiers)";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ── Client ───────────────────────────────────────────────────────

pub struct GoogleBooksClient {
    client: Client,
    cache: HttpCache,
}

impl GoogleBooksClient {
    pub fn new(cache: HttpCache) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");
        Self { client, cache }
    }
}

impl CoverSearchProvider for GoogleBooksClient {
    fn name(&self) -> &str {
        "Google Books"
    }

    fn search(&self, isbn: &str) -> Result<CoverLookup, SearchError> {
        let query = format!("isbn:{isbn}");
        // Identical (isbn, projection) pairs share one cache slot.
        let signature = format!("{VOLUMES_URL}?q={query}&fields={FIELD_PROJECTION}");

        if let Some(body) = self.cache.read(&signature) {
            match serde_json::from_str::<ApiEnvelope>(&body) {
                Ok(envelope) => {
                    println!("Response from cache for {query}");
                    return Ok(CoverLookup {
                        envelope,
                        from_cache: true,
                    });
                }
                Err(e) => {
                    eprintln!("Discarding unreadable cache entry for {query}: {e}");
                }
            }
        }

        let response = self
            .client
            .get(VOLUMES_URL)
            .query(&[("q", query.as_str()), ("fields", FIELD_PROJECTION)])
            .send()
            .map_err(|e| SearchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SearchError::Api(format!(
                "HTTP {} from volumes endpoint",
                response.status()
            )));
        }

        let body = response.text().map_err(|e| SearchError::Network(e.to_string()))?;
        let envelope: ApiEnvelope =
            serde_json::from_str(&body).map_err(|e| SearchError::Parse(e.to_string()))?;

        // Only parsable bodies get cached.
        if let Err(e) = self.cache.write(&signature, &body) {
            eprintln!("Failed to cache response for {query}: {e}");
        }

        match envelope.items.first().and_then(|i| i.volume_info.title.as_deref()) {
            Some(title) => println!("Response from API for {query}: \"{title}\""),
            None => println!("Response from API for {query}: no match"),
        }

        Ok(CoverLookup {
            envelope,
            from_cache: false,
        })
    }
}
