use crate::core::models::ApiEnvelope;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result of one upstream lookup, with the response-cache side channel:
/// `from_cache` tells the caller whether the network was reached.
pub struct CoverLookup {
    pub envelope: ApiEnvelope,
    pub from_cache: bool,
}

pub trait CoverSearchProvider: Send + Sync {
    fn name(&self) -> &str;
    fn search(&self, isbn: &str) -> Result<CoverLookup, SearchError>;
}
