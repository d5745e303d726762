use std::path::PathBuf;

/// Runtime settings, environment-sourced with defaults. Read once at
/// startup; `.env` loading happens in main before this runs.
#[derive(Debug, Clone)]
pub struct Config {
    /// Response-cache TTL in seconds.
    pub cache_ttl_secs: u64,
    /// Directory holding cached upstream responses.
    pub cache_dir: PathBuf,
    /// JSON file accumulating the ISBN → thumbnail mapping.
    pub results_file: PathBuf,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let cache_ttl_secs = std::env::var("CACHE_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(604_800); // one week

        let cache_dir = std::env::var("CACHE_DIR")
            .unwrap_or_else(|_| "data/http_cache".into())
            .into();

        let results_file = std::env::var("RESULTS_FILENAME")
            .unwrap_or_else(|_| "data/results.json".into())
            .into();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3001);

        Self {
            cache_ttl_secs,
            cache_dir,
            results_file,
            port,
        }
    }
}
