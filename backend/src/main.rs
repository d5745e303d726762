mod core;
mod infra;

use std::sync::Arc;

use crate::core::config::Config;
use crate::core::service::ThumbnailService;
use crate::core::store::ResultStore;
use infra::cache::HttpCache;
use infra::googlebooks::GoogleBooksClient;

fn main() {
    // Load .env (silently ignore if missing — production uses real env vars)
    let _ = dotenvy::dotenv();

    let config = Config::from_env();

    // Build the upstream client BEFORE entering the async runtime.
    // reqwest::blocking::Client creates its own mini-runtime;
    // constructing/dropping it inside block_on causes a panic.
    let cache = HttpCache::new(config.cache_dir.clone(), config.cache_ttl_secs);
    let client = GoogleBooksClient::new(cache);
    let store = ResultStore::new(config.results_file.clone());
    let service = Arc::new(ThumbnailService::new(
        Box::new(client),
        store,
        config.cache_ttl_secs,
    ));

    let rt = tokio::runtime::Runtime::new().expect("Failed to create async runtime");

    rt.block_on(async {
        infra::web::start_server(service, config.port).await;
    });
}
