use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

/// One cached upstream response body with its expiry window.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    body: String,
    cached_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

/// Disk-backed HTTP response cache keyed by request signature.
///
/// Entries are JSON files under the cache directory, one per signature.
/// Expired entries read as misses; the caller refetches and overwrites.
pub struct HttpCache {
    cache_dir: PathBuf,
    ttl: Duration,
}

impl HttpCache {
    pub fn new(cache_dir: impl Into<PathBuf>, ttl_secs: u64) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            ttl: Duration::seconds(ttl_secs as i64),
        }
    }

    /// Maps a request signature (full URL + query) onto a flat filename.
    fn entry_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.cache_dir.join(format!("{name}.json"))
    }

    /// Returns the cached body if present, parsable and still fresh.
    pub fn read(&self, key: &str) -> Option<String> {
        let content = fs::read_to_string(self.entry_path(key)).ok()?;
        let entry: CacheEntry = serde_json::from_str(&content).ok()?;

        if Utc::now() > entry.expires_at {
            return None;
        }
        Some(entry.body)
    }

    /// Stores a response body, stamping the expiry from the global TTL.
    /// Creates the cache directory on demand.
    pub fn write(&self, key: &str, body: &str) -> io::Result<()> {
        fs::create_dir_all(&self.cache_dir)?;

        let now = Utc::now();
        let entry = CacheEntry {
            body: body.to_string(),
            cached_at: now,
            expires_at: now + self.ttl,
        };

        let json = serde_json::to_string(&entry)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(self.entry_path(key), json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration as StdDuration;
    use tempfile::TempDir;

    fn cache_in(dir: &TempDir, ttl_secs: u64) -> HttpCache {
        HttpCache::new(dir.path().to_path_buf(), ttl_secs)
    }

    #[test]
    fn test_read_misses_on_absent_key() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, 60);

        assert!(cache.read("https://api/volumes?q=isbn:x").is_none());
    }

    #[test]
    fn test_write_then_read_returns_body() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, 60);

        cache.write("sig", r#"{"items":[]}"#).unwrap();

        assert_eq!(cache.read("sig").unwrap(), r#"{"items":[]}"#);
    }

    #[test]
    fn test_expired_entry_reads_as_miss() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, 0);

        cache.write("sig", "body").unwrap();
        thread::sleep(StdDuration::from_millis(10));

        assert!(cache.read("sig").is_none());
    }

    #[test]
    fn test_overwrite_keeps_latest_body() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, 60);

        cache.write("sig", "first").unwrap();
        cache.write("sig", "second").unwrap();

        assert_eq!(cache.read("sig").unwrap(), "second");
    }

    #[test]
    fn test_signature_characters_are_sanitized_into_filename() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, 60);

        cache
            .write("https://www.googleapis.com/books/v1/volumes?q=isbn:42", "body")
            .unwrap();

        let expected =
            dir.path().join("https___www.googleapis.com_books_v1_volumes_q_isbn_42.json");
        assert!(expected.exists());
    }

    #[test]
    fn test_write_creates_cache_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested").join("http_cache");
        let cache = HttpCache::new(nested.clone(), 60);

        cache.write("sig", "body").unwrap();

        assert!(nested.exists());
    }

    #[test]
    fn test_garbage_entry_file_reads_as_miss() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, 60);

        fs::write(dir.path().join("sig.json"), "not a cache entry").unwrap();

        assert!(cache.read("sig").is_none());
    }
}
