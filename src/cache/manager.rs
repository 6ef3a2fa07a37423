//! Cache manager for persisting API responses to disk
//!
//! Provides a `CacheManager` that stores serializable data to JSON files
//! stamped with their write time. The cache itself has no expiry policy:
//! reads return the entry together with its age and the caller decides
//! whether it is still usable, supporting graceful degradation when APIs
//! are unavailable.

use chrono::{DateTime, Duration, Utc};
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Wrapper struct for cached data stored on disk
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    /// The cached data
    data: T,
    /// When the data was cached
    cached_at: DateTime<Utc>,
}

/// Result of reading from cache, including how old the entry is
#[derive(Debug)]
pub struct CachedData<T> {
    /// The cached data
    pub data: T,
    /// When the data was originally cached
    #[allow(dead_code)]
    pub cached_at: DateTime<Utc>,
    /// Age of the entry at read time
    #[allow(dead_code)]
    pub age: Duration,
}

/// Manages reading and writing cached data to disk
///
/// The cache manager stores data as JSON files in an XDG-compliant cache
/// directory (`~/.cache/launchwx/` on Linux). Entries are never deleted by
/// the manager; arbitrarily old entries are still returned so callers can
/// fall back to stale data when an API is unreachable.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl CacheManager {
    /// Creates a new CacheManager using XDG-compliant cache directory
    ///
    /// Uses `~/.cache/launchwx/` on Linux, or equivalent XDG path on other
    /// platforms. Returns `None` if the cache directory cannot be
    /// determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "launchwx")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a new CacheManager with a custom cache directory
    ///
    /// Useful for testing or when a specific cache location is needed.
    #[allow(dead_code)]
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Returns the path to a cache file for the given key
    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Writes data to the cache, stamping it with the current time
    ///
    /// # Arguments
    /// * `key` - Unique identifier for the cache entry (e.g., "observation_ilumby7")
    /// * `data` - The data to cache (must implement Serialize)
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if directory creation or file writing fails
    pub fn write<T: Serialize>(&self, key: &str, data: &T) -> std::io::Result<()> {
        self.ensure_dir()?;

        let entry = CacheEntry {
            data,
            cached_at: Utc::now(),
        };

        let json = serde_json::to_string_pretty(&entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(self.cache_path(key), json)
    }

    /// Reads data from the cache
    ///
    /// Returns `None` if the cache entry doesn't exist or cannot be
    /// parsed. Entries are returned regardless of age, with the age
    /// included so the caller can apply its own freshness policy.
    ///
    /// # Arguments
    /// * `key` - The cache key to read
    ///
    /// # Returns
    /// * `Some(CachedData<T>)` if the entry exists and can be parsed
    /// * `None` if the entry doesn't exist or parsing fails
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<CachedData<T>> {
        let path = self.cache_path(key);
        let content = fs::read_to_string(path).ok()?;
        let entry: CacheEntry<T> = serde_json::from_str(&content).ok()?;

        let age = Utc::now().signed_duration_since(entry.cached_at);

        Some(CachedData {
            data: entry.data,
            cached_at: entry.cached_at,
            age,
        })
    }
}
