//! Best-effort file cache. One file per key, freshness judged by the file's
//! modification time. No locking: concurrent writers race and the last one wins.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};
use tracing::debug;

const FILE_PREFIX: &str = "aqhi_cache_";

pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<dir>/aqhi_cache_<hex(key)>`
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(FILE_PREFIX.len() + key.len() * 2);
        name.push_str(FILE_PREFIX);
        for byte in key.as_bytes() {
            let _ = write!(name, "{:02x}", byte);
        }
        self.dir.join(name)
    }

    /// Returns the cached bytes if the entry is younger than `ttl`. Every
    /// failure along the way counts as a miss.
    pub async fn get(&self, key: &str, ttl: Duration) -> Option<Vec<u8>> {
        let path = self.path_for(key);
        let metadata = tokio::fs::metadata(&path).await.ok()?;
        let modified = metadata.modified().ok()?;
        // A timestamp in the future yields an error here and is treated as age zero.
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);
        if age >= ttl {
            debug!(path = %path.display(), age_secs = age.as_secs(), "Cache entry expired");
            return None;
        }

        tokio::fs::read(&path).await.ok()
    }

    pub async fn set(&self, key: &str, data: &[u8]) {
        let path = self.path_for(key);
        if let Err(e) = tokio::fs::write(&path, data).await {
            debug!(path = %path.display(), error = %e, "Cache write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    #[test]
    fn path_is_prefixed_hex_of_key() {
        let cache = FileCache::new("/tmp");
        assert_eq!(
            cache.path_for("ab/"),
            PathBuf::from("/tmp/aqhi_cache_61622f")
        );
    }

    #[test]
    fn distinct_keys_map_to_distinct_paths() {
        let cache = FileCache::new("/tmp");
        assert_ne!(cache.path_for("urlvar"), cache.path_for("url/var"));
    }

    #[tokio::test]
    async fn set_then_get_within_ttl() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path());

        cache.set("key", b"[1,2,3]").await;

        assert_eq!(cache.get("key", TTL).await.as_deref(), Some(&b"[1,2,3]"[..]));
    }

    #[tokio::test]
    async fn missing_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path());

        assert!(cache.get("absent", TTL).await.is_none());
    }

    #[tokio::test]
    async fn expired_entry_is_a_miss_even_if_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path());
        cache.set("key", b"[]").await;

        assert!(cache.path_for("key").exists());
        assert!(cache.get("key", Duration::ZERO).await.is_none());
    }

    #[tokio::test]
    async fn entry_older_than_ttl_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path());
        cache.set("key", b"[1]").await;

        let file = std::fs::File::options()
            .write(true)
            .open(cache.path_for("key"))
            .unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(301))
            .unwrap();

        assert!(cache.get("key", TTL).await.is_none());
        assert!(cache.get("key", Duration::from_secs(600)).await.is_some());
    }

    #[tokio::test]
    async fn set_overwrites_existing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path());

        cache.set("key", b"[1]").await;
        cache.set("key", b"[2]").await;

        assert_eq!(cache.get("key", TTL).await.as_deref(), Some(&b"[2]"[..]));
    }

    #[tokio::test]
    async fn write_failure_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("does-not-exist"));

        cache.set("key", b"[]").await;

        assert!(cache.get("key", TTL).await.is_none());
    }
}
