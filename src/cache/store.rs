//! Disk-backed page cache
//!
//! One file per page, named by [`cache_key`], holding the complete wire
//! response. Entries are never expired; deleting a file is the only way to
//! force a page to be fetched again.

use crate::cache::key::cache_key;
use crate::crawler::Fetcher;
use crate::{CatechismError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::AsyncWriteExt;
use url::Url;

static TEMP_SEQUENCE: AtomicUsize = AtomicUsize::new(0);

/// Page cache in front of a [`Fetcher`]
pub struct CacheStore<F> {
    directory: PathBuf,
    fetcher: F,
    cache_hits: AtomicUsize,
    network_fetches: AtomicUsize,
}

impl<F: Fetcher> CacheStore<F> {
    /// Creates a store rooted at `directory`
    ///
    /// The directory is created on the first write, not here.
    pub fn new(directory: impl Into<PathBuf>, fetcher: F) -> Self {
        Self {
            directory: directory.into(),
            fetcher,
            cache_hits: AtomicUsize::new(0),
            network_fetches: AtomicUsize::new(0),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Path of the cache file for `url`
    pub fn path_for(&self, url: &Url) -> PathBuf {
        self.directory.join(cache_key(url))
    }

    /// Number of requests answered from disk so far
    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    /// Number of requests that went to the fetcher so far
    pub fn network_fetches(&self) -> usize {
        self.network_fetches.load(Ordering::Relaxed)
    }

    /// Returns the raw response bytes for `url`, fetching and caching them on a miss
    ///
    /// # Request Flow
    ///
    /// 1. Derive the cache file from the URL
    /// 2. If the file exists, return its contents without touching the network
    /// 3. Otherwise fetch, write the wire form to the cache, then return it
    ///
    /// # Errors
    ///
    /// * `CatechismError::CacheIo` - the cache file cannot be read or written
    /// * `CatechismError::Fetch` - the request failed at the transport level;
    ///   nothing is written in that case
    ///
    /// Any response the server sends, error pages included, is cached as-is.
    pub async fn fetch_cached(&self, url: &Url) -> Result<Vec<u8>> {
        let path = self.path_for(url);

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                self.cache_hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Cache hit for {} ({})", url, path.display());
                return Ok(bytes);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(source) => return Err(CatechismError::CacheIo { path, source }),
        }

        tracing::debug!("Cache miss for {}, fetching", url);
        let response = self.fetcher.fetch(url).await?;
        self.network_fetches.fetch_add(1, Ordering::Relaxed);

        let bytes = response.to_bytes();
        self.write_entry(&path, &bytes).await?;
        tracing::debug!("Cached {} bytes for {}", bytes.len(), url);

        Ok(bytes)
    }

    /// Writes a cache entry atomically (write to temp, then rename)
    async fn write_entry(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let io_error = |source| CatechismError::CacheIo {
            path: path.to_path_buf(),
            source,
        };

        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(io_error)?;

        // Fixed-length name: the key itself may already be at the filename limit
        let sequence = TEMP_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let tmp = self
            .directory
            .join(format!(".entry.{}.{}.tmp", std::process::id(), sequence));

        let write = async {
            let mut file = tokio::fs::File::create(&tmp).await?;
            file.write_all(bytes).await?;
            file.flush().await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&tmp, path).await
        };

        if let Err(source) = write.await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_error(source));
        }

        Ok(())
    }
}
