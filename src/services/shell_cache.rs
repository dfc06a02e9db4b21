//! Offline cache for the portal shell assets.
//!
//! Network-first: every GET for a shell asset is fetched upstream, the fresh
//! copy replaces the cached one, and the cache only answers when the network
//! does not. When neither works the caller gets a 503 placeholder. Non-GET
//! requests and API-prefixed paths bypass the cache entirely.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;

use crate::constants::{API_PREFIX, SHELL_ASSETS};

/// One cached shell asset.
#[derive(Debug, Clone)]
pub struct CachedAsset {
    pub content_type: String,
    pub body: Bytes,
    pub fetched_at: DateTime<Utc>,
}

/// What the cache decided for a request.
#[derive(Debug)]
pub enum ShellFetch {
    /// Served from the network (cache refreshed).
    Fresh(CachedAsset),
    /// Network failed, served the last cached copy.
    Stale(CachedAsset),
    /// Network and cache both failed: emit the 503 placeholder.
    Unavailable,
    /// Non-GET or API-prefixed request: the cache does not participate.
    Bypass,
}

#[derive(Clone)]
pub struct ShellCache {
    entries: Arc<DashMap<String, CachedAsset>>,
    http: reqwest::Client,
    /// Origin serving the shell assets.
    origin: String,
}

impl ShellCache {
    pub fn new(origin: &str, timeout_secs: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            entries: Arc::new(DashMap::new()),
            http,
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    /// Warm the cache with the fixed shell asset list. Best effort: assets
    /// that cannot be fetched now will be retried on first request.
    pub async fn precache(&self) {
        for path in SHELL_ASSETS {
            match self.refresh(path).await {
                Some(_) => debug!("Precached {}", path),
                None => warn!("Could not precache {}", path),
            }
        }
    }

    /// Resolve a request through the network-first policy.
    pub async fn fetch(&self, method: &str, path: &str) -> ShellFetch {
        if method != "GET" || path.starts_with(API_PREFIX) {
            return ShellFetch::Bypass;
        }

        if let Some(asset) = self.refresh(path).await {
            return ShellFetch::Fresh(asset);
        }

        match self.entries.get(path) {
            Some(entry) => {
                debug!("Serving {} from cache", path);
                ShellFetch::Stale(entry.value().clone())
            }
            None => ShellFetch::Unavailable,
        }
    }

    /// Fetch one asset from the network and update the cache on success.
    async fn refresh(&self, path: &str) -> Option<CachedAsset> {
        let url = format!("{}{}", self.origin, path);
        let response = self.http.get(&url).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let body = response.bytes().await.ok()?;

        let asset = CachedAsset {
            content_type,
            body,
            fetched_at: Utc::now(),
        };
        self.entries.insert(path.to_string(), asset.clone());
        Some(asset)
    }

    #[cfg(test)]
    fn cached(&self, path: &str) -> Option<CachedAsset> {
        self.entries.get(path).map(|e| e.value().clone())
    }
}
