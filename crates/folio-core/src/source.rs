//! Collection sources: where collection documents come from.
//!
//! A source resolves a collection path (e.g. `data/companies.json`) to the raw
//! bytes of a `{ items: [...], general?: {...} }` document. Repositories own the
//! caching; sources are stateless and fetch on every call.

use crate::error::{LoadError, LoadResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info};

/// Core trait for fetching one collection document.
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// Fetch the document stored under `path`.
    async fn fetch(&self, path: &str) -> LoadResult<Vec<u8>>;

    /// Human-readable description used in logs (e.g. `file:./site`).
    fn describe(&self) -> String;
}

/// Reads collection documents from a directory on the local filesystem.
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

#[async_trait]
impl CollectionSource for FileSource {
    async fn fetch(&self, path: &str) -> LoadResult<Vec<u8>> {
        let full = self.resolve(path);
        debug!(path = %full.display(), "reading collection file");
        tokio::fs::read(&full).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound(full.display().to_string())
            } else {
                LoadError::Io {
                    path: full.display().to_string(),
                    source,
                }
            }
        })
    }

    fn describe(&self) -> String {
        format!("file:{}", self.root.display())
    }
}

/// Fetches collection documents with one `GET` per path under a base URL.
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl CollectionSource for HttpSource {
    async fn fetch(&self, path: &str) -> LoadResult<Vec<u8>> {
        let url = self.url_for(path);
        debug!(url = %url, "requesting collection");
        let res = self.client.get(&url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url,
                status: status.as_u16(),
            });
        }
        Ok(res.bytes().await?.to_vec())
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// In-memory documents keyed by path. Useful for bundled data and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `json` under `path`, replacing any previous document.
    pub fn with(mut self, path: impl Into<String>, json: impl Into<String>) -> Self {
        self.insert(path, json);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, json: impl Into<String>) {
        self.documents.insert(path.into(), json.into());
    }
}

#[async_trait]
impl CollectionSource for MemorySource {
    async fn fetch(&self, path: &str) -> LoadResult<Vec<u8>> {
        self.documents
            .get(path)
            .map(|doc| doc.as_bytes().to_vec())
            .ok_or_else(|| LoadError::NotFound(path.to_string()))
    }

    fn describe(&self) -> String {
        format!("memory ({} documents)", self.documents.len())
    }
}

/// Pick a source for `data_root`: HTTP(S) URLs fetch over the network,
/// anything else is treated as a local directory.
pub fn create_source(data_root: &str) -> std::sync::Arc<dyn CollectionSource> {
    let root = data_root.trim();
    if root.starts_with("http://") || root.starts_with("https://") {
        info!(base_url = %root, "using HTTP collection source");
        std::sync::Arc::new(HttpSource::new(root))
    } else {
        info!(root = %root, "using file collection source");
        std::sync::Arc::new(FileSource::new(root))
    }
}
