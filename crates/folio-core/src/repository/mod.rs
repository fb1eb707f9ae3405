//! Base repository: lazy loader, code index and cache for one collection.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle ──first access──▶ Loading(shared task) ──task finishes──▶ Ready(snapshot)
//! ```
//!
//! The first call that needs data spawns exactly one load task. Calls that
//! arrive while it runs await the same shared future. The task runs to
//! completion even if every caller goes away, and stores its snapshot itself.
//!
//! A failed load is logged and cached as an empty collection. Nothing ever
//! moves a repository out of `Ready`, so a failed collection stays empty for
//! the lifetime of the repository and is not fetched again.

mod advanced;

pub use advanced::Titled;

use crate::code::normalize_code;
use crate::error::LoadResult;
use crate::search;
use crate::source::CollectionSource;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

/// An entity with a primary-key `code`.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn code(&self) -> &str;
}

/// One collection document: `{ items: [...], general?: {...} }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub general: Option<Value>,
}

/// Immutable, indexed view of a loaded collection.
pub(crate) struct Snapshot<T> {
    items: Vec<T>,
    values: Vec<Value>,
    general: Option<Value>,
    index: HashMap<String, usize>,
}

impl<T: Record> Snapshot<T> {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            values: Vec::new(),
            general: None,
            index: HashMap::new(),
        }
    }

    fn build(name: &str, collection: Collection<T>) -> LoadResult<Self> {
        let values = collection
            .items
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        let mut index = HashMap::with_capacity(collection.items.len());
        for (pos, item) in collection.items.iter().enumerate() {
            if let Some(prev) = index.insert(normalize_code(item.code()), pos) {
                warn!(
                    collection = name,
                    code = item.code(),
                    shadowed = prev,
                    "duplicate code; later entity wins in the index"
                );
            }
        }
        Ok(Self {
            items: collection.items,
            values,
            general: collection.general,
            index,
        })
    }

    pub(crate) fn items(&self) -> &[T] {
        &self.items
    }

    pub(crate) fn get(&self, code: &str) -> Option<&T> {
        self.index
            .get(&normalize_code(code))
            .and_then(|&pos| self.items.get(pos))
    }
}

type PendingLoad<T> = Shared<BoxFuture<'static, Arc<Snapshot<T>>>>;

enum LoadState<T> {
    Idle,
    Loading(PendingLoad<T>),
    Ready(Arc<Snapshot<T>>),
}

fn lock<T>(state: &Mutex<LoadState<T>>) -> MutexGuard<'_, LoadState<T>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Lazily loaded, cached, code-indexed access to one collection.
///
/// Loads run on a spawned Tokio task: the first data access must happen inside
/// a Tokio runtime (e.g. `#[tokio::main]` or `#[tokio::test]`), otherwise it
/// panics.
pub struct Repository<T: Record> {
    name: String,
    path: String,
    source: Arc<dyn CollectionSource>,
    state: Arc<Mutex<LoadState<T>>>,
}

impl<T: Record> Repository<T> {
    /// Bind a collection `name` (for logs) to `path` on `source`. Nothing is
    /// fetched until the first access.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        source: Arc<dyn CollectionSource>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            source,
            state: Arc::new(Mutex::new(LoadState::Idle)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// True once a load has finished (successfully or not).
    pub fn is_loaded(&self) -> bool {
        matches!(*lock(&self.state), LoadState::Ready(_))
    }

    /// All entities, in document order. Returns a copy.
    pub async fn get_list(&self) -> Vec<T> {
        self.snapshot().await.items.clone()
    }

    /// Entity whose code matches `code` case-insensitively.
    ///
    /// `None` or an empty code returns `None` without triggering a load.
    pub async fn get_by_code(&self, code: Option<&str>) -> Option<T> {
        self.find(code, T::clone).await
    }

    /// Case-insensitive substring search. `fields` restricts matching to those
    /// properties; without it the whole serialized entity is matched. A blank
    /// query returns the full collection.
    pub async fn search(&self, query: &str, fields: Option<&[&str]>) -> Vec<T> {
        let snapshot = self.snapshot().await;
        let Some(needle) = search::needle(query) else {
            return snapshot.items.clone();
        };
        snapshot
            .items
            .iter()
            .zip(&snapshot.values)
            .filter(|(_, value)| search::matches(value, &needle, fields))
            .map(|(item, _)| item.clone())
            .collect()
    }

    /// Collection-level `general` metadata, if the document carried one.
    pub async fn general(&self) -> Option<Value> {
        self.snapshot().await.general.clone()
    }

    /// Entities satisfying `predicate`, in document order. Full scan.
    pub async fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.snapshot()
            .await
            .items
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    /// Look up `code` and project the entity through `f` without cloning it.
    pub(crate) async fn find<R>(&self, code: Option<&str>, f: impl FnOnce(&T) -> R) -> Option<R> {
        let code = code.filter(|c| !c.is_empty())?;
        let snapshot = self.snapshot().await;
        snapshot.get(code).map(f)
    }

    /// Current snapshot, loading it on first use.
    pub(crate) async fn snapshot(&self) -> Arc<Snapshot<T>> {
        let pending = {
            let mut state = lock(&self.state);
            match &*state {
                LoadState::Ready(snapshot) => return Arc::clone(snapshot),
                LoadState::Loading(pending) => pending.clone(),
                LoadState::Idle => {
                    let pending = self.spawn_load();
                    *state = LoadState::Loading(pending.clone());
                    pending
                }
            }
        };
        pending.await
    }

    fn spawn_load(&self) -> PendingLoad<T> {
        let name = self.name.clone();
        let path = self.path.clone();
        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        debug!(collection = %name, path = %path, source = %source.describe(), "loading collection");

        let task = tokio::spawn(async move {
            let snapshot = match fetch_snapshot::<T>(source.as_ref(), &name, &path).await {
                Ok(snapshot) => {
                    info!(collection = %name, count = snapshot.items.len(), "collection loaded");
                    snapshot
                }
                Err(e) => {
                    error!(
                        collection = %name,
                        path = %path,
                        error = %e,
                        "collection load failed; caching empty collection"
                    );
                    Snapshot::empty()
                }
            };
            let snapshot = Arc::new(snapshot);
            *lock(&state) = LoadState::Ready(Arc::clone(&snapshot));
            snapshot
        });

        let name = self.name.clone();
        async move {
            match task.await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    error!(collection = %name, error = %e, "collection load task aborted");
                    Arc::new(Snapshot::empty())
                }
            }
        }
        .boxed()
        .shared()
    }
}

async fn fetch_snapshot<T: Record>(
    source: &dyn CollectionSource,
    name: &str,
    path: &str,
) -> LoadResult<Snapshot<T>> {
    let bytes = source.fetch(path).await?;
    let collection: Collection<T> = serde_json::from_slice(&bytes)?;
    Snapshot::build(name, collection)
}
