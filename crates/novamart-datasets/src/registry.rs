//! Process-wide, write-once cache of loaded bundles keyed by directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::bundle::DatasetBundle;
use crate::error::Result;

/// Shared handle to a registry, injected into whatever serves the dashboard.
pub type SharedRegistry = Arc<DatasetRegistry>;

/// Loads dataset directories once and hands out shared, read-only bundles.
///
/// The populate step runs under the lock, so two concurrent first loads of
/// the same directory read the files once. After that every call is a map
/// lookup and an `Arc` clone.
#[derive(Debug, Default)]
pub struct DatasetRegistry {
    bundles: Mutex<HashMap<PathBuf, Arc<DatasetBundle>>>,
}

impl DatasetRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn shared() -> SharedRegistry {
        Arc::new(Self::new())
    }

    /// Return the bundle for `dir`, reading it on first use.
    ///
    /// # Errors
    ///
    /// Propagates the [`LoadError`](crate::LoadError) from the first read;
    /// nothing is cached on failure.
    pub fn load(&self, dir: impl AsRef<Path>) -> Result<Arc<DatasetBundle>> {
        let key = cache_key(dir.as_ref());
        let mut bundles = self.bundles.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(bundle) = bundles.get(&key) {
            tracing::debug!(source = %key.display(), "Dataset cache hit");
            return Ok(Arc::clone(bundle));
        }

        tracing::debug!(source = %key.display(), "Dataset cache miss, reading files");
        let bundle = Arc::new(DatasetBundle::read_dir(&key)?);
        bundles.insert(key, Arc::clone(&bundle));
        Ok(bundle)
    }

    /// Cached bundle for `dir`, without loading.
    #[must_use]
    pub fn cached(&self, dir: impl AsRef<Path>) -> Option<Arc<DatasetBundle>> {
        let key = cache_key(dir.as_ref());
        self.bundles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
    }

    /// Number of directories loaded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bundles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn cache_key(dir: &Path) -> PathBuf {
    std::fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf())
}
