//! Dashboard engine: one loaded bundle plus the settings the views read.

use std::sync::Arc;

use novamart_datasets::{DatasetBundle, DatasetRegistry};

use crate::config::DashboardConfig;
use crate::error::Result;

/// Entry point for the page views.
///
/// Holds a shared, read-only bundle. Every view is a pure computation over
/// it, so one engine can serve any number of requests.
#[derive(Debug, Clone)]
pub struct DashboardEngine {
    pub(crate) bundle: Arc<DatasetBundle>,
    pub(crate) config: DashboardConfig,
}

impl DashboardEngine {
    #[must_use]
    pub const fn new(bundle: Arc<DatasetBundle>, config: DashboardConfig) -> Self {
        Self { bundle, config }
    }

    /// Load `config.data_dir` through `registry` and wrap the bundle.
    ///
    /// # Errors
    ///
    /// `Load` when any of the eleven files is missing or malformed.
    pub fn from_registry(registry: &DatasetRegistry, config: DashboardConfig) -> Result<Self> {
        let bundle = registry.load(&config.data_dir)?;
        tracing::info!(
            source = %config.data_dir.display(),
            threshold = config.default_threshold,
            "Dashboard engine ready"
        );
        Ok(Self::new(bundle, config))
    }

    #[must_use]
    pub fn bundle(&self) -> &DatasetBundle {
        &self.bundle
    }

    #[must_use]
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyticsError;
    use crate::sample;

    #[test]
    fn test_new_shares_bundle() {
        let bundle = Arc::new(sample::bundle());
        let engine = DashboardEngine::new(Arc::clone(&bundle), sample::config());
        assert!(Arc::ptr_eq(&engine.bundle, &bundle));
        assert_eq!(engine.bundle().campaigns.len(), bundle.campaigns.len());
    }

    #[test]
    fn test_from_registry_propagates_load_error() {
        let dir = std::env::temp_dir().join("novamart-analytics-missing-dir");
        let config = DashboardConfig {
            data_dir: dir,
            ..sample::config()
        };
        let err = DashboardEngine::from_registry(&DatasetRegistry::new(), config).unwrap_err();
        assert!(matches!(err, AnalyticsError::Load(_)));
    }
}
