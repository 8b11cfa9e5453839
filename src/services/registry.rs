//! Cached export collection and camera config.
//!
//! Mutations never patch the cache: a workflow that changed something on the
//! backend calls [`ExportRegistry::invalidate`] and the whole list is re-read.
//! A failed fetch keeps whatever was cached before.

use std::sync::Arc;

use crate::backend::ExportsApi;
use crate::error::AppResult;
use crate::models::{CameraConfig, Export};

pub struct ExportRegistry {
    api: Arc<dyn ExportsApi>,
    exports: Option<Vec<Export>>,
    config: Option<CameraConfig>,
}

impl ExportRegistry {
    pub fn new(api: Arc<dyn ExportsApi>) -> Self {
        Self {
            api,
            exports: None,
            config: None,
        }
    }

    /// Fetches the export list, replacing the cache only on success
    pub async fn fetch(&mut self) -> AppResult<&[Export]> {
        match self.api.list_exports().await {
            Ok(exports) => {
                tracing::debug!("Registry refreshed: count={}", exports.len());
                Ok(self.exports.insert(exports).as_slice())
            }
            Err(e) => {
                tracing::warn!(
                    "Export list fetch failed, keeping cached value (loaded={}): {}",
                    self.exports.is_some(),
                    e
                );
                Err(e)
            }
        }
    }

    pub async fn fetch_config(&mut self) -> AppResult<&CameraConfig> {
        match self.api.get_config().await {
            Ok(config) => Ok(self.config.insert(config)),
            Err(e) => {
                tracing::warn!("Camera config fetch failed: {}", e);
                Err(e)
            }
        }
    }

    /// Drops nothing up front; the refetch result replaces the cache when it lands
    pub async fn invalidate(&mut self) {
        let _ = self.fetch().await;
    }

    /// `None` until the first successful fetch
    pub fn exports(&self) -> Option<&[Export]> {
        self.exports.as_deref()
    }

    pub fn config(&self) -> Option<&CameraConfig> {
        self.config.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.exports.is_some()
    }

    pub fn find(&self, id: &str) -> Option<&Export> {
        self.exports()?.iter().find(|e| e.id == id)
    }
}
