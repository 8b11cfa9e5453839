use std::sync::Arc;

use crate::error::AppResult;
use crate::http_client::HttpClient;
use crate::models::{CameraConfig, CreateExportRequest, Export};

use super::{paths, ExportsApi};

pub struct HttpExportsApi {
    http_client: Arc<HttpClient>,
}

impl HttpExportsApi {
    pub fn new(http_client: Arc<HttpClient>) -> Self {
        Self { http_client }
    }
}

#[async_trait::async_trait]
impl ExportsApi for HttpExportsApi {
    async fn list_exports(&self) -> AppResult<Vec<Export>> {
        let exports: Vec<Export> = self.http_client.get_json(paths::EXPORTS).await?;
        tracing::debug!("Fetched exports: count={}", exports.len());
        Ok(exports)
    }

    async fn get_config(&self) -> AppResult<CameraConfig> {
        self.http_client.get_json(paths::CONFIG).await
    }

    async fn start_export(&self, request: &CreateExportRequest) -> AppResult<()> {
        let path = paths::start_export(request);
        self.http_client.post_json(&path, &request.body()).await?;
        tracing::info!(
            "Export started: camera={}, start={}, end={}, playback={}",
            request.camera,
            request.start_epoch,
            request.end_epoch,
            request.mode.as_str()
        );
        Ok(())
    }

    async fn rename_export(&self, id: &str, new_name: &str) -> AppResult<()> {
        self.http_client
            .patch(&paths::rename_export(id, new_name))
            .await?;
        tracing::info!("Export renamed: id={}, name={}", id, new_name);
        Ok(())
    }

    async fn delete_export(&self, file: &str) -> AppResult<()> {
        self.http_client.delete(&paths::delete_export(file)).await?;
        tracing::info!("Export deleted: file={}", file);
        Ok(())
    }
}
