// REST seam to the recording backend

pub mod http;
#[cfg(test)]
pub mod mock;

pub use http::HttpExportsApi;

use crate::error::AppResult;
use crate::models::{CameraConfig, CreateExportRequest, Export};

/// Backend operations the export lifecycle depends on.
///
/// Every mutation resolves only once the backend has answered, so callers can
/// order registry invalidation after a confirmed success.
#[async_trait::async_trait]
pub trait ExportsApi: Send + Sync {
    /// `GET exports`
    async fn list_exports(&self) -> AppResult<Vec<Export>>;

    /// `GET config`
    async fn get_config(&self) -> AppResult<CameraConfig>;

    /// `POST export/{camera}/start/{start}/end/{end}`
    async fn start_export(&self, request: &CreateExportRequest) -> AppResult<()>;

    /// `PATCH export/{id}/{name}`
    async fn rename_export(&self, id: &str, new_name: &str) -> AppResult<()>;

    /// `DELETE export/{file}`
    async fn delete_export(&self, file: &str) -> AppResult<()>;
}

/// Relative request paths, shared by the HTTP implementation and its tests
pub mod paths {
    use crate::models::CreateExportRequest;

    pub const EXPORTS: &str = "exports";
    pub const CONFIG: &str = "config";

    pub fn start_export(request: &CreateExportRequest) -> String {
        format!(
            "export/{}/start/{}/end/{}",
            urlencoding::encode(&request.camera),
            request.start_epoch,
            request.end_epoch
        )
    }

    pub fn rename_export(id: &str, new_name: &str) -> String {
        format!("export/{}/{}", id, urlencoding::encode(new_name))
    }

    pub fn delete_export(file: &str) -> String {
        format!("export/{}", file)
    }
}
