use std::collections::HashMap;
use std::sync::Mutex;

use reqwest::StatusCode;

use crate::error::{AppError, AppResult};
use crate::models::{CameraConfig, CreateExportRequest, Export};

use super::ExportsApi;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    ListExports,
    GetConfig,
    StartExport(CreateExportRequest),
    RenameExport { id: String, name: String },
    DeleteExport(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Config,
    Start,
    Rename,
    Delete,
}

/// In-memory backend that records every call and applies mutations to its list
#[derive(Default)]
pub struct MockExportsApi {
    exports: Mutex<Vec<Export>>,
    config: Mutex<CameraConfig>,
    calls: Mutex<Vec<ApiCall>>,
    failures: Mutex<HashMap<Op, (StatusCode, Option<String>)>>,
}

impl MockExportsApi {
    pub fn with_exports(exports: Vec<Export>) -> Self {
        Self {
            exports: Mutex::new(exports),
            ..Default::default()
        }
    }

    pub fn with_cameras(self, names: &[&str]) -> Self {
        {
            let mut config = self.config.lock().unwrap();
            for name in names {
                config
                    .cameras
                    .insert(name.to_string(), serde_json::json!({"enabled": true}));
            }
        }
        self
    }

    pub fn fail(&self, op: Op, status: StatusCode, message: Option<&str>) {
        self.failures
            .lock()
            .unwrap()
            .insert(op, (status, message.map(str::to_string)));
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&ApiCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| matches(*c)).count()
    }

    pub fn mutation_calls(&self) -> Vec<ApiCall> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, ApiCall::ListExports | ApiCall::GetConfig))
            .collect()
    }

    fn record(&self, op: Op, call: ApiCall) -> AppResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().get(&op) {
            Some((status, message)) => Err(AppError::Api {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

pub fn export(id: &str, name: &str) -> Export {
    Export {
        id: id.to_string(),
        name: name.to_string(),
        video_path: format!("/media/frigate/exports/{}.mp4", id),
        camera: "front_door".to_string(),
        date: 1_704_103_200.0,
        thumb_path: String::new(),
        in_progress: false,
    }
}

#[async_trait::async_trait]
impl ExportsApi for MockExportsApi {
    async fn list_exports(&self) -> AppResult<Vec<Export>> {
        self.record(Op::List, ApiCall::ListExports)?;
        Ok(self.exports.lock().unwrap().clone())
    }

    async fn get_config(&self) -> AppResult<CameraConfig> {
        self.record(Op::Config, ApiCall::GetConfig)?;
        Ok(self.config.lock().unwrap().clone())
    }

    async fn start_export(&self, request: &CreateExportRequest) -> AppResult<()> {
        self.record(Op::Start, ApiCall::StartExport(request.clone()))?;
        let id = format!(
            "{}_{}_{}",
            request.camera, request.start_epoch, request.end_epoch
        );
        let mut created = export(&id, &request.name);
        created.camera = request.camera.clone();
        created.in_progress = true;
        self.exports.lock().unwrap().push(created);
        Ok(())
    }

    async fn rename_export(&self, id: &str, new_name: &str) -> AppResult<()> {
        self.record(
            Op::Rename,
            ApiCall::RenameExport {
                id: id.to_string(),
                name: new_name.to_string(),
            },
        )?;
        if let Some(found) = self.exports.lock().unwrap().iter_mut().find(|e| e.id == id) {
            found.name = new_name.to_string();
        }
        Ok(())
    }

    async fn delete_export(&self, file: &str) -> AppResult<()> {
        self.record(Op::Delete, ApiCall::DeleteExport(file.to_string()))?;
        self.exports.lock().unwrap().retain(|e| e.id != file);
        Ok(())
    }
}
