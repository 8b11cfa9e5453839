//! Create-export dialog state and submission.

use chrono::{DateTime, Duration, Utc};

use crate::backend::ExportsApi;
use crate::config::InputZone;
use crate::error::{AppError, AppResult, ValidationError};
use crate::models::{CameraConfig, CreateExportRequest, ExportMode};
use crate::time_input;

use super::notify::{Notifier, Severity};
use super::registry::ExportRegistry;

pub const CREATE_SUCCESS_MESSAGE: &str =
    "Successfully started export. View the file in the /exports folder.";

/// Length of the window pre-filled when the dialog opens
const DEFAULT_WINDOW_SECS: i64 = 3600;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CreateExportForm {
    pub camera: String,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub mode: ExportMode,
    open: bool,
}

impl CreateExportForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opens the dialog with a one-hour window ending at `now`
    pub fn open_dialog(&mut self, now: DateTime<Utc>, zone: InputZone) {
        self.start_time = time_input::format_input(now - Duration::seconds(DEFAULT_WINDOW_SECS), zone);
        self.end_time = time_input::format_input(now, zone);
        self.open = true;
    }

    /// Hides the dialog; field values survive for the next open
    pub fn close_dialog(&mut self) {
        self.open = false;
    }

    /// Clears every field back to its default; camera selection is kept
    pub fn reset(&mut self) {
        self.name.clear();
        self.start_time.clear();
        self.end_time.clear();
        self.mode = ExportMode::Realtime;
    }

    /// Checks the fields in order and stops at the first problem.
    ///
    /// Camera membership is only checked once a camera config has loaded.
    pub fn validate(
        &self,
        zone: InputZone,
        cameras: Option<&CameraConfig>,
    ) -> Result<CreateExportRequest, ValidationError> {
        if self.camera.is_empty() || self.start_time.is_empty() || self.end_time.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        let start = time_input::parse_input(&self.start_time, zone).ok_or_else(|| {
            ValidationError::InvalidTime {
                field: "start",
                value: self.start_time.clone(),
            }
        })?;
        let end = time_input::parse_input(&self.end_time, zone).ok_or_else(|| {
            ValidationError::InvalidTime {
                field: "end",
                value: self.end_time.clone(),
            }
        })?;

        if end <= start {
            return Err(ValidationError::EndBeforeStart);
        }

        if let Some(config) = cameras {
            if !config.has_camera(&self.camera) {
                return Err(ValidationError::UnknownCamera(self.camera.clone()));
            }
        }

        Ok(CreateExportRequest {
            camera: self.camera.clone(),
            name: self.name.clone(),
            start_epoch: time_input::to_epoch_seconds(start),
            end_epoch: time_input::to_epoch_seconds(end),
            mode: self.mode,
        })
    }

    /// Validates and sends the request.
    ///
    /// On success the dialog closes, fields reset and the registry is
    /// refetched. On any failure the fields are left for correction.
    pub async fn submit(
        &mut self,
        api: &dyn ExportsApi,
        registry: &mut ExportRegistry,
        notifier: &dyn Notifier,
        zone: InputZone,
    ) -> AppResult<()> {
        let request = match self.validate(zone, registry.config()) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!("Create export rejected: {}", e);
                notifier.notify(&e.to_string(), Severity::Error);
                return Err(AppError::Validation(e));
            }
        };

        if let Err(e) = api.start_export(&request).await {
            tracing::error!("Create export failed: camera={}, error={}", request.camera, e);
            notifier.notify(
                &format!("Failed to start export: {}", e.user_message()),
                Severity::Error,
            );
            return Err(e);
        }

        notifier.notify(CREATE_SUCCESS_MESSAGE, Severity::Success);
        self.close_dialog();
        self.reset();
        registry.invalidate().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{ApiCall, MockExportsApi, Op};
    use crate::services::notify::NotificationLog;
    use chrono::{FixedOffset, TimeZone};
    use reqwest::StatusCode;
    use std::sync::Arc;

    fn utc() -> InputZone {
        InputZone::Fixed(FixedOffset::east_opt(0).unwrap())
    }

    fn filled() -> CreateExportForm {
        CreateExportForm {
            camera: "front_door".to_string(),
            name: "Package".to_string(),
            start_time: "2024-01-01T09:00".to_string(),
            end_time: "2024-01-01T10:00".to_string(),
            mode: ExportMode::Timelapse25x,
            open: true,
        }
    }

    fn setup() -> (Arc<MockExportsApi>, ExportRegistry, NotificationLog) {
        let api = Arc::new(MockExportsApi::default().with_cameras(&["front_door"]));
        let registry = ExportRegistry::new(api.clone());
        (api, registry, NotificationLog::new())
    }

    #[test]
    fn test_missing_fields_checked_first() {
        let mut form = filled();
        form.camera.clear();
        form.end_time = "garbage".to_string();
        assert_eq!(form.validate(utc(), None), Err(ValidationError::MissingFields));
    }

    #[test]
    fn test_end_must_follow_start() {
        let mut form = filled();
        form.start_time = "2024-01-01T10:00".to_string();
        form.end_time = "2024-01-01T09:00".to_string();
        assert_eq!(form.validate(utc(), None), Err(ValidationError::EndBeforeStart));

        form.end_time = form.start_time.clone();
        assert_eq!(form.validate(utc(), None), Err(ValidationError::EndBeforeStart));
    }

    #[test]
    fn test_valid_window_produces_epoch_request() {
        let request = filled().validate(utc(), None).unwrap();
        assert_eq!(request.start_epoch, 1_704_099_600);
        assert_eq!(request.end_epoch, 1_704_103_200);
        assert_eq!(request.mode, ExportMode::Timelapse25x);
    }

    #[test]
    fn test_unparseable_time_rejected() {
        let mut form = filled();
        form.start_time = "tomorrow".to_string();
        assert!(matches!(
            form.validate(utc(), None),
            Err(ValidationError::InvalidTime { field: "start", .. })
        ));
    }

    #[test]
    fn test_unknown_camera_rejected_once_config_loaded() {
        let mut form = filled();
        form.camera = "garage".to_string();
        let mut config = CameraConfig::default();
        config
            .cameras
            .insert("front_door".to_string(), serde_json::json!({}));

        assert_eq!(
            form.validate(utc(), Some(&config)),
            Err(ValidationError::UnknownCamera("garage".to_string()))
        );
        assert!(form.validate(utc(), None).is_ok());
    }

    #[test]
    fn test_open_dialog_prefills_trailing_hour() {
        let zone = InputZone::Fixed(FixedOffset::east_opt(9 * 3600).unwrap());
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 1, 30, 45).unwrap();
        let mut form = CreateExportForm::new();

        form.open_dialog(now, zone);
        assert!(form.is_open());
        assert_eq!(form.start_time, "2024-01-01T09:30");
        assert_eq!(form.end_time, "2024-01-01T10:30");
    }

    #[tokio::test]
    async fn test_empty_camera_never_reaches_backend() {
        let (api, mut registry, log) = setup();
        let mut form = filled();
        form.camera.clear();

        let result = form.submit(api.as_ref(), &mut registry, &log, utc()).await;
        assert!(matches!(result, Err(AppError::Validation(ValidationError::MissingFields))));
        assert!(api.calls().is_empty());
        assert_eq!(log.last().unwrap().message, "Please fill in all required fields");
    }

    #[tokio::test]
    async fn test_success_resets_fields_and_refetches() {
        let (api, mut registry, log) = setup();
        registry.fetch_config().await.unwrap();
        let mut form = filled();

        form.submit(api.as_ref(), &mut registry, &log, utc()).await.unwrap();

        assert!(!form.is_open());
        assert_eq!(form.name, "");
        assert_eq!(form.start_time, "");
        assert_eq!(form.end_time, "");
        assert_eq!(form.mode, ExportMode::Realtime);

        let calls = api.calls();
        let start_at = calls
            .iter()
            .position(|c| matches!(c, ApiCall::StartExport(_)))
            .unwrap();
        assert!(calls[start_at + 1..].contains(&ApiCall::ListExports));
        assert_eq!(registry.exports().unwrap().len(), 1);

        let note = log.last().unwrap();
        assert_eq!(note.severity, Severity::Success);
        assert_eq!(note.message, CREATE_SUCCESS_MESSAGE);
    }

    #[tokio::test]
    async fn test_failure_preserves_fields() {
        let (api, mut registry, log) = setup();
        api.fail(Op::Start, StatusCode::BAD_REQUEST, Some("No recordings in range"));
        let mut form = filled();
        let before = form.clone();

        assert!(form.submit(api.as_ref(), &mut registry, &log, utc()).await.is_err());

        assert_eq!(form, before);
        assert!(!registry.is_loaded());
        assert_eq!(
            log.last().unwrap().message,
            "Failed to start export: No recordings in range"
        );
    }

    #[tokio::test]
    async fn test_failure_without_backend_message() {
        let (api, mut registry, log) = setup();
        api.fail(Op::Start, StatusCode::INTERNAL_SERVER_ERROR, None);
        let mut form = filled();

        let _ = form.submit(api.as_ref(), &mut registry, &log, utc()).await;
        assert_eq!(
            log.last().unwrap().message,
            "Failed to start export: Request failed with status code 500"
        );
    }
}
