//! Export lifecycle controller: one owner for the registry, search term,
//! viewer selection and the three mutation workflows.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::backend::ExportsApi;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{DeleteClip, Export};

use super::create::CreateExportForm;
use super::delete::{DeleteState, DeleteWorkflow};
use super::filter::FilteredView;
use super::notify::Notifier;
use super::registry::ExportRegistry;
use super::rename::rename_export;
use super::selection::{SelectionState, SharedState};

pub struct ExportsController {
    api: Arc<dyn ExportsApi>,
    notifier: Arc<dyn Notifier>,
    shared: Box<dyn SharedState>,
    config: Config,
    registry: ExportRegistry,
    search: String,
    selection: SelectionState,
    create: CreateExportForm,
    delete: DeleteWorkflow,
}

impl ExportsController {
    pub fn new(
        api: Arc<dyn ExportsApi>,
        notifier: Arc<dyn Notifier>,
        shared: Box<dyn SharedState>,
        config: Config,
    ) -> Self {
        Self {
            registry: ExportRegistry::new(api.clone()),
            api,
            notifier,
            shared,
            config,
            search: String::new(),
            selection: SelectionState::new(),
            create: CreateExportForm::new(),
            delete: DeleteWorkflow::new(),
        }
    }

    /// Loads exports and camera config, then applies any shared selection.
    ///
    /// Fetch failures keep the previous cache and are only logged.
    pub async fn mount(&mut self) {
        let _ = self.registry.fetch().await;
        let _ = self.registry.fetch_config().await;
        self.sync_selection();
    }

    pub fn registry(&self) -> &ExportRegistry {
        &self.registry
    }

    // Search

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn view(&self) -> FilteredView<'_> {
        FilteredView::new(self.registry.exports(), &self.search)
    }

    // Viewing

    pub fn shared(&self) -> &dyn SharedState {
        self.shared.as_ref()
    }

    /// Re-reads the shared id; `false` while it is waiting on the first fetch
    pub fn sync_selection(&mut self) -> bool {
        self.selection
            .sync_from_shared(self.shared.as_ref(), &self.registry)
    }

    /// External change of the shared id, e.g. a followed link
    pub fn set_shared_selection(&mut self, id: &str) -> bool {
        self.shared.set(super::selection::SELECTION_KEY, id);
        self.sync_selection()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Opens the viewer for `id`; searches the full list regardless of the filter
    pub fn open_export(&mut self, id: &str) -> bool {
        match self.registry.find(id).cloned() {
            Some(export) => {
                self.selection.open(export, self.shared.as_mut());
                true
            }
            None => {
                tracing::debug!("Open ignored, no export with id={}", id);
                false
            }
        }
    }

    pub fn close_viewer(&mut self) {
        self.selection.close(self.shared.as_mut());
    }

    pub fn on_media_loaded(&mut self, width: u32, height: u32) {
        self.selection.on_media_loaded(width, height);
    }

    pub fn selected_video_url(&self) -> Option<String> {
        self.selection
            .selected()
            .map(|e| e.video_url(&self.config.base_url, &self.config.media_root))
    }

    pub fn video_url(&self, export: &Export) -> String {
        export.video_url(&self.config.base_url, &self.config.media_root)
    }

    pub fn thumbnail_url(&self, export: &Export) -> Option<String> {
        export.thumbnail_url(&self.config.base_url, &self.config.media_root)
    }

    // Creating

    pub fn camera_options(&self) -> Vec<String> {
        self.registry
            .config()
            .map(|c| c.camera_names())
            .unwrap_or_default()
    }

    pub fn open_create_dialog(&mut self, now: DateTime<Utc>) {
        self.create.open_dialog(now, self.config.input_zone);
    }

    pub fn close_create_dialog(&mut self) {
        self.create.close_dialog();
    }

    pub fn create_form(&self) -> &CreateExportForm {
        &self.create
    }

    pub fn create_form_mut(&mut self) -> &mut CreateExportForm {
        &mut self.create
    }

    pub async fn submit_create(&mut self) -> AppResult<()> {
        self.create
            .submit(
                self.api.as_ref(),
                &mut self.registry,
                self.notifier.as_ref(),
                self.config.input_zone,
            )
            .await
    }

    // Renaming

    pub async fn rename(&mut self, id: &str, new_name: &str) -> AppResult<()> {
        rename_export(
            self.api.as_ref(),
            &mut self.registry,
            &mut self.delete,
            self.notifier.as_ref(),
            id,
            new_name,
        )
        .await
    }

    // Deleting

    pub fn delete_state(&self) -> &DeleteState {
        self.delete.state()
    }

    pub fn delete_workflow(&self) -> &DeleteWorkflow {
        &self.delete
    }

    pub fn request_delete(&mut self, clip: DeleteClip) {
        self.delete.request(clip);
    }

    /// Starts a delete for the export with `id`; unknown ids are ignored
    pub fn request_delete_by_id(&mut self, id: &str) -> bool {
        match self.registry.find(id).map(Export::delete_clip) {
            Some(clip) => {
                self.delete.request(clip);
                true
            }
            None => false,
        }
    }

    pub fn cancel_delete(&mut self) {
        self.delete.cancel();
    }

    pub async fn confirm_delete(&mut self) -> AppResult<bool> {
        self.delete
            .confirm(self.api.as_ref(), &mut self.registry, self.notifier.as_ref())
            .await
    }
}
