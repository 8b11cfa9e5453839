use crate::backend::ExportsApi;
use crate::error::AppResult;
use crate::models::DeleteClip;

use super::notify::{Notifier, Severity};
use super::registry::ExportRegistry;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteState {
    #[default]
    Idle,
    PendingConfirm(DeleteClip),
}

/// Two-step delete: request captures the target, confirm sends it
#[derive(Debug, Default)]
pub struct DeleteWorkflow {
    state: DeleteState,
}

impl DeleteWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DeleteState {
        &self.state
    }

    pub fn pending(&self) -> Option<&DeleteClip> {
        match &self.state {
            DeleteState::PendingConfirm(clip) => Some(clip),
            DeleteState::Idle => None,
        }
    }

    /// Text for the confirmation dialog
    pub fn confirmation_prompt(&self) -> Option<String> {
        self.pending()
            .map(|clip| format!("Are you sure you want to delete {}?", clip.export_name))
    }

    pub fn request(&mut self, clip: DeleteClip) {
        tracing::debug!("Delete requested: file={}", clip.file);
        self.state = DeleteState::PendingConfirm(clip);
    }

    pub fn cancel(&mut self) {
        self.state = DeleteState::Idle;
    }

    /// Sends the pending delete; returns `Ok(false)` when nothing was pending.
    ///
    /// On failure the target stays pending so the user can retry or cancel.
    pub async fn confirm(
        &mut self,
        api: &dyn ExportsApi,
        registry: &mut ExportRegistry,
        notifier: &dyn Notifier,
    ) -> AppResult<bool> {
        let Some(clip) = self.pending().cloned() else {
            return Ok(false);
        };

        if let Err(e) = api.delete_export(&clip.file).await {
            tracing::error!("Delete export failed: file={}, error={}", clip.file, e);
            notifier.notify(
                &format!("Failed to delete export: {}", e.user_message()),
                Severity::Error,
            );
            return Err(e);
        }

        self.state = DeleteState::Idle;
        registry.invalidate().await;
        Ok(true)
    }
}
