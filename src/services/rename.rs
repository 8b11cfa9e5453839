use crate::backend::ExportsApi;
use crate::error::AppResult;

use super::delete::DeleteWorkflow;
use super::notify::{Notifier, Severity};
use super::registry::ExportRegistry;

/// Renames an export and refetches the registry.
///
/// A successful rename also drops any pending delete, whichever export it targets.
pub async fn rename_export(
    api: &dyn ExportsApi,
    registry: &mut ExportRegistry,
    delete: &mut DeleteWorkflow,
    notifier: &dyn Notifier,
    id: &str,
    new_name: &str,
) -> AppResult<()> {
    if let Err(e) = api.rename_export(id, new_name).await {
        tracing::error!("Rename export failed: id={}, error={}", id, e);
        notifier.notify(
            &format!("Failed to rename export: {}", e.user_message()),
            Severity::Error,
        );
        return Err(e);
    }

    delete.cancel();
    registry.invalidate().await;
    Ok(())
}
