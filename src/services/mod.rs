pub mod controller;
pub mod create;
pub mod delete;
pub mod filter;
pub mod notify;
pub mod registry;
pub mod rename;
pub mod selection;

pub use controller::ExportsController;
pub use create::CreateExportForm;
pub use delete::{DeleteState, DeleteWorkflow};
pub use filter::{filter_exports, FilteredView};
pub use notify::{Notification, NotificationLog, Notifier, Severity};
pub use registry::ExportRegistry;
pub use rename::rename_export;
pub use selection::{QueryState, SelectionState, SharedState, SELECTION_KEY};
