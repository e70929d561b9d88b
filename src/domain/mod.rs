pub mod deadline;
pub mod enums;
pub mod focus;
pub mod history;
pub mod task;

pub use deadline::{deadline_for, deadline_for_tag, format_deadline, SundayPolicy};
pub use enums::{Quadrant, UiMode, View};
pub use focus::{is_focusable, select_focus};
pub use history::{filter_history, HistorySort};
pub use task::{generate_id, Task, TaskDraft, TaskPatch, ValidationError};
