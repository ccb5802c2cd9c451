//! Core data structures for task views.

mod config;
mod request;
mod stats;
mod subtask;
mod task;
mod view;

pub use config::{ApiConfig, AppConfig, GlobalConfig, ViewConfig};
pub use request::{
    ListQuery, SubtaskDraft, TaskDraft, TaskPatch, DESCRIPTION_MAX_CHARS, LIST_LIMIT_MAX,
    TITLE_MAX_CHARS,
};
pub use stats::TaskStats;
pub use subtask::Subtask;
pub use task::{SubtaskProgress, Task};
pub use view::{FilterCategory, SortKey, ViewState};
