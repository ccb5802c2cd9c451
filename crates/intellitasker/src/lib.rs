#![warn(clippy::pedantic)]
// Allow common pedantic lints that don't affect correctness
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_precision_loss)]

//! # IntelliTasker
//!
//! Derived views over a personal task list.
//!
//! This crate provides:
//! - Effective completion for tasks with and without subtasks
//! - Category filters (completed, in progress, overdue, today)
//! - Free-text search and stable, locale-aware ordering
//! - Summary statistics over the whole collection
//! - A cached view composer plus the backend request contract
//!
//! ## Example
//!
//! ```rust,ignore
//! use intellitasker::{compose_view, TitleCollation, ViewState};
//!
//! let view = compose_view(&tasks, &ViewState::default(), chrono::Utc::now(), &TitleCollation::default());
//! ```

// Core entities
pub mod entities;

// Error types
pub mod errors;

// Timestamp parsing and calendar days
pub mod moment;

// Derivation engine
pub mod engine;

// Domain facades
pub mod domain;

// Backend client
pub mod client;

// Terminal UI helpers
pub mod ui;

// Re-export key types for convenience
pub use client::{HttpTaskApi, TaskApi};
pub use domain::{compose_view, compose_view_in, ConfigDomain, TasksDomain, ViewComposer};
pub use engine::{
    filter_tasks, is_complete, is_overdue, search_tasks, sort_tasks, task_stats, TitleCollation,
};
pub use entities::{
    AppConfig, FilterCategory, ListQuery, SortKey, Subtask, SubtaskDraft, Task, TaskDraft,
    TaskPatch, TaskStats, ViewState,
};
pub use errors::{TasksError, TasksResult};
