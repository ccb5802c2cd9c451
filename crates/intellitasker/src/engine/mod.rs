//! Task derivation engine.
//!
//! Pure, synchronous functions over a task snapshot: effective completion,
//! category filtering, text search, ordering, and summary statistics. The
//! current instant is always passed in and nothing here mutates its input.

mod completion;
mod filter;
mod search;
mod sort;
mod stats;

pub use completion::is_complete;
pub use filter::{
    filter_tasks, filter_tasks_in, is_overdue, matches_category, spans_day, tasks_on_day,
};
pub use search::{matches_query, search_tasks};
pub use sort::{compare_by, sort_tasks, sort_tasks_with, TitleCollation, DEFAULT_COLLATION_LOCALE};
pub use stats::task_stats;
