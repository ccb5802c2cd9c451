//! Statistics aggregator.

use chrono::{DateTime, Utc};

use super::{is_complete, is_overdue};
use crate::entities::{Task, TaskStats};

/// Summary counts over the whole collection passed in
pub fn task_stats<'a, I>(tasks: I, now: DateTime<Utc>) -> TaskStats
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks.into_iter().fold(TaskStats::default(), |mut stats, task| {
        stats.total += 1;
        if is_complete(task) {
            stats.completed += 1;
        } else {
            stats.in_progress += 1;
        }
        if is_overdue(task, now) {
            stats.overdue += 1;
        }
        stats
    })
}
