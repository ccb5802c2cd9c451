//! Filter engine: category membership over a task collection.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use super::is_complete;
use crate::entities::{FilterCategory, Task};
use crate::moment::local_day;

/// End of the window lies before `now`. Completion is not considered.
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    task.end_date_time < now
}

/// The task's calendar-day window in `tz` contains `day`.
///
/// An inverted window (end day before start day) contains no day.
pub fn spans_day<Tz: TimeZone>(task: &Task, day: NaiveDate, tz: &Tz) -> bool {
    local_day(&task.start_date_time, tz) <= day && day <= local_day(&task.end_date_time, tz)
}

/// Category predicate, with `today` resolved in `tz`
pub fn matches_category<Tz: TimeZone>(
    task: &Task,
    category: FilterCategory,
    now: DateTime<Utc>,
    tz: &Tz,
) -> bool {
    match category {
        FilterCategory::All => true,
        FilterCategory::Completed => is_complete(task),
        FilterCategory::InProgress => !is_complete(task),
        FilterCategory::Overdue => is_overdue(task, now),
        FilterCategory::Today => spans_day(task, local_day(&now, tz), tz),
    }
}

/// Tasks matching `category`, in their original order, using the local zone
pub fn filter_tasks<'a, I>(tasks: I, category: FilterCategory, now: DateTime<Utc>) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    filter_tasks_in(tasks, category, now, &Local)
}

/// Tasks matching `category`, in their original order, with days taken in `tz`
pub fn filter_tasks_in<'a, I, Tz>(
    tasks: I,
    category: FilterCategory,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
    Tz: TimeZone,
{
    tasks
        .into_iter()
        .filter(|task| matches_category(task, category, now, tz))
        .collect()
}

/// Tasks whose window covers a calendar day (calendar grid cells)
pub fn tasks_on_day<'a, I, Tz>(tasks: I, day: NaiveDate, tz: &Tz) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
    Tz: TimeZone,
{
    tasks
        .into_iter()
        .filter(|task| spans_day(task, day, tz))
        .collect()
}
