//! Free-text search over titles and descriptions.

use crate::entities::Task;

/// Case-insensitive substring match on title or description.
///
/// The query is trimmed first; a blank query matches everything.
pub fn matches_query(task: &Task, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty() || contains_needle(task, &needle)
}

/// Tasks matching `query`, in their original order
pub fn search_tasks<'a, I>(tasks: I, query: &str) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return tasks.into_iter().collect();
    }
    tasks
        .into_iter()
        .filter(|task| contains_needle(task, &needle))
        .collect()
}

fn contains_needle(task: &Task, needle: &str) -> bool {
    task.title.to_lowercase().contains(needle) || task.description.to_lowercase().contains(needle)
}
