//! View composer: filter, then search, then sort.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use tracing::debug;

use crate::engine::{filter_tasks_in, search_tasks, sort_tasks_with, task_stats, TitleCollation};
use crate::entities::{FilterCategory, SortKey, Task, TaskStats, ViewState};
use crate::moment::local_day;

/// Materialize a view in the local time zone
pub fn compose_view<'a>(
    tasks: &'a [Task],
    state: &ViewState,
    now: DateTime<Utc>,
    collation: &TitleCollation,
) -> Vec<&'a Task> {
    compose_view_in(tasks, state, now, collation, &Local)
}

/// Materialize a view, taking calendar days in `tz`
pub fn compose_view_in<'a, Tz: TimeZone>(
    tasks: &'a [Task],
    state: &ViewState,
    now: DateTime<Utc>,
    collation: &TitleCollation,
    tz: &Tz,
) -> Vec<&'a Task> {
    let filtered = filter_tasks_in(tasks, state.category, now, tz);
    let matched = search_tasks(filtered, &state.query);
    sort_tasks_with(matched, state.sort, collation)
}

/// Part of the clock a cached view depends on
#[derive(Debug, Clone, PartialEq, Eq)]
enum ClockKey {
    Unused,
    Day(NaiveDate),
    Instant(DateTime<Utc>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    revision: u64,
    category: FilterCategory,
    query: String,
    sort: SortKey,
    clock: ClockKey,
}

#[derive(Debug)]
struct CachedView {
    key: CacheKey,
    rows: Vec<Task>,
}

/// Holds a task snapshot and the current view selection.
///
/// The composed view is cached and rebuilt in full whenever the snapshot,
/// the category, the query, the sort key, or (for clock-dependent
/// categories) the relevant part of `now` changes.
#[derive(Debug)]
pub struct ViewComposer<Tz: TimeZone = Local> {
    tasks: Vec<Task>,
    revision: u64,
    state: ViewState,
    collation: TitleCollation,
    tz: Tz,
    cache: Option<CachedView>,
}

impl ViewComposer<Local> {
    /// Composer over `tasks` using the local time zone
    pub fn new(tasks: Vec<Task>) -> Self {
        Self::with_zone(tasks, Local)
    }
}

impl<Tz: TimeZone> ViewComposer<Tz> {
    pub fn with_zone(tasks: Vec<Task>, tz: Tz) -> Self {
        Self {
            tasks,
            revision: 0,
            state: ViewState::default(),
            collation: TitleCollation::default(),
            tz,
            cache: None,
        }
    }

    pub fn with_collation(mut self, collation: TitleCollation) -> Self {
        self.collation = collation;
        self.cache = None;
        self
    }

    pub fn with_state(mut self, state: ViewState) -> Self {
        self.state = state;
        self
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Swap in a new snapshot
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.revision += 1;
    }

    /// Append a task (e.g. one just created by the backend)
    pub fn push_task(&mut self, task: Task) {
        self.tasks.push(task);
        self.revision += 1;
    }

    /// Replace the task with the same id; returns false if none matched
    pub fn update_task(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task;
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    pub fn remove_task(&mut self, task_id: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == task_id)?;
        self.revision += 1;
        Some(self.tasks.remove(idx))
    }

    pub fn set_state(&mut self, state: ViewState) {
        self.state = state;
    }

    pub fn set_category(&mut self, category: FilterCategory) {
        self.state.category = category;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.state.sort = sort;
    }

    /// The ordered, filtered view at `now`
    pub fn view(&mut self, now: DateTime<Utc>) -> &[Task] {
        let key = self.cache_key(now);

        if self.cache.as_ref().is_some_and(|cached| cached.key == key) {
            debug!(revision = self.revision, "view cache hit");
        } else {
            let rows: Vec<Task> =
                compose_view_in(&self.tasks, &self.state, now, &self.collation, &self.tz)
                    .into_iter()
                    .cloned()
                    .collect();
            debug!(
                revision = self.revision,
                category = %self.state.category,
                sort = %self.state.sort,
                rows = rows.len(),
                "view recomputed"
            );
            self.cache = Some(CachedView { key, rows });
        }

        self.cache
            .as_ref()
            .map(|cached| cached.rows.as_slice())
            .unwrap_or_default()
    }

    /// Statistics over the whole snapshot, independent of the selection
    pub fn stats(&self, now: DateTime<Utc>) -> TaskStats {
        task_stats(&self.tasks, now)
    }

    fn cache_key(&self, now: DateTime<Utc>) -> CacheKey {
        let clock = match self.state.category {
            FilterCategory::Overdue => ClockKey::Instant(now),
            FilterCategory::Today => ClockKey::Day(local_day(&now, &self.tz)),
            _ => ClockKey::Unused,
        };
        CacheKey {
            revision: self.revision,
            category: self.state.category,
            query: self.state.trimmed_query().to_string(),
            sort: self.state.sort,
            clock,
        }
    }
}
