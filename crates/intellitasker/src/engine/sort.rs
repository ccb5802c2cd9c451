//! Sort engine: stable orderings over a task collection.

use std::cmp::Ordering;
use std::fmt;

use icu_collator::options::CollatorOptions;
use icu_collator::Collator;
use icu_locale_core::Locale;

use crate::entities::{SortKey, Task};
use crate::errors::{TasksError, TasksResult};

/// Locale used for title ordering unless configured otherwise
pub const DEFAULT_COLLATION_LOCALE: &str = "es";

type Comparator = Box<dyn Fn(&str, &str) -> Ordering>;

/// Locale-aware string ordering for task titles.
///
/// Backed by an ICU collator. When no collator can be built the titles are
/// compared case-insensitively, then ordinally, so the order stays total.
pub struct TitleCollation {
    locale: String,
    collator: Option<Comparator>,
}

impl TitleCollation {
    /// Build a collation for a BCP 47 locale tag
    pub fn new(locale: &str) -> TasksResult<Self> {
        let parsed: Locale = locale.parse().map_err(|_| TasksError::InvalidLocale {
            locale: locale.to_string(),
        })?;

        let collator = match Collator::try_new(parsed.into(), CollatorOptions::default()) {
            Ok(collator) => {
                let compare: Comparator = Box::new(move |a: &str, b: &str| collator.compare(a, b));
                Some(compare)
            }
            Err(e) => {
                tracing::warn!(locale, error = %e, "no collation data, using case-insensitive titles");
                None
            }
        };

        Ok(Self {
            locale: locale.to_string(),
            collator,
        })
    }

    /// Build a collation, falling back to the default locale on a bad tag
    pub fn new_or_default(locale: &str) -> Self {
        Self::new(locale).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default collation locale");
            Self::default()
        })
    }

    /// Case-insensitive ordinal comparison, no locale data
    pub fn fallback() -> Self {
        Self {
            locale: String::new(),
            collator: None,
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(compare) => compare(a, b),
            None => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
        }
    }
}

impl Default for TitleCollation {
    fn default() -> Self {
        Self::new(DEFAULT_COLLATION_LOCALE).unwrap_or_else(|_| Self::fallback())
    }
}

impl fmt::Debug for TitleCollation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TitleCollation")
            .field("locale", &self.locale)
            .field("icu", &self.collator.is_some())
            .finish()
    }
}

/// Order tasks by `key` with the default title collation
pub fn sort_tasks<'a, I>(tasks: I, key: SortKey) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    sort_tasks_with(tasks, key, &TitleCollation::default())
}

/// Order tasks by `key`.
///
/// Returns a new sequence and leaves the input untouched. The sort is
/// stable: tasks with equal keys keep their relative input order.
pub fn sort_tasks_with<'a, I>(tasks: I, key: SortKey, collation: &TitleCollation) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut sorted: Vec<&Task> = tasks.into_iter().collect();
    sorted.sort_by(|a, b| compare_by(a, b, key, collation));
    sorted
}

/// Comparator for a single sort key
pub fn compare_by(a: &Task, b: &Task, key: SortKey, collation: &TitleCollation) -> Ordering {
    match key {
        SortKey::Recent => b.start_date_time.cmp(&a.start_date_time),
        SortKey::Oldest => a.start_date_time.cmp(&b.start_date_time),
        SortKey::DueDate => a.end_date_time.cmp(&b.end_date_time),
        SortKey::Title => collation.compare(&a.title, &b.title),
        SortKey::Progress => b.progress().ratio().total_cmp(&a.progress().ratio()),
        SortKey::Duration => hours_key(b.estimated_hours).total_cmp(&hours_key(a.estimated_hours)),
    }
}

/// Signed zeros tie and NaN ranks as zero, keeping the order total.
fn hours_key(hours: f64) -> f64 {
    if hours.is_nan() {
        0.0
    } else {
        hours + 0.0
    }
}
