//! View selection types: filter categories, sort keys, and the view state.

use serde::{Deserialize, Serialize};

use crate::errors::TasksError;

/// Predicate category for the filter engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum FilterCategory {
    #[default]
    All,
    Completed,
    InProgress,
    Overdue,
    Today,
}

impl FilterCategory {
    pub const ALL: [Self; 5] = [
        Self::All,
        Self::Completed,
        Self::InProgress,
        Self::Overdue,
        Self::Today,
    ];

    /// Wire name used by the backend and the config file
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::InProgress => "inProgress",
            Self::Overdue => "overdue",
            Self::Today => "today",
        }
    }

    /// Whether membership changes with the current instant
    pub fn depends_on_clock(self) -> bool {
        matches!(self, Self::Overdue | Self::Today)
    }
}

impl std::fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FilterCategory {
    type Err = TasksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "completed" | "done" => Ok(Self::Completed),
            "inprogress" | "in-progress" | "in_progress" => Ok(Self::InProgress),
            "overdue" => Ok(Self::Overdue),
            "today" => Ok(Self::Today),
            _ => Err(TasksError::InvalidFilter {
                value: s.to_string(),
            }),
        }
    }
}

/// Ordering key for the sort engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Start time, newest first
    #[default]
    Recent,
    /// Start time, oldest first
    Oldest,
    /// End time, earliest first
    DueDate,
    /// Title, locale collation
    Title,
    /// Completed subtask share, highest first
    Progress,
    /// Own estimate, largest first
    Duration,
}

impl SortKey {
    pub const ALL: [Self; 6] = [
        Self::Recent,
        Self::Oldest,
        Self::DueDate,
        Self::Title,
        Self::Progress,
        Self::Duration,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Oldest => "oldest",
            Self::DueDate => "dueDate",
            Self::Title => "title",
            Self::Progress => "progress",
            Self::Duration => "duration",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortKey {
    type Err = TasksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recent" => Ok(Self::Recent),
            "oldest" => Ok(Self::Oldest),
            "duedate" | "due-date" | "due_date" | "due" => Ok(Self::DueDate),
            "title" => Ok(Self::Title),
            "progress" => Ok(Self::Progress),
            "duration" => Ok(Self::Duration),
            _ => Err(TasksError::InvalidSort {
                value: s.to_string(),
            }),
        }
    }
}

/// The user's current view selection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub category: FilterCategory,
    /// Free-text search over title and description
    pub query: String,
    pub sort: SortKey,
}

impl ViewState {
    pub fn new(category: FilterCategory, query: impl Into<String>, sort: SortKey) -> Self {
        Self {
            category,
            query: query.into(),
            sort,
        }
    }

    /// The search text with surrounding whitespace removed
    pub fn trimmed_query(&self) -> &str {
        self.query.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_parsing() {
        assert_eq!(
            "inProgress".parse::<FilterCategory>().unwrap(),
            FilterCategory::InProgress
        );
        assert_eq!(
            "in-progress".parse::<FilterCategory>().unwrap(),
            FilterCategory::InProgress
        );
        assert_eq!(
            " TODAY ".parse::<FilterCategory>().unwrap(),
            FilterCategory::Today
        );
        assert!("later".parse::<FilterCategory>().is_err());
    }

    #[test]
    fn test_filter_display_matches_wire_name() {
        for category in FilterCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{category}\""));
            assert_eq!(category.to_string().parse::<FilterCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!("dueDate".parse::<SortKey>().unwrap(), SortKey::DueDate);
        assert_eq!("due-date".parse::<SortKey>().unwrap(), SortKey::DueDate);
        assert!(matches!(
            "size".parse::<SortKey>(),
            Err(TasksError::InvalidSort { .. })
        ));
    }

    #[test]
    fn test_sort_display_matches_wire_name() {
        for key in SortKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{key}\""));
            assert_eq!(key.to_string().parse::<SortKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_defaults() {
        let state = ViewState::default();
        assert_eq!(state.category, FilterCategory::All);
        assert_eq!(state.sort, SortKey::Recent);
        assert_eq!(ViewState::new(FilterCategory::Today, "  a ", SortKey::Title).trimmed_query(), "a");
    }

    #[test]
    fn test_clock_dependence() {
        assert!(FilterCategory::Overdue.depends_on_clock());
        assert!(FilterCategory::Today.depends_on_clock());
        assert!(!FilterCategory::Completed.depends_on_clock());
    }
}
