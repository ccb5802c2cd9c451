//! Property checks for the derivation engine.
//!
//! Every property is checked against a fixed, varied collection that mixes
//! subtask shapes, inverted windows, unreadable dates, and tied keys.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use intellitasker::engine::{
    filter_tasks_in, is_complete, is_overdue, sort_tasks, sort_tasks_with, task_stats,
    tasks_on_day, TitleCollation,
};
use intellitasker::entities::{FilterCategory, SortKey, Subtask, Task};
use intellitasker::moment::{parse_moment, EARLIEST};

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
}

fn collection() -> Vec<Task> {
    let subtasks = |flags: &[bool]| -> Vec<Subtask> {
        flags
            .iter()
            .enumerate()
            .map(|(i, done)| Subtask::new(format!("s{i}"), format!("step {i}"), 1.0).with_completed(*done))
            .collect()
    };

    vec![
        Task::new("a", "Écrire", at(1, 9), at(3, 17), 4.0),
        Task::new("b", "banana", at(2, 9), at(2, 10), 1.0).with_completed(true),
        Task::new("c", "Apple", at(2, 9), at(9, 10), 1.0)
            .with_completed(true)
            .with_subtasks(subtasks(&[true, false])),
        Task::new("d", "cherry", at(5, 9), at(4, 9), 2.0).with_subtasks(subtasks(&[true, true])),
        Task::new("e", "apple", EARLIEST, EARLIEST, 0.5),
        Task::new("f", "Delta", at(4, 12), at(6, 12), 4.0).with_subtasks(subtasks(&[false])),
        Task::new("g", "delta", at(4, 12), at(7, 12), 2.0).with_subtasks(subtasks(&[
            true, false, false, true,
        ])),
        Task::new("h", "", at(4, 0), at(4, 23), 0.0),
    ]
}

fn ids(tasks: &[&Task]) -> Vec<String> {
    tasks.iter().map(|t| t.id.clone()).collect()
}

fn instants() -> Vec<DateTime<Utc>> {
    vec![EARLIEST, at(1, 0), at(2, 9), at(4, 12), at(9, 10), at(28, 0)]
}

#[test]
fn test_completion_follows_subtasks() {
    for task in collection() {
        if task.subtasks.is_empty() {
            assert_eq!(is_complete(&task), task.completed, "task {}", task.id);
        } else {
            let all_done = task.subtasks.iter().all(|s| s.completed);
            assert_eq!(is_complete(&task), all_done, "task {}", task.id);
        }
    }
}

#[test]
fn test_overdue_is_exactly_past_end() {
    let tasks = collection();
    for now in instants() {
        let overdue = filter_tasks_in(&tasks, FilterCategory::Overdue, now, &Utc);
        let expected: Vec<&Task> = tasks.iter().filter(|t| t.end_date_time < now).collect();
        assert_eq!(ids(&overdue), ids(&expected), "at {now}");
        assert!(overdue.iter().all(|t| is_overdue(t, now)));
    }
}

#[test]
fn test_completed_and_in_progress_partition() {
    let tasks = collection();
    for now in instants() {
        let completed = filter_tasks_in(&tasks, FilterCategory::Completed, now, &Utc);
        let open = filter_tasks_in(&tasks, FilterCategory::InProgress, now, &Utc);

        assert_eq!(completed.len() + open.len(), tasks.len());
        for task in &tasks {
            let in_completed = completed.iter().any(|t| t.id == task.id);
            let in_open = open.iter().any(|t| t.id == task.id);
            assert!(in_completed != in_open, "task {} in both or neither", task.id);
        }
    }
}

#[test]
fn test_filters_preserve_order() {
    let tasks = collection();
    let position = |id: &str| tasks.iter().position(|t| t.id == id).unwrap();

    for category in FilterCategory::ALL {
        let filtered = filter_tasks_in(&tasks, category, at(4, 12), &Utc);
        let positions: Vec<usize> = filtered.iter().map(|t| position(&t.id)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{category}");
    }
    assert_eq!(
        filter_tasks_in(&tasks, FilterCategory::All, at(4, 12), &Utc).len(),
        tasks.len()
    );
}

#[test]
fn test_sort_is_idempotent() {
    let tasks = collection();
    for key in SortKey::ALL {
        let once = sort_tasks(&tasks, key);
        let twice = sort_tasks(once.iter().copied(), key);
        assert_eq!(ids(&once), ids(&twice), "{key}");
    }
}

#[test]
fn test_sort_is_stable() {
    let tasks = collection();
    let position = |id: &str| tasks.iter().position(|t| t.id == id).unwrap();
    let collation = TitleCollation::default();

    for key in SortKey::ALL {
        let sorted = sort_tasks_with(&tasks, key, &collation);
        for pair in sorted.windows(2) {
            let equal = intellitasker::engine::compare_by(pair[0], pair[1], key, &collation)
                == std::cmp::Ordering::Equal;
            if equal {
                assert!(
                    position(&pair[0].id) < position(&pair[1].id),
                    "{key}: {} and {} swapped",
                    pair[0].id,
                    pair[1].id
                );
            }
        }
    }
}

#[test]
fn test_sort_keys() {
    let tasks = collection();
    // Tied starts (b, c) and (f, g) keep input order; the unreadable date sorts last.
    assert_eq!(
        ids(&sort_tasks(&tasks, SortKey::Recent)),
        vec!["d", "f", "g", "h", "b", "c", "a", "e"]
    );
    assert_eq!(
        ids(&sort_tasks(&tasks, SortKey::Oldest)),
        vec!["e", "a", "b", "c", "h", "f", "g", "d"]
    );
    assert_eq!(
        ids(&sort_tasks(&tasks, SortKey::DueDate)),
        vec!["e", "b", "a", "d", "h", "f", "g", "c"]
    );
    assert_eq!(
        ids(&sort_tasks(&tasks, SortKey::Duration)),
        vec!["a", "f", "d", "g", "b", "c", "e", "h"]
    );
    // d = 1.0, c = 0.5, g = 0.5, then zeros in input order.
    assert_eq!(
        ids(&sort_tasks(&tasks, SortKey::Progress)),
        vec!["d", "c", "g", "a", "b", "e", "f", "h"]
    );
}

#[test]
fn test_sort_leaves_input_untouched() {
    let tasks = collection();
    let before = tasks.clone();
    for key in SortKey::ALL {
        let _ = sort_tasks(&tasks, key);
    }
    assert_eq!(tasks, before);
}

#[test]
fn test_stats_consistency() {
    let tasks = collection();
    for now in instants() {
        for len in 0..=tasks.len() {
            let stats = task_stats(&tasks[..len], now);
            assert_eq!(stats.total, len);
            assert_eq!(stats.completed + stats.in_progress, stats.total);
            assert!(stats.overdue <= stats.total);
        }
    }
}

#[test]
fn test_scenario_stats() {
    let now = parse_moment("2025-06-15T12:00:00Z");
    let yesterday = now - Duration::days(1);
    let tomorrow = now + Duration::days(1);

    let tasks = vec![
        Task::new("1", "Two done", now, tomorrow, 1.0).with_subtasks(vec![
            Subtask::new("a", "x", 1.0).with_completed(true),
            Subtask::new("b", "y", 1.0).with_completed(true),
        ]),
        Task::new("2", "Flagged", now, tomorrow, 1.0).with_completed(true),
        Task::new("3", "Late", yesterday - Duration::days(1), yesterday, 1.0),
    ];

    assert!(is_complete(&tasks[0]));
    assert!(is_complete(&tasks[1]));
    assert!(!is_complete(&tasks[2]));

    let stats = task_stats(&tasks, now);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.overdue, 1);
}

#[test]
fn test_scenario_title_ignores_case() {
    let tasks = vec![
        Task::new("1", "Banana", at(1, 0), at(2, 0), 1.0),
        Task::new("2", "apple", at(3, 0), at(4, 0), 1.0),
    ];
    let titles: Vec<&str> = sort_tasks(&tasks, SortKey::Title)
        .iter()
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(titles, vec!["apple", "Banana"]);
}

#[test]
fn test_scenario_today_spans_several_days() {
    let task = Task::new("1", "Conference", at(3, 9), at(5, 17), 24.0);
    let tasks = vec![task];

    let now = at(4, 13);
    assert_eq!(filter_tasks_in(&tasks, FilterCategory::Today, now, &Utc).len(), 1);
    assert!(filter_tasks_in(&tasks, FilterCategory::Today, at(6, 0), &Utc).is_empty());

    // Day boundaries follow the zone: 2025-03-05 23:30 in UTC-3 is already the 6th in UTC.
    let zone = FixedOffset::west_opt(3 * 3600).unwrap();
    let late_evening = zone.with_ymd_and_hms(2025, 3, 5, 23, 30, 0).unwrap().with_timezone(&Utc);
    assert_eq!(
        filter_tasks_in(&tasks, FilterCategory::Today, late_evening, &zone).len(),
        1
    );
    assert!(filter_tasks_in(&tasks, FilterCategory::Today, late_evening, &Utc).is_empty());
}

#[test]
fn test_degenerate_inputs_do_not_panic() {
    let empty: Vec<Task> = Vec::new();
    for category in FilterCategory::ALL {
        assert!(filter_tasks_in(&empty, category, at(1, 0), &Utc).is_empty());
    }
    for key in SortKey::ALL {
        assert!(sort_tasks(&empty, key).is_empty());
    }
    assert_eq!(task_stats(&empty, at(1, 0)).total, 0);

    let inverted = vec![Task::new("x", "Backwards", at(5, 9), at(4, 9), 1.0)];
    assert!(filter_tasks_in(&inverted, FilterCategory::Today, at(4, 12), &Utc).is_empty());
    assert_eq!(
        filter_tasks_in(&inverted, FilterCategory::Overdue, at(4, 12), &Utc).len(),
        1
    );
}

#[test]
fn test_unreadable_dates_in_offset_zones() {
    let tasks = collection();
    let behind = FixedOffset::west_opt(5 * 3600).unwrap();
    let ahead = FixedOffset::east_opt(5 * 3600).unwrap();

    for now in instants() {
        for category in FilterCategory::ALL {
            let west = filter_tasks_in(&tasks, category, now, &behind);
            let east = filter_tasks_in(&tasks, category, now, &ahead);
            if category != FilterCategory::Today {
                let utc = filter_tasks_in(&tasks, category, now, &Utc);
                assert_eq!(ids(&west), ids(&utc), "{category} at {now}");
                assert_eq!(ids(&east), ids(&utc), "{category} at {now}");
            }
        }
    }

    // 2025-03-04 07:00 in UTC-5; the unreadable task "e" falls on no real day.
    let today = filter_tasks_in(&tasks, FilterCategory::Today, at(4, 12), &behind);
    assert_eq!(ids(&today), vec!["c", "f", "g", "h"]);

    for zone in [behind, ahead] {
        let day = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        assert!(tasks_on_day(&tasks, day, &zone).iter().all(|t| t.id != "e"));

        let earliest = tasks_on_day(&tasks, NaiveDate::MIN, &zone);
        assert_eq!(ids(&earliest), vec!["e"]);
    }
}
