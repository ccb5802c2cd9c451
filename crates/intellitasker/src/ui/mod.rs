//! Terminal UI helpers for task display.
//!
//! This module uses println! for CLI output, which is appropriate
//! for terminal user interfaces.

#![allow(clippy::disallowed_macros)]

use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use crate::entities::{Task, TaskStats};
use crate::moment::EARLIEST;

/// Display status derived for a task at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskBadge {
    Done,
    Overdue,
    InProgress,
}

impl TaskBadge {
    pub fn of(task: &Task, now: DateTime<Utc>) -> Self {
        if task.is_complete() {
            Self::Done
        } else if task.is_overdue(now) {
            Self::Overdue
        } else {
            Self::InProgress
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::Overdue => "overdue",
            Self::InProgress => "in-progress",
        }
    }

    fn color(self) -> Color {
        match self {
            Self::Done => Color::Green,
            Self::Overdue => Color::Red,
            Self::InProgress => Color::Yellow,
        }
    }
}

/// Get colored badge string
pub fn badge_colored(badge: TaskBadge) -> String {
    match badge {
        TaskBadge::Done => badge.label().green().to_string(),
        TaskBadge::Overdue => badge.label().red().bold().to_string(),
        TaskBadge::InProgress => badge.label().yellow().to_string(),
    }
}

/// Local wall-clock rendering; unreadable timestamps show as `-`
pub fn format_local(moment: &DateTime<Utc>) -> String {
    if *moment == EARLIEST {
        "-".to_string()
    } else {
        moment.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
    }
}

fn progress_label(task: &Task) -> String {
    let progress = task.progress();
    if progress.total == 0 {
        "-".to_string()
    } else {
        format!(
            "{}/{} ({:.0}%)",
            progress.completed,
            progress.total,
            progress.percent()
        )
    }
}

/// Create a table for displaying tasks
pub fn task_table<'a, I>(tasks: I, now: DateTime<Utc>, show_subtasks: bool) -> Table
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Title").fg(Color::Cyan),
        Cell::new("Start").fg(Color::Cyan),
        Cell::new("End").fg(Color::Cyan),
        Cell::new("Hours").fg(Color::Cyan),
        Cell::new("Subtasks").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
    ]);

    for task in tasks {
        let badge = TaskBadge::of(task, now);

        table.add_row(vec![
            Cell::new(&task.id),
            Cell::new(&task.title),
            Cell::new(format_local(&task.start_date_time)),
            Cell::new(format_local(&task.end_date_time)),
            Cell::new(format!("{:.1}", task.estimated_hours)),
            Cell::new(progress_label(task)),
            Cell::new(badge.label()).fg(badge.color()),
        ]);

        if show_subtasks {
            for subtask in &task.subtasks {
                let (label, color) = if subtask.completed {
                    ("done", Color::Green)
                } else {
                    ("open", Color::DarkGrey)
                };
                table.add_row(vec![
                    Cell::new(format!("  {}", subtask.id)).fg(Color::DarkGrey),
                    Cell::new(format!("  └─ {}", subtask.title)).fg(Color::DarkGrey),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new(format!("{:.1}", subtask.estimated_hours)).fg(Color::DarkGrey),
                    Cell::new("-"),
                    Cell::new(label).fg(color),
                ]);
            }
        }
    }

    table
}

/// One-line summary of collection statistics
pub fn stats_line(stats: &TaskStats) -> String {
    format!(
        "{} total  {} completed  {} in progress  {} overdue  ({:.0}% done)",
        stats.total.to_string().bold(),
        stats.completed.to_string().green(),
        stats.in_progress.to_string().yellow(),
        stats.overdue.to_string().red(),
        stats.completion_percent()
    )
}

/// Display task details in a formatted way
pub fn display_task_details(task: &Task, now: DateTime<Utc>) {
    let badge = TaskBadge::of(task, now);

    println!("{}", "═".repeat(60).dimmed());
    println!(
        "{} {} {}",
        "Task".cyan().bold(),
        task.id.cyan().bold(),
        format!("[{}]", badge.label()).yellow()
    );
    println!("{}", "═".repeat(60).dimmed());
    println!();

    println!("{}: {}", "Title".bold(), task.title);
    println!("{}: {}", "Status".bold(), badge_colored(badge));
    println!(
        "{}: {} → {}",
        "Window".bold(),
        format_local(&task.start_date_time),
        format_local(&task.end_date_time)
    );
    println!("{}: {:.1}h", "Estimate".bold(), task.estimated_hours);

    if !task.description.is_empty() {
        println!();
        println!("{}", "Description".bold().underline());
        println!("{}", task.description);
    }

    if !task.subtasks.is_empty() {
        let progress = task.progress();
        println!();
        println!(
            "{} ({}/{}, {:.1}h planned)",
            "Subtasks".bold().underline(),
            progress.completed,
            progress.total,
            progress.hours
        );
        for subtask in &task.subtasks {
            let mark = if subtask.completed {
                "✓".green().to_string()
            } else {
                "•".dimmed().to_string()
            };
            println!(
                "  {} {} - {} ({:.1}h)",
                mark, subtask.id, subtask.title, subtask.estimated_hours
            );
        }
    }

    println!();
}

/// Print success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Print warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}
