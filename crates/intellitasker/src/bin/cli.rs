//! IntelliTasker CLI - filtered, sorted views over your task list.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::disallowed_macros)]
#![allow(clippy::uninlined_format_args)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use intellitasker::domain::{read_snapshot, ConfigDomain, TasksDomain, ViewComposer};
use intellitasker::engine::{sort_tasks_with, task_stats, tasks_on_day, TitleCollation};
use intellitasker::entities::{
    AppConfig, FilterCategory, SortKey, SubtaskDraft, Task, TaskDraft, ViewState,
};
use intellitasker::errors::TasksError;
use intellitasker::moment::try_parse_moment;
use intellitasker::{ui, HttpTaskApi};

#[derive(Parser)]
#[command(name = "intellitasker")]
#[command(about = "Filtered, sorted views over your task list", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root directory (holds .intellitasker/config.json)
    #[arg(long, global = true)]
    project: Option<PathBuf>,

    /// Backend base URL, overrides the configured one
    #[arg(long, global = true, env = "INTELLITASKER_API_URL")]
    api_url: Option<String>,

    /// Read tasks from a JSON snapshot instead of the backend
    #[arg(long, global = true)]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List tasks in the current view
    List {
        /// Category (all, completed, in-progress, overdue, today)
        #[arg(short, long)]
        filter: Option<String>,

        /// Order (recent, oldest, due-date, title, progress, duration)
        #[arg(short, long)]
        sort: Option<String>,

        /// Case-insensitive text to look for in titles and descriptions
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Include subtasks
        #[arg(long)]
        with_subtasks: bool,

        /// Let the backend pre-filter too (statistics then cover only what it returns)
        #[arg(long)]
        server_query: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show totals for the whole task list
    Stats {
        /// Print JSON instead of a summary line
        #[arg(long)]
        json: bool,
    },

    /// Show details of a specific task
    Show {
        /// Task ID
        id: String,
    },

    /// List tasks whose window covers a calendar day
    Day {
        /// Day as YYYY-MM-DD, defaults to today
        date: Option<String>,
    },

    /// Add a new task
    Add {
        /// Task title
        #[arg(short, long)]
        title: String,

        /// Task description
        #[arg(short, long)]
        description: Option<String>,

        /// Start, e.g. 2025-01-10T09:00 (local time) or RFC 3339
        #[arg(long)]
        start: String,

        /// End, same formats as --start
        #[arg(long)]
        end: String,

        /// Estimated hours
        #[arg(long)]
        hours: f64,

        /// Subtask as TITLE:HOURS, may be repeated
        #[arg(long = "subtask", value_name = "TITLE:HOURS")]
        subtasks: Vec<String>,
    },

    /// Flip completion of a task or one of its subtasks
    Toggle {
        /// Task ID
        id: String,

        /// Subtask ID
        #[arg(long)]
        subtask: Option<String>,
    },

    /// Remove a task
    Remove {
        /// Task ID
        id: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Set a configuration value
    Set {
        /// Dotted key, e.g. view.defaultSort
        key: String,

        /// New value
        value: String,
    },
}

/// Everything a command needs besides its own arguments
struct Session {
    config_domain: ConfigDomain,
    config: AppConfig,
    api_url: Option<String>,
    file: Option<PathBuf>,
    collation: TitleCollation,
}

impl Session {
    fn tasks_domain(&self) -> anyhow::Result<TasksDomain> {
        if self.file.is_some() {
            bail!("snapshot files are read-only; drop --file to change tasks");
        }
        let mut api_config = self.config.api.clone();
        if let Some(url) = &self.api_url {
            api_config.base_url.clone_from(url);
        }
        let api = HttpTaskApi::from_config(&api_config)?;
        tracing::debug!(base_url = api.base_url(), "using HTTP backend");
        Ok(TasksDomain::new(Arc::new(api)).with_page_limit(self.config.view.page_limit))
    }

    /// Load tasks from the snapshot file or the backend
    async fn load(&self, state: Option<&ViewState>) -> anyhow::Result<Vec<Task>> {
        if let Some(path) = &self.file {
            return read_snapshot(path)
                .await
                .with_context(|| format!("reading snapshot {}", path.display()));
        }

        let domain = self.tasks_domain()?;
        let pb = spinner("Loading tasks...");
        let result = match state {
            Some(state) => domain.load(state).await,
            None => domain.load_all().await,
        };
        pb.finish_and_clear();
        Ok(result?)
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn get_project_path(project: Option<PathBuf>) -> PathBuf {
    project.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn parse_when(value: &str) -> Result<DateTime<Utc>, TasksError> {
    try_parse_moment(value).ok_or_else(|| TasksError::InvalidTimestamp {
        value: value.to_string(),
    })
}

fn parse_subtask(spec: &str) -> Result<SubtaskDraft, TasksError> {
    let (title, hours) = spec
        .rsplit_once(':')
        .ok_or_else(|| TasksError::InvalidArgument {
            reason: format!("subtask '{spec}' should look like TITLE:HOURS"),
        })?;
    let hours: f64 = hours.trim().parse().map_err(|_| TasksError::InvalidArgument {
        reason: format!("subtask '{spec}' has non-numeric hours"),
    })?;
    Ok(SubtaskDraft::new(title.trim(), hours))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let project_path = get_project_path(cli.project.clone());
    let config_domain = ConfigDomain::new(&project_path);

    let (config, config_error) = match config_domain.load().await {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    init_tracing(&config.global.log_level);
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "using default configuration");
    }

    let collation = TitleCollation::new_or_default(&config.view.collation_locale);
    let ctx = Session {
        config_domain,
        config,
        api_url: cli.api_url,
        file: cli.file,
        collation,
    };

    if let Err(e) = run(cli.command, ctx).await {
        ui::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run(command: Commands, ctx: Session) -> anyhow::Result<()> {
    let now = Utc::now();

    match command {
        Commands::List {
            filter,
            sort,
            search,
            with_subtasks,
            server_query,
            json,
        } => {
            let category = filter
                .as_deref()
                .map(str::parse::<FilterCategory>)
                .transpose()?
                .unwrap_or(ctx.config.view.default_filter);
            let sort = sort
                .as_deref()
                .map(str::parse::<SortKey>)
                .transpose()?
                .unwrap_or(ctx.config.view.default_sort);
            let state = ViewState::new(category, search.unwrap_or_default(), sort);

            let tasks = ctx.load(server_query.then_some(&state)).await?;
            let mut composer = ViewComposer::new(tasks)
                .with_collation(ctx.collation)
                .with_state(state);
            let stats = composer.stats(now);
            let view = composer.view(now);

            if json {
                println!("{}", serde_json::to_string_pretty(view)?);
                return Ok(());
            }

            println!(
                "{} {} {}",
                "View:".bold(),
                category.to_string().cyan(),
                format!("sorted by {sort}").dimmed()
            );
            if view.is_empty() {
                ui::print_info("No tasks match this view");
            } else {
                println!("{}", ui::task_table(view, now, with_subtasks));
            }
            println!();
            println!("{}", ui::stats_line(&stats));
        }

        Commands::Stats { json } => {
            let tasks = ctx.load(None).await?;
            let stats = task_stats(&tasks, now);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("{}", ui::stats_line(&stats));
            }
        }

        Commands::Show { id } => {
            let task = if ctx.file.is_some() {
                ctx.load(None)
                    .await?
                    .into_iter()
                    .find(|t| t.id == id)
                    .ok_or(TasksError::TaskNotFound { task_id: id })?
            } else {
                ctx.tasks_domain()?.get(&id).await?
            };
            ui::display_task_details(&task, now);
        }

        Commands::Day { date } => {
            let day = match date {
                Some(date) => NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
                    .map_err(|_| TasksError::InvalidTimestamp { value: date })?,
                None => Local::now().date_naive(),
            };
            let tasks = ctx.load(None).await?;
            let on_day = sort_tasks_with(
                tasks_on_day(&tasks, day, &Local),
                SortKey::Oldest,
                &ctx.collation,
            );

            println!("{} {}", "Day:".bold(), day.to_string().cyan());
            if on_day.is_empty() {
                ui::print_info("Nothing planned");
            } else {
                println!("{}", ui::task_table(on_day, now, false));
            }
        }

        Commands::Add {
            title,
            description,
            start,
            end,
            hours,
            subtasks,
        } => {
            let mut draft = TaskDraft::new(title, parse_when(&start)?, parse_when(&end)?, hours);
            if let Some(description) = description {
                draft = draft.with_description(description);
            }
            for spec in &subtasks {
                draft = draft.with_subtask(parse_subtask(spec)?);
            }

            let domain = ctx.tasks_domain()?;
            let pb = spinner("Creating task...");
            let created = domain.create(&draft).await;
            pb.finish_and_clear();
            let task = created?;
            ui::print_success(&format!("Created task {}: {}", task.id, task.title));
        }

        Commands::Toggle { id, subtask } => {
            let domain = ctx.tasks_domain()?;
            let task = match subtask.as_deref() {
                Some(subtask_id) => domain.toggle_subtask(&id, subtask_id).await?,
                None => domain.toggle_complete(&id).await?,
            };
            let state = if task.is_complete() { "complete" } else { "open" };
            ui::print_success(&format!("Task {} is now {}", task.id, state));
        }

        Commands::Remove { id, yes } => {
            let domain = ctx.tasks_domain()?;
            if !yes {
                let proceed = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(format!("Delete task {id}?"))
                    .default(false)
                    .interact()?;
                if !proceed {
                    ui::print_warning("Cancelled");
                    return Ok(());
                }
            }
            domain.remove(&id).await?;
            ui::print_success(&format!("Removed task {id}"));
        }

        Commands::Config(ConfigCommands::Show) => {
            println!("{}", ctx.config_domain.path().display().to_string().dimmed());
            println!("{}", serde_json::to_string_pretty(&ctx.config)?);
        }

        Commands::Config(ConfigCommands::Set { key, value }) => {
            ctx.config_domain.set(&key, &value).await?;
            ui::print_success(&format!("Set {key} = {value}"));
        }
    }

    Ok(())
}
