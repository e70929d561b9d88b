use crate::domain::{
    deadline_for, deadline_for_tag, filter_history, format_deadline, HistorySort, Quadrant, SundayPolicy, Task, TaskDraft,
};
use crate::images::ImageValidator;
use crate::store::TaskStore;
use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Subcommand;
use std::io::Write;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Initialize a local .taskitto directory in the current directory
    Init,
    /// Add a task
    Add {
        title: String,
        /// immediate, today, week or month
        #[arg(short, long, default_value = "today")]
        quadrant: Quadrant,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Image URL, kept only if it loads
        #[arg(long)]
        image: Option<String>,
    },
    /// List active tasks by quadrant
    List,
    /// Complete a task (id or unique id prefix)
    Done { id: String },
    /// Delete a task (id or unique id prefix)
    Rm { id: String },
    /// Move a task to another quadrant
    Mv { id: String, quadrant: Quadrant },
    /// Show completed tasks
    History {
        #[arg(short, long)]
        search: Option<String>,
        /// date or title
        #[arg(long, default_value = "date", value_parser = parse_sort)]
        sort: HistorySort,
    },
    /// Delete every completed task
    ClearHistory,
    /// Print quadrant deadlines (all quadrants, or one tag)
    Due { tag: Option<String> },
}

fn parse_sort(s: &str) -> Result<HistorySort, String> {
    HistorySort::from_label(s).ok_or_else(|| format!("unknown sort '{}' (expected date or title)", s))
}

/// Find the one task whose id starts with `prefix`
pub fn resolve_id(store: &TaskStore, prefix: &str) -> Result<String> {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        bail!("Task id must not be empty");
    }
    if let Some(task) = store.get(prefix) {
        return Ok(task.id.clone());
    }
    let matches = store.find_by_prefix(prefix);
    match matches.as_slice() {
        [] => bail!("No task matches '{}'", prefix),
        [task] => Ok(task.id.clone()),
        _ => bail!("'{}' matches {} tasks, use a longer prefix", prefix, matches.len()),
    }
}

fn task_line(task: &Task) -> String {
    let mut line = format!("  {}  {}", task.short_id(), task.title);
    if !task.links.is_empty() {
        line.push_str(&format!("  ({} link{})", task.links.len(), if task.links.len() == 1 { "" } else { "s" }));
    }
    line
}

/// Run one subcommand against the store, writing results to `out`
pub fn execute(
    command: Commands,
    store: &mut TaskStore,
    images: &dyn ImageValidator,
    policy: SundayPolicy,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Commands::Init => bail!("init is handled before the store is opened"),
        Commands::Add {
            title,
            quadrant,
            description,
            image,
        } => {
            let image = image.filter(|url| {
                let ok = images.is_loadable(url);
                if !ok {
                    tracing::info!(url = %url, "image did not load, dropping it");
                }
                ok
            });
            let draft = TaskDraft::new(&title, &description, image, quadrant)?;
            let task = store.create(draft).context("Failed to add task")?;
            writeln!(out, "Added {} to {}: {}", task.short_id(), quadrant.title(), task.title)?;
        }
        Commands::List => {
            let now = Local::now();
            for &quadrant in Quadrant::all() {
                let tasks = store.in_quadrant(quadrant);
                writeln!(
                    out,
                    "{} {} ({})  due {}",
                    quadrant.symbol(),
                    quadrant.title(),
                    tasks.len(),
                    format_deadline(&deadline_for(quadrant, &now, policy))
                )?;
                for task in tasks {
                    writeln!(out, "{}", task_line(task))?;
                }
            }
        }
        Commands::Done { id } => {
            let id = resolve_id(store, &id)?;
            if store.complete(&id, Local::now()).context("Failed to complete task")? {
                writeln!(out, "Completed {}", &id[..id.len().min(8)])?;
            } else {
                bail!("Task {} is already completed", id);
            }
        }
        Commands::Rm { id } => {
            let id = resolve_id(store, &id)?;
            store.delete(&id).context("Failed to delete task")?;
            writeln!(out, "Deleted {}", &id[..id.len().min(8)])?;
        }
        Commands::Mv { id, quadrant } => {
            let id = resolve_id(store, &id)?;
            if store.get(&id).map(|t| t.completed).unwrap_or(false) {
                bail!("Completed tasks cannot be moved");
            }
            store.move_to(&id, quadrant).context("Failed to move task")?;
            writeln!(out, "Moved {} to {}", &id[..id.len().min(8)], quadrant.title())?;
        }
        Commands::History { search, sort } => {
            let search = search.unwrap_or_default();
            let tasks = filter_history(store.completed(), &search, sort);
            if tasks.is_empty() {
                writeln!(out, "No completed tasks")?;
            }
            for task in tasks {
                writeln!(
                    out,
                    "  {}  {}  {}",
                    task.short_id(),
                    task.history_date().format("%Y-%m-%d %H:%M"),
                    task.title
                )?;
            }
        }
        Commands::ClearHistory => {
            let removed = store.clear_history().context("Failed to clear history")?;
            writeln!(out, "Removed {} completed tasks", removed)?;
        }
        Commands::Due { tag } => {
            let now = Local::now();
            match tag {
                Some(tag) => {
                    let deadline = deadline_for_tag(tag.trim(), &now, policy);
                    writeln!(out, "{}  {}", tag.trim(), format_deadline(&deadline))?;
                }
                None => {
                    for &quadrant in Quadrant::all() {
                        let deadline = deadline_for(quadrant, &now, policy);
                        writeln!(out, "{:<10} {}", quadrant.to_tag(), format_deadline(&deadline))?;
                    }
                }
            }
        }
    }
    Ok(())
}
