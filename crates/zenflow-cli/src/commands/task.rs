use clap::Subcommand;
use zenflow_core::{Config, Priority, Task};

use super::{open_workspace, CmdResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to the top of the list
    Add {
        title: String,
        /// high, medium or low
        #[arg(long, default_value = "medium")]
        priority: Priority,
    },
    /// List tasks
    List {
        #[arg(long)]
        json: bool,
    },
    /// Advance status: todo -> in-progress -> completed -> todo
    Toggle { id: String },
    /// Delete a task
    Remove { id: String },
}

fn print_task(task: &Task) {
    let tags = task.tags.iter().cloned().collect::<Vec<_>>().join(", ");
    println!(
        "{}  [{}] {:?}  {}%  {}{}",
        task.id,
        task.status.label(),
        task.priority,
        task.progress,
        task.title,
        if tags.is_empty() { String::new() } else { format!("  ({tags})") }
    );
}

pub fn run(action: TaskAction) -> CmdResult {
    let config = Config::load_or_default();
    let mut ws = open_workspace(&config)?;

    match action {
        TaskAction::Add { title, priority } => {
            let id = ws.add_task(&title, priority)?;
            println!("Task created: {id}");
        }
        TaskAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(ws.tasks())?);
            } else {
                for task in ws.tasks().tasks() {
                    print_task(task);
                }
                println!("{} active", ws.tasks().active_count());
            }
        }
        TaskAction::Toggle { id } => {
            let status = ws.toggle_task(&id)?;
            println!("{id}: {}", status.label());
        }
        TaskAction::Remove { id } => {
            let task = ws.remove_task(&id)?;
            println!("Removed: {}", task.title);
        }
    }
    Ok(())
}
