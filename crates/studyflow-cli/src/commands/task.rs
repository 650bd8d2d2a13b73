//! Task list commands.

use clap::Subcommand;
use studyflow_core::{KvStore, TaskStore};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum TaskAction {
    /// List open tasks
    List,
    /// Add a task
    Add {
        /// Task text
        text: String,
    },
    /// Check a task off (removes it)
    Done {
        /// Task id
        id: Uuid,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = KvStore::open()?;
    let mut tasks = TaskStore::load(&store);

    match action {
        TaskAction::List => {
            println!("{}", serde_json::to_string_pretty(tasks.tasks())?);
        }
        TaskAction::Add { text } => {
            let Some(task) = tasks.add(&text) else {
                return Err("task text is empty".into());
            };
            let task = task.clone();
            tasks.persist(&store)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Done { id } => {
            tasks.complete(id)?;
            tasks.persist(&store)?;
            println!("Task done: {id}");
        }
    }
    Ok(())
}
