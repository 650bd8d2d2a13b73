//! Project management commands.

use clap::Subcommand;
use serde_json::json;
use studyflow_core::{KvStore, SessionStore};

#[derive(Subcommand)]
pub enum ProjectAction {
    /// List projects and the active one
    List,
    /// Register a project (if new) and make it active
    Add {
        /// Project name
        name: String,
    },
    /// Make an existing project active
    Use {
        /// Project name
        name: String,
    },
    /// Delete a project
    Delete {
        /// Project name
        name: String,
        /// Also delete the project's sessions
        #[arg(long)]
        delete_sessions: bool,
    },
}

pub fn run(action: ProjectAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = KvStore::open()?;
    let mut sessions = SessionStore::load(&store);

    match action {
        ProjectAction::List => {
            let projects = sessions.projects();
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "projects": projects.names(),
                    "active": projects.active(),
                }))?
            );
        }
        ProjectAction::Add { name } => {
            if !sessions.add_project(&name) {
                return Err("project name is empty".into());
            }
            sessions.persist(&store)?;
            println!("Active project: {}", sessions.projects().active());
        }
        ProjectAction::Use { name } => {
            sessions.set_active_project(&name)?;
            sessions.persist(&store)?;
            println!("Active project: {}", sessions.projects().active());
        }
        ProjectAction::Delete {
            name,
            delete_sessions,
        } => {
            if !sessions.delete_project(&name, delete_sessions) {
                return Err(format!("unknown project: '{name}'").into());
            }
            sessions.persist(&store)?;
            println!(
                "Project deleted: {name} (sessions {})",
                if delete_sessions { "deleted" } else { "kept" }
            );
        }
    }
    Ok(())
}
