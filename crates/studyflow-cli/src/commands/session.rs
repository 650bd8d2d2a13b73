//! Session log commands.

use clap::Subcommand;
use studyflow_core::{Clock, KvStore, SessionStore, SystemClock};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum SessionAction {
    /// List sessions, newest first
    List {
        /// Restrict to one project
        #[arg(long)]
        project: Option<String>,
    },
    /// Add a manual session
    Add {
        /// Duration in minutes (values below 1 clamp up)
        minutes: u32,
        /// Project to attribute it to (defaults to the active project)
        #[arg(long)]
        project: Option<String>,
    },
    /// Edit a session note
    Note {
        /// Session id
        id: Uuid,
        /// New note text (empty clears the note)
        text: String,
    },
    /// Delete a session by id
    Delete {
        /// Session id
        id: Uuid,
    },
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = KvStore::open()?;
    let mut sessions = SessionStore::load(&store);

    match action {
        SessionAction::List { project } => {
            let list = sessions.filtered(project.as_deref());
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
        SessionAction::Add { minutes, project } => {
            let recorded = sessions
                .record_manual(minutes, project.as_deref(), SystemClock.now())?
                .clone();
            sessions.persist(&store)?;
            println!("{}", serde_json::to_string_pretty(&recorded)?);
        }
        SessionAction::Note { id, text } => {
            sessions.set_note(id, &text)?;
            sessions.persist(&store)?;
            if let Some(session) = sessions.get(id) {
                println!("{}", serde_json::to_string_pretty(session)?);
            }
        }
        SessionAction::Delete { id } => {
            sessions.delete(id)?;
            sessions.persist(&store)?;
            println!("Session deleted: {id}");
        }
    }
    Ok(())
}
