//! Backup export/import commands.

use std::path::PathBuf;

use clap::Subcommand;
use studyflow_core::{backup, Clock, KvStore, SystemClock};

#[derive(Subcommand)]
pub enum BackupAction {
    /// Export all persisted state as one JSON document
    Export {
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Overwrite persisted state from a backup file
    Import {
        /// Backup file
        file: PathBuf,
        /// Apply the overwrite; without this flag the command only shows
        /// what would be replaced
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: BackupAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = KvStore::open()?;

    match action {
        BackupAction::Export { output } => {
            let doc = backup::export(&store, SystemClock.now())?;
            let json = serde_json::to_string_pretty(&doc)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Backup written: {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        BackupAction::Import { file, yes } => {
            let text = std::fs::read_to_string(&file)?;
            let doc: serde_json::Value = serde_json::from_str(&text)
                .map_err(|e| format!("backup file is not valid JSON: {e}"))?;
            backup::validate(&doc)?;

            if !yes {
                let keys: Vec<&String> = doc
                    .get("data")
                    .and_then(|d| d.as_object())
                    .map(|d| d.keys().collect())
                    .unwrap_or_default();
                println!("Import would overwrite: {keys:?}");
                println!("Re-run with --yes to apply.");
                return Ok(());
            }

            let applied = backup::import(&store, &doc)?;
            println!("Import complete, keys applied: {applied:?}");
        }
    }
    Ok(())
}
