//! Habit tracking commands.

use chrono::NaiveDate;
use clap::Subcommand;
use serde_json::json;
use studyflow_core::{Clock, HabitStore, KvStore, SystemClock};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum HabitAction {
    /// List habits
    List,
    /// Create a habit
    Add {
        /// Habit name
        name: String,
    },
    /// Rename a habit
    Rename {
        /// Habit id
        id: Uuid,
        /// New name
        name: String,
    },
    /// Toggle a day's completion
    Toggle {
        /// Habit id
        id: Uuid,
        /// Day to toggle (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete a habit
    Delete {
        /// Habit id
        id: Uuid,
    },
    /// Current streak and the last-30-days chain
    Streak {
        /// Habit id
        id: Uuid,
    },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = KvStore::open()?;
    let mut habits = HabitStore::load(&store);
    let today = SystemClock.now().date_naive();

    match action {
        HabitAction::List => {
            println!("{}", serde_json::to_string_pretty(habits.habits())?);
        }
        HabitAction::Add { name } => {
            let Some(habit) = habits.add(&name) else {
                return Err("habit name is empty".into());
            };
            let habit = habit.clone();
            habits.persist(&store)?;
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::Rename { id, name } => {
            habits.rename(id, &name)?;
            habits.persist(&store)?;
            println!("Habit renamed: {id}");
        }
        HabitAction::Toggle { id, date } => {
            let day = date.unwrap_or(today);
            let checked = habits.toggle(id, day)?;
            habits.persist(&store)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "id": id,
                    "day": day,
                    "checked": checked,
                }))?
            );
        }
        HabitAction::Delete { id } => {
            habits.delete(id)?;
            habits.persist(&store)?;
            println!("Habit deleted: {id}");
        }
        HabitAction::Streak { id } => {
            let Some(habit) = habits.get(id) else {
                return Err(format!("no habit with id {id}").into());
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "id": habit.id,
                    "name": habit.name,
                    "streak": habit.current_streak(today),
                    "chain": habit.chain(today, 30),
                }))?
            );
        }
    }
    Ok(())
}
