use clap::Subcommand;
use colored::Colorize;

use super::Session;

#[derive(Subcommand)]
pub enum NoteCommand {
    /// Add a note
    Add {
        /// Note text
        text: Vec<String>,
    },
    /// List notes, newest first
    List,
    /// Remove every note
    Clear,
}

pub fn run(session: &Session, cmd: NoteCommand) -> Result<(), String> {
    let table = session.open()?;

    match cmd {
        NoteCommand::Add { text } => {
            table
                .add_gm_message(&text.join(" "))
                .map_err(|e| e.to_string())?;
            println!("  Note saved.");
        }
        NoteCommand::List => {
            let notes = table.gm_messages();
            if notes.is_empty() {
                println!("  No notes.");
            }
            for note in notes {
                let time = note.timestamp.format("%Y-%m-%d %H:%M").to_string().dimmed();
                println!("  {time} {}", note.text);
            }
        }
        NoteCommand::Clear => {
            table.clear_gm_messages().map_err(|e| e.to_string())?;
            println!("  Notes cleared.");
        }
    }

    Ok(())
}
