use chrono::{TimeZone, Utc};
use clap::Subcommand;
use zenflow_core::Config;

use super::{open_workspace, CmdResult};

#[derive(Subcommand)]
pub enum NoteAction {
    /// Add a sticky note
    Add {
        title: String,
        #[arg(long, default_value = "")]
        content: String,
        #[arg(long)]
        color: Option<String>,
    },
    /// List notes, pinned first
    List {
        #[arg(long)]
        json: bool,
    },
    /// Delete a note
    Delete { id: String },
    /// Pin or unpin a note
    Pin { id: String },
}

pub fn run(action: NoteAction) -> CmdResult {
    let config = Config::load_or_default();
    let mut ws = open_workspace(&config)?;

    match action {
        NoteAction::Add {
            title,
            content,
            color,
        } => {
            let id = ws.add_note(&title, &content, color.as_deref())?;
            println!("Note created: {id}");
        }
        NoteAction::List { json } => {
            let notes = ws.notes().list();
            if json {
                println!("{}", serde_json::to_string_pretty(&notes)?);
            } else if notes.is_empty() {
                println!("No notes yet");
            } else {
                for note in notes {
                    let when = Utc
                        .timestamp_millis_opt(note.timestamp)
                        .single()
                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_default();
                    let pin = if note.pinned { "*" } else { " " };
                    println!("{pin} {}  [{}] {}  {when}", note.id, note.color, note.title);
                    if !note.content.is_empty() {
                        println!("    {}", note.content);
                    }
                }
            }
        }
        NoteAction::Delete { id } => {
            let note = ws.delete_note(&id)?;
            println!("Deleted: {}", note.title);
        }
        NoteAction::Pin { id } => {
            let pinned = ws.toggle_note_pin(&id)?;
            println!("{id}: {}", if pinned { "pinned" } else { "unpinned" });
        }
    }
    Ok(())
}
