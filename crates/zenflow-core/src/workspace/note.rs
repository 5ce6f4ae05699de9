//! Sticky notes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, Result, ValidationError};

pub const DEFAULT_NOTE_COLOR: &str = "yellow";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub color: String,
    /// Creation time, epoch milliseconds.
    pub timestamp: i64,
    #[serde(default)]
    pub pinned: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteBoard {
    notes: Vec<Note>,
}

impl NoteBoard {
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Pinned notes first, otherwise board order.
    pub fn list(&self) -> Vec<&Note> {
        let (mut pinned, rest): (Vec<&Note>, Vec<&Note>) =
            self.notes.iter().partition(|n| n.pinned);
        pinned.extend(rest);
        pinned
    }

    /// Prepend a note stamped with `timestamp` and return its id.
    pub fn add(&mut self, title: &str, content: &str, color: Option<&str>, timestamp: i64) -> Result<String> {
        let title = title.trim();
        if title.is_empty() && content.trim().is_empty() {
            return Err(ValidationError::Empty("note").into());
        }
        let id = Uuid::new_v4().to_string();
        self.notes.insert(
            0,
            Note {
                id: id.clone(),
                title: title.to_string(),
                content: content.to_string(),
                color: color.unwrap_or(DEFAULT_NOTE_COLOR).to_string(),
                timestamp,
                pinned: false,
            },
        );
        Ok(id)
    }

    pub fn delete(&mut self, id: &str) -> Result<Note> {
        let pos = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| not_found(id))?;
        Ok(self.notes.remove(pos))
    }

    /// Flip the pin and return the new value.
    pub fn toggle_pin(&mut self, id: &str) -> Result<bool> {
        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| not_found(id))?;
        note.pinned = !note.pinned;
        Ok(note.pinned)
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for note in &self.notes {
            if !seen.insert(note.id.as_str()) {
                return Err(ValidationError::InvalidValue {
                    field: "notes".into(),
                    message: format!("duplicate id '{}'", note.id),
                });
            }
        }
        Ok(())
    }
}

fn not_found(id: &str) -> CoreError {
    CoreError::NotFound {
        kind: "note",
        id: id.to_string(),
    }
}
