//! Persisted keys and the single component that owns each one.

use serde::{Deserialize, Serialize};

/// Component allowed to write a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    Theme,
    DailyFocus,
    NoteBoard,
    TaskList,
    SessionCounter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKey {
    Theme,
    DailyFocus,
    Notes,
    Tasks,
    PomodoroSessions,
}

impl StorageKey {
    pub const ALL: [StorageKey; 5] = [
        StorageKey::Theme,
        StorageKey::DailyFocus,
        StorageKey::Notes,
        StorageKey::Tasks,
        StorageKey::PomodoroSessions,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::Theme => "zenflow-theme",
            StorageKey::DailyFocus => "zenflow-daily-focus",
            StorageKey::Notes => "zenflow-notes",
            StorageKey::Tasks => "zenflow-tasks",
            StorageKey::PomodoroSessions => "zenflow-pomodoro-sessions",
        }
    }

    pub fn owner(self) -> Owner {
        match self {
            StorageKey::Theme => Owner::Theme,
            StorageKey::DailyFocus => Owner::DailyFocus,
            StorageKey::Notes => Owner::NoteBoard,
            StorageKey::Tasks => Owner::TaskList,
            StorageKey::PomodoroSessions => Owner::SessionCounter,
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
