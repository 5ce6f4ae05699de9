//! Read-once, write-on-change synchronization between workspace state and
//! the key-value store.
//!
//! Loading never fails. A missing key gives its default; a value that does
//! not parse or validate gives its default plus a warning. Saving is
//! fire-and-forget: each key is written on its own and write errors are
//! logged, not returned.

use serde::Serialize;
use tracing::{debug, warn};

use super::database::KvStore;
use super::keys::StorageKey;
use crate::session::SessionCounter;
use crate::workspace::{NoteBoard, TaskList, Theme};

/// Everything the dashboard restores at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub theme: Theme,
    pub focus_text: String,
    pub notes: NoteBoard,
    pub tasks: TaskList,
    pub session_count: SessionCounter,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            focus_text: String::new(),
            notes: NoteBoard::default(),
            tasks: TaskList::sample(),
            session_count: SessionCounter::default(),
        }
    }
}

pub struct PersistenceBridge {
    store: Box<dyn KvStore>,
}

impl PersistenceBridge {
    pub fn new(store: impl KvStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    pub fn load_all(&self) -> Snapshot {
        let defaults = Snapshot::default();
        Snapshot {
            theme: self
                .read(StorageKey::Theme)
                .and_then(|raw| parse_or_warn(StorageKey::Theme, raw.parse().ok()))
                .unwrap_or(defaults.theme),
            focus_text: self.read(StorageKey::DailyFocus).unwrap_or(defaults.focus_text),
            notes: self
                .read(StorageKey::Notes)
                .and_then(|raw| {
                    let notes = serde_json::from_str::<NoteBoard>(&raw)
                        .ok()
                        .filter(|n| n.validate().is_ok());
                    parse_or_warn(StorageKey::Notes, notes)
                })
                .unwrap_or(defaults.notes),
            tasks: self
                .read(StorageKey::Tasks)
                .and_then(|raw| {
                    let tasks = serde_json::from_str::<TaskList>(&raw)
                        .ok()
                        .filter(|t| t.validate().is_ok());
                    parse_or_warn(StorageKey::Tasks, tasks)
                })
                .unwrap_or(defaults.tasks),
            session_count: self
                .read(StorageKey::PomodoroSessions)
                .and_then(|raw| {
                    let count = raw.trim().parse::<i64>().ok().map(SessionCounter::load);
                    parse_or_warn(StorageKey::PomodoroSessions, count)
                })
                .unwrap_or(defaults.session_count),
        }
    }

    pub fn save_theme(&self, theme: Theme) {
        self.save(StorageKey::Theme, theme.as_str());
    }

    pub fn save_focus(&self, text: &str) {
        self.save(StorageKey::DailyFocus, text);
    }

    pub fn save_notes(&self, notes: &NoteBoard) {
        self.save_json(StorageKey::Notes, notes);
    }

    pub fn save_tasks(&self, tasks: &TaskList) {
        self.save_json(StorageKey::Tasks, tasks);
    }

    pub fn save_sessions(&self, counter: &SessionCounter) {
        self.save(StorageKey::PomodoroSessions, &counter.count().to_string());
    }

    /// Write one key. Failures are logged and dropped.
    pub fn save(&self, key: StorageKey, value: &str) {
        match self.store.set(key.as_str(), value) {
            Ok(()) => debug!(%key, "saved"),
            Err(e) => warn!(%key, error = %e, "failed to persist value"),
        }
    }

    fn save_json<T: Serialize>(&self, key: StorageKey, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.save(key, &json),
            Err(e) => warn!(%key, error = %e, "failed to encode value"),
        }
    }

    fn read(&self, key: StorageKey) -> Option<String> {
        match self.store.get(key.as_str()) {
            Ok(value) => value,
            Err(e) => {
                warn!(%key, error = %e, "failed to read value, using default");
                None
            }
        }
    }
}

fn parse_or_warn<T>(key: StorageKey, parsed: Option<T>) -> Option<T> {
    if parsed.is_none() {
        warn!(%key, "stored value is malformed, using default");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::MemoryStore;
    use crate::workspace::Priority;

    struct BrokenStore;

    impl KvStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Locked)
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Locked)
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Locked)
        }
    }

    #[test]
    fn empty_store_loads_defaults() {
        let bridge = PersistenceBridge::new(MemoryStore::new());
        let snap = bridge.load_all();
        assert_eq!(snap.theme, Theme::Light);
        assert_eq!(snap.focus_text, "");
        assert!(snap.notes.is_empty());
        assert_eq!(snap.tasks, TaskList::sample());
        assert_eq!(snap.session_count.count(), 0);
    }

    #[test]
    fn round_trip_through_fresh_bridge() {
        let store = MemoryStore::new();
        let bridge = PersistenceBridge::new(store.clone());
        bridge.save_theme(Theme::Zen);
        bridge.save_notes(&NoteBoard::default());
        bridge.save_focus("ship it");
        let mut tasks = TaskList::default();
        tasks.add("only", Priority::High).unwrap();
        bridge.save_tasks(&tasks);
        bridge.save_sessions(&SessionCounter::load(7));

        let snap = PersistenceBridge::new(store).load_all();
        assert_eq!(snap.theme, Theme::Zen);
        assert!(snap.notes.is_empty());
        assert_eq!(snap.focus_text, "ship it");
        assert_eq!(snap.tasks, tasks);
        assert_eq!(snap.session_count.count(), 7);
    }

    #[test]
    fn malformed_values_fall_back() {
        let store = MemoryStore::new();
        store.set("zenflow-theme", "neon").unwrap();
        store.set("zenflow-notes", "{not json").unwrap();
        store.set("zenflow-tasks", r#"[{"id":"1"}]"#).unwrap();
        store.set("zenflow-pomodoro-sessions", "many").unwrap();

        let snap = PersistenceBridge::new(store).load_all();
        assert_eq!(snap, Snapshot::default());
    }

    #[test]
    fn negative_session_count_clamps() {
        let store = MemoryStore::new();
        store.set("zenflow-pomodoro-sessions", "-3").unwrap();
        let snap = PersistenceBridge::new(store).load_all();
        assert_eq!(snap.session_count.count(), 0);
    }

    #[test]
    fn unreadable_store_degrades_to_defaults() {
        let bridge = PersistenceBridge::new(BrokenStore);
        assert_eq!(bridge.load_all(), Snapshot::default());
        bridge.save_theme(Theme::Dark);
    }
}
