//! The dashboard as one owned object.
//!
//! `Workspace` holds every engine and every piece of persisted state. It
//! reads storage once in [`Workspace::open`] and writes the affected key
//! after every mutation. Time-driven work happens only inside
//! [`Workspace::advance`], which the host calls with the current engine time
//! and wall-clock time.

mod note;
mod task;
mod theme;

pub use note::{Note, NoteBoard, DEFAULT_NOTE_COLOR};
pub use task::{Priority, Task, TaskList, TaskStatus};
pub use theme::Theme;

use chrono::{DateTime, Local, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::clock::ClockSource;
use crate::error::Result;
use crate::events::Event;
use crate::notify::{LogNotifier, Notification, Notifier};
use crate::quotes::{Quote, QuoteRotation};
use crate::session::SessionCounter;
use crate::storage::{Config, PersistenceBridge};
use crate::timer::{CountdownTimer, PhaseCycle};

pub struct Workspace {
    config: Config,
    bridge: PersistenceBridge,
    notifier: Box<dyn Notifier>,
    rng: StdRng,
    theme: Theme,
    focus_text: String,
    tasks: TaskList,
    notes: NoteBoard,
    sessions: SessionCounter,
    countdown: CountdownTimer,
    breathing: PhaseCycle,
    clock: ClockSource,
    quotes: QuoteRotation,
}

impl Workspace {
    /// Build the workspace from config and whatever the store holds.
    pub fn open(config: Config, bridge: PersistenceBridge, wall: DateTime<Local>) -> Self {
        let snapshot = bridge.load_all();
        let mut rng = StdRng::from_entropy();
        info!(
            theme = %snapshot.theme,
            sessions = snapshot.session_count.count(),
            tasks = snapshot.tasks.len(),
            notes = snapshot.notes.len(),
            "workspace loaded"
        );
        Self {
            countdown: CountdownTimer::new(config.timer.duration_secs()),
            breathing: PhaseCycle::new(config.breathing.dwell(), config.breathing.tick_ms),
            clock: ClockSource::new(wall),
            quotes: QuoteRotation::new(config.quotes.rotation_ms, &mut rng),
            notifier: Box::new(LogNotifier),
            rng,
            theme: snapshot.theme,
            focus_text: snapshot.focus_text,
            tasks: snapshot.tasks,
            notes: snapshot.notes,
            sessions: snapshot.session_count,
            config,
            bridge,
        }
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Register the always-on schedules: clock panel and quote rotation.
    pub fn start(&mut self, now_ms: u64) {
        self.clock.start(now_ms);
        self.quotes.start(now_ms);
    }

    /// Cancel every schedule. Nothing fires after this returns.
    pub fn stop(&mut self, now_ms: u64) -> Vec<Event> {
        let mut events = Vec::new();
        events.extend(self.countdown.pause(now_ms));
        events.extend(self.breathing.end());
        self.clock.stop();
        self.quotes.stop();
        events
    }

    /// Let every due tick fire, in engine order: clock, countdown,
    /// breathing, quotes.
    pub fn advance(&mut self, now_ms: u64, wall: DateTime<Local>) -> Vec<Event> {
        let mut events = Vec::new();

        if self.clock.advance(now_ms, wall) {
            events.push(Event::ClockTick {
                greeting: self.clock.greeting().to_string(),
                time: self.clock.time_line(),
                at: Utc::now(),
            });
        }

        for event in self.countdown.advance(now_ms) {
            let completed = matches!(event, Event::CountdownCompleted { .. });
            events.push(event);
            if completed {
                events.push(self.on_countdown_complete());
            }
        }

        events.extend(self.breathing.advance(now_ms));
        events.extend(self.quotes.advance(now_ms, &mut self.rng));
        events
    }

    fn on_countdown_complete(&mut self) -> Event {
        let count = self.sessions.increment();
        self.bridge.save_sessions(&self.sessions);
        if self.config.notifications.enabled {
            let notification = Notification::pomodoro_complete(self.config.notifications.sound);
            if let Err(e) = self.notifier.notify(&notification) {
                warn!(error = %e, "completion notification failed");
            }
        }
        Event::SessionsUpdated {
            count,
            at: Utc::now(),
        }
    }

    // ── Countdown ────────────────────────────────────────────────────

    pub fn countdown(&self) -> &CountdownTimer {
        &self.countdown
    }

    pub fn start_countdown(&mut self, now_ms: u64) -> Option<Event> {
        self.countdown.start(now_ms)
    }

    pub fn pause_countdown(&mut self, now_ms: u64) -> Option<Event> {
        self.countdown.pause(now_ms)
    }

    /// Reset to `secs`, or to the configured duration when `None`.
    pub fn reset_countdown(&mut self, secs: Option<u64>) -> Event {
        match secs {
            Some(secs) => self.countdown.reset_to(secs),
            None => self.countdown.reset(),
        }
    }

    pub fn sessions(&self) -> u64 {
        self.sessions.count()
    }

    // ── Breathing ────────────────────────────────────────────────────

    pub fn breathing(&self) -> &PhaseCycle {
        &self.breathing
    }

    pub fn begin_breathing(&mut self, now_ms: u64) -> Option<Event> {
        self.breathing.begin(now_ms)
    }

    pub fn end_breathing(&mut self) -> Option<Event> {
        self.breathing.end()
    }

    pub fn toggle_breathing(&mut self, now_ms: u64) -> Option<Event> {
        self.breathing.toggle(now_ms)
    }

    // ── Panels ───────────────────────────────────────────────────────

    pub fn clock(&self) -> &ClockSource {
        &self.clock
    }

    pub fn quote(&self) -> &Quote {
        self.quotes.current()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ── Theme and focus ──────────────────────────────────────────────

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Event {
        self.theme = theme;
        self.bridge.save_theme(theme);
        Event::ThemeChanged {
            theme,
            at: Utc::now(),
        }
    }

    pub fn focus_text(&self) -> &str {
        &self.focus_text
    }

    /// Store the daily focus, trimmed.
    pub fn set_focus(&mut self, text: &str) -> Event {
        self.focus_text = text.trim().to_string();
        self.bridge.save_focus(&self.focus_text);
        Event::FocusChanged {
            text: self.focus_text.clone(),
            at: Utc::now(),
        }
    }

    // ── Tasks ────────────────────────────────────────────────────────

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn add_task(&mut self, title: &str, priority: Priority) -> Result<String> {
        let id = self.tasks.add(title, priority)?;
        self.tasks_changed();
        Ok(id)
    }

    pub fn toggle_task(&mut self, id: &str) -> Result<TaskStatus> {
        let status = self.tasks.toggle_status(id)?;
        self.tasks_changed();
        Ok(status)
    }

    pub fn remove_task(&mut self, id: &str) -> Result<Task> {
        let task = self.tasks.remove(id)?;
        self.tasks_changed();
        Ok(task)
    }

    fn tasks_changed(&self) {
        self.bridge.save_tasks(&self.tasks);
    }

    // ── Notes ────────────────────────────────────────────────────────

    pub fn notes(&self) -> &NoteBoard {
        &self.notes
    }

    pub fn add_note(&mut self, title: &str, content: &str, color: Option<&str>) -> Result<String> {
        let id = self
            .notes
            .add(title, content, color, Utc::now().timestamp_millis())?;
        self.notes_changed();
        Ok(id)
    }

    pub fn delete_note(&mut self, id: &str) -> Result<Note> {
        let note = self.notes.delete(id)?;
        self.notes_changed();
        Ok(note)
    }

    pub fn toggle_note_pin(&mut self, id: &str) -> Result<bool> {
        let pinned = self.notes.toggle_pin(id)?;
        self.notes_changed();
        Ok(pinned)
    }

    fn notes_changed(&self) {
        self.bridge.save_notes(&self.notes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KvStore, MemoryStore};
    use chrono::TimeZone;
    use std::cell::Cell;
    use std::rc::Rc;

    fn wall() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap()
    }

    fn open(store: &MemoryStore, config: Config) -> Workspace {
        Workspace::open(config, PersistenceBridge::new(store.clone()), wall())
    }

    struct FailingNotifier(Rc<Cell<u32>>);

    impl Notifier for FailingNotifier {
        fn notify(&self, _n: &Notification) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.0.set(self.0.get() + 1);
            Err("no audio device".into())
        }
    }

    #[test]
    fn completion_increments_and_persists_sessions() {
        let store = MemoryStore::new();
        let mut config = Config::default();
        config.timer.focus_minutes = 1;
        let mut ws = open(&store, config);
        ws.start_countdown(0);
        let events = ws.advance(60_000, wall());
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::SessionsUpdated { count: 1, .. })));
        assert_eq!(ws.sessions(), 1);
        assert_eq!(
            store.get("zenflow-pomodoro-sessions").unwrap().as_deref(),
            Some("1")
        );
        assert!(!ws.countdown().is_running());
        assert_eq!(ws.countdown().remaining_secs(), 60);
    }

    #[test]
    fn notifier_failure_does_not_disturb_state() {
        let calls = Rc::new(Cell::new(0));
        let store = MemoryStore::new();
        let mut ws = open(&store, Config::default()).with_notifier(FailingNotifier(calls.clone()));
        ws.reset_countdown(Some(2));
        ws.start_countdown(0);
        ws.advance(2000, wall());
        assert_eq!(calls.get(), 1);
        assert_eq!(ws.sessions(), 1);
        assert_eq!(ws.countdown().remaining_secs(), 1500);
    }

    #[test]
    fn disabled_notifications_skip_notifier() {
        let calls = Rc::new(Cell::new(0));
        let mut config = Config::default();
        config.notifications.enabled = false;
        let mut ws = open(&MemoryStore::new(), config).with_notifier(FailingNotifier(calls.clone()));
        ws.reset_countdown(Some(1));
        ws.start_countdown(0);
        ws.advance(1000, wall());
        assert_eq!(calls.get(), 0);
        assert_eq!(ws.sessions(), 1);
    }

    #[test]
    fn mutations_write_their_own_key() {
        let store = MemoryStore::new();
        let mut ws = open(&store, Config::default());
        assert!(store.is_empty());

        ws.set_theme(Theme::Dark);
        assert_eq!(store.get("zenflow-theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(store.len(), 1);

        ws.set_focus("  deep work  ");
        assert_eq!(ws.focus_text(), "deep work");
        assert_eq!(
            store.get("zenflow-daily-focus").unwrap().as_deref(),
            Some("deep work")
        );

        let id = ws.add_task("New", Priority::High).unwrap();
        ws.toggle_task(&id).unwrap();
        let stored: TaskList =
            serde_json::from_str(&store.get("zenflow-tasks").unwrap().unwrap()).unwrap();
        assert_eq!(stored.get(&id).unwrap().status, TaskStatus::InProgress);

        let note = ws.add_note("idea", "", None).unwrap();
        ws.toggle_note_pin(&note).unwrap();
        let stored: NoteBoard =
            serde_json::from_str(&store.get("zenflow-notes").unwrap().unwrap()).unwrap();
        assert!(stored.get(&note).unwrap().pinned);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn failed_mutation_writes_nothing() {
        let store = MemoryStore::new();
        let mut ws = open(&store, Config::default());
        assert!(ws.toggle_task("missing").is_err());
        assert!(ws.delete_note("missing").is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn stop_cancels_every_schedule() {
        let mut ws = open(&MemoryStore::new(), Config::default());
        ws.start(0);
        ws.start_countdown(0);
        ws.begin_breathing(0);
        let events = ws.stop(0);
        assert_eq!(events.len(), 2);
        assert!(ws.advance(3_600_000, wall()).is_empty());
        assert_eq!(ws.countdown().remaining_secs(), 1500);
        assert!(!ws.breathing().has_pending_tick());
    }

    #[test]
    fn clock_and_quotes_tick_after_start() {
        let mut ws = open(&MemoryStore::new(), Config::default());
        ws.start(0);
        let later = Local.with_ymd_and_hms(2026, 10, 16, 17, 30, 0).unwrap();
        let events = ws.advance(120_000, later);
        assert!(events.iter().any(|e| matches!(e, Event::ClockTick { .. })));
        assert!(events.iter().any(|e| matches!(e, Event::QuoteRotated { .. })));
        assert_eq!(ws.clock().greeting(), "Good Evening");
    }
}
