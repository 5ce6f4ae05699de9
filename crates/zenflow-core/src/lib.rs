//! # Zenflow Core Library
//!
//! Business logic behind the Zenflow Workspace dashboard: a pomodoro
//! countdown, a breathing-phase cycle, the completed-session counter, the
//! task list and sticky notes, and the quote panel. The `zenflow` CLI is a
//! thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Engines**: owned state machines with explicit `start`/`stop`
//!   lifecycles. They never spawn threads or timers of their own; each holds
//!   an [`Interval`] and the host advances them with the current time.
//! - **Clock**: injected through the [`Clock`] trait so tests drive the
//!   engines with a [`ManualClock`].
//! - **Storage**: a key-value [`KvStore`] (SQLite on disk, in-memory for
//!   tests) behind the [`PersistenceBridge`], plus TOML [`Config`].
//! - **Quotes**: one best-effort HTTP fetch with a local fallback list.
//!
//! ## Key Components
//!
//! - [`Workspace`]: owns every engine and routes changes to storage
//! - [`CountdownTimer`]: pomodoro countdown
//! - [`PhaseCycle`]: inhale / hold / exhale sequencer
//! - [`SessionCounter`]: completed pomodoros

pub mod clock;
pub mod error;
pub mod events;
pub mod notify;
pub mod quotes;
pub mod session;
pub mod storage;
pub mod timer;
pub mod workspace;

pub use clock::{Clock, ClockSource, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use notify::{LogNotifier, Notification, Notifier};
pub use quotes::{Quote, QuoteRotation, QuoteSource, QuotableClient};
pub use session::SessionCounter;
pub use storage::{Config, KvStore, MemoryStore, PersistenceBridge, Snapshot, SqliteStore, StorageKey};
pub use timer::{BreathPhase, CountdownTimer, Interval, PhaseCycle, PhaseDwell};
pub use workspace::{Note, NoteBoard, Priority, Task, TaskList, TaskStatus, Theme, Workspace};
