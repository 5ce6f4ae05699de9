pub mod breathe;
pub mod config;
pub mod dashboard;
pub mod focus;
pub mod note;
pub mod quote;
pub mod task;
pub mod theme;
pub mod timer;

use std::io::Write;

use chrono::Local;
use zenflow_core::{Config, Notification, Notifier, PersistenceBridge, SqliteStore, Workspace};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Terminal notifier: message on stderr, BEL when sound is on.
pub struct BellNotifier;

impl Notifier for BellNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut err = std::io::stderr().lock();
        if notification.sound {
            err.write_all(b"\x07")?;
        }
        writeln!(err, "{}", notification.body)?;
        err.flush()?;
        Ok(())
    }
}

/// Open the on-disk workspace with the current config.
pub fn open_workspace(config: &Config) -> Result<Workspace, Box<dyn std::error::Error>> {
    let store = SqliteStore::open_default()?;
    Ok(Workspace::open(config.clone(), PersistenceBridge::new(store), Local::now()).with_notifier(BellNotifier))
}

/// Single-threaded runtime for the foreground loops and the quote fetch.
pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}
