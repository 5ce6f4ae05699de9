mod bridge;
mod config;
pub mod database;
mod keys;

pub use bridge::{PersistenceBridge, Snapshot};
pub use config::{BreathingConfig, Config, NotificationsConfig, QuotesConfig, TimerConfig};
pub use database::{KvStore, MemoryStore, SqliteStore};
pub use keys::{Owner, StorageKey};

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `ZENFLOW_DATA_DIR` wins when set. Otherwise `~/.config/zenflow`, or
/// `~/.config/zenflow-dev` with `ZENFLOW_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("ZENFLOW_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("ZENFLOW_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("zenflow-dev")
            } else {
                base_dir.join("zenflow")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
