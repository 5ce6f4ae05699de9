//! Best-effort user notifications.
//!
//! Delivery is never guaranteed. The workspace calls `notify` after state
//! has already been updated and only logs a failure.

use serde::{Deserialize, Serialize};

pub const POMODORO_COMPLETE: &str = "Pomodoro session complete! Time for a break.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    /// Play an audible cue alongside the message.
    pub sound: bool,
}

impl Notification {
    pub fn pomodoro_complete(sound: bool) -> Self {
        Self {
            title: "Zenflow".into(),
            body: POMODORO_COMPLETE.into(),
            sound,
        }
    }
}

pub trait Notifier {
    fn notify(&self, notification: &Notification) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Writes notifications to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!(title = %notification.title, sound = notification.sound, "{}", notification.body);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_message() {
        let n = Notification::pomodoro_complete(false);
        assert_eq!(n.body, POMODORO_COMPLETE);
        assert!(!n.sound);
        assert!(LogNotifier.notify(&n).is_ok());
    }
}
