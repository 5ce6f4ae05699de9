use std::time::Duration;

use chrono::Local;
use clap::Subcommand;
use zenflow_core::timer::format_mm_ss;
use zenflow_core::{Clock, Config, Event, SystemClock};

use super::{open_workspace, runtime, CmdResult};

/// How often the foreground loop polls the engines.
const POLL_MS: u64 = 100;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a countdown in the foreground until it completes (Ctrl-C pauses and exits)
    Run {
        /// Countdown length in minutes (defaults to timer.focus_minutes)
        #[arg(long, conflicts_with = "seconds")]
        minutes: Option<u64>,
        /// Countdown length in seconds
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// Print the number of completed pomodoros
    Sessions {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: TimerAction) -> CmdResult {
    let config = Config::load_or_default();
    let mut ws = open_workspace(&config)?;

    match action {
        TimerAction::Run { minutes, seconds } => {
            let custom = seconds.or(minutes.map(|m| m.saturating_mul(60)));
            if custom.is_some() {
                ws.reset_countdown(custom);
            }

            let clock = SystemClock::new();
            ws.start_countdown(clock.now_ms());
            tracing::debug!(secs = ws.countdown().duration_secs(), "countdown running");
            println!("{}", ws.countdown().display());

            runtime()?.block_on(async {
                let mut ticker = tokio::time::interval(Duration::from_millis(POLL_MS));
                let mut shown = ws.countdown().remaining_secs();
                loop {
                    tokio::select! {
                        _ = ticker.tick() => {
                            let mut done = false;
                            for event in ws.advance(clock.now_ms(), Local::now()) {
                                match event {
                                    Event::CountdownCompleted { .. } => done = true,
                                    Event::SessionsUpdated { count, .. } => {
                                        println!("00:00");
                                        println!("sessions: {count}");
                                    }
                                    _ => {}
                                }
                            }
                            if done {
                                break;
                            }
                            let remaining = ws.countdown().remaining_secs();
                            if remaining != shown {
                                shown = remaining;
                                println!("{}", format_mm_ss(remaining));
                            }
                        }
                        _ = tokio::signal::ctrl_c() => {
                            tracing::debug!("interrupted");
                            ws.stop(clock.now_ms());
                            println!("paused at {}", ws.countdown().display());
                            break;
                        }
                    }
                }
            });
        }
        TimerAction::Sessions { json } => {
            if json {
                println!("{}", serde_json::json!({ "sessions": ws.sessions() }));
            } else {
                println!("{}", ws.sessions());
            }
        }
    }
    Ok(())
}
