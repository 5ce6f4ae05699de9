use std::time::Duration;

use clap::Args;
use zenflow_core::storage::BreathingConfig;
use zenflow_core::{Clock, Config, Event, PhaseCycle, SystemClock};

use super::{runtime, CmdResult};

#[derive(Args)]
pub struct BreatheArgs {
    /// Full inhale/hold/exhale cycles to run
    #[arg(long, default_value_t = 3)]
    pub cycles: u32,
    /// Override every phase's dwell time (ms)
    #[arg(long)]
    pub dwell_ms: Option<u64>,
}

fn cycle_for(config: &BreathingConfig, dwell_override: Option<u64>) -> PhaseCycle {
    let mut dwell = config.dwell();
    if let Some(ms) = dwell_override {
        dwell.inhale_ms = ms;
        dwell.hold_ms = ms;
        dwell.exhale_ms = ms;
    }
    let tick_ms = config.tick_ms.min(dwell.inhale_ms.max(1));
    PhaseCycle::new(dwell, tick_ms)
}

pub fn run(args: BreatheArgs) -> CmdResult {
    let config = Config::load_or_default();
    let mut cycle = cycle_for(&config.breathing, args.dwell_ms);
    if args.cycles == 0 {
        return Ok(());
    }

    let clock = SystemClock::new();
    let poll = Duration::from_millis(cycle.dwell().for_phase(zenflow_core::BreathPhase::Inhale).clamp(1, 100));
    let target = u64::from(args.cycles) * 3;

    cycle.begin(clock.now_ms());
    tracing::debug!(cycles = args.cycles, cycle_ms = cycle.dwell().cycle_ms(), "breathing started");
    println!("{}", cycle.phase());

    runtime()?.block_on(async {
        let mut ticker = tokio::time::interval(poll);
        let mut changes = 0u64;
        'outer: loop {
            tokio::select! {
                _ = ticker.tick() => {
                    for event in cycle.advance(clock.now_ms()) {
                        if let Event::PhaseChanged { phase, .. } = event {
                            changes += 1;
                            if changes >= target {
                                break 'outer;
                            }
                            println!("{phase}");
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => break,
            }
        }
    });

    cycle.end();
    println!("done");
    Ok(())
}
