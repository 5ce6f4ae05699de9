//! Integration tests for the countdown, breathing cycle and session counter,
//! driven by a manual clock.

use chrono::{Local, TimeZone};
use proptest::prelude::*;
use zenflow_core::{
    BreathPhase, Clock, Config, CountdownTimer, Event, ManualClock, MemoryStore, PersistenceBridge,
    PhaseCycle, Workspace,
};

fn completions(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, Event::CountdownCompleted { .. }))
        .count()
}

/// Step the clock one second at a time, collecting countdown events.
fn run_seconds(timer: &mut CountdownTimer, clock: &ManualClock, seconds: u64) -> Vec<Event> {
    let mut events = Vec::new();
    for _ in 0..seconds {
        clock.advance(1000);
        events.extend(timer.advance(clock.now_ms()));
    }
    events
}

proptest! {
    #[test]
    fn d_ticks_complete_exactly_once(d in 1u64..600) {
        let clock = ManualClock::new(0);
        let mut timer = CountdownTimer::new(1500);
        timer.reset_to(d);
        timer.start(clock.now_ms());
        let events = run_seconds(&mut timer, &clock, d);
        prop_assert_eq!(completions(&events), 1);
        prop_assert!(!timer.is_running());
        prop_assert_eq!(timer.remaining_secs(), 1500);
    }

    #[test]
    fn pause_resume_consumes_running_seconds(
        runs in proptest::collection::vec((1u64..3000, 0u64..5000, 0u64..4), 1..12)
    ) {
        let clock = ManualClock::new(0);
        let mut timer = CountdownTimer::new(10_000);
        let mut running_ms = 0;
        for (run_ms, idle_ms, polls) in runs {
            timer.start(clock.now_ms());
            // Poll a few times inside the span, then once at its end.
            let step = run_ms / (polls + 1);
            for _ in 0..polls {
                clock.advance(step);
                timer.advance(clock.now_ms());
            }
            clock.set(clock.now_ms() + run_ms - step * polls);
            timer.advance(clock.now_ms());
            running_ms += run_ms;
            timer.pause(clock.now_ms());
            clock.advance(idle_ms);
            prop_assert!(timer.advance(clock.now_ms()).is_empty());
        }
        prop_assert_eq!(timer.remaining_secs(), 10_000 - running_ms / 1000);
    }
}

#[test]
fn ended_cycle_stays_quiet_for_a_full_cycle() {
    let clock = ManualClock::new(0);
    let mut cycle = PhaseCycle::default();
    cycle.begin(clock.now_ms());

    let mut t = 0;
    while t < 6000 {
        t += 250;
        clock.set(t);
        cycle.advance(clock.now_ms());
    }
    assert_eq!(cycle.phase(), BreathPhase::Hold);

    cycle.end();
    let cycle_ms = cycle.dwell().cycle_ms();
    let mut changes = Vec::new();
    while clock.now_ms() < 6000 + 2 * cycle_ms {
        clock.advance(250);
        changes.extend(cycle.advance(clock.now_ms()));
    }
    assert!(changes.is_empty());
    assert_eq!(cycle.phase(), BreathPhase::Hold);
}

#[test]
fn continuous_run_visits_phases_in_order_with_even_dwell() {
    let clock = ManualClock::new(500);
    let mut cycle = PhaseCycle::default();
    cycle.begin(clock.now_ms());

    let mut transitions = vec![(BreathPhase::Inhale, 500)];
    while clock.now_ms() < 500 + 36_000 {
        clock.advance(100);
        for event in cycle.advance(clock.now_ms()) {
            if let Event::PhaseChanged { phase, since_ms, .. } = event {
                transitions.push((phase, since_ms));
            }
        }
    }

    let expected = [BreathPhase::Inhale, BreathPhase::Hold, BreathPhase::Exhale];
    for (i, (phase, _)) in transitions.iter().enumerate() {
        assert_eq!(*phase, expected[i % 3]);
    }
    for pair in transitions.windows(2) {
        assert_eq!(pair[1].1 - pair[0].1, 4000);
    }
    assert_eq!(transitions.len(), 10);
}

#[test]
fn three_completions_add_three_sessions() {
    let store = MemoryStore::new();
    {
        use zenflow_core::KvStore;
        store.set("zenflow-pomodoro-sessions", "4").unwrap();
    }
    let wall = Local.with_ymd_and_hms(2026, 10, 16, 10, 0, 0).unwrap();
    let mut ws = Workspace::open(Config::default(), PersistenceBridge::new(store.clone()), wall);
    let clock = ManualClock::new(0);

    for _ in 0..3 {
        ws.reset_countdown(Some(5));
        ws.start_countdown(clock.now_ms());
        for _ in 0..5 {
            clock.advance(1000);
            ws.advance(clock.now_ms(), wall);
        }
    }
    assert_eq!(ws.sessions(), 7);

    let reloaded = PersistenceBridge::new(store).load_all();
    assert_eq!(reloaded.session_count.count(), 7);
}

#[test]
fn default_pomodoro_scenario() {
    let store = MemoryStore::new();
    let wall = Local.with_ymd_and_hms(2026, 10, 16, 10, 0, 0).unwrap();
    let mut ws = Workspace::open(Config::default(), PersistenceBridge::new(store), wall);
    let clock = ManualClock::new(0);

    assert_eq!(ws.countdown().remaining_secs(), 1500);
    assert_eq!(ws.sessions(), 0);
    ws.start_countdown(clock.now_ms());

    let mut events = Vec::new();
    for _ in 0..1500 {
        clock.advance(1000);
        events.extend(ws.advance(clock.now_ms(), wall));
    }

    assert_eq!(completions(&events), 1);
    assert_eq!(ws.sessions(), 1);
    assert_eq!(ws.countdown().remaining_secs(), 1500);
    assert!(!ws.countdown().is_running());
}
