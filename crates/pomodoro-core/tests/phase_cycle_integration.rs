//! Integration tests for full work/break cycles.
//!
//! Drives the timer second by second with the default 25/5/15/4 lengths,
//! the way a 1 Hz front end would.

use std::time::Duration;

use pomodoro_core::{Cue, Event, Notification, Phase, PhaseTimer, RawFields, Recorder};

const MIN: u64 = 60;

/// Start the current phase and tick until it hands over.
fn run_phase(timer: &mut PhaseTimer<RawFields>) -> Event {
    timer.start();
    for _ in 0..timer.remaining().as_secs() {
        assert!(timer.tick().is_none());
    }
    timer.tick().expect("phase should complete one tick after reaching zero")
}

#[test]
fn test_first_work_phase_leads_to_short_break() {
    let mut timer = PhaseTimer::new(RawFields::default());
    let event = run_phase(&mut timer);

    match event {
        Event::PhaseCompleted {
            from,
            to,
            completed_work_cycles,
            phase_total_secs,
            ..
        } => {
            assert_eq!(from, Phase::Work);
            assert_eq!(to, Phase::Break);
            assert_eq!(completed_work_cycles, 1);
            assert_eq!(phase_total_secs, 5 * MIN);
        }
        other => panic!("Expected PhaseCompleted, got {other:?}"),
    }
    assert_eq!(timer.phase_total(), Duration::from_secs(5 * MIN));
    assert!(!timer.is_running());
}

#[test]
fn test_full_day_cycle_with_long_break() {
    let recorder = Recorder::new();
    let mut timer = PhaseTimer::new(RawFields::default())
        .with_notifier(recorder.clone())
        .with_cue_sink(recorder.clone());

    let mut breaks = Vec::new();
    for _ in 0..4 {
        run_phase(&mut timer);
        breaks.push(timer.phase());
        if timer.completed_work_cycles() < 4 {
            run_phase(&mut timer);
            assert_eq!(timer.phase(), Phase::Work);
        }
    }

    assert_eq!(
        breaks,
        vec![Phase::Break, Phase::Break, Phase::Break, Phase::LongBreak]
    );
    assert_eq!(timer.phase_total(), Duration::from_secs(15 * MIN));
    assert_eq!(
        recorder.notifications().last(),
        Some(&Notification::work_completed(4))
    );
    assert_eq!(recorder.last_cue(), Some(Cue::LongBreak));

    // Long break over: back to work, count unchanged.
    run_phase(&mut timer);
    assert_eq!(timer.phase(), Phase::Work);
    assert_eq!(timer.completed_work_cycles(), 4);
    assert_eq!(
        recorder.notifications().last(),
        Some(&Notification::work_starting())
    );
}

#[test]
fn test_notifications_alternate() {
    let recorder = Recorder::new();
    let mut timer = PhaseTimer::new(RawFields::new("1", "1", "1", "2")).with_notifier(recorder.clone());

    for _ in 0..4 {
        run_phase(&mut timer);
    }

    let titles: Vec<String> = recorder
        .notifications()
        .into_iter()
        .map(|n| n.title)
        .collect();
    assert_eq!(
        titles,
        vec![
            "Pomodoro completed",
            "Starting work phase",
            "Pomodoro completed",
            "Starting work phase",
        ]
    );
}

#[test]
fn test_cue_sequence_through_a_session() {
    let recorder = Recorder::new();
    let mut timer = PhaseTimer::new(RawFields::new("1", "1", "1", "4")).with_cue_sink(recorder.clone());

    timer.start();
    timer.tick();
    timer.pause();
    run_phase(&mut timer);
    timer.start();
    timer.reset();

    assert_eq!(
        recorder.cues(),
        vec![
            Cue::WorkRunning,
            Cue::Paused,
            Cue::WorkRunning,
            Cue::BreakRunning,
            Cue::BreakRunning,
            Cue::Idle,
        ]
    );
    assert_eq!(timer.phase(), Phase::Work);
    assert_eq!(timer.completed_work_cycles(), 1);
}

#[test]
fn test_one_second_left_never_goes_negative() {
    let mut timer = PhaseTimer::new(RawFields::default());
    timer.start();
    for _ in 0..(25 * MIN - 1) {
        timer.tick();
    }
    assert_eq!(timer.display().clock(), "00:01");

    assert!(timer.tick().is_none());
    assert_eq!(timer.remaining(), Duration::ZERO);
    assert_eq!(timer.display().clock(), "00:00");
    assert_eq!(timer.display().progress, 1.0);

    assert!(timer.tick().is_some());
    assert_eq!(timer.phase(), Phase::Break);
    assert_eq!(timer.display().progress, 0.0);
}

#[test]
fn test_events_serialize_with_type_tag() {
    let mut timer = PhaseTimer::new(RawFields::default());
    let started = timer.start().unwrap();
    let json = serde_json::to_value(&started).unwrap();
    assert_eq!(json["type"], "started");
    assert_eq!(json["phase"], "work");
    assert_eq!(json["remaining_secs"], 25 * MIN);

    let reset = serde_json::to_value(timer.reset()).unwrap();
    assert_eq!(reset["type"], "reset");
}
