//! Phase timer implementation.
//!
//! The timer counts down in whole seconds. It does not use internal threads
//! or read the clock - the caller is responsible for calling `tick()` once
//! per elapsed second while the timer is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --start--> Running
//! Running --tick at 00:00--> Idle (next phase)
//! any --reset--> Idle (Work)
//! ```
//!
//! Work hands over to Break, or to LongBreak every `long_break_interval`
//! completed work phases. Any break hands back to Work. A new phase never
//! starts running on its own.
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = PhaseTimer::new(RawFields::default());
//! timer.start();
//! // Once per second:
//! if let Some(event) = timer.tick() { /* phase changed */ }
//! ```

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::display::Display;
use super::phase::{ConfigProvider, Phase};
use crate::events::Event;
use crate::notify::{Cue, CueSink, Notification, NotificationSink, Silent};

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Countdown controller for alternating work and break phases.
pub struct PhaseTimer<P> {
    provider: P,
    phase: Phase,
    remaining: Duration,
    phase_total: Duration,
    running: bool,
    /// Set by `pause()`, cleared by anything that starts or replaces a phase.
    paused: bool,
    completed_work_cycles: u32,
    notifier: Box<dyn NotificationSink>,
    cues: Box<dyn CueSink>,
}

impl<P: ConfigProvider> PhaseTimer<P> {
    /// Create a timer in the idle Work phase, sized from `provider`.
    pub fn new(provider: P) -> Self {
        let work = provider.phase_config().work;
        Self {
            provider,
            phase: Phase::Work,
            remaining: work,
            phase_total: work,
            running: false,
            paused: false,
            completed_work_cycles: 0,
            notifier: Box::new(Silent),
            cues: Box::new(Silent),
        }
    }

    pub fn with_notifier(mut self, notifier: impl NotificationSink + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn with_cue_sink(mut self, cues: impl CueSink + 'static) -> Self {
        self.cues = Box::new(cues);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn phase_total(&self) -> Duration {
        self.phase_total
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn completed_work_cycles(&self) -> u32 {
        self.completed_work_cycles
    }

    pub fn state(&self) -> TimerState {
        if self.running {
            TimerState::Running
        } else if self.paused {
            TimerState::Paused
        } else {
            TimerState::Idle
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Edits here take effect at the next phase start.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn display(&self) -> Display {
        Display::compute(
            self.phase,
            self.remaining,
            self.phase_total,
            self.completed_work_cycles,
            self.running,
        )
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        self.paused = false;
        let cue = if self.phase.is_break() {
            Cue::BreakRunning
        } else {
            Cue::WorkRunning
        };
        self.cues.cue(cue);
        tracing::debug!(phase = ?self.phase, remaining_secs = self.remaining.as_secs(), "timer started");
        Some(Event::Started {
            phase: self.phase,
            remaining_secs: self.remaining.as_secs(),
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        self.paused = true;
        self.cues.cue(Cue::Paused);
        tracing::debug!(phase = ?self.phase, remaining_secs = self.remaining.as_secs(), "timer paused");
        Some(Event::Paused {
            phase: self.phase,
            remaining_secs: self.remaining.as_secs(),
            at: Utc::now(),
        })
    }

    /// Back to an idle Work phase. The completed-cycle count is kept.
    pub fn reset(&mut self) -> Event {
        self.running = false;
        self.cues.cue(Cue::Idle);
        self.enter(Phase::Work);
        tracing::debug!(phase_total_secs = self.phase_total.as_secs(), "timer reset");
        Event::Reset {
            phase_total_secs: self.phase_total.as_secs(),
            at: Utc::now(),
        }
    }

    /// Call once per elapsed second. Returns `Some(Event::PhaseCompleted)`
    /// when the countdown had already reached zero and the phase changed.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        if !self.remaining.is_zero() {
            self.remaining = self.remaining.saturating_sub(TICK);
            return None;
        }

        self.running = false;
        let from = self.phase;
        match from {
            Phase::Work => {
                self.completed_work_cycles = self.completed_work_cycles.saturating_add(1);
                self.notifier
                    .notify(&Notification::work_completed(self.completed_work_cycles));
                let cfg = self.provider.phase_config();
                if cfg.is_long_break_due(self.completed_work_cycles) {
                    self.enter_with(Phase::LongBreak, cfg.long_break);
                    self.cues.cue(Cue::LongBreak);
                } else {
                    self.enter_with(Phase::Break, cfg.short_break);
                    self.cues.cue(Cue::BreakRunning);
                }
            }
            Phase::Break | Phase::LongBreak => {
                self.notifier.notify(&Notification::work_starting());
                self.enter(Phase::Work);
            }
        }

        tracing::info!(
            from = ?from,
            to = ?self.phase,
            completed_work_cycles = self.completed_work_cycles,
            "phase completed"
        );
        Some(Event::PhaseCompleted {
            from,
            to: self.phase,
            completed_work_cycles: self.completed_work_cycles,
            phase_total_secs: self.phase_total.as_secs(),
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn enter(&mut self, phase: Phase) {
        let total = self.provider.phase_config().duration_of(phase);
        self.enter_with(phase, total);
    }

    fn enter_with(&mut self, phase: Phase, total: Duration) {
        self.paused = false;
        self.phase = phase;
        self.phase_total = total;
        self.remaining = total;
    }
}

impl<P: std::fmt::Debug> std::fmt::Debug for PhaseTimer<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseTimer")
            .field("provider", &self.provider)
            .field("phase", &self.phase)
            .field("remaining", &self.remaining)
            .field("phase_total", &self.phase_total)
            .field("running", &self.running)
            .field("paused", &self.paused)
            .field("completed_work_cycles", &self.completed_work_cycles)
            .finish_non_exhaustive()
    }
}
