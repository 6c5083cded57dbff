//! Render-ready snapshot of the timer: clock digits, progress and labels.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::phase::Phase;

/// What a front end needs to draw the timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Display {
    pub phase: Phase,
    /// Whole minutes remaining. Not wrapped at the hour.
    pub minutes: u64,
    pub seconds: u64,
    /// Elapsed share of the current phase, 0.0 ..= 1.0.
    pub progress: f64,
    pub label: String,
    pub completed_work_cycles: u32,
    pub running: bool,
}

impl Display {
    pub fn compute(
        phase: Phase,
        remaining: Duration,
        phase_total: Duration,
        completed_work_cycles: u32,
        running: bool,
    ) -> Self {
        let secs = remaining.as_secs();
        Self {
            phase,
            minutes: secs / 60,
            seconds: secs % 60,
            progress: progress(remaining, phase_total),
            label: phase.label().to_string(),
            completed_work_cycles,
            running,
        }
    }

    /// `MM:SS`, zero padded.
    pub fn clock(&self) -> String {
        format!("{:02}:{:02}", self.minutes, self.seconds)
    }

    pub fn percent(&self) -> u8 {
        (self.progress * 100.0).round() as u8
    }

    pub fn cycles_text(&self) -> String {
        format!("Pomodoros completed: {}", self.completed_work_cycles)
    }
}

/// `1 - remaining / total`, or 0 when that is undefined.
pub fn progress(remaining: Duration, phase_total: Duration) -> f64 {
    if phase_total.is_zero() {
        return 0.0;
    }
    let p = 1.0 - remaining.as_secs_f64() / phase_total.as_secs_f64();
    if p.is_finite() {
        p.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_total_yields_zero_progress() {
        let d = Display::compute(Phase::Work, Duration::ZERO, Duration::ZERO, 0, false);
        assert_eq!(d.progress, 0.0);
        assert_eq!(d.clock(), "00:00");
    }

    #[test]
    fn halfway() {
        let d = Display::compute(
            Phase::Break,
            Duration::from_secs(150),
            Duration::from_secs(300),
            1,
            true,
        );
        assert_eq!(d.clock(), "02:30");
        assert!((d.progress - 0.5).abs() < f64::EPSILON);
        assert_eq!(d.percent(), 50);
        assert_eq!(d.label, "Phase: Break");
    }

    #[test]
    fn long_phases_keep_counting_minutes() {
        let d = Display::compute(
            Phase::Work,
            Duration::from_secs(90 * 60),
            Duration::from_secs(90 * 60),
            0,
            false,
        );
        assert_eq!(d.clock(), "90:00");
        assert_eq!(d.progress, 0.0);
    }

    #[test]
    fn remaining_above_total_is_clamped() {
        assert_eq!(progress(Duration::from_secs(10), Duration::from_secs(5)), 0.0);
    }

    #[test]
    fn cycles_text() {
        let d = Display::compute(Phase::Work, Duration::ZERO, Duration::from_secs(1), 7, false);
        assert_eq!(d.cycles_text(), "Pomodoros completed: 7");
        assert_eq!(d.percent(), 100);
    }
}
