//! Events returned by timer commands, for front ends to print or log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every command on the timer that changes something produces an Event.
/// Front ends print or log them; sinks are called separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Started {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    Paused {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    Reset {
        phase_total_secs: u64,
        at: DateTime<Utc>,
    },
    PhaseCompleted {
        from: Phase,
        to: Phase,
        completed_work_cycles: u32,
        /// Length of the phase that was just entered.
        phase_total_secs: u64,
        at: DateTime<Utc>,
    },
}
