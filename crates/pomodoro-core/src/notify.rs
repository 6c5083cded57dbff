//! Side-effect seams the timer calls at transition boundaries.
//!
//! Delivery is fire-and-forget: sinks return nothing and the timer never
//! waits on them or retries.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Sent when a work phase runs out.
    pub fn work_completed(completed: u32) -> Self {
        Self::new(
            "Pomodoro completed",
            format!("You have completed {completed} pomodoros"),
        )
    }

    /// Sent when a break runs out.
    pub fn work_starting() -> Self {
        Self::new(
            "Starting work phase",
            "Let's focus on this session. You can do it!",
        )
    }
}

/// Visual state a front end renders, usually as a background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cue {
    Idle,
    WorkRunning,
    Paused,
    BreakRunning,
    LongBreak,
}

impl Cue {
    pub fn name(&self) -> &'static str {
        match self {
            Cue::Idle => "idle",
            Cue::WorkRunning => "work-running",
            Cue::Paused => "paused",
            Cue::BreakRunning => "break-running",
            Cue::LongBreak => "long-break",
        }
    }

    /// Reference palette, `#RRGGBB`.
    pub fn color_hex(&self) -> &'static str {
        match self {
            Cue::Idle => "#011627",
            Cue::WorkRunning => "#17615A",
            Cue::Paused | Cue::LongBreak => "#A05E00",
            Cue::BreakRunning => "#971020",
        }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = &self.color_hex()[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub trait NotificationSink {
    fn notify(&mut self, notification: &Notification);
}

pub trait CueSink {
    fn cue(&mut self, cue: Cue);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl NotificationSink for Silent {
    fn notify(&mut self, _notification: &Notification) {}
}

impl CueSink for Silent {
    fn cue(&mut self, _cue: Cue) {}
}

/// Keeps every notification and cue it receives.
///
/// Clones share the same buffers, so one clone can be handed to the timer
/// while another is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    notifications: Rc<RefCell<Vec<Notification>>>,
    cues: Rc<RefCell<Vec<Cue>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.borrow().clone()
    }

    pub fn cues(&self) -> Vec<Cue> {
        self.cues.borrow().clone()
    }

    pub fn last_cue(&self) -> Option<Cue> {
        self.cues.borrow().last().copied()
    }

    pub fn clear(&self) {
        self.notifications.borrow_mut().clear();
        self.cues.borrow_mut().clear();
    }
}

impl NotificationSink for Recorder {
    fn notify(&mut self, notification: &Notification) {
        self.notifications.borrow_mut().push(notification.clone());
    }
}

impl CueSink for Recorder {
    fn cue(&mut self, cue: Cue) {
        self.cues.borrow_mut().push(cue);
    }
}
