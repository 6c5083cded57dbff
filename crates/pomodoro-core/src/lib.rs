//! # Pomodoro Core Library
//!
//! Business logic for a Pomodoro timer that alternates work and break
//! phases. Front ends (the CLI, or any GUI) are thin layers that drive the
//! timer and render what it reports.
//!
//! ## Architecture
//!
//! - **Phase Timer**: a countdown state machine; the caller invokes `tick()`
//!   once per second while it runs
//! - **Sinks**: notifications and visual cues leave the timer through
//!   [`NotificationSink`] and [`CueSink`]
//! - **Settings**: TOML file holding phase lengths, re-read on demand
//!
//! ## Key Components
//!
//! - [`PhaseTimer`]: core timer state machine
//! - [`RawFields`]: user-typed durations with per-field fallbacks
//! - [`Settings`]: settings file management
//! - [`Event`]: what each command did

pub mod error;
pub mod events;
pub mod notify;
pub mod storage;
pub mod timer;

pub use error::{CoreError, SettingsError};
pub use events::Event;
pub use notify::{Cue, CueSink, Notification, NotificationSink, Recorder, Silent};
pub use storage::{Settings, SettingsFile};
pub use timer::{
    ConfigProvider, Display, Field, Phase, PhaseConfig, PhaseTimer, RawFields, TimerState,
};
