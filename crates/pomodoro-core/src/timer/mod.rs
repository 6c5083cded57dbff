mod display;
mod engine;
mod phase;

pub use display::{progress, Display};
pub use engine::{PhaseTimer, TimerState};
pub use phase::{
    ConfigProvider, Field, Phase, PhaseConfig, RawFields, DEFAULT_BREAK_MINUTES,
    DEFAULT_LONG_BREAK_INTERVAL, DEFAULT_LONG_BREAK_MINUTES, DEFAULT_WORK_MINUTES,
};
