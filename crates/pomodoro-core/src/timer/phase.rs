//! Phase kinds and the per-phase durations they are timed with.
//!
//! Durations come from a [`ConfigProvider`] which is asked again every time
//! a phase begins, so edits made while a phase is running apply to the next
//! one.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_WORK_MINUTES: u64 = 25;
pub const DEFAULT_BREAK_MINUTES: u64 = 5;
pub const DEFAULT_LONG_BREAK_MINUTES: u64 = 15;
pub const DEFAULT_LONG_BREAK_INTERVAL: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Work,
    Break,
    LongBreak,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Work => "Phase: Work",
            Phase::Break => "Phase: Break",
            Phase::LongBreak => "Phase: Long break",
        }
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, Phase::Work)
    }
}

/// Validated phase lengths. Every duration is positive and the interval is at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseConfig {
    pub work: Duration,
    pub short_break: Duration,
    pub long_break: Duration,
    pub long_break_interval: u32,
}

impl PhaseConfig {
    pub fn duration_of(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Work => self.work,
            Phase::Break => self.short_break,
            Phase::LongBreak => self.long_break,
        }
    }

    /// Whether finishing the `completed`-th work cycle earns a long break.
    pub fn is_long_break_due(&self, completed: u32) -> bool {
        // Interval is never zero once parsed, but a hand-built config might be.
        let interval = if self.long_break_interval == 0 {
            DEFAULT_LONG_BREAK_INTERVAL
        } else {
            self.long_break_interval
        };
        completed % interval == 0
    }
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            work: minutes(DEFAULT_WORK_MINUTES),
            short_break: minutes(DEFAULT_BREAK_MINUTES),
            long_break: minutes(DEFAULT_LONG_BREAK_MINUTES),
            long_break_interval: DEFAULT_LONG_BREAK_INTERVAL,
        }
    }
}

/// Source of phase lengths, consulted whenever a phase begins.
pub trait ConfigProvider {
    fn phase_config(&self) -> PhaseConfig;
}

impl ConfigProvider for PhaseConfig {
    fn phase_config(&self) -> PhaseConfig {
        *self
    }
}

impl<P: ConfigProvider + ?Sized> ConfigProvider for &P {
    fn phase_config(&self) -> PhaseConfig {
        (**self).phase_config()
    }
}

impl<P: ConfigProvider + ?Sized> ConfigProvider for Box<P> {
    fn phase_config(&self) -> PhaseConfig {
        (**self).phase_config()
    }
}

/// Names of the editable fields, as front ends refer to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Work,
    Break,
    LongBreak,
    Interval,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Work, Field::Break, Field::LongBreak, Field::Interval];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Work => "work",
            Field::Break => "break",
            Field::LongBreak => "long-break",
            Field::Interval => "interval",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// The four values exactly as the user typed them.
///
/// Nothing is validated on the way in; [`RawFields::parse`] turns each field
/// into a positive number or that field's default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFields {
    pub work_minutes: String,
    pub break_minutes: String,
    pub long_break_minutes: String,
    pub long_break_interval: String,
}

impl RawFields {
    pub fn new(
        work_minutes: impl Into<String>,
        break_minutes: impl Into<String>,
        long_break_minutes: impl Into<String>,
        long_break_interval: impl Into<String>,
    ) -> Self {
        Self {
            work_minutes: work_minutes.into(),
            break_minutes: break_minutes.into(),
            long_break_minutes: long_break_minutes.into(),
            long_break_interval: long_break_interval.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Work => &self.work_minutes,
            Field::Break => &self.break_minutes,
            Field::LongBreak => &self.long_break_minutes,
            Field::Interval => &self.long_break_interval,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Work => &mut self.work_minutes,
            Field::Break => &mut self.break_minutes,
            Field::LongBreak => &mut self.long_break_minutes,
            Field::Interval => &mut self.long_break_interval,
        };
        *slot = value.into();
    }

    pub fn work_duration(&self) -> Duration {
        minutes(parse_positive(&self.work_minutes).unwrap_or(DEFAULT_WORK_MINUTES))
    }

    pub fn break_duration(&self) -> Duration {
        minutes(parse_positive(&self.break_minutes).unwrap_or(DEFAULT_BREAK_MINUTES))
    }

    pub fn long_break_duration(&self) -> Duration {
        minutes(parse_positive(&self.long_break_minutes).unwrap_or(DEFAULT_LONG_BREAK_MINUTES))
    }

    pub fn long_break_interval(&self) -> u32 {
        parse_positive(&self.long_break_interval)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(DEFAULT_LONG_BREAK_INTERVAL)
    }

    pub fn parse(&self) -> PhaseConfig {
        PhaseConfig {
            work: self.work_duration(),
            short_break: self.break_duration(),
            long_break: self.long_break_duration(),
            long_break_interval: self.long_break_interval(),
        }
    }
}

impl From<PhaseConfig> for RawFields {
    fn from(cfg: PhaseConfig) -> Self {
        Self::new(
            (cfg.work.as_secs() / 60).to_string(),
            (cfg.short_break.as_secs() / 60).to_string(),
            (cfg.long_break.as_secs() / 60).to_string(),
            cfg.long_break_interval.to_string(),
        )
    }
}

impl ConfigProvider for RawFields {
    fn phase_config(&self) -> PhaseConfig {
        self.parse()
    }
}

/// Parse a strictly positive 32-bit integer, tolerating surrounding whitespace
/// and a sign. Anything wider than `i32` is rejected like any other bad input.
fn parse_positive(raw: &str) -> Option<u64> {
    let n: i32 = raw.trim().parse().ok()?;
    u64::try_from(n).ok().filter(|n| *n > 0)
}

/// Minutes to a `Duration`, saturating instead of overflowing.
pub(crate) fn minutes(m: u64) -> Duration {
    Duration::from_secs(m.saturating_mul(60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_break_field_uses_default() {
        let fields = RawFields::new("25", "", "15", "4");
        assert_eq!(fields.break_duration(), Duration::from_secs(5 * 60));
    }

    #[test]
    fn zero_interval_falls_back_to_four() {
        let fields = RawFields::new("25", "5", "15", "0");
        assert_eq!(fields.long_break_interval(), 4);
    }

    #[test]
    fn negative_and_garbage_fall_back() {
        let fields = RawFields::new("-10", "abc", "1.5", "-3");
        assert_eq!(fields.parse(), PhaseConfig::default());
    }

    #[test]
    fn whitespace_and_plus_sign_are_accepted() {
        let fields = RawFields::new(" 50 ", "+10", "\t20", "2 ");
        let cfg = fields.parse();
        assert_eq!(cfg.work, Duration::from_secs(50 * 60));
        assert_eq!(cfg.short_break, Duration::from_secs(10 * 60));
        assert_eq!(cfg.long_break, Duration::from_secs(20 * 60));
        assert_eq!(cfg.long_break_interval, 2);
    }

    #[test]
    fn interval_too_large_for_u32_falls_back() {
        let fields = RawFields::new("25", "5", "15", "2147483648");
        assert_eq!(fields.long_break_interval(), 4);
    }

    #[test]
    fn minutes_beyond_i32_fall_back() {
        let fields = RawFields::new("2147483648", "5", "15", "4");
        assert_eq!(fields.work_duration(), Duration::from_secs(25 * 60));

        let fields = RawFields::new(i32::MAX.to_string(), "5", "15", "4");
        assert_eq!(
            fields.work_duration(),
            Duration::from_secs(i32::MAX as u64 * 60)
        );
    }

    #[test]
    fn field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        assert_eq!(Field::from_name("lunch"), None);
    }

    #[test]
    fn set_and_get_by_field() {
        let mut fields = RawFields::from(PhaseConfig::default());
        fields.set(Field::LongBreak, "30");
        assert_eq!(fields.get(Field::LongBreak), "30");
        assert_eq!(fields.get(Field::Work), "25");
    }

    #[test]
    fn long_break_due_every_interval() {
        let cfg = PhaseConfig::default();
        assert!(!cfg.is_long_break_due(1));
        assert!(!cfg.is_long_break_due(3));
        assert!(cfg.is_long_break_due(4));
        assert!(cfg.is_long_break_due(8));
    }

    #[test]
    fn zero_interval_in_hand_built_config_does_not_divide_by_zero() {
        let cfg = PhaseConfig {
            long_break_interval: 0,
            ..PhaseConfig::default()
        };
        assert!(cfg.is_long_break_due(4));
        assert!(!cfg.is_long_break_due(5));
    }
}
