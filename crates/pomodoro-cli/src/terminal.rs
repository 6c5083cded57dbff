//! Terminal rendering of the timer, its notifications and cues.

use std::io::{IsTerminal, Write};

use pomodoro_core::{Cue, CueSink, Display, Event, Notification, NotificationSink};

const BAR_WIDTH: usize = 20;

/// Output style shared by the sinks and the status line.
#[derive(Debug, Clone, Copy)]
pub struct Terminal {
    pub json: bool,
    pub color: bool,
    pub notifications: bool,
}

impl Terminal {
    pub fn new(json: bool, notifications: bool) -> Self {
        let color = !json && std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self {
            json,
            color,
            notifications,
        }
    }

    /// Redraw the status line. Interactive terminals get it in place.
    pub fn render(&self, display: &Display) {
        if self.json {
            return;
        }
        let line = status_line(display);
        let mut out = std::io::stdout().lock();
        if self.color {
            let _ = write!(out, "\r\x1b[2K{line}");
        } else {
            let _ = writeln!(out, "{line}");
        }
        let _ = out.flush();
    }

    pub fn status(&self, display: &Display) {
        if self.json {
            self.json_line(&serde_json::json!({ "type": "status", "display": display }));
        } else {
            self.message(&format!("{}  ({})", status_line(display), display.cycles_text()));
        }
    }

    pub fn event(&self, event: &Event) {
        if self.json {
            self.json_line(event);
        }
    }

    /// A line of its own, after whatever status line is on screen.
    pub fn message(&self, text: &str) {
        if self.json {
            self.json_line(&serde_json::json!({ "type": "message", "text": text }));
            return;
        }
        let mut out = std::io::stdout().lock();
        if self.color {
            let _ = writeln!(out, "\r\x1b[2K{text}");
        } else {
            let _ = writeln!(out, "{text}");
        }
        let _ = out.flush();
    }

    pub fn json_line<T: serde::Serialize + ?Sized>(&self, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::warn!(error = %e, "cannot serialize output"),
        }
    }
}

impl NotificationSink for Terminal {
    fn notify(&mut self, notification: &Notification) {
        tracing::info!(title = %notification.title, "notification");
        if !self.notifications {
            return;
        }
        if self.json {
            self.json_line(&serde_json::json!({
                "type": "notification",
                "title": notification.title,
                "message": notification.message,
            }));
        } else {
            // BEL so the terminal can flash or beep.
            self.message(&format!("\x07** {}: {}", notification.title, notification.message));
        }
    }
}

impl CueSink for Terminal {
    fn cue(&mut self, cue: Cue) {
        tracing::debug!(%cue, color = cue.color_hex(), "cue");
        if self.json {
            self.json_line(&serde_json::json!({ "type": "cue", "cue": cue }));
        } else if self.color {
            let (r, g, b) = cue.rgb();
            self.message(&format!("\x1b[48;2;{r};{g};{b}m    \x1b[0m {cue}"));
        }
    }
}

pub fn status_line(display: &Display) -> String {
    let filled = (display.progress * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "{:<18} {}  [{}{}] {:>3}%{}",
        display.label,
        display.clock(),
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        display.percent(),
        if display.running { "" } else { "  (stopped)" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomodoro_core::Phase;
    use std::time::Duration;

    #[test]
    fn status_line_shows_clock_and_bar() {
        let d = Display::compute(
            Phase::Work,
            Duration::from_secs(15 * 60),
            Duration::from_secs(20 * 60),
            2,
            true,
        );
        let line = status_line(&d);
        assert!(line.starts_with("Phase: Work"));
        assert!(line.contains("15:00"));
        assert!(line.contains("[#####...............]"));
        assert!(line.contains(" 25%"));
        assert!(!line.contains("stopped"));
    }

    #[test]
    fn stopped_timer_is_marked() {
        let d = Display::compute(
            Phase::LongBreak,
            Duration::from_secs(60),
            Duration::from_secs(60),
            4,
            false,
        );
        let line = status_line(&d);
        assert!(line.contains("[....................]"));
        assert!(line.ends_with("(stopped)"));
    }
}
