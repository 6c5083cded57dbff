//! Tracing subscriber setup.
//!
//! Logs go to stderr so the timer display on stdout stays readable.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Maps `-v` count to a tracing directive. 0 is warn, saturating at trace.
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. POMODORO_LOG takes precedence over `verbosity`.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env("POMODORO_LOG")
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .try_init();
}
