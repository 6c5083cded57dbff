use std::time::Duration;

use clap::Args;
use pomodoro_core::{
    ConfigProvider, Field, PhaseConfig, PhaseTimer, RawFields, Settings, SettingsFile,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

use crate::terminal::Terminal;

const HELP: &str = "\
commands:
  start | s                 start or resume the current phase
  pause | p                 pause the countdown
  reset | r                 back to an idle work phase
  status                    show the timer
  fields                    show the duration fields
  set <field> <value>       edit work | break | long-break | interval
  help                      this text
  quit | q                  exit

When stdin closes while the timer is running, the current phase is
finished before exiting.";

#[derive(Args)]
pub struct RunArgs {
    /// Work minutes (overrides the settings file)
    #[arg(long, allow_hyphen_values = true)]
    work: Option<String>,
    /// Short break minutes
    #[arg(long = "break", allow_hyphen_values = true)]
    short_break: Option<String>,
    /// Long break minutes
    #[arg(long, allow_hyphen_values = true)]
    long_break: Option<String>,
    /// Work phases between long breaks
    #[arg(long, allow_hyphen_values = true)]
    interval: Option<String>,
    /// Re-read the settings file at every phase start instead
    #[arg(long, conflicts_with_all = ["work", "short_break", "long_break", "interval"])]
    live_settings: bool,
    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
    /// Tick period in milliseconds
    #[arg(long, default_value_t = 1000, hide = true)]
    tick_ms: u64,
}

/// Where the timer gets its phase lengths during a session.
#[derive(Debug)]
enum Fields {
    Typed(RawFields),
    Live(SettingsFile),
}

impl ConfigProvider for Fields {
    fn phase_config(&self) -> PhaseConfig {
        match self {
            Fields::Typed(raw) => raw.phase_config(),
            Fields::Live(file) => file.phase_config(),
        }
    }
}

#[derive(Debug, PartialEq)]
enum Input {
    Start,
    Pause,
    Reset,
    Status,
    Fields,
    Set(Field, String),
    Help,
    Quit,
    Empty,
    Invalid(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(cmd) = words.next() else {
            return Input::Empty;
        };
        match cmd.to_ascii_lowercase().as_str() {
            "start" | "s" => Input::Start,
            "pause" | "p" => Input::Pause,
            "reset" | "r" => Input::Reset,
            "status" => Input::Status,
            "fields" => Input::Fields,
            "help" | "?" => Input::Help,
            "quit" | "q" | "exit" => Input::Quit,
            "set" => {
                let Some(name) = words.next() else {
                    return Input::Invalid("usage: set <field> <value>".into());
                };
                let Some(field) = Field::from_name(name) else {
                    return Input::Invalid(format!("unknown field: {name}"));
                };
                // Anything goes; bad values fall back when the next phase starts.
                let value = words.collect::<Vec<_>>().join(" ");
                Input::Set(field, value)
            }
            other => Input::Invalid(format!("unknown command: {other} (try `help`)")),
        }
    }
}

fn build_fields(args: &RunArgs, settings: &Settings) -> Result<Fields, Box<dyn std::error::Error>> {
    if args.live_settings {
        return Ok(Fields::Live(SettingsFile::at_default_path()?));
    }
    let mut raw = settings.raw_fields();
    let overrides = [
        (Field::Work, &args.work),
        (Field::Break, &args.short_break),
        (Field::LongBreak, &args.long_break),
        (Field::Interval, &args.interval),
    ];
    for (field, value) in overrides {
        if let Some(value) = value {
            raw.set(field, value.as_str());
        }
    }
    Ok(Fields::Typed(raw))
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load_or_default();
    let fields = build_fields(&args, &settings)?;
    let terminal = Terminal::new(args.json, settings.notifications.enabled);
    let tick = Duration::from_millis(args.tick_ms.max(1));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(session(fields, terminal, tick))
}

/// The driving loop: one tick per period while running, stdin commands in between.
async fn session(
    fields: Fields,
    terminal: Terminal,
    tick: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut timer = PhaseTimer::new(fields)
        .with_notifier(terminal)
        .with_cue_sink(terminal);
    tracing::info!(config = ?timer.provider().phase_config(), "session started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    if !terminal.json {
        terminal.message(HELP);
    }
    terminal.render(&timer.display());

    let mut stdin_open = true;
    loop {
        tokio::select! {
            _ = ticker.tick(), if timer.is_running() => {
                if let Some(event) = timer.tick() {
                    terminal.event(&event);
                }
                terminal.render(&timer.display());
                if !stdin_open && !timer.is_running() {
                    break;
                }
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    if !timer.is_running() {
                        break;
                    }
                    // No more commands; let the running phase play out.
                    stdin_open = false;
                    continue;
                };
                match Input::parse(&line) {
                    Input::Start => {
                        if let Some(event) = timer.start() {
                            // A full period before the first decrement.
                            ticker.reset();
                            terminal.event(&event);
                        }
                    }
                    Input::Pause => {
                        if let Some(event) = timer.pause() {
                            terminal.event(&event);
                        }
                    }
                    Input::Reset => terminal.event(&timer.reset()),
                    Input::Status => {
                        terminal.status(&timer.display());
                        continue;
                    }
                    Input::Fields => {
                        show_fields(&terminal, timer.provider());
                        continue;
                    }
                    Input::Set(field, value) => match timer.provider_mut() {
                        Fields::Typed(raw) => {
                            raw.set(field, value);
                            tracing::debug!(field = field.name(), value = raw.get(field), "field edited");
                            terminal.message(&format!("{} applies from the next phase", field.name()));
                        }
                        Fields::Live(file) => terminal.message(&format!(
                            "durations come from {}; edit them with `pomodoro config set`",
                            file.path().display()
                        )),
                    },
                    Input::Help => terminal.message(HELP),
                    Input::Quit => break,
                    Input::Empty => {}
                    Input::Invalid(msg) => terminal.message(&msg),
                }
                terminal.render(&timer.display());
            }
            else => break,
        }
    }

    if !terminal.json {
        terminal.message(&timer.display().cycles_text());
    }
    tracing::info!(
        completed_work_cycles = timer.completed_work_cycles(),
        "session ended"
    );
    Ok(())
}

fn show_fields(terminal: &Terminal, fields: &Fields) {
    let cfg = fields.phase_config();
    if terminal.json {
        terminal.json_line(&serde_json::json!({
            "type": "fields",
            "work_secs": cfg.work.as_secs(),
            "break_secs": cfg.short_break.as_secs(),
            "long_break_secs": cfg.long_break.as_secs(),
            "long_break_interval": cfg.long_break_interval,
        }));
        return;
    }
    let raw = match fields {
        Fields::Typed(raw) => raw.clone(),
        Fields::Live(file) => file.settings().raw_fields(),
    };
    let effective = [
        cfg.work.as_secs() / 60,
        cfg.short_break.as_secs() / 60,
        cfg.long_break.as_secs() / 60,
        u64::from(cfg.long_break_interval),
    ];
    for (field, value) in Field::ALL.into_iter().zip(effective) {
        terminal.message(&format!(
            "  {:<10} {:>6}  (typed: {:?})",
            field.name(),
            value,
            raw.get(field)
        ));
    }
}
