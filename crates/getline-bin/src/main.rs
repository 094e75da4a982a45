//! getline entrypoint: read one line of text with a small raw-mode line editor.
use anyhow::Result;
use clap::Parser;
use core_actions::{SessionConfig, SessionOutcome, edit_line};
use core_config::{Config, Overrides, Settings, load_from};
use core_input::{InputError, StdinKeySource};
use core_render::{TerminalBell, TerminalRenderer};
use core_state::ValidationPolicy;
use core_terminal::{CrosstermBackend, TerminalCapabilities, enter_guard};
use core_text::LineBuffer;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE_NAME: &str = "getline.log";
/// Pre-loaded content when neither the config file nor the command line sets one.
const DEMO_DEFAULT: &str = "default text";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "getline", version, about = "Single-line text input editor")]
struct Args {
    /// Editor preset, 1..=6 (1 append only, 2 +backspace, 3 +default value,
    /// 4/5 full editing, 6 full editing with response validation).
    #[arg(short = 'v', long = "variant")]
    pub variant: Option<u8>,
    /// Buffer capacity in slots, one of which is reserved.
    #[arg(long = "capacity")]
    pub capacity: Option<usize>,
    /// Content shown before the first keystroke.
    #[arg(long = "default")]
    pub default: Option<String>,
    /// Comma separated responses accepted by the validating preset.
    #[arg(long = "allow", value_delimiter = ',')]
    pub allow: Option<Vec<String>>,
    /// Silence the audible alert.
    #[arg(long = "no-bell")]
    pub no_bell: bool,
    /// Prompt shown before the input.
    #[arg(long = "prompt", default_value = "Enter some text")]
    pub prompt: String,
    /// Optional configuration file path (overrides discovery of `getline.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            capacity: self.capacity,
            default: self.default.clone(),
            variant: self.variant,
            allow: self.allow.clone(),
            no_bell: self.no_bell,
        }
    }
}

struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self { log_guard: None }
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE_NAME);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_ansi(false)
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global tracing subscriber already installed; drop guard so writer shuts down.
            }
        }

        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = load_from(args.config.clone())?;
    config.apply_overrides(&args.overrides());
    Ok(config)
}

fn session_config(prompt: &str, settings: &Settings) -> SessionConfig {
    let policy = if settings.variant.validates() {
        ValidationPolicy::new(settings.allow.iter().cloned())
    } else {
        None
    };
    SessionConfig::new(prompt, settings.variant.features()).with_policy(policy)
}

fn preload(settings: &Settings) -> LineBuffer {
    let default = settings.default.as_deref().unwrap_or(DEMO_DEFAULT);
    LineBuffer::with_content(settings.capacity, default.as_bytes())
}

/// Run the session on the real terminal. Raw mode is held only while editing.
fn run_session(
    session: &SessionConfig,
    buffer: &mut LineBuffer,
    caps: TerminalCapabilities,
    bell: bool,
) -> Result<SessionOutcome> {
    let mut backend = CrosstermBackend::new();
    let _guard = if caps.wants_raw_mode() {
        Some(enter_guard(&mut backend)?)
    } else {
        None
    };
    let result = edit_line(
        session,
        buffer,
        StdinKeySource::stdin(),
        TerminalRenderer::stdout(),
        TerminalBell::stdout(bell && caps.can_alert()),
    );
    match result {
        Err(err) if err.downcast_ref::<InputError>() == Some(&InputError::Closed) => {
            warn!(target: "runtime", "input_closed_before_enter");
            Ok(SessionOutcome::Cancelled)
        }
        other => other,
    }
}

/// Print the outcome; returns whether the run succeeded.
fn report<W: Write, E: Write>(
    out: &mut W,
    err: &mut E,
    outcome: &SessionOutcome,
) -> io::Result<bool> {
    match outcome {
        SessionOutcome::Accepted(bytes) => {
            writeln!(out)?;
            writeln!(out, "You entered : {:?}", String::from_utf8_lossy(bytes))?;
            writeln!(out, "Length      : {} characters", bytes.len())?;
            Ok(true)
        }
        SessionOutcome::Cancelled => {
            writeln!(err, "getline: cancelled")?;
            Ok(false)
        }
        SessionOutcome::Refused(reason) => {
            writeln!(err, "getline: refused: {reason}")?;
            Ok(false)
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    startup.configure_logging()?;
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let config = load_config(&args)?;
    let settings = config.settings();
    let session = session_config(&args.prompt, &settings);
    let mut buffer = preload(&settings);
    let caps = TerminalCapabilities::detect();
    info!(
        target: "runtime",
        variant = ?settings.variant,
        capacity = settings.capacity,
        validating = session.policy.is_some(),
        config_file = config.path.is_some(),
        stdin_tty = caps.stdin_is_tty,
        "session_configured"
    );

    println!("getline: single-line input editor");
    println!();

    let outcome = run_session(&session, &mut buffer, caps, settings.bell)?;
    let ok = report(&mut io::stdout(), &mut io::stderr(), &outcome)?;
    info!(target: "runtime", ok, "shutdown");
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
