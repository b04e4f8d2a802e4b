use crate::app::{App, Controller, UnrecoverableError};
use crate::args::{Args, Parser};
use crate::effects::{
    DesktopNotifier, Effects, Haptics, NoHaptics, NoNotifier, Notifier, TonePulse,
};
use crate::lesson::TimerPair;
use std::fs::File;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::{debug, info};

mod app;
mod args;
mod effects;
mod event;
mod lesson;
mod tui;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), UnrecoverableError> {
    if let Some(path) = &args.log_file {
        init_tracing(path)?;
    }
    info!("starting lesson timer");

    let controller = Controller::new(TimerPair::default(), select_effects(&args));
    let mut app = App::new(controller)?;
    app.run().await
}

/// The terminal is taken over by the ui, so logs only go to a file when asked for.
fn init_tracing(path: &Path) -> Result<(), UnrecoverableError> {
    use tracing_subscriber::{fmt, EnvFilter};

    let file = File::create(path).map_err(|e| UnrecoverableError::LogFile(path.into(), e))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

fn select_effects(args: &Args) -> Effects {
    let haptics: Box<dyn Haptics> = if args.no_pulse {
        Box::new(NoHaptics)
    } else {
        match TonePulse::new() {
            Ok(pulse) => Box::new(pulse),
            Err(err) => {
                debug!("completion pulse unavailable: {err}");
                Box::new(NoHaptics)
            }
        }
    };

    let notifier: Box<dyn Notifier> = if args.no_notification {
        Box::new(NoNotifier)
    } else {
        Box::new(DesktopNotifier)
    };

    Effects::new(haptics, notifier)
}
