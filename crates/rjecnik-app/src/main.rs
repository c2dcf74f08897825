use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use rjecnik_config::Config;
use rjecnik_types::{AppEvent, Command};
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod controller;
pub mod events;
pub mod io;
pub mod render;
pub mod shell;
pub mod state;

#[cfg(test)]
mod tests;

use self::cli::Cli;
use self::controller::AppController;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::new(),
    };
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.clone();
    }
    if cli.ephemeral {
        config.storage.ephemeral = true;
    }

    init_tracing(&config.log_filter);

    let mut session = state::open_session(&config)?;
    if session.registry().is_memory_only() {
        eprintln!("warning: dictionary storage unreadable, changes will not be saved");
    }
    if let Some(pair) = &cli.pair
        && let Some(warning) = state::select_startup_pair(&mut session, pair)?
    {
        eprintln!("warning: {warning}");
    }

    let filter = cli.command.filter_spec();
    match cli.command.into_command() {
        None => {
            run_shell(Arc::new(AppState::new(config)), session).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(command) => {
            if let Some(filter) = filter {
                session.set_filter(filter);
            }
            Ok(run_once(&mut session, command))
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if std::env::var_os("RJECNIK_LOG_JSON").is_some() {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Interactive mode: every task talks through the controller's channels
async fn run_shell(state: Arc<AppState>, session: rjecnik_core::Session) -> anyhow::Result<()> {
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(session);

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
                controller.shutdown();
            }
            result = tasks.join_next() => match result {
                Some(Ok(Ok(()))) => {}
                Some(Ok(Err(e))) => {
                    tracing::error!("Task failed: {}", e);
                    controller.shutdown();
                }
                Some(Err(e)) => {
                    tracing::error!("Task panicked: {}", e);
                    controller.shutdown();
                }
                None => break,
            },
        }
    }

    Ok(())
}

/// One command against the session. Only `list` prints rows.
fn run_once(session: &mut rjecnik_core::Session, command: Command) -> ExitCode {
    let show_rows = command == Command::List;
    let mut failed = false;

    for event in events::dispatch(session, command) {
        let failure = matches!(event, AppEvent::Failure(_));
        if matches!(event, AppEvent::ShowRows(_)) && !show_rows {
            continue;
        }
        failed |= failure;

        for line in render::format_event(&event) {
            if failure {
                eprintln!("{line}");
            } else {
                println!("{line}");
            }
        }
    }

    if let Err(e) = session.flush() {
        tracing::warn!("Unsaved changes: {}", e);
        failed = true;
    }

    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
