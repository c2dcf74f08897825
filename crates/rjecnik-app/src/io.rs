use std::io::{BufRead, Write};
use std::sync::Arc;

use kanal::AsyncSender;
use rjecnik_types::{AppEvent, Command};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::shell;
use crate::state::AppState;

/// Runs the message bridge when enabled, until cancelled
pub async fn watcher_io(
    state: Arc<AppState>,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (enabled, listen_addr) = {
        let config = state.config.read().await;
        (config.bridge.enabled, config.bridge.listen_addr.clone())
    };

    if !enabled {
        tracing::debug!("Message bridge disabled");
        return Ok(());
    }

    tracing::info!("Starting message bridge on {}", listen_addr);
    rjecnik_io::ws::start_bridge_listener(&listen_addr, move |message| {
        let tx = event_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tx.send(AppEvent::Bridge(message)).await {
                tracing::error!("Failed to send bridge message to app: {}", e);
            }
        });
    })
    .await?;

    cancel.cancelled().await;
    tracing::info!("Message bridge stopping");
    Ok(())
}

/// Reads shell lines on a plain thread; a blocked stdin read must not hold
/// up runtime shutdown.
pub fn spawn_stdin_reader(handle: Handle, event_tx: AsyncSender<AppEvent>) {
    let interactive = atty::is(atty::Stream::Stdin);

    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            if interactive {
                print!("> ");
                let _ = std::io::stdout().flush();
            }

            let line = match lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    tracing::warn!("stdin read failed: {}", e);
                    break;
                }
                None => break,
            };

            match shell::parse_line(&line) {
                Ok(Some(command)) => {
                    let quit = command == Command::Quit;
                    if handle.block_on(event_tx.send(AppEvent::Command(command))).is_err() || quit {
                        return;
                    }
                }
                Ok(None) => {}
                Err(message) => eprintln!("error: {message}"),
            }
        }

        let _ = handle.block_on(event_tx.send(AppEvent::Command(Command::Quit)));
    });
}
