use kanal::{AsyncReceiver, AsyncSender};
use rjecnik_core::{DictError, Session};
use rjecnik_types::{AppEvent, Command};
use tokio_util::sync::CancellationToken;

pub mod assist;
pub mod bridge;
pub mod entries;
pub mod transfer;
pub mod view;

use assist::{handle_paste, handle_translate};
use bridge::handle_bridge_message;
use entries::{handle_add, handle_edit, handle_favorite, handle_remove, handle_undo};
use transfer::{handle_export, handle_import};
use view::{
    handle_categories, handle_filter, handle_pairs, handle_search, handle_select, handle_theme,
};

pub type Reply = Result<Vec<AppEvent>, DictError>;

/// App's main loop. Owns the session; events are handled one at a time.
pub async fn event_loop(
    mut session: Session,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    app_to_ui_tx.send(AppEvent::ShowRows(session.visible())).await?;

    tracing::info!("[EVENT_LOOP] Waiting for events on '{}'", session.selected_pair());
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = ui_to_app_rx.recv() => event?,
        };
        tracing::debug!("[EVENT_LOOP] {:?}", std::mem::discriminant(&event));

        let replies = match event {
            AppEvent::Command(Command::Quit) | AppEvent::Shutdown => {
                cancel.cancel();
                break;
            }
            AppEvent::Command(command) => dispatch(&mut session, command),
            AppEvent::Bridge(message) => {
                let reply = handle_bridge_message(&mut session, message);
                finish(&session, reply, true)
            }
            // Output events only travel towards the renderer
            _ => continue,
        };

        for reply in replies {
            app_to_ui_tx.send(reply).await?;
        }
    }

    if let Err(e) = session.flush() {
        tracing::warn!("Unsaved changes at shutdown: {}", e);
    }
    let _ = app_to_ui_tx.send(AppEvent::Shutdown).await;
    tracing::info!("[EVENT_LOOP] Stopped");
    Ok(())
}

/// Run one command against the session and collect what to show.
///
/// Mutations and filter changes re-derive the visible rows.
pub fn dispatch(session: &mut Session, command: Command) -> Vec<AppEvent> {
    let rerender = rerenders(&command);

    let reply = match command {
        Command::Add(draft) => handle_add(session, draft),
        Command::Edit { index, draft } => handle_edit(session, index, draft),
        Command::Remove(index) => handle_remove(session, index),
        Command::Undo => handle_undo(session),
        Command::Favorite(index) => handle_favorite(session, index),
        Command::Select(pair) => handle_select(session, &pair),
        Command::Filter(category) => handle_filter(session, category),
        Command::FavoritesOnly(on) => {
            session.set_favorites_only(on);
            Ok(Vec::new())
        }
        Command::Search(text) => handle_search(session, text),
        Command::ResetFilter => {
            session.reset_filter();
            Ok(Vec::new())
        }
        Command::List => Ok(vec![AppEvent::ShowRows(session.visible())]),
        Command::Categories => handle_categories(session),
        Command::Pairs => handle_pairs(session),
        Command::Import(path) => handle_import(session, &path),
        Command::Export { path, format } => handle_export(session, &path, format),
        Command::Theme(change) => handle_theme(session, change),
        Command::Paste => handle_paste(session),
        Command::Translate(word) => handle_translate(session, word),
        Command::Help => Ok(vec![AppEvent::ShowLines(
            crate::shell::HELP.iter().map(|l| l.to_string()).collect(),
        )]),
        Command::Quit => Ok(Vec::new()),
    };

    finish(session, reply, rerender)
}

fn rerenders(command: &Command) -> bool {
    matches!(
        command,
        Command::Add(_)
            | Command::Edit { .. }
            | Command::Remove(_)
            | Command::Undo
            | Command::Favorite(_)
            | Command::Select(_)
            | Command::Filter(_)
            | Command::FavoritesOnly(_)
            | Command::Search(_)
            | Command::ResetFilter
            | Command::Import(_)
    )
}

/// Errors become a failure line. A storage failure still changed memory,
/// so the rows are refreshed for it as well.
fn finish(session: &Session, reply: Reply, rerender: bool) -> Vec<AppEvent> {
    match reply {
        Ok(mut events) => {
            if rerender {
                events.push(AppEvent::ShowRows(session.visible()));
            }
            events
        }
        Err(e @ DictError::StorageUnavailable { .. }) => {
            tracing::warn!("{}", e);
            let mut events = vec![AppEvent::Failure(format!("Saved in memory only: {e}"))];
            if rerender {
                events.push(AppEvent::ShowRows(session.visible()));
            }
            events
        }
        Err(e) => {
            tracing::debug!("Command failed: {}", e);
            vec![AppEvent::Failure(e.to_string())]
        }
    }
}
