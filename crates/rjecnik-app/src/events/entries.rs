use rjecnik_core::Session;
use rjecnik_core::store::Insert;
use rjecnik_types::{AppEvent, EntryDraft};

use super::Reply;

pub fn handle_add(session: &mut Session, draft: EntryDraft) -> Reply {
    let label = format!("{} — {}", draft.word.trim(), draft.translation.trim());

    let status = match session.add(draft)? {
        Insert::Added => {
            tracing::info!("Added '{}' to '{}'", label, session.selected_pair());
            format!("Added {label}")
        }
        Insert::Duplicate => format!("{label} is already in the dictionary"),
    };
    Ok(vec![AppEvent::Status(status)])
}

/// Goes through the session's edit state so a pair switch cancels it
pub fn handle_edit(session: &mut Session, index: usize, draft: EntryDraft) -> Reply {
    session.begin_edit(index)?;
    let entry = session.commit_edit(draft)?;
    Ok(vec![AppEvent::Status(format!(
        "Updated #{index}: {} — {}",
        entry.word, entry.translation
    ))])
}

pub fn handle_remove(session: &mut Session, index: usize) -> Reply {
    let entry = session.remove(index)?;
    Ok(vec![AppEvent::Status(format!(
        "Removed {} — {} (type `undo` to restore)",
        entry.word, entry.translation
    ))])
}

pub fn handle_undo(session: &mut Session) -> Reply {
    let status = match session.restore()? {
        Some(position) => format!("Restored entry #{position}"),
        None => "Nothing to undo".to_string(),
    };
    Ok(vec![AppEvent::Status(status)])
}

pub fn handle_favorite(session: &mut Session, index: usize) -> Reply {
    let favorite = session.toggle_favorite(index)?;
    let status = if favorite {
        format!("#{index} marked as favorite")
    } else {
        format!("#{index} is no longer a favorite")
    };
    Ok(vec![AppEvent::Status(status)])
}
