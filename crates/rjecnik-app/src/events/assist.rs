use rjecnik_core::quickfill::{QuickFill, split_pair};
use rjecnik_core::{DictError, Session};
use rjecnik_types::AppEvent;

use super::Reply;

/// Clipboard text is only ever offered as a suggestion
pub fn handle_paste(session: &mut Session) -> Reply {
    let text = rjecnik_io::clipboard::read_text()?;
    let fill = split_pair(&text);

    if fill.word.is_none() && fill.translation.is_none() {
        return Err(DictError::Validation("clipboard holds no text".into()));
    }

    Ok(vec![prefill(session, fill)])
}

/// Records the suggestion so a bare `translate` can pick up its word
pub fn prefill(session: &mut Session, fill: QuickFill) -> AppEvent {
    session.suggest(fill.clone());
    AppEvent::Prefill {
        word: fill.word,
        translation: fill.translation,
    }
}

/// Without a word, the last suggested one is used
pub fn handle_translate(session: &mut Session, word: Option<String>) -> Reply {
    let word = word
        .filter(|w| !w.trim().is_empty())
        .or_else(|| session.suggestion().word.clone())
        .unwrap_or_default();

    let url = session.translate_link(&word)?;
    Ok(vec![AppEvent::ShowLines(vec![url.to_string()])])
}
