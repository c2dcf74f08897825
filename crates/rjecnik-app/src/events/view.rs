use rjecnik_core::category;
use rjecnik_core::{DictError, Session};
use rjecnik_types::{AppEvent, CategoryFilter, ThemeChange};

use super::Reply;

pub fn handle_select(session: &mut Session, pair: &str) -> Reply {
    session.select(pair)?;
    Ok(vec![AppEvent::Status(format!(
        "Language pair: {}",
        session.selected_pair()
    ))])
}

/// Only categories the index knows about are accepted
pub fn handle_filter(session: &mut Session, filter: CategoryFilter) -> Reply {
    if let CategoryFilter::Named(name) = &filter
        && !category::is_known(session.registry().active(), name)
    {
        return Err(DictError::Validation(format!("unknown category '{name}'")));
    }

    session.set_category(filter);
    Ok(vec![AppEvent::Status(format!(
        "Category: {}",
        session.filter_spec().category.as_str()
    ))])
}

pub fn handle_search(session: &mut Session, text: String) -> Reply {
    session.set_search(text);
    Ok(Vec::new())
}

pub fn handle_categories(session: &mut Session) -> Reply {
    Ok(vec![AppEvent::ShowLines(session.filter_choices())])
}

pub fn handle_pairs(session: &mut Session) -> Reply {
    let selected = session.selected_pair().to_string();
    let lines = session
        .known_namespaces()
        .into_iter()
        .map(|pair| {
            let marker = if pair == selected { "*" } else { " " };
            format!("{marker} {pair}")
        })
        .collect();
    Ok(vec![AppEvent::ShowLines(lines)])
}

pub fn handle_theme(session: &mut Session, change: ThemeChange) -> Reply {
    let theme = match change {
        ThemeChange::Show => session.theme(),
        ThemeChange::Toggle => session.toggle_theme()?,
        ThemeChange::Set(theme) => {
            session.set_theme(theme)?;
            theme
        }
    };
    Ok(vec![AppEvent::Status(format!("Theme: {theme:?}"))])
}
