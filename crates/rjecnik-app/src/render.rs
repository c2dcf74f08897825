use kanal::AsyncReceiver;
use rjecnik_types::{AppEvent, DisplayRow};

/// Prints everything the event loop sends until it shuts down
pub async fn render_loop(app_to_ui_rx: AsyncReceiver<AppEvent>) -> anyhow::Result<()> {
    while let Ok(event) = app_to_ui_rx.recv().await {
        if matches!(event, AppEvent::Shutdown) {
            break;
        }

        for line in format_event(&event) {
            if matches!(event, AppEvent::Failure(_)) {
                eprintln!("{line}");
            } else {
                println!("{line}");
            }
        }
    }

    tracing::debug!("Renderer stopped");
    Ok(())
}

pub fn format_event(event: &AppEvent) -> Vec<String> {
    match event {
        AppEvent::ShowRows(rows) if rows.is_empty() => vec!["(no entries)".to_string()],
        AppEvent::ShowRows(rows) => rows.iter().map(format_row).collect(),
        AppEvent::ShowLines(lines) => lines.clone(),
        AppEvent::Status(text) => vec![text.clone()],
        AppEvent::Failure(text) => vec![format!("error: {text}")],
        AppEvent::Prefill { word, translation } => {
            let word = word.as_deref().unwrap_or_default();
            let translation = translation.as_deref().unwrap_or_default();
            vec![format!("suggested: add \"{word}\" \"{translation}\"")]
        }
        AppEvent::Command(_) | AppEvent::Bridge(_) | AppEvent::Shutdown => Vec::new(),
    }
}

pub fn format_row(row: &DisplayRow) -> String {
    let star = if row.favorite { "★" } else { " " };
    format!(
        "{:>3}. {} {} — {} [{}]",
        row.index, star, row.word, row.translation, row.category
    )
}
