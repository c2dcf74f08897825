use std::path::Path;

use rjecnik_core::Session;
use rjecnik_types::{AppEvent, TransferFormat};

use super::Reply;

pub fn handle_import(session: &mut Session, path: &Path) -> Reply {
    let text = rjecnik_io::files::read_text(path)?;
    let format = TransferFormat::from_path(path);

    let report = session.import(&text, format)?;
    Ok(vec![AppEvent::Status(format!(
        "Imported {} new of {} entries from {}",
        report.added,
        report.total,
        path.display()
    ))])
}

pub fn handle_export(session: &mut Session, path: &Path, format: Option<TransferFormat>) -> Reply {
    let format = format.unwrap_or_else(|| TransferFormat::from_path(path));
    let contents = session.export(format)?;
    rjecnik_io::files::write_text(path, &contents)?;

    Ok(vec![AppEvent::Status(format!(
        "Exported {} entries as {} to {}",
        session.entries().len(),
        format.extension(),
        path.display()
    ))])
}
