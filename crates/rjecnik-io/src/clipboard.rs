use arboard::Clipboard;
use rjecnik_core::DictError;

/// Current clipboard text; a refusal from the host is `CapabilityDenied`
pub fn read_text() -> Result<String, DictError> {
    let mut clipboard = Clipboard::new()
        .map_err(|e| DictError::CapabilityDenied(format!("clipboard unavailable: {e}")))?;

    clipboard
        .get_text()
        .map_err(|e| DictError::CapabilityDenied(format!("cannot read clipboard: {e}")))
}
