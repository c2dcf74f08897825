use std::fs;
use std::path::Path;

use rjecnik_core::DictError;

/// Read an import file; any failure to open it counts as access refused.
/// Text that is not UTF-8 is a parse error.
pub fn read_text(path: &Path) -> Result<String, DictError> {
    let bytes = fs::read(path).map_err(|e| denied("read", path, e))?;
    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());

    String::from_utf8(bytes).map_err(|e| {
        DictError::Parse(format!(
            "{} is not UTF-8 text (byte {})",
            path.display(),
            e.utf8_error().valid_up_to()
        ))
    })
}

/// Write an export file, creating parent directories
pub fn write_text(path: &Path, contents: &str) -> Result<(), DictError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| denied("create", parent, e))?;
    }
    fs::write(path, contents).map_err(|e| denied("write", path, e))?;
    tracing::info!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

fn denied(action: &str, path: &Path, e: std::io::Error) -> DictError {
    DictError::CapabilityDenied(format!("cannot {action} {}: {e}", path.display()))
}
