use ottocollect_core::CoreError;
use std::io::ErrorKind;
use std::path::Path;

/// Map catalog loading errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_file_load_error(error: &anyhow::Error, path: &Path) -> (String, String, String) {
    match error.downcast_ref::<CoreError>() {
        Some(CoreError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => (
            "File Not Found".to_string(),
            "The catalog file could not be found.".to_string(),
            format!(
                "Path: {}\n\nPlease verify the file exists and you have permission to read it.",
                path.display()
            ),
        ),
        Some(CoreError::Io { source, .. }) if source.kind() == ErrorKind::PermissionDenied => (
            "Permission Denied".to_string(),
            "Permission denied.".to_string(),
            format!("You don't have permission to read this file:\n{}", path.display()),
        ),
        Some(CoreError::Json(e)) if e.line() > 0 => (
            "Invalid Catalog".to_string(),
            "The catalog file is not valid catalog JSON.".to_string(),
            format!("{} (line {}, column {})", e, e.line(), e.column()),
        ),
        // Raised while converting an already parsed value; no position to show
        Some(CoreError::Json(e)) => (
            "Invalid Catalog".to_string(),
            "The catalog file is not valid catalog JSON.".to_string(),
            e.to_string(),
        ),
        _ => (
            "Error Loading File".to_string(),
            "Failed to load catalog file.".to_string(),
            format!("{:#}", error),
        ),
    }
}

/// Map export errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_export_error(error: &anyhow::Error, path: &Path) -> (String, String, String) {
    match error.downcast_ref::<CoreError>() {
        Some(CoreError::Io { source, .. }) if source.kind() == ErrorKind::PermissionDenied => (
            "Permission Denied".to_string(),
            "Permission denied.".to_string(),
            format!("You don't have permission to write to:\n{}", path.display()),
        ),
        Some(CoreError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => (
            "Directory Not Found".to_string(),
            "The export location does not exist.".to_string(),
            format!("Path: {}", path.display()),
        ),
        _ => (
            "Error Exporting".to_string(),
            "Failed to write the filtered catalog.".to_string(),
            format!("{:#}", error),
        ),
    }
}
