use std::path::Path;

use crate::errors::{map_export_error, map_file_load_error};
use crate::state::AppState;
use crate::ui::{set_status, show_error, StatusLevel};

/// File operations orchestration
/// Handles catalog I/O with user-facing error reporting
pub struct FileOperations<'a> {
    state: &'a mut AppState,
}

impl<'a> FileOperations<'a> {
    pub fn new(state: &'a mut AppState) -> Self {
        Self { state }
    }

    /// Load a catalog file from the given path
    pub fn load_file(&mut self, path: &Path) -> bool {
        match self.state.load_from_file(path.to_path_buf()) {
            Ok(()) => {
                let count = self
                    .state
                    .view
                    .as_ref()
                    .map(|v| v.items().len())
                    .unwrap_or(0);
                set_status(
                    format!("Loaded {} entries from {}", count, path.display()),
                    StatusLevel::Success,
                );
                true
            }
            Err(e) => {
                let (title, message, details) = map_file_load_error(&e, path);
                show_error(title, message, details);
                false
            }
        }
    }

    /// Export the filtered entries to a new catalog file
    pub fn export(&self, path: &Path) -> bool {
        match self.state.export_filtered(path) {
            Ok(count) => {
                set_status(
                    format!("Exported {} entries to {}", count, path.display()),
                    StatusLevel::Success,
                );
                true
            }
            Err(e) => {
                let (title, message, details) = map_export_error(&e, path);
                show_error(title, message, details);
                false
            }
        }
    }
}
