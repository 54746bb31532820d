pub mod dialogs;
pub mod formatting;
pub mod report;
pub mod types;

pub use dialogs::{set_status, show_error, show_warnings};
pub use report::{render_report, ReportOptions};
pub use types::StatusLevel;
