use colored::{ColoredString, Colorize};

use super::types::StatusLevel;

/// Helper function to print a status line with semantic level
/// Status goes to stderr so the report on stdout stays clean
pub fn set_status(text: impl AsRef<str>, level: StatusLevel) {
    eprintln!("{}", paint(text.as_ref(), level));
}

fn paint(text: &str, level: StatusLevel) -> ColoredString {
    match level {
        StatusLevel::Info => text.normal(),
        StatusLevel::Success => text.green(),
        StatusLevel::Warning => text.yellow(),
        StatusLevel::Error => text.red().bold(),
    }
}

/// Helper function to show an error with title, message and details
pub fn show_error(title: impl AsRef<str>, message: impl AsRef<str>, details: impl AsRef<str>) {
    eprintln!("{} {}", paint(title.as_ref(), StatusLevel::Error), message.as_ref());

    for line in details.as_ref().lines() {
        eprintln!("  {}", line.dimmed());
    }
}

/// Helper function to list catalog warnings under a heading
pub fn show_warnings(heading: impl AsRef<str>, warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }

    set_status(heading, StatusLevel::Warning);
    for (i, warning) in warnings.iter().enumerate() {
        eprintln!("  {}. {}", i + 1, warning);
    }
}
