pub mod file_ops;
pub mod validation;

pub use file_ops::FileOperations;
pub use validation::{collect_selection, parse_sort_flags, parse_sultan_order, ValidationError};
