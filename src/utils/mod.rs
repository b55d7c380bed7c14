mod format;

pub use format::{compact_number, format_date};
