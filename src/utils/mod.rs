pub mod errors;
pub mod format;

pub use errors::AppError;
pub use format::{format_duration, format_seconds};
