pub mod log;
pub mod severity;

pub use log::{init, log};
pub use severity::LogSeverity;
