//! Command implementations.

pub mod config;
pub mod extract;
pub mod inspect;
mod progress;

pub use self::config::execute_config;
pub use self::extract::execute_extract;
pub use self::inspect::execute_inspect;
pub use self::progress::StderrProgress;
