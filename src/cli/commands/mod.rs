//! CLI command implementations.

mod config;
mod doctor;
mod fetch;
mod summarize;

pub use config::run_config;
pub use doctor::run_doctor;
pub use fetch::run_fetch;
pub use summarize::run_summarize;
