/*
[INPUT]:  Public API exports for biscoint-cli crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod output;
pub mod params;

// Re-export main types for convenience
pub use config::CliConfig;
pub use output::{error_report, render};
pub use params::{parse_param, parse_params};
