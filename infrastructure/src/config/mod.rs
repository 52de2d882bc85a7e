//! Configuration loading

pub mod file_config;
pub mod loader;

pub use file_config::{FileConfig, FileDirectorConfig, FileGatewayConfig, FileMeetingConfig};
pub use loader::ConfigLoader;
