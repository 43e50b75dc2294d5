//! Configuration management for the console

pub mod console_config;
pub mod loader;
pub mod logging_config;

pub use console_config::{ConfigLayer, ConsoleConfig, DEFAULT_CONFIG_FILE, DEFAULT_GIT_EXECUTABLE};
pub use loader::{ConfigLoader, ConfigSource};
pub use logging_config::LoggingConfig;
