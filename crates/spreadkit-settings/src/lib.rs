//! SpreadKit Settings Crate
//!
//! Handles application configuration: editor behaviour and logging.

pub mod config;
pub mod error;

pub use config::{Config, EditorSettings, LoggingSettings, MAX_HISTORY_LIMIT};
pub use error::{ConfigError, Result, SettingsError};
