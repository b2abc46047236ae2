//! # SpreadKit
//!
//! Layout tooling for the tarot spread admin console.
//!
//! ## Architecture
//!
//! SpreadKit is organized as a workspace with multiple crates:
//!
//! 1. **spreadkit-core** - Data types, errors, events, persistence trait
//! 2. **spreadkit-designer** - Board math, canvas, connectors, sync, editor
//! 3. **spreadkit-settings** - Configuration files and validation
//! 4. **spreadkit** - The `spreadkit` CLI that integrates all crates

pub mod commands;

pub use spreadkit_core::{
    AppEvent, Error, EventBus, Locale, MemorySpreadStore, Position, Result, SpreadPayload,
    SpreadRecord, SpreadStore,
};
pub use spreadkit_designer as designer;
pub use spreadkit_settings::{Config, EditorSettings, LoggingSettings};

use spreadkit_designer::EditorOptions;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Editor options from the configured editor section.
pub fn editor_options(settings: &EditorSettings) -> EditorOptions {
    EditorOptions {
        default_locale: settings.default_locale,
        history_limit: settings.history_limit,
        coalesce_moves: settings.coalesce_moves,
    }
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - `RUST_LOG` support, falling back to the configured level
/// - pretty or JSON output on stderr, so stdout stays free for command output
pub fn init_logging(settings: &LoggingSettings, verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose { "debug" } else { settings.level.as_str() };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if settings.json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
            .pretty();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
