use std::str::FromStr;

use tracing::Level;

use crate::model::LoggingConfig;

/// Parse a level name from config, falling back to INFO for anything unknown.
pub fn level_from_config(config: &LoggingConfig) -> Level {
    Level::from_str(config.level.trim()).unwrap_or(Level::INFO)
}

/// Install a compact stderr subscriber at `level`. Safe to call multiple
/// times; later calls are no-ops for the global subscriber.
pub fn init(level: Level) {
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
}

/// Install the subscriber at the level named in `config`
pub fn init_from_config(config: &LoggingConfig) {
    init(level_from_config(config));
}

/// Install the subscriber at INFO
pub fn init_default() {
    init(Level::INFO);
}
