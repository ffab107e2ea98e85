//! Logging setup
//!
//! Installs a `tracing` subscriber configured from [`LoggingConfig`]. The
//! library itself only emits events; applications decide whether to call
//! [`init`].

use crate::config::LoggingConfig;

/// Initialize the global subscriber
///
/// Returns false when a global subscriber was already installed, in which
/// case the existing one is left in place.
///
/// # Arguments
/// * `config` - Logging configuration
///
/// # Returns
/// * `bool` - True if this call installed the subscriber
pub fn init(config: &LoggingConfig) -> bool {
    let level = config.level.to_tracing_level();

    // Build subscriber with level filter
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    // Configure timestamps
    let installed = if config.timestamps {
        subscriber.try_init().is_ok()
    } else {
        subscriber.without_time().try_init().is_ok()
    };

    if installed {
        tracing::debug!("Logging initialized at level {}", level);
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn test_second_init_keeps_existing_subscriber() {
        let config = LoggingConfig {
            level: LogLevel::Debug,
            timestamps: false,
        };
        init(&config);
        assert!(!init(&config));
    }
}
