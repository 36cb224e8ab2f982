//! Logging setup
//!
//! `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Filter directives for a configured level, e.g. `ga_dashboard=info,tower_http=info`
pub fn default_directives(level: &str) -> String {
    format!("ga_dashboard={level},tower_http={level}")
}

/// Install the global subscriber. Call once at process start.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives("debug"), "ga_dashboard=debug,tower_http=debug");
    }

    #[test]
    fn test_directives_parse() {
        assert!(EnvFilter::try_new(default_directives("info")).is_ok());
    }
}
