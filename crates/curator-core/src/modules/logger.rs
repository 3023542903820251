//! Process-wide tracing setup.

use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` wins when set, otherwise `default_level`
/// (e.g. `"info"` or `"curator_core=debug,info"`).
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global fmt subscriber. A second call is a no-op.
pub fn init_logger(default_level: &str) {
    let installed =
        tracing_subscriber::fmt()
            .with_env_filter(env_filter(default_level))
            .with_target(false)
            .try_init();
    if installed.is_err() {
        tracing::debug!("[Logger] Subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_falls_back() {
        let filter = env_filter("not a [valid filter");
        assert!(!filter.to_string().is_empty());
    }

    #[test]
    fn test_double_init_is_harmless() {
        init_logger("debug");
        init_logger("info");
    }
}
