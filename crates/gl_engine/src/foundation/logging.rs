//! Logging utilities

use env_logger::Env;

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// `default_level` is used as the filter unless `RUST_LOG` is set.
/// Returns `false` if a logger was already installed.
pub fn init(default_level: &str) -> bool {
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        init("warn");
        assert!(!init("debug"));
    }
}
