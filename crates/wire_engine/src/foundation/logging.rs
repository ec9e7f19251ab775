//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace, LevelFilter};

/// Initialize the logging system from `RUST_LOG`
///
/// Safe to call more than once; later calls are ignored. Returns whether
/// this call installed the logger.
pub fn init() -> bool {
    installed(env_logger::try_init())
}

/// Initialize the logging system with a default level
///
/// `RUST_LOG` still overrides the level when it is set. Returns whether
/// this call installed the logger.
pub fn init_with_level(level: LevelFilter) -> bool {
    installed(env_logger::Builder::new().filter_level(level).parse_default_env().try_init())
}

fn installed(result: Result<(), log::SetLoggerError>) -> bool {
    match result {
        Ok(()) => true,
        Err(_) => {
            log::debug!("logger already installed, keeping the existing one");
            false
        }
    }
}

/// Parse a level name such as `"debug"`, falling back to `Info`
pub fn parse_level(name: &str) -> LevelFilter {
    name.parse().unwrap_or(LevelFilter::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("WARN"), LevelFilter::Warn);
        assert_eq!(parse_level("nonsense"), LevelFilter::Info);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init();
        assert!(!init());
        assert!(!init_with_level(LevelFilter::Trace));
    }
}
