//! Console tracing setup.

use std::str::FromStr;
use std::sync::{Mutex, Once};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::INFO;

static TRACING_INSTALLED: Once = Once::new();
static LOG_LEVEL: Mutex<LevelFilter> = Mutex::new(DEFAULT_LOG_LEVEL);

fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level).unwrap_or(DEFAULT_LOG_LEVEL)
}

fn default_level() -> LevelFilter {
    LOG_LEVEL.lock().map_or(DEFAULT_LOG_LEVEL, |guard| *guard)
}

/// Sets the level used when `RUST_LOG` is not set.
///
/// Unknown names fall back to `info`. Only affects a later [`install_tracing`].
pub fn set_default_level(level: &str) {
    let parsed = parse_level(level);
    if let Ok(mut guard) = LOG_LEVEL.lock() {
        *guard = parsed;
    }
}

/// Install a console subscriber for the renderer's trace output (idempotent).
///
/// `RUST_LOG` takes precedence over the default level. If another global subscriber is
/// already set, that one is kept.
pub fn install_tracing() {
    TRACING_INSTALLED.call_once(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(default_level().into())
            .from_env_lossy();

        let console = fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_filter(filter);

        if tracing_subscriber::registry().with(console).try_init().is_err() {
            eprintln!("gvdom tracing subscriber failed to initialize");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_levels_with_fallback() {
        assert_eq!(parse_level("debug"), LevelFilter::DEBUG);
        assert_eq!(parse_level("TRACE"), LevelFilter::TRACE);
        assert_eq!(parse_level("loud"), LevelFilter::INFO);
    }

    #[test]
    fn install_is_idempotent() {
        install_tracing();
        install_tracing();
        tracing::info!("still alive");
    }
}
