//! Logging setup.
//!
//! Logs always go to stderr: stdout is reserved for the MCP protocol, and a
//! single stray line there corrupts the stream. Levels come from `RUST_LOG`
//! when set, otherwise from the CLI verbosity flags.

use tracing_subscriber::{fmt, EnvFilter};

/// Log level selection for the subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    /// Disable logging entirely.
    Off,
}

impl LogLevel {
    /// Map CLI verbosity to a level: 0 = info, 1 = debug, 2+ = trace.
    pub fn from_verbosity(verbosity: u8) -> Self {
        match verbosity {
            0 => LogLevel::Info,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

/// Initialize the global subscriber. Call once at startup.
///
/// `RUST_LOG` wins over the programmatic level when set.
pub fn init_logging(level: LogLevel) {
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level.directive())
    };

    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
