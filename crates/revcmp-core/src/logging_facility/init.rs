//! Logging initialization module

use std::str::FromStr;
use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "revcmp_core=debug",
            Profile::Production | Profile::Test => "revcmp_core=info",
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Profile::Development),
            "prod" | "production" => Ok(Profile::Production),
            "test" => Ok(Profile::Test),
            other => Err(format!("unknown logging profile: {other}")),
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at startup; later calls are ignored, as is a call made after
/// another global subscriber was installed. `RUST_LOG` overrides the
/// profile's default filter.
///
/// - **Development**: human-readable logs at debug level
/// - **Production**: JSON logs at info level
/// - **Test**: bare registry; use `init_test_capture()` to record events
///
/// # Example
///
/// ```
/// use revcmp_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_directive()));
        match profile {
            Profile::Development => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .try_init();
            }
            Profile::Production => {
                let _ = tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .try_init();
            }
            Profile::Test => {
                let _ = tracing_subscriber::registry().try_init();
            }
        }
    });
}
