use std::env;

use tracing::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

pub const SVC_LABEL_ENVVAR: &str = "STRATA_SVC_LABEL";

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    whoami: String,
}

impl LoggerConfig {
    /// Creates a new instance with whoami set.
    pub fn new(whoami: String) -> Self {
        Self { whoami }
    }

    pub fn with_base_name(s: &str) -> Self {
        Self::new(get_whoami_string(s))
    }

    pub fn whoami(&self) -> &str {
        &self.whoami
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::with_base_name("(strata-tool)")
    }
}

/// Initializes the logging subsystem with the provided config.
///
/// Logs are written to stderr so that stdout only carries the output of the program. The filter is
/// read from `RUST_LOG`.
pub fn init(config: LoggerConfig) {
    let filt = tracing_subscriber::EnvFilter::from_default_env();

    let stderr_sub = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(filt);

    tracing_subscriber::registry().with(stderr_sub).init();

    info!(whoami = %config.whoami, "logging started");
}

/// Gets the service label from the standard envvar, which should be included
/// in the whoami string.
pub fn get_service_label_from_env() -> Option<String> {
    env::var(SVC_LABEL_ENVVAR).ok()
}

/// Computes a standard whoami string.
pub fn get_whoami_string(base: &str) -> String {
    whoami_with_label(base, get_service_label_from_env())
}

fn whoami_with_label(base: &str, label: Option<String>) -> String {
    match label {
        Some(label) => format!("{base}%{label}"),
        None => base.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whoami_string() {
        assert_eq!(whoami_with_label("deposit-reclaim", None), "deposit-reclaim");
        assert_eq!(
            whoami_with_label("deposit-reclaim", Some("alice".to_owned())),
            "deposit-reclaim%alice",
            "service label should be appended to the base name"
        );
    }

    #[test]
    fn test_logger_config() {
        let config = LoggerConfig::new("deposit-reclaim".to_owned());
        assert_eq!(config.whoami(), "deposit-reclaim");
    }
}
