//! Tracing setup
//!
//! Logs always go to stderr so they never interleave with generated output on stdout.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, Settings};

/// Filter directive from settings and the `-v` count
fn filter_directive(settings: &Settings, verbose: u8) -> String {
    match verbose {
        0 => settings.log_level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Initialize the global subscriber. `RUST_LOG` wins over everything else.
pub fn init_tracing(settings: &Settings, verbose: u8) {
    let directive = filter_directive(settings, verbose);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&directive))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match settings.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.compact().without_time().with_target(false).init(),
    }

    tracing::debug!(directive = %directive, format = ?settings.log_format, "tracing initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        let settings = Settings {
            log_level: "info".to_string(),
            ..Settings::default()
        };

        assert_eq!(filter_directive(&settings, 0), "info");
        assert_eq!(filter_directive(&settings, 1), "debug");
        assert_eq!(filter_directive(&settings, 4), "trace");
    }
}
