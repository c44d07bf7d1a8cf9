// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use std::str::FromStr;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const NOISY_MODULES: &str = concat!(
    "h2=info,hyper=info,hyper_util=info,reqwest=info,",
    "alloy_transport_http=info,alloy_rpc_client=info"
);

/// Expands a bare level (e.g. "debug") with transport-module defaults.
/// Custom directive strings (with ',' or '=') are respected as-is.
pub fn filter_spec(log_level: &str) -> String {
    let normalized = log_level.trim();
    if normalized.is_empty() {
        format!("info,{NOISY_MODULES}")
    } else if normalized.contains(',') || normalized.contains('=') {
        normalized.to_string()
    } else {
        format!("{normalized},{NOISY_MODULES}")
    }
}

pub fn setup_logging(log_level: &str, json_format: bool) {
    let filter_spec = filter_spec(log_level);
    let filter = EnvFilter::from_str(&filter_spec).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry().with(filter);

    // Status lines own stdout; diagnostics go to stderr.
    if json_format {
        let json_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_current_span(false);
        subscriber.with(json_layer).init();
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact();
        subscriber.with(fmt_layer).init();
    }

    let base = filter_spec.split(',').map(str::trim).next().unwrap_or("info");
    tracing::debug!(
        "Logging initialized\n  base: {base}\n  format: {}",
        if json_format { "json" } else { "compact" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_gets_transport_defaults() {
        let spec = filter_spec("debug");
        assert!(spec.starts_with("debug,"));
        assert!(spec.contains("hyper=info"));
    }

    #[test]
    fn custom_directives_pass_through() {
        assert_eq!(filter_spec(" warn,chain_probe=trace "), "warn,chain_probe=trace");
        assert_eq!(filter_spec("chain_probe=debug"), "chain_probe=debug");
    }

    #[test]
    fn blank_level_falls_back_to_info() {
        assert!(filter_spec("").starts_with("info,"));
        assert!(EnvFilter::from_str(&filter_spec("")).is_ok());
    }
}
