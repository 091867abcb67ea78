//! Shared test setup
//!
//! One tracing subscriber per test binary, captured by the test harness, with the level
//! taken from `RUST_LOG` (this crate at `trace` otherwise). Coloured output is switched off
//! so transcripts compare as plain text.

use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{fmt, fmt::format::FmtSpan, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Safe to call from every test; only the first call does anything.
pub fn init_test_setup() {
    INIT.call_once(|| {
        colored::control::set_override(false);
        install_subscriber();
        debug!("test setup complete");
    });
}

fn install_subscriber() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,course_index=trace"));

    let layer = fmt::layer()
        .with_test_writer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(filter);

    if let Err(e) = tracing_subscriber::registry().with(layer).try_init() {
        eprintln!("test logging not installed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::Colorize;

    #[test]
    fn given_repeated_calls_when_initialising_then_output_is_plain() {
        init_test_setup();
        init_test_setup();
        assert_eq!("plain".red().bold().to_string(), "plain");
    }
}
