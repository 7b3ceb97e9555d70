//! Logging setup for the `rleplus` binary.

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Default filter directives, used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVES: &str = "info,rleplus=debug";

/// Installs the global tracing subscriber. Logs go to stderr so they never
/// mix with decoded output on stdout.
///
/// `RUST_LOG` overrides `directives` when set.
pub fn setup_logging(directives: &str, pretty: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    if pretty {
        let main_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_line_number(true)
            .with_timer(UtcTime::rfc_3339());

        tracing_subscriber::registry()
            .with(filter)
            .with(main_layer)
            .init()
    } else {
        let main_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .flatten_event(true)
            .with_target(false)
            .with_current_span(true)
            .with_span_list(true)
            .with_line_number(true)
            .with_file(true)
            .with_timer(UtcTime::rfc_3339());

        tracing_subscriber::registry()
            .with(filter)
            .with(main_layer)
            .init()
    }
}
