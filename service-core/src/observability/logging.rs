use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber: `RUST_LOG` (or `log_level` when unset)
/// filtering into single-line JSON events with file and line.
pub fn init_tracing(service_name: &str, log_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .json()
                .flatten_event(true),
        )
        .try_init();

    if let Err(e) = result {
        eprintln!(
            "Failed to install tracing subscriber for service '{}': {}",
            service_name, e
        );
        return;
    }

    tracing::info!(service = %service_name, "Tracing initialized");
}
