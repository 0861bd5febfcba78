//! Structured logging initialization.

use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry};

/// Handle for retargeting the log filter after initialization.
pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Initialize the tracing subscriber with a default level.
///
/// Runs before configuration is loaded so load failures are reported as
/// structured events. `RUST_LOG` wins when set; otherwise the returned
/// handle lets the configured level take over once known.
pub fn init(default_level: &str) -> FilterHandle {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("audit_aggregator={default_level}")));
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    handle
}

/// Apply the configured log level, unless `RUST_LOG` already overrode it.
pub fn apply_config_level(handle: &FilterHandle, level: &str) {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    if let Err(e) = handle.reload(EnvFilter::new(format!("audit_aggregator={level}"))) {
        tracing::warn!(error = %e, "failed to apply configured log level");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_replaces_default_filter() {
        std::env::remove_var("RUST_LOG");
        let (_layer, handle): (_, FilterHandle) =
            reload::Layer::new(EnvFilter::new("audit_aggregator=info"));

        apply_config_level(&handle, "trace");

        let current = handle.with_current(|filter| filter.to_string()).unwrap();
        assert!(current.contains("trace"));
    }
}
