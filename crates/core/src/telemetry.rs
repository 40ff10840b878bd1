use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs a process-wide `tracing` subscriber driven by `RUST_LOG`,
/// defaulting to `info` when the variable is unset or unparsable.
pub fn init(default_filter: &str) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

	let registry = tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer());

	// Tests may initialize telemetry more than once across the suite; ignore
	// the error from a subscriber that is already installed.
	let _ = registry.try_init();
}
