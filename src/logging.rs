//! Diagnostic output for the search core.
//!
//! Everything goes to stderr so result output on stdout stays machine readable.
//! `RUST_LOG` wins over the verbosity flag when it is set.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Map `-v` occurrences to a default filter directive.
#[must_use]
pub fn default_directive(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	}
}

/// Install the global subscriber. Later calls are ignored.
pub fn initialize(verbosity: u8) {
	let env_filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

	let stderr_layer = fmt::layer()
		.with_writer(std::io::stderr)
		.with_target(true)
		.with_level(true)
		.with_thread_ids(false)
		.compact();

	let _ = tracing_subscriber::registry()
		.with(env_filter)
		.with(stderr_layer)
		.try_init();
}
