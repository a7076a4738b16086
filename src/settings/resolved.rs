use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use fedsearch::RemoteConfig;

use super::util::redact;

/// Which search path answers queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
	/// Fuzzy search on the scheduler itself.
	Remote,
	/// Client-side matching over cached job and node lists.
	Local,
}

impl BackendKind {
	pub fn as_str(self) -> &'static str {
		match self {
			BackendKind::Remote => "remote",
			BackendKind::Local => "local",
		}
	}
}

impl fmt::Display for BackendKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Settings after files, environment and flags have been merged and validated.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
	pub backend: BackendKind,
	pub display_limit: usize,
	/// How long the CLI waits for the last query to settle.
	pub wait_timeout: Duration,
	pub remote: RemoteConfig,
	/// Entity snapshot for the local backend; entities load over HTTP when unset.
	pub snapshot: Option<PathBuf>,
}

impl ResolvedConfig {
	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		println!("Effective configuration:");
		println!("  Backend: {}", self.backend);
		println!("  Display limit: {}", self.display_limit);
		println!("  Wait timeout: {} ms", self.wait_timeout.as_millis());
		println!("  Address: {}", self.remote.address);
		println!("  Token: {}", redact(self.remote.token.as_deref()));
		println!("  Token header: {}", self.remote.token_header);
		println!("  Request timeout: {} ms", self.remote.timeout_ms);
		match &self.snapshot {
			Some(path) => println!("  Snapshot: {}", path.display()),
			None => println!("  Snapshot: (load from address)"),
		}
	}
}
