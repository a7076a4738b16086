use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail, ensure};
use serde::Deserialize;

use fedsearch::{DEFAULT_ADDRESS, DEFAULT_TOKEN_HEADER, DISPLAY_LIMIT, RemoteConfig};

use crate::cli::CliArgs;

use super::resolved::{BackendKind, ResolvedConfig};
use super::util::{absolutize, sanitize_token};

const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 2_000;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	search: SearchSection,
	remote: RemoteSection,
	local: LocalSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SearchSection {
	backend: Option<String>,
	display_limit: Option<usize>,
	timeout_ms: Option<u64>,
}

/// Scheduler connection settings as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RemoteSection {
	address: Option<String>,
	token: Option<String>,
	token_header: Option<String>,
	timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LocalSection {
	snapshot: Option<PathBuf>,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(backend) = cli.backend {
			self.search.backend = Some(backend.as_str().to_string());
		}
		if let Some(limit) = cli.limit {
			self.search.display_limit = Some(limit);
		}
		if let Some(address) = cli.address.clone() {
			self.remote.address = Some(address);
		}
		if let Some(token) = cli.token.clone() {
			self.remote.token = Some(token);
		}
		if let Some(snapshot) = cli.snapshot.clone() {
			self.local.snapshot = Some(snapshot);
		}
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], validating and
	/// filling defaults where required.
	pub(super) fn resolve(self) -> Result<ResolvedConfig> {
		let backend = match self.search.backend.as_deref().map(str::trim) {
			None | Some("remote") => BackendKind::Remote,
			Some("local") => BackendKind::Local,
			Some(other) => bail!("unknown search backend '{other}' (expected 'remote' or 'local')"),
		};

		let display_limit = self.search.display_limit.unwrap_or(DISPLAY_LIMIT);
		ensure!(display_limit > 0, "display_limit must be at least 1");

		let wait_timeout = Duration::from_millis(
			self.search
				.timeout_ms
				.unwrap_or(DEFAULT_WAIT_TIMEOUT_MS),
		);

		let address = self
			.remote
			.address
			.map(|address| address.trim().to_string())
			.filter(|address| !address.is_empty())
			.unwrap_or_else(|| DEFAULT_ADDRESS.to_string());
		ensure!(
			address.starts_with("http://") || address.starts_with("https://"),
			"remote address must start with http:// or https://, got '{address}'"
		);

		let token_header = self
			.remote
			.token_header
			.map(|header| header.trim().to_string())
			.filter(|header| !header.is_empty())
			.unwrap_or_else(|| DEFAULT_TOKEN_HEADER.to_string());

		let remote = RemoteConfig {
			address,
			token: sanitize_token(self.remote.token),
			token_header,
			timeout_ms: self
				.remote
				.timeout_ms
				.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
		};

		let snapshot = self.local.snapshot.map(absolutize).transpose()?;

		Ok(ResolvedConfig {
			backend,
			display_limit,
			wait_timeout,
			remote,
			snapshot,
		})
	}
}

#[cfg(test)]
mod tests {
	use clap::Parser;

	use super::*;

	#[test]
	fn defaults_resolve_to_remote_backend() {
		let resolved = RawConfig::default().resolve().unwrap();
		assert_eq!(resolved.backend, BackendKind::Remote);
		assert_eq!(resolved.display_limit, DISPLAY_LIMIT);
		assert_eq!(resolved.remote, RemoteConfig::default());
		assert_eq!(resolved.wait_timeout, Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS));
		assert!(resolved.snapshot.is_none());
	}

	#[test]
	fn cli_overrides_take_precedence() {
		let cli = CliArgs::parse_from([
			"fedsearch",
			"--backend",
			"local",
			"--limit",
			"5",
			"--address",
			"https://nomad.example:4646/",
			"--token",
			"s3cr3t",
			"--snapshot",
			"/srv/entities.json",
			"web",
		]);

		let mut config = RawConfig::default();
		config.remote.address = Some("http://ignored:4646".into());
		config.search.display_limit = Some(20);
		config.apply_cli_overrides(&cli);
		let resolved = config.resolve().unwrap();

		assert_eq!(resolved.backend, BackendKind::Local);
		assert_eq!(resolved.display_limit, 5);
		assert_eq!(resolved.remote.address, "https://nomad.example:4646/");
		assert_eq!(resolved.remote.token.as_deref(), Some("s3cr3t"));
		assert_eq!(resolved.snapshot, Some(PathBuf::from("/srv/entities.json")));
	}

	#[test]
	fn file_sections_deserialize() {
		let config: RawConfig = config::Config::builder()
			.add_source(config::File::from_str(
				"[search]\nbackend = \"local\"\ntimeout_ms = 250\n\n[remote]\ntoken_header = \"X-Custom\"\ntimeout_ms = 900\n",
				config::FileFormat::Toml,
			))
			.build()
			.unwrap()
			.try_deserialize()
			.unwrap();
		let resolved = config.resolve().unwrap();

		assert_eq!(resolved.backend, BackendKind::Local);
		assert_eq!(resolved.wait_timeout, Duration::from_millis(250));
		assert_eq!(resolved.remote.token_header, "X-Custom");
		assert_eq!(resolved.remote.timeout_ms, 900);
	}

	#[test]
	fn unknown_backend_is_rejected() {
		let mut config = RawConfig::default();
		config.search.backend = Some("graphql".into());
		let err = config.resolve().unwrap_err();
		assert!(err.to_string().contains("graphql"));
	}

	#[test]
	fn zero_limit_is_rejected() {
		let mut config = RawConfig::default();
		config.search.display_limit = Some(0);
		assert!(config.resolve().is_err());
	}

	#[test]
	fn address_requires_http_scheme() {
		let mut config = RawConfig::default();
		config.remote.address = Some("nomad.example:4646".into());
		assert!(config.resolve().is_err());
	}
}
