//! Shared HTTP plumbing for talking to the scheduler API.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{Result, SearchError};

/// Header carrying the ACL token when none is configured explicitly.
pub const DEFAULT_TOKEN_HEADER: &str = "X-Nomad-Token";

/// Default scheduler API address.
pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:4646";

/// Connection settings for the scheduler API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
	pub address: String,
	pub token: Option<String>,
	pub token_header: String,
	pub timeout_ms: u64,
}

impl Default for RemoteConfig {
	fn default() -> Self {
		Self {
			address: DEFAULT_ADDRESS.to_string(),
			token: None,
			token_header: DEFAULT_TOKEN_HEADER.to_string(),
			timeout_ms: 2_000,
		}
	}
}

impl RemoteConfig {
	/// Join `path` onto the configured address.
	#[must_use]
	pub fn url(&self, path: &str) -> String {
		format!("{}{}", normalize_base_url(&self.address), path)
	}
}

/// Build a blocking client that attaches the ACL token to every request.
pub(crate) fn build_client(config: &RemoteConfig) -> Result<Client> {
	let mut headers = HeaderMap::new();
	if let Some(token) = config.token.as_deref().filter(|token| !token.is_empty()) {
		let name = HeaderName::from_bytes(config.token_header.as_bytes()).map_err(|err| {
			SearchError::request_failed(format!("invalid token header '{}': {err}", config.token_header))
		})?;
		let value = HeaderValue::from_str(token)
			.map_err(|err| SearchError::request_failed(format!("invalid token value: {err}")))?;
		headers.insert(name, value);
	}

	let client = Client::builder()
		.default_headers(headers)
		.timeout(Duration::from_millis(config.timeout_ms))
		.build()?;
	Ok(client)
}

/// Send `request` and decode a JSON body, failing on non-success statuses.
pub(crate) fn send_json<T: serde::de::DeserializeOwned>(request: RequestBuilder) -> Result<T> {
	let response = request.send()?.error_for_status()?;
	Ok(response.json::<T>()?)
}

fn normalize_base_url(address: &str) -> &str {
	address.trim().trim_end_matches('/')
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn url_joins_without_double_slash() {
		let config = RemoteConfig {
			address: "http://scheduler.local:4646/".into(),
			..RemoteConfig::default()
		};
		assert_eq!(config.url("/v1/jobs"), "http://scheduler.local:4646/v1/jobs");
	}

	#[test]
	fn client_rejects_invalid_header_names() {
		let config = RemoteConfig {
			token: Some("secret".into()),
			token_header: "bad header".into(),
			..RemoteConfig::default()
		};
		assert!(matches!(
			build_client(&config),
			Err(SearchError::RequestFailed { .. })
		));
	}

	#[test]
	fn client_builds_without_token() {
		assert!(build_client(&RemoteConfig::default()).is_ok());
	}
}
