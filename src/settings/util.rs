use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Trim a secret and treat whitespace-only values as unset.
pub(super) fn sanitize_token(token: Option<String>) -> Option<String> {
	token
		.map(|token| token.trim().to_string())
		.filter(|token| !token.is_empty())
}

/// Anchor a relative path at the working directory.
pub(super) fn absolutize(path: PathBuf) -> Result<PathBuf> {
	if path.is_absolute() {
		return Ok(path);
	}
	let current_dir = env::current_dir().context("failed to determine working directory")?;
	Ok(current_dir.join(path))
}

/// Show whether a secret is present without revealing it.
pub(super) fn redact(value: Option<&str>) -> &'static str {
	if value.is_some() { "(set)" } else { "(none)" }
}
