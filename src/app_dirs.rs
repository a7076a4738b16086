//! Where `fedsearch` looks for its configuration and keeps its files.
//!
//! Each directory can be pinned through an environment variable; otherwise the
//! platform location from the `directories` crate is used.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "fedsearch";
const APPLICATION: &str = "fedsearch";

pub const CONFIG_DIR_ENV: &str = "FEDSEARCH_CONFIG_DIR";
pub const DATA_DIR_ENV: &str = "FEDSEARCH_DATA_DIR";
pub const CACHE_DIR_ENV: &str = "FEDSEARCH_CACHE_DIR";

/// Prefix of settings overrides such as `FEDSEARCH__SEARCH__BACKEND`.
pub const SETTINGS_ENV_PREFIX: &str = APPLICATION;
/// Separator between the section and key of a settings override.
pub const SETTINGS_ENV_SEPARATOR: &str = "__";

/// File name looked up inside [`get_config_dir`].
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Project-local file names looked up in the working directory, in order.
pub const LOCAL_CONFIG_FILE_NAMES: [&str; 2] = [".fedsearch.toml", "fedsearch.toml"];

fn project_dirs() -> Result<ProjectDirs> {
	ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
		.ok_or_else(|| anyhow!("no home directory to place {APPLICATION} files in"))
}

/// An empty override counts as unset.
fn dir_from_env(name: &str) -> Option<PathBuf> {
	let value = env::var_os(name)?;
	(!value.is_empty()).then(|| PathBuf::from(value))
}

/// Directory holding `config.toml`.
pub fn get_config_dir() -> Result<PathBuf> {
	match dir_from_env(CONFIG_DIR_ENV) {
		Some(dir) => Ok(dir),
		None => Ok(project_dirs()?.config_local_dir().to_path_buf()),
	}
}

/// Directory for persistent data such as entity snapshots.
pub fn get_data_dir() -> Result<PathBuf> {
	match dir_from_env(DATA_DIR_ENV) {
		Some(dir) => Ok(dir),
		None => Ok(project_dirs()?.data_local_dir().to_path_buf()),
	}
}

pub fn get_cache_dir() -> Result<PathBuf> {
	match dir_from_env(CACHE_DIR_ENV) {
		Some(dir) => Ok(dir),
		None => Ok(project_dirs()?.cache_dir().to_path_buf()),
	}
}

/// Config files consulted by default, lowest precedence first.
///
/// Locations that cannot be determined are left out.
#[must_use]
pub fn default_config_files() -> Vec<PathBuf> {
	config_files_in(get_config_dir().ok(), env::current_dir().ok())
}

fn config_files_in(config_dir: Option<PathBuf>, working_dir: Option<PathBuf>) -> Vec<PathBuf> {
	let user = config_dir.map(|dir| dir.join(CONFIG_FILE_NAME));
	let local = working_dir.into_iter().flat_map(|dir| {
		LOCAL_CONFIG_FILE_NAMES
			.iter()
			.map(move |name| dir.join(name))
	});
	user.into_iter().chain(local).collect()
}
