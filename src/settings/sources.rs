use anyhow::{Result, anyhow};
use config::{Config, ConfigError, Environment, File};

use crate::cli::CliArgs;
use fedsearch::app_dirs;

/// Layer default files, explicit `--config` files and environment overrides,
/// later layers taking precedence.
pub(super) fn build_config(cli: &CliArgs) -> Result<Config> {
	let defaults = if cli.no_config {
		Vec::new()
	} else {
		app_dirs::default_config_files()
	};

	let optional = defaults.into_iter().map(|path| File::from(path).required(false));
	let explicit = cli.config.iter().map(|path| File::from(path.as_path()).required(true));

	optional
		.chain(explicit)
		.fold(Config::builder(), |builder, source| builder.add_source(source))
		.add_source(settings_environment())
		.build()
		.map_err(|err| match err {
			ConfigError::Frozen => anyhow!("configuration builder is frozen"),
			other => other.into(),
		})
}

fn settings_environment() -> Environment {
	Environment::with_prefix(app_dirs::SETTINGS_ENV_PREFIX)
		.separator(app_dirs::SETTINGS_ENV_SEPARATOR)
		.try_parsing(true)
}
