use std::fmt::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use fedsearch::app_dirs;

/// Version banner listing the directories the binary reads from.
pub(super) fn long_version() -> &'static str {
	let dirs: [(&str, fn() -> Result<PathBuf>); 3] = [
		("config", app_dirs::get_config_dir),
		("data", app_dirs::get_data_dir),
		("cache", app_dirs::get_cache_dir),
	];

	let mut details = format!("fedsearch {}", env!("CARGO_PKG_VERSION"));
	let _ = writeln!(details);
	for (label, resolve) in dirs {
		match resolve() {
			Ok(path) => {
				let _ = writeln!(details, "{label} directory: {}", path.display());
			}
			Err(err) => {
				let _ = writeln!(details, "{label} directory: unavailable ({err})");
			}
		}
	}

	Box::leak(details.into_boxed_str())
}

pub(super) fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Blue.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Blue.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
		.error(AnsiColor::Red.on_default().effects(Effects::BOLD))
}
