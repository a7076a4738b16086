use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::options::{BackendArg, OutputFormat};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `fedsearch` binary.
#[derive(Parser, Debug)]
#[command(
	name = "fedsearch",
	version,
	long_version = long_version(),
	about = "Search a scheduler's jobs, clients, allocations, task groups and CSI plugins",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "FEDSEARCH_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'b',
		long,
		value_enum,
		help = "Choose the search path (default: remote)"
	)]
	pub(crate) backend: Option<BackendArg>,
	#[arg(
		short = 'a',
		long,
		value_name = "URL",
		help = "Scheduler API address (default: http://127.0.0.1:4646)"
	)]
	pub(crate) address: Option<String>,
	#[arg(
		long,
		value_name = "TOKEN",
		env = "FEDSEARCH_TOKEN",
		hide_env_values = true,
		help = "ACL token sent with every request (default: none)"
	)]
	pub(crate) token: Option<String>,
	#[arg(
		short = 's',
		long,
		value_name = "FILE",
		help = "JSON entity snapshot for the local backend (default: load over HTTP)"
	)]
	pub(crate) snapshot: Option<PathBuf>,
	#[arg(
		short = 'l',
		long,
		value_name = "COUNT",
		help = "Results shown per category (default: 10)"
	)]
	pub(crate) limit: Option<usize>,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Choose how to print the result"
	)]
	pub(crate) output: OutputFormat,
	#[arg(
		short,
		long,
		action = ArgAction::Count,
		help = "Log more detail to stderr; repeat for more (default: warnings only)"
	)]
	pub(crate) verbose: u8,
	#[arg(
		value_name = "QUERY",
		required = true,
		help = "Queries to submit in order; results are printed for the last accepted one"
	)]
	pub(crate) queries: Vec<String>,
}
