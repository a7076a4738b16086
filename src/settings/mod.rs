//! Configuration loading and resolution for the `fedsearch` binary.
//!
//! `load` layers config files, environment variables and CLI flags and returns
//! the [`ResolvedConfig`] the workflow runs with.

mod loader;
mod raw;
mod resolved;
mod sources;
mod util;

pub use loader::load;
pub use resolved::{BackendKind, ResolvedConfig};
