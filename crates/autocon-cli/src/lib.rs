//! Command-line driver for autocon.
//!
//! - `args` - clap definitions for the `autocon` binary
//! - `config` - `autocon.json` loading and merging with flags
//! - `driver` - input discovery, per-file processing, output writing
//! - `reporter` - diagnostic and stats rendering
//! - `tracing_config` - `AUTOCON_LOG` subscriber setup

pub mod args;
pub mod config;
pub mod driver;
pub mod reporter;
pub mod tracing_config;

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod args_tests;
#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
#[cfg(test)]
#[path = "tests/reporter_tests.rs"]
mod reporter_tests;
