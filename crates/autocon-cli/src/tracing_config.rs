//! Logging for the `autocon` binary.
//!
//! Nothing is installed unless `AUTOCON_LOG` or `RUST_LOG` is set.
//! `AUTOCON_LOG_FORMAT` picks the layer: `text` (default), `tree` or `json`.
//! Output goes to stderr; stdout carries rewritten code.
//!
//! ```bash
//! # Why was (or wasn't) each statement wrapped?
//! AUTOCON_LOG=trace AUTOCON_LOG_FORMAT=tree autocon src/app.js
//!
//! # Per-file summaries only
//! AUTOCON_LOG=autocon_emitter=debug autocon src/
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};
use tracing_tree::HierarchicalLayer;

pub const LOG_ENV: &str = "AUTOCON_LOG";
pub const LOG_FORMAT_ENV: &str = "AUTOCON_LOG_FORMAT";
const RUST_LOG_ENV: &str = "RUST_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    /// Indented span tree via `tracing-tree`.
    Tree,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Unknown values fall back to `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Subscriber configuration read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingSettings {
    /// `AUTOCON_LOG` directives. `None` defers to `RUST_LOG`.
    pub directives: Option<String>,
    pub format: LogFormat,
}

impl TracingSettings {
    /// `None` when logging was not requested. `lookup` reads one variable.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let directives = lookup(LOG_ENV);
        if directives.is_none() && lookup(RUST_LOG_ENV).is_none() {
            return None;
        }
        let format = lookup(LOG_FORMAT_ENV).map_or(LogFormat::Text, |v| LogFormat::parse(&v));
        Some(TracingSettings { directives, format })
    }

    fn filter(&self) -> EnvFilter {
        match &self.directives {
            Some(directives) => EnvFilter::builder().parse_lossy(directives),
            None => EnvFilter::from_default_env(),
        }
    }
}

/// Install the global subscriber when logging was requested.
pub fn init_tracing() {
    let Some(settings) = TracingSettings::resolve(|key| std::env::var(key).ok()) else {
        return;
    };

    let registry = Registry::default().with(settings.filter());
    match settings.format {
        LogFormat::Tree => {
            let tree = HierarchicalLayer::new(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);
            registry.with(tree).init();
        }
        LogFormat::Json => {
            registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            registry
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
