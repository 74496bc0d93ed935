// src/log.rs
// tracing setup: human-readable lines on stderr, plus an optional append-only
// debug file without ANSI colours.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::config::LogOptions;

/// Install the global subscriber. `RUST_LOG` overrides the configured filter;
/// `verbose` raises the crate's level (1 = debug, 2+ = trace).
/// Returns false when a subscriber was already installed.
pub fn init(opts: &LogOptions, verbose: u8) -> bool {
    let directive = match verbose {
        0 => opts.filter.clone(),
        1 => "docket_scrape=debug".to_string(),
        _ => "docket_scrape=trace".to_string(),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let file_layer = opts.log_file.as_ref().and_then(|path| {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).ok()?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path).ok()?;
        Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
}
