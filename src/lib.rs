// src/lib.rs

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod docket;
pub mod fetch;
pub mod log;
pub mod progress;
pub mod runner;
pub mod store;

pub use docket::{CaseQuery, Clock, DocketDocument, ExtractionResult, Extractor, FixedClock, ParseError};
