// src/config/mod.rs

pub mod consts;
pub mod options;

pub use options::{
    AirtableOptions, AppOptions, ConfigError, ExtractOptions, FetchOptions, LogOptions,
    SectionLayout, StoreKind, StoreOptions,
};
