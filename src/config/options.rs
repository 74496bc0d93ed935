// src/config/options.rs
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::consts::*;
use crate::core::SectionSpec;
use crate::store::{FieldMap, InputFields};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    pub fetch: FetchOptions,
    pub extract: ExtractOptions,
    pub store: StoreOptions,
    pub log: LogOptions,
}

impl AppOptions {
    /// Load options from `path`, or from `docket_scrape.toml` in the working
    /// directory when no path is given. A missing default file means defaults;
    /// a missing explicit file is an error. Environment overrides apply last.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut opts = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        opts.apply_env(|k| std::env::var(k).ok());
        Ok(opts)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// `AIRTABLE_BASE_ID` / `AIRTABLE_TABLE_ID` override the file. The API key
    /// is read by the store itself and never kept in options.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("AIRTABLE_BASE_ID").filter(|v| !v.is_empty()) {
            self.store.airtable.base_id = v;
        }
        if let Some(v) = var("AIRTABLE_TABLE_ID").filter(|v| !v.is_empty()) {
            self.store.airtable.table_id = v;
        }
    }
}

/* ---------------- Fetch ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    pub user_agent: String,
    pub referer: Option<String>,
    pub accept: String,
    pub accept_language: String,
    /// Fetched once before the first case to pick up session cookies.
    pub warmup_url: Option<String>,
    pub timeout_secs: u64,
    /// Minimum pause between two requests.
    pub delay_ms: u64,
    pub jitter_ms: u64,
    pub retries: u32,
    pub backoff_ms: u64,
    pub retry_statuses: Vec<u16>,
    /// Phrases that mark a soft-block page (matched case-insensitively).
    pub block_phrases: Vec<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.into(),
            referer: None,
            accept: ACCEPT.into(),
            accept_language: ACCEPT_LANGUAGE.into(),
            warmup_url: None,
            timeout_secs: TIMEOUT_SECS,
            delay_ms: REQUEST_PAUSE_MS,
            jitter_ms: JITTER_MS,
            retries: RETRIES,
            backoff_ms: BACKOFF_MS,
            retry_statuses: RETRY_STATUSES.to_vec(),
            block_phrases: BLOCK_PHRASES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/* ---------------- Extract ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Substring identifying the prosecuting party (case-sensitive).
    pub plaintiff: String,
    pub layout: SectionLayout,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self { plaintiff: DEFAULT_PLAINTIFF.into(), layout: SectionLayout::default() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionLayout {
    pub parties: SectionSpec,
    pub dispositions: SectionSpec,
    pub calendar: SectionSpec,
    pub filings: SectionSpec,
}

impl Default for SectionLayout {
    fn default() -> Self {
        Self {
            parties: SectionSpec::new(PARTIES_SECTION_ID, PARTIES_ENTRY, PARTIES_LABEL),
            dispositions: SectionSpec::new(DISPOSITIONS_SECTION_ID, DISPOSITIONS_ENTRY, DISPOSITIONS_LABEL),
            calendar: SectionSpec::new(CALENDAR_SECTION_ID, LISTING_ENTRY, LISTING_LABEL),
            filings: SectionSpec::new(FILINGS_SECTION_ID, LISTING_ENTRY, LISTING_LABEL),
        }
    }
}

/* ---------------- Store ---------------- */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Airtable,
    File,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    pub kind: StoreKind,
    pub airtable: AirtableOptions,
    /// JSON file used by the `file` store.
    pub file: PathBuf,
    pub input: InputFields,
    pub output: FieldMap,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            kind: StoreKind::Airtable,
            airtable: AirtableOptions::default(),
            file: PathBuf::from(DEFAULT_STORE_FILE),
            input: InputFields::default(),
            output: FieldMap::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirtableOptions {
    pub api_url: String,
    pub base_id: String,
    pub table_id: String,
    pub page_size: u32,
}

impl Default for AirtableOptions {
    fn default() -> Self {
        Self {
            api_url: AIRTABLE_API_URL.into(),
            base_id: String::new(),
            table_id: String::new(),
            page_size: AIRTABLE_PAGE_SIZE,
        }
    }
}

/* ---------------- Log ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogOptions {
    /// `EnvFilter` directive; `RUST_LOG` wins when set.
    pub filter: String,
    pub log_file: Option<PathBuf>,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.into(),
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}
