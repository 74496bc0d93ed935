// src/config/consts.rs

// Config file looked up in the working directory when --config is not given
pub const DEFAULT_CONFIG_FILE: &str = "docket_scrape.toml";

// Party listed as plaintiff on criminal dockets
pub const DEFAULT_PLAINTIFF: &str = "State Of Arizona";

// Page layout
pub const PARTIES_SECTION_ID: &str = "tblDocket2";
pub const PARTIES_ENTRY: &str = r#"[id="tblForms2"]"#;
pub const PARTIES_LABEL: &str = "div.col-4.m-visibility.bold-font";

pub const DISPOSITIONS_SECTION_ID: &str = "tblDocket12";
pub const DISPOSITIONS_ENTRY: &str = "div.row.g-0";
pub const DISPOSITIONS_LABEL: &str = "div.col-6";

pub const CALENDAR_SECTION_ID: &str = "tblForms5";
pub const FILINGS_SECTION_ID: &str = "tblForms4";
pub const LISTING_ENTRY: &str = "div.row.g-0";
pub const LISTING_LABEL: &str = "div.bold-font";

// Net
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";
pub const TIMEOUT_SECS: u64 = 30;
pub const REQUEST_PAUSE_MS: u64 = 2_000; // be polite
pub const JITTER_MS: u64 = 500; // extra 0..500 ms
pub const RETRIES: u32 = 3;
pub const BACKOFF_MS: u64 = 1_000; // doubled per retry
pub const RETRY_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];
pub const BLOCK_PHRASES: [&str; 4] = [
    "server is busy",
    "try again later",
    "temporarily unavailable",
    "too many requests",
];

// Record store
pub const AIRTABLE_API_URL: &str = "https://api.airtable.com/v0";
pub const AIRTABLE_PAGE_SIZE: u32 = 100;
pub const DEFAULT_STORE_FILE: &str = ".store/cases.json";

// Logging
pub const DEFAULT_LOG_FILTER: &str = "docket_scrape=info";
pub const DEFAULT_LOG_FILE: &str = ".store/debug.log";
