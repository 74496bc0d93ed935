// src/core/dates.rs

use chrono::NaiveDate;

/// Date format used on docket pages.
pub const DOCKET_DATE_FMT: &str = "%m/%d/%Y";

/// Parse a docket date (`MM/DD/YYYY`). Only the first whitespace-separated
/// token is read, so a trailing time (`03/01/2099 8:30 AM`) is tolerated.
/// Returns `None` for anything else.
pub fn parse_docket_date(s: &str) -> Option<NaiveDate> {
    let token = s.split_whitespace().next()?;
    NaiveDate::parse_from_str(token, DOCKET_DATE_FMT).ok()
}

/// `YYYY-MM-DD`
pub fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
