// src/docket/filings.rs
use crate::core::Entry;
use crate::core::dates::parse_docket_date;
use crate::core::sanitize::is_blank;

pub const FILING_DATE: &str = "Filing Date";
pub const DESCRIPTION: &str = "Description";

/// Description of the most recent filing. Entries without a parseable date
/// are ignored; on equal dates the first one seen wins. A latest filing with
/// no description yields `None`.
pub fn last_filed(entries: &[Entry]) -> Option<String> {
    let mut best: Option<(chrono::NaiveDate, &Entry)> = None;
    for e in entries {
        let Some(date) = e.get(FILING_DATE).and_then(parse_docket_date) else { continue };
        match best {
            Some((d, _)) if d >= date => {}
            _ => best = Some((date, e)),
        }
    }
    let (_, latest) = best?;
    latest
        .get(DESCRIPTION)
        .filter(|d| !is_blank(d))
        .map(str::to_string)
}
