// src/docket/calendar.rs
use chrono::NaiveDate;

use crate::core::Entry;
use crate::core::dates::parse_docket_date;
use crate::core::sanitize::contains_ci;

pub const DATE: &str = "Date";
pub const EVENT: &str = "Event";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarEntry {
    pub date: NaiveDate,
    pub event: String,
}

/// Upcoming events distilled from the case calendar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    pub next: Option<CalendarEntry>,
    pub trial: Option<NaiveDate>,
    pub sentencing: Option<NaiveDate>,
}

/// Calendar entries with a parseable date, in page order.
pub fn calendar_entries(entries: &[Entry]) -> Vec<CalendarEntry> {
    entries
        .iter()
        .filter_map(|e| {
            let date = parse_docket_date(e.get(DATE)?)?;
            Some(CalendarEntry { date, event: e.get(EVENT).unwrap_or_default().to_string() })
        })
        .collect()
}

/// Events on or after `today`, earliest first (page order on ties). The
/// earliest is the next hearing; trial and sentencing are the first events
/// mentioning them, scanned independently.
pub fn schedule(entries: &[Entry], today: NaiveDate) -> Schedule {
    let mut upcoming: Vec<CalendarEntry> = calendar_entries(entries)
        .into_iter()
        .filter(|c| c.date >= today)
        .collect();
    upcoming.sort_by_key(|c| c.date); // stable

    tracing::trace!(total = entries.len(), upcoming = upcoming.len(), %today, "calendar");

    let trial = upcoming.iter().find(|c| contains_ci(&c.event, "TRIAL")).map(|c| c.date);
    let sentencing = upcoming.iter().find(|c| contains_ci(&c.event, "SENTENCING")).map(|c| c.date);

    Schedule {
        next: upcoming.into_iter().next(),
        trial,
        sentencing,
    }
}
