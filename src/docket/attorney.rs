// src/docket/attorney.rs
use crate::core::Entry;

pub const PARTY_NAME: &str = "Party Name";
pub const ATTORNEY: &str = "Attorney";

/// Attorney listed on the first party entry whose name contains `plaintiff`
/// (case-sensitive). Scanning stops at that entry even if it has no attorney.
pub fn find_attorney(parties: &[Entry], plaintiff: &str) -> Option<String> {
    let entry = parties
        .iter()
        .find(|e| e.get(PARTY_NAME).is_some_and(|name| name.contains(plaintiff)))?;

    entry
        .get(ATTORNEY)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
}
