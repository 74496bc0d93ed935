// src/docket/charges.rs
//! Charge and disposition selection.
//!
//! A case can carry many charges against the tracked party. One is reported,
//! picked by the first rule that matches anywhere in the list:
//!
//! 1. a charge with no disposition yet (still open),
//! 2. a charge whose disposition contains `GUILTY`,
//! 3. a charge whose description contains `MURDER`,
//! 4. the first charge on the page.

use crate::core::Entry;
use crate::core::sanitize::{contains_ci, is_blank};

pub const PARTY_NAME: &str = "Party Name";
pub const DESCRIPTION: &str = "Description";
pub const DISPOSITION: &str = "Disposition";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChargeCandidate {
    pub description: String,
    pub disposition: String,
}

impl ChargeCandidate {
    pub fn is_open(&self) -> bool { is_blank(&self.disposition) }
    pub fn is_guilty(&self) -> bool { contains_ci(&self.disposition, "GUILTY") }
    pub fn is_murder(&self) -> bool { contains_ci(&self.description, "MURDER") }
}

/// Charges filed against `party` (case-insensitive substring of the entry's
/// party name) that have a description. A missing disposition reads as empty.
pub fn candidates(entries: &[Entry], party: &str) -> Vec<ChargeCandidate> {
    entries
        .iter()
        .filter(|e| e.get(PARTY_NAME).is_some_and(|name| contains_ci(name, party)))
        .filter_map(|e| {
            let description = e.get(DESCRIPTION).filter(|d| !is_blank(d))?;
            Some(ChargeCandidate {
                description: description.to_string(),
                disposition: e.get(DISPOSITION).unwrap_or_default().to_string(),
            })
        })
        .collect()
}

pub fn select_charge(entries: &[Entry], party: &str) -> Option<ChargeCandidate> {
    let mut list = candidates(entries, party);
    if list.is_empty() {
        return None;
    }

    let (ix, rule) = if let Some(i) = list.iter().position(ChargeCandidate::is_open) {
        (i, "open")
    } else if let Some(i) = list.iter().position(ChargeCandidate::is_guilty) {
        (i, "guilty")
    } else if let Some(i) = list.iter().position(ChargeCandidate::is_murder) {
        (i, "murder")
    } else {
        (0, "first")
    };

    tracing::trace!(candidates = list.len(), ix, rule, "selected charge");
    Some(list.swap_remove(ix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charge(party: &str, desc: &str, disp: &str) -> Entry {
        [(PARTY_NAME, party), (DESCRIPTION, desc), (DISPOSITION, disp)]
            .into_iter()
            .collect()
    }

    fn pick(entries: &[Entry]) -> Option<(String, String)> {
        select_charge(entries, "john smith").map(|c| (c.description, c.disposition))
    }

    #[test]
    fn open_charge_beats_guilty_murder() {
        let entries = vec![
            charge("SMITH, JOHN SMITH", "THEFT", ""),
            charge("JOHN SMITH", "MURDER 1", "GUILTY"),
            charge("JOHN SMITH", "ASSAULT", ""),
        ];
        assert_eq!(pick(&entries), Some(("THEFT".into(), "".into())));
    }

    #[test]
    fn guilty_beats_murder() {
        let entries = vec![
            charge("JOHN SMITH", "MURDER 2", "Dismissed"),
            charge("JOHN SMITH", "ROBBERY", "Guilty - Plea"),
        ];
        assert_eq!(pick(&entries), Some(("ROBBERY".into(), "Guilty - Plea".into())));
    }

    #[test]
    fn murder_beats_first() {
        let entries = vec![
            charge("JOHN SMITH", "BURGLARY", "Dismissed"),
            charge("JOHN SMITH", "Second Degree Murder", "Dismissed"),
        ];
        assert_eq!(pick(&entries), Some(("Second Degree Murder".into(), "Dismissed".into())));
    }

    #[test]
    fn falls_back_to_first_in_document_order() {
        let entries = vec![
            charge("JOHN SMITH", "BURGLARY", "Dismissed"),
            charge("JOHN SMITH", "FRAUD", "Acquitted"),
        ];
        assert_eq!(pick(&entries), Some(("BURGLARY".into(), "Dismissed".into())));
    }

    #[test]
    fn whitespace_only_disposition_counts_as_open() {
        let entries = vec![
            charge("JOHN SMITH", "FRAUD", "GUILTY"),
            charge("JOHN SMITH", "THEFT", "   "),
        ];
        assert_eq!(pick(&entries).map(|c| c.0).as_deref(), Some("THEFT"));
    }

    #[test]
    fn missing_disposition_reads_as_open() {
        let entries: Vec<Entry> = vec![
            charge("JOHN SMITH", "FRAUD", "GUILTY"),
            [(PARTY_NAME, "JOHN SMITH"), (DESCRIPTION, "ARSON")].into_iter().collect(),
        ];
        assert_eq!(pick(&entries), Some(("ARSON".into(), "".into())));
    }

    #[test]
    fn other_parties_and_blank_descriptions_are_ignored() {
        let entries = vec![
            charge("JANE ROE", "MURDER 1", ""),
            charge("JOHN SMITH", "  ", ""),
            charge("John Smith", "DUI", "Dismissed"),
        ];
        assert_eq!(pick(&entries), Some(("DUI".into(), "Dismissed".into())));
    }

    #[test]
    fn no_candidates() {
        assert_eq!(pick(&[]), None);
        assert_eq!(pick(&[charge("JANE ROE", "THEFT", "")]), None);
    }
}
