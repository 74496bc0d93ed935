// src/docket/mod.rs
//! # Docket extraction
//!
//! Turns one criminal docket page into the fixed field set the record store
//! keeps per case. This is the only place with decision logic; fetching and
//! persistence live in `fetch` and `store`.
//!
//! ## Call shape
//! ```text
//! raw html ──DocketDocument::parse──▶ DocketDocument
//!                                         │
//! CaseQuery + Clock ──Extractor::extract──┴──▶ ExtractionResult
//! ```
//!
//! ## Conventions
//! - Pure: the same `(query, document, clock)` always yields the same result,
//!   and the document is never mutated.
//! - Missing sections, missing labels and unparseable dates are soft misses
//!   that leave fields `None`. The only error is [`ParseError`], raised when
//!   the input is not markup at all.
//! - Each sub-extractor (`attorney`, `charges`, `calendar`, `filings`) works on
//!   the label maps produced by `core::html::Section`, so it can be tested on a
//!   tiny fixture.

pub mod attorney;
pub mod calendar;
pub mod charges;
pub mod error;
pub mod filings;

use chrono::{Local, NaiveDate};
use scraper::Html;
use serde::{Deserialize, Serialize};

use crate::config::ExtractOptions;
use crate::core::{LayoutError, Section};

pub use error::{ParseError, QueryError};

/// Who and where to look for. Both parts are non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseQuery {
    source_url: String,
    party_name: String,
}

impl CaseQuery {
    pub fn new(source_url: impl Into<String>, party_name: impl Into<String>) -> Result<Self, QueryError> {
        let source_url = source_url.into().trim().to_string();
        let party_name = party_name.into().trim().to_string();
        if source_url.is_empty() {
            return Err(QueryError::MissingUrl);
        }
        if party_name.is_empty() {
            return Err(QueryError::MissingPartyName);
        }
        Ok(Self { source_url, party_name })
    }

    pub fn source_url(&self) -> &str { &self.source_url }
    pub fn party_name(&self) -> &str { &self.party_name }
}

/// A parsed docket page. Read-only once built.
pub struct DocketDocument {
    html: Html,
}

impl DocketDocument {
    /// Parse raw page content. Fails only for empty input or input with no
    /// markup in it; a page that merely lacks the expected sections parses fine.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        if raw.trim().is_empty() {
            return Err(ParseError::Empty);
        }
        if !looks_like_markup(raw) {
            return Err(ParseError::NotMarkup);
        }
        Ok(Self { html: Html::parse_document(raw) })
    }

    pub fn html(&self) -> &Html { &self.html }
}

/// Any `<tag`, `</tag` or `<!...` present.
fn looks_like_markup(raw: &str) -> bool {
    raw.as_bytes()
        .windows(2)
        .any(|w| w[0] == b'<' && (w[1].is_ascii_alphabetic() || w[1] == b'/' || w[1] == b'!'))
}

/// Reference "today" for filtering upcoming events. Read once per run.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// A clock frozen at one date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(NaiveDate);

impl FixedClock {
    pub fn at(date: NaiveDate) -> Self { Self(date) }

    /// Local date at the moment of the call; stays fixed afterwards.
    pub fn system() -> Self { Self(Local::now().date_naive()) }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate { self.0 }
}

/// Fields derived from one docket page. Every field may be absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub attorney: Option<String>,
    pub charge: Option<String>,
    pub status: Option<String>,
    pub next_hearing: Option<String>,
    pub next_hearing_date: Option<NaiveDate>,
    pub trial_date: Option<NaiveDate>,
    pub sentencing_date: Option<NaiveDate>,
    pub last_filed_description: Option<String>,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Compiled page layout plus the plaintiff identifier.
#[derive(Debug)]
pub struct Extractor {
    plaintiff: String,
    parties: Section,
    dispositions: Section,
    calendar: Section,
    filings: Section,
}

impl Extractor {
    pub fn new(opts: &ExtractOptions) -> Result<Self, LayoutError> {
        if opts.plaintiff.trim().is_empty() {
            return Err(LayoutError::EmptyPlaintiff);
        }
        let layout = &opts.layout;
        Ok(Self {
            plaintiff: opts.plaintiff.clone(),
            parties: Section::compile("parties", &layout.parties)?,
            dispositions: Section::compile("dispositions", &layout.dispositions)?,
            calendar: Section::compile("calendar", &layout.calendar)?,
            filings: Section::compile("filings", &layout.filings)?,
        })
    }

    pub fn extract(&self, query: &CaseQuery, doc: &DocketDocument, clock: &dyn Clock) -> ExtractionResult {
        let html = doc.html();

        let attorney = attorney::find_attorney(&self.parties.entries(html), &self.plaintiff);
        let (charge, status) =
            match charges::select_charge(&self.dispositions.entries(html), query.party_name()) {
                Some(c) => (Some(c.description), Some(c.disposition)),
                None => (None, None),
            };
        let schedule = calendar::schedule(&self.calendar.entries(html), clock.today());
        let (next_hearing, next_hearing_date) = match schedule.next {
            Some(next) => (Some(next.event).filter(|e| !e.is_empty()), Some(next.date)),
            None => (None, None),
        };

        let out = ExtractionResult {
            attorney,
            charge,
            status,
            next_hearing,
            next_hearing_date,
            trial_date: schedule.trial,
            sentencing_date: schedule.sentencing,
            last_filed_description: filings::last_filed(&self.filings.entries(html)),
        };

        tracing::debug!(url = query.source_url(), result = ?out, "extracted docket");
        out
    }

    /// Parse and extract in one step.
    pub fn extract_html(&self, query: &CaseQuery, raw: &str, clock: &dyn Clock) -> Result<ExtractionResult, ParseError> {
        let doc = DocketDocument::parse(raw)?;
        Ok(self.extract(query, &doc, clock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_requires_both_parts() {
        assert_eq!(CaseQuery::new("", "Smith"), Err(QueryError::MissingUrl));
        assert_eq!(CaseQuery::new("http://x", "  "), Err(QueryError::MissingPartyName));
        let q = CaseQuery::new(" http://x ", " Smith ").unwrap();
        assert_eq!(q.source_url(), "http://x");
        assert_eq!(q.party_name(), "Smith");
    }

    #[test]
    fn parse_rejects_non_markup() {
        assert!(matches!(DocketDocument::parse(""), Err(ParseError::Empty)));
        assert!(matches!(DocketDocument::parse(" \n\t"), Err(ParseError::Empty)));
        assert!(matches!(DocketDocument::parse("server said no"), Err(ParseError::NotMarkup)));
        assert!(matches!(DocketDocument::parse("a < b"), Err(ParseError::NotMarkup)));
        assert!(DocketDocument::parse("<p>hi</p>").is_ok());
        assert!(DocketDocument::parse("<!DOCTYPE html>").is_ok());
    }

    #[test]
    fn fixed_clock_is_fixed() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let c = FixedClock::at(d);
        assert_eq!(c.today(), d);
        assert_eq!(c.today(), d);
    }

    #[test]
    fn extractor_rejects_blank_plaintiff() {
        for plaintiff in ["", "   "] {
            let opts = ExtractOptions { plaintiff: plaintiff.into(), ..Default::default() };
            assert!(matches!(Extractor::new(&opts), Err(LayoutError::EmptyPlaintiff)));
        }
        assert!(Extractor::new(&ExtractOptions::default()).is_ok());
    }

    #[test]
    fn result_serializes_dates_as_iso() {
        let r = ExtractionResult {
            trial_date: NaiveDate::from_ymd_opt(2099, 1, 15),
            ..Default::default()
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["trial_date"], "2099-01-15");
        assert!(json["attorney"].is_null());
    }
}
