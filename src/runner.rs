// src/runner.rs
// Sync orchestration: list cases → fetch → block check → extract → write.
// One case at a time; every failure is scoped to its case.

use thiserror::Error;
use tracing::{info, warn};

use crate::config::AppOptions;
use crate::core::LayoutError;
use crate::docket::{Clock, ExtractionResult, Extractor, ParseError, QueryError};
use crate::fetch::{BlockDetector, Fetch, FetchError, HttpFetcher};
use crate::progress::Progress;
use crate::store::{self, CaseRecord, RecordStore, StoreError};

/// Why a single case produced no write.
#[derive(Debug, Error)]
pub enum CaseError {
    #[error("skipped: {0}")]
    Query(#[from] QueryError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("soft-block page (matched \"{phrase}\")")]
    Blocked { phrase: String },
    #[error("unparseable page: {0}")]
    Parse(#[from] ParseError),
    #[error("write failed: {0}")]
    Store(#[from] StoreError),
}

/// Errors that stop a whole run before or while listing cases.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug)]
pub enum Outcome {
    Updated(ExtractionResult),
    /// Extracted but not written (`--dry-run`).
    Extracted(ExtractionResult),
    Failed(CaseError),
}

/// Per-run tally.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub updated: usize,
    pub extracted: usize,
    pub skipped: usize,
    pub fetch_failed: usize,
    pub blocked: usize,
    pub parse_failed: usize,
    pub write_failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &Outcome) {
        self.total += 1;
        match outcome {
            Outcome::Updated(_) => self.updated += 1,
            Outcome::Extracted(_) => self.extracted += 1,
            Outcome::Failed(CaseError::Query(_)) => self.skipped += 1,
            Outcome::Failed(CaseError::Fetch(_)) => self.fetch_failed += 1,
            Outcome::Failed(CaseError::Blocked { .. }) => self.blocked += 1,
            Outcome::Failed(CaseError::Parse(_)) => self.parse_failed += 1,
            Outcome::Failed(CaseError::Store(_)) => self.write_failed += 1,
        }
    }

    pub fn failed(&self) -> usize {
        self.fetch_failed + self.blocked + self.parse_failed + self.write_failed
    }
}

/// Everything a run needs besides the collaborators.
pub struct Pipeline<'a> {
    pub extractor: &'a Extractor,
    pub detector: &'a BlockDetector,
    pub clock: &'a dyn Clock,
    pub dry_run: bool,
}

impl Pipeline<'_> {
    /// Fetch, check and extract one case, then write it unless dry-running.
    pub fn process(
        &self,
        record: &CaseRecord,
        fetcher: &mut dyn Fetch,
        store: &mut dyn RecordStore,
    ) -> Outcome {
        let result = match self.extract_case(record, fetcher) {
            Ok(r) => r,
            Err(e) => return Outcome::Failed(e),
        };
        if self.dry_run {
            return Outcome::Extracted(result);
        }
        match store.write_result(&record.id, &result) {
            Ok(()) => Outcome::Updated(result),
            Err(e) => Outcome::Failed(e.into()),
        }
    }

    fn extract_case(&self, record: &CaseRecord, fetcher: &mut dyn Fetch) -> Result<ExtractionResult, CaseError> {
        let query = record.query()?;
        let raw = fetcher.fetch(query.source_url())?;
        if let Some(phrase) = self.detector.detect(&raw) {
            return Err(CaseError::Blocked { phrase: phrase.to_string() });
        }
        Ok(self.extractor.extract_html(&query, &raw, self.clock)?)
    }

    /// Process every case the store lists. Only listing can fail the run.
    pub fn run(
        &self,
        fetcher: &mut dyn Fetch,
        store: &mut dyn RecordStore,
        mut progress: Option<&mut dyn Progress>,
    ) -> Result<RunSummary, StoreError> {
        let cases = store.list_cases()?;
        info!(cases = cases.len(), dry_run = self.dry_run, today = %self.clock.today(), "starting sync");
        if let Some(p) = progress.as_deref_mut() {
            p.begin(cases.len());
        }

        let mut summary = RunSummary::default();
        for record in &cases {
            let outcome = self.process(record, fetcher, store);
            match &outcome {
                Outcome::Updated(_) => info!(case = record.label(), "updated"),
                Outcome::Extracted(r) => info!(case = record.label(), result = ?r, "extracted (dry run)"),
                Outcome::Failed(e @ CaseError::Query(_)) => {
                    info!(case = record.label(), "{e}");
                    if let Some(p) = progress.as_deref_mut() {
                        p.log(&format!("{}: {e}", record.label()));
                    }
                }
                Outcome::Failed(e) => warn!(case = record.label(), error = %e, "case failed"),
            }
            if let Some(p) = progress.as_deref_mut() {
                p.item_done(record.label(), &outcome);
            }
            summary.record(&outcome);
        }

        info!(
            total = summary.total,
            updated = summary.updated,
            extracted = summary.extracted,
            skipped = summary.skipped,
            failed = summary.failed(),
            "sync finished"
        );
        if let Some(p) = progress.as_deref_mut() {
            p.finish(&summary);
        }
        Ok(summary)
    }
}

/// Build the live collaborators from options and run once.
pub fn sync(
    opts: &AppOptions,
    clock: &dyn Clock,
    dry_run: bool,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, RunError> {
    let extractor = Extractor::new(&opts.extract)?;
    let detector = BlockDetector::new(&opts.fetch.block_phrases);
    let mut fetcher = HttpFetcher::new(&opts.fetch)?;
    let mut store = store::open(&opts.store)?;

    let pipeline = Pipeline { extractor: &extractor, detector: &detector, clock, dry_run };
    Ok(pipeline.run(&mut fetcher, store.as_mut(), progress)?)
}
