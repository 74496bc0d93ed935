// src/progress.rs
use crate::runner::{Outcome, RunSummary};

/// Lightweight progress reporting for a sync run.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called once with the number of cases about to be processed.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one case is finished, whatever happened to it.
    fn item_done(&mut self, _case: &str, _outcome: &Outcome) {}

    /// Called at the end of a run that got as far as listing cases.
    fn finish(&mut self, _summary: &RunSummary) {}
}
