// src/cli.rs
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr, bail};

use crate::config::{AppOptions, StoreKind};
use crate::docket::{CaseQuery, FixedClock, Extractor};
use crate::progress::Progress;
use crate::runner::{self, Outcome, RunSummary};
use crate::store;

#[derive(Debug, Parser)]
#[command(name = "docket_scrape", version, about = "Sync criminal docket fields into the case table")]
pub struct Cli {
    /// Config file (default: ./docket_scrape.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch every tracked case and write the extracted fields back
    Run {
        /// Extract and log, but do not write
        #[arg(long)]
        dry_run: bool,
        /// Reference date for upcoming events (YYYY-MM-DD), default today
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Override the configured store
        #[arg(long, value_enum)]
        store: Option<StoreArg>,
        /// JSON file for the file store
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Run the extractor on a saved page and print the result as JSON
    Extract {
        /// Saved docket page
        html: PathBuf,
        /// Tracked party name
        #[arg(short, long)]
        party: String,
        /// Source URL to report (default: the file path)
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// List the cases the store would process
    List {
        #[arg(long, value_enum)]
        store: Option<StoreArg>,
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StoreArg {
    Airtable,
    File,
}

impl From<StoreArg> for StoreKind {
    fn from(s: StoreArg) -> Self {
        match s {
            StoreArg::Airtable => StoreKind::Airtable,
            StoreArg::File => StoreKind::File,
        }
    }
}

/// Prints one line per case to stdout.
struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }

    fn log(&mut self, msg: &str) {
        println!("  {msg}");
    }

    fn item_done(&mut self, case: &str, outcome: &Outcome) {
        self.done += 1;
        let what = match outcome {
            Outcome::Updated(_) => "updated".to_string(),
            Outcome::Extracted(_) => "extracted".to_string(),
            Outcome::Failed(e) => e.to_string(),
        };
        println!("[{}/{}] {}: {}", self.done, self.total, case, what);
    }

    fn finish(&mut self, s: &RunSummary) {
        println!(
            "{} cases: {} updated, {} extracted, {} skipped, {} fetch failed, {} blocked, {} unparseable, {} write failed",
            s.total, s.updated, s.extracted, s.skipped, s.fetch_failed, s.blocked, s.parse_failed, s.write_failed
        );
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut opts = AppOptions::load(cli.config.as_deref()).wrap_err("loading config")?;
    crate::log::init(&opts.log, cli.verbose);

    match cli.command {
        Command::Run { dry_run, today, store, file } => {
            apply_store_override(&mut opts, store, file);
            let clock = clock_for(today);
            let mut progress = ConsoleProgress { total: 0, done: 0 };
            let summary = runner::sync(&opts, &clock, dry_run, Some(&mut progress))?;
            if summary.total > 0 && summary.failed() == summary.total {
                bail!("every case failed");
            }
        }
        Command::Extract { html, party, url, today } => {
            let raw = std::fs::read_to_string(&html)
                .wrap_err_with(|| format!("reading {}", html.display()))?;
            let url = url.unwrap_or_else(|| html.display().to_string());
            let query = CaseQuery::new(url, party)?;
            let extractor = Extractor::new(&opts.extract)?;
            let result = extractor.extract_html(&query, &raw, &clock_for(today))?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::List { store, file } => {
            apply_store_override(&mut opts, store, file);
            let mut store = store::open(&opts.store)?;
            for case in store.list_cases()? {
                println!(
                    "{}\t{}\t{}\t{}",
                    case.id,
                    case.case_number.as_deref().unwrap_or("-"),
                    case.party_name.as_deref().unwrap_or("-"),
                    case.docket_url.as_deref().unwrap_or("-"),
                );
            }
        }
    }
    Ok(())
}

fn apply_store_override(opts: &mut AppOptions, store: Option<StoreArg>, file: Option<PathBuf>) {
    if let Some(kind) = store {
        opts.store.kind = kind.into();
    }
    if let Some(path) = file {
        opts.store.kind = StoreKind::File;
        opts.store.file = path;
    }
}

fn clock_for(today: Option<NaiveDate>) -> FixedClock {
    today.map(FixedClock::at).unwrap_or_else(FixedClock::system)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_run_flags() {
        let cli = Cli::try_parse_from([
            "docket_scrape", "-vv", "run", "--dry-run", "--today", "2024-01-01", "--file", "cases.json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Run { dry_run, today, store, file } => {
                assert!(dry_run);
                assert_eq!(today, NaiveDate::from_ymd_opt(2024, 1, 1));
                assert!(store.is_none());
                assert_eq!(file, Some(PathBuf::from("cases.json")));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn file_flag_switches_store() {
        let mut opts = AppOptions::default();
        apply_store_override(&mut opts, None, Some(PathBuf::from("x.json")));
        assert_eq!(opts.store.kind, StoreKind::File);
        assert_eq!(opts.store.file, PathBuf::from("x.json"));
    }

    #[test]
    fn bad_date_is_rejected() {
        assert!(Cli::try_parse_from(["docket_scrape", "run", "--today", "01/01/2024"]).is_err());
    }
}
