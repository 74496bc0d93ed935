// src/store/mod.rs
//! Case records: where the list of tracked cases comes from and where the
//! extracted fields go back to.
//!
//! Two backends share the same shape (`id` + a flat map of named fields):
//! - `airtable` – the live table, over its REST API.
//! - `file` – a local JSON file, for dry runs and offline work.

pub mod airtable;
pub mod file;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::{StoreKind, StoreOptions};
use crate::core::dates::iso;
use crate::docket::{CaseQuery, ExtractionResult, QueryError};

pub use airtable::AirtableStore;
pub use file::JsonFileStore;

pub type Fields = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("record store returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("record store I/O on {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("record store data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing {0}")]
    MissingConfig(&'static str),
    #[error("no record with id {0}")]
    UnknownRecord(String),
}

/// Source of tracked cases and sink for their extracted fields.
pub trait RecordStore {
    fn list_cases(&mut self) -> Result<Vec<CaseRecord>, StoreError>;

    /// Write every output field of `result`; absent values are written as
    /// null so stale data is cleared. All or nothing per record.
    fn write_result(&mut self, record_id: &str, result: &ExtractionResult) -> Result<(), StoreError>;
}

/// One row of the case table, as far as the scraper cares.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaseRecord {
    pub id: String,
    pub case_number: Option<String>,
    pub party_name: Option<String>,
    pub docket_url: Option<String>,
}

impl CaseRecord {
    /// Read the input columns out of a record's field map.
    pub fn from_fields(id: impl Into<String>, fields: &Fields, input: &InputFields) -> Self {
        Self {
            id: id.into(),
            case_number: text_field(fields, &input.case_number),
            party_name: text_field(fields, &input.party_name),
            docket_url: text_field(fields, &input.docket_url),
        }
    }

    pub fn query(&self) -> Result<CaseQuery, QueryError> {
        CaseQuery::new(
            self.docket_url.as_deref().unwrap_or_default(),
            self.party_name.as_deref().unwrap_or_default(),
        )
    }

    /// Case number when known, record id otherwise.
    pub fn label(&self) -> &str {
        self.case_number.as_deref().unwrap_or(&self.id)
    }
}

/// Non-empty string value of a field. Link fields may come back as a
/// one-element array; numbers are stringified.
fn text_field(fields: &Fields, name: &str) -> Option<String> {
    let s = match fields.get(name)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => match items.first() {
            Some(Value::String(s)) => s.trim().to_string(),
            _ => return None,
        },
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

/// Column names the cases are read from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFields {
    pub case_number: String,
    pub party_name: String,
    pub docket_url: String,
}

impl Default for InputFields {
    fn default() -> Self {
        Self {
            case_number: "Case Number".into(),
            party_name: "Suspect Name".into(),
            docket_url: "Docket URL".into(),
        }
    }
}

/// Column names the extracted fields are written to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMap {
    pub attorney: String,
    pub charge: String,
    pub status: String,
    pub next_hearing: String,
    pub next_hearing_date: String,
    pub trial: String,
    pub sentencing: String,
    /// Opaque identifier in some stores (e.g. an Airtable field id).
    pub last_filed: String,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            attorney: "Attorney".into(),
            charge: "Crime".into(),
            status: "Status".into(),
            next_hearing: "Next Hearing".into(),
            next_hearing_date: "Next Hearing Date".into(),
            trial: "Trial".into(),
            sentencing: "Sentencing".into(),
            last_filed: "Last Filed".into(),
        }
    }
}

impl FieldMap {
    /// All eight output fields; `None` becomes JSON null, dates become ISO strings.
    pub fn to_fields(&self, r: &ExtractionResult) -> Fields {
        let text = |v: &Option<String>| v.clone().map_or(Value::Null, Value::String);
        let date = |v: &Option<chrono::NaiveDate>| v.map_or(Value::Null, |d| Value::String(iso(d)));

        let mut out = Fields::new();
        out.insert(self.attorney.clone(), text(&r.attorney));
        out.insert(self.charge.clone(), text(&r.charge));
        out.insert(self.status.clone(), text(&r.status));
        out.insert(self.next_hearing.clone(), text(&r.next_hearing));
        out.insert(self.next_hearing_date.clone(), date(&r.next_hearing_date));
        out.insert(self.trial.clone(), date(&r.trial_date));
        out.insert(self.sentencing.clone(), date(&r.sentencing_date));
        out.insert(self.last_filed.clone(), text(&r.last_filed_description));
        out
    }
}

/// Open the backend named in the options.
pub fn open(opts: &StoreOptions) -> Result<Box<dyn RecordStore>, StoreError> {
    Ok(match opts.kind {
        StoreKind::Airtable => Box::new(AirtableStore::from_env(opts)?),
        StoreKind::File => Box::new(JsonFileStore::open(opts)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn record_reads_input_columns() {
        let fields = json!({
            "Case Number": "CR2024-001234",
            "Suspect Name": "  John Smith ",
            "Docket URL": ["https://example.test/docket?id=1"],
            "Other": 42
        });
        let rec = CaseRecord::from_fields("rec1", fields.as_object().unwrap(), &InputFields::default());
        assert_eq!(rec.case_number.as_deref(), Some("CR2024-001234"));
        assert_eq!(rec.party_name.as_deref(), Some("John Smith"));
        assert_eq!(rec.docket_url.as_deref(), Some("https://example.test/docket?id=1"));
        assert_eq!(rec.label(), "CR2024-001234");
        assert!(rec.query().is_ok());
    }

    #[test]
    fn blank_inputs_make_no_query() {
        let fields = json!({ "Suspect Name": "", "Docket URL": "https://x" });
        let rec = CaseRecord::from_fields("rec2", fields.as_object().unwrap(), &InputFields::default());
        assert_eq!(rec.party_name, None);
        assert_eq!(rec.label(), "rec2");
        assert_eq!(rec.query(), Err(QueryError::MissingPartyName));
    }

    #[test]
    fn field_map_writes_all_fields() {
        let r = ExtractionResult {
            attorney: Some("Jane Doe".into()),
            trial_date: NaiveDate::from_ymd_opt(2099, 1, 15),
            ..Default::default()
        };
        let map = FieldMap { last_filed: "fldXYZ".into(), ..Default::default() };
        let f = map.to_fields(&r);

        assert_eq!(f.len(), 8);
        assert_eq!(f["Attorney"], json!("Jane Doe"));
        assert_eq!(f["Trial"], json!("2099-01-15"));
        assert_eq!(f["Crime"], Value::Null);
        assert_eq!(f["fldXYZ"], Value::Null);
    }
}
