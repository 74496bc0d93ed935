// src/store/file.rs
// Local JSON store. File shape:
//   [ { "id": "rec1", "fields": { "Suspect Name": "...", "Docket URL": "...", ... } }, ... ]
// Every write rewrites the whole file through a temp file + rename.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{CaseRecord, FieldMap, Fields, InputFields, RecordStore, StoreError};
use crate::config::StoreOptions;
use crate::docket::ExtractionResult;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: String,
    #[serde(default)]
    pub fields: Fields,
}

pub struct JsonFileStore {
    path: PathBuf,
    records: Vec<StoredRecord>,
    input: InputFields,
    output: FieldMap,
}

impl JsonFileStore {
    pub fn open(opts: &StoreOptions) -> Result<Self, StoreError> {
        let path = opts.file.clone();
        let text = fs::read_to_string(&path).map_err(|source| StoreError::Io { path: path.clone(), source })?;
        let records: Vec<StoredRecord> = serde_json::from_str(&text)?;
        Ok(Self { path, records, input: opts.input.clone(), output: opts.output.clone() })
    }

    pub fn records(&self) -> &[StoredRecord] { &self.records }

    fn save(&self) -> Result<(), StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io { path: self.path.clone(), source };
        let text = serde_json::to_string_pretty(&self.records)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn list_cases(&mut self) -> Result<Vec<CaseRecord>, StoreError> {
        Ok(self
            .records
            .iter()
            .map(|r| CaseRecord::from_fields(r.id.clone(), &r.fields, &self.input))
            .collect())
    }

    fn write_result(&mut self, record_id: &str, result: &ExtractionResult) -> Result<(), StoreError> {
        let update = self.output.to_fields(result);
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| StoreError::UnknownRecord(record_id.to_string()))?;
        record.fields.extend(update);
        self.save()
    }
}
