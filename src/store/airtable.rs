// src/store/airtable.rs
// Airtable REST backend: list with offset pagination, PATCH one record at a time.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CaseRecord, FieldMap, Fields, InputFields, RecordStore, StoreError};
use crate::config::{AirtableOptions, StoreOptions};
use crate::docket::ExtractionResult;

pub const API_KEY_VAR: &str = "AIRTABLE_API_KEY";

pub struct AirtableStore {
    client: Client,
    token: String,
    table_url: String,
    page_size: u32,
    input: InputFields,
    output: FieldMap,
}

#[derive(Debug, Deserialize)]
struct ListPage {
    records: Vec<ApiRecord>,
    #[serde(default)]
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiRecord {
    id: String,
    #[serde(default)]
    fields: Fields,
}

#[derive(Serialize)]
struct Patch<'a> {
    fields: &'a Fields,
}

impl AirtableStore {
    /// Token from `AIRTABLE_API_KEY`.
    pub fn from_env(opts: &StoreOptions) -> Result<Self, StoreError> {
        let token = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or(StoreError::MissingConfig(API_KEY_VAR))?;
        Self::new(opts, token)
    }

    pub fn new(opts: &StoreOptions, token: String) -> Result<Self, StoreError> {
        let AirtableOptions { api_url, base_id, table_id, page_size } = &opts.airtable;
        if base_id.is_empty() {
            return Err(StoreError::MissingConfig("airtable base id"));
        }
        if table_id.is_empty() {
            return Err(StoreError::MissingConfig("airtable table id"));
        }

        Ok(Self {
            client: Client::builder().build()?,
            token,
            table_url: format!("{}/{}/{}", api_url.trim_end_matches('/'), base_id, table_id),
            page_size: *page_size,
            input: opts.input.clone(),
            output: opts.output.clone(),
        })
    }

    pub fn table_url(&self) -> &str { &self.table_url }

    fn list_page(&self, offset: Option<&str>) -> Result<ListPage, StoreError> {
        let mut query: Vec<(&str, String)> = vec![("pageSize", self.page_size.to_string())];
        if let Some(o) = offset {
            query.push(("offset", o.to_string()));
        }

        let resp = self
            .client
            .get(&self.table_url)
            .bearer_auth(&self.token)
            .query(&query)
            .send()?;
        let resp = check(resp)?;
        Ok(resp.json()?)
    }
}

impl RecordStore for AirtableStore {
    fn list_cases(&mut self) -> Result<Vec<CaseRecord>, StoreError> {
        let mut out = Vec::new();
        let mut offset: Option<String> = None;
        loop {
            let page = self.list_page(offset.as_deref())?;
            debug!(records = page.records.len(), more = page.offset.is_some(), "listed page");
            out.extend(
                page.records
                    .iter()
                    .map(|r| CaseRecord::from_fields(r.id.clone(), &r.fields, &self.input)),
            );
            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }
        Ok(out)
    }

    fn write_result(&mut self, record_id: &str, result: &ExtractionResult) -> Result<(), StoreError> {
        let fields = self.output.to_fields(result);
        let resp = self
            .client
            .patch(format!("{}/{}", self.table_url, record_id))
            .bearer_auth(&self.token)
            .json(&Patch { fields: &fields })
            .send()?;
        check(resp)?;
        Ok(())
    }
}

fn check(resp: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    Err(StoreError::Api { status: status.as_u16(), body })
}
