// src/core/html.rs
//! Named section locators.
//!
//! Docket pages render every section the same way: a container with a known
//! element id, one block per entry inside it, and label/value pairs inside each
//! block where the value is the element right after its label. A [`Section`]
//! captures those three selectors; [`Section::entries`] turns the section into
//! a list of [`Entry`] maps keyed by label text.
//!
//! Nothing here indexes by position, so a missing label or a short block just
//! yields fewer fields.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::sanitize::normalize_ws;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid selector `{selector}` for {section} section: {reason}")]
    Selector {
        section: &'static str,
        selector: String,
        reason: String,
    },
    /// An empty identifier would match every party entry.
    #[error("plaintiff identifier is empty")]
    EmptyPlaintiff,
}

/// Where a section lives on the page, as configured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Element id of the section container.
    pub id: String,
    /// CSS selector of one entry inside the container.
    pub entry: String,
    /// CSS selector of a label; its next element sibling holds the value.
    pub label: String,
}

impl SectionSpec {
    pub fn new(id: &str, entry: &str, label: &str) -> Self {
        Self { id: id.into(), entry: entry.into(), label: label.into() }
    }
}

/// One entry of a section: label → value, in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entry {
    fields: Vec<(String, String)>,
}

impl Entry {
    /// Value of the first field with this exact label.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    pub fn push(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.fields.push((label.into(), value.into()));
    }
}

impl<L: Into<String>, V: Into<String>> FromIterator<(L, V)> for Entry {
    fn from_iter<I: IntoIterator<Item = (L, V)>>(iter: I) -> Self {
        let mut entry = Entry::default();
        for (l, v) in iter {
            entry.push(l, v);
        }
        entry
    }
}

/// A compiled [`SectionSpec`].
#[derive(Debug)]
pub struct Section {
    name: &'static str,
    root: Selector,
    entry: Selector,
    label: Selector,
}

impl Section {
    pub fn compile(name: &'static str, spec: &SectionSpec) -> Result<Self, LayoutError> {
        // Attribute form so that duplicated ids still match.
        let root = format!("[id=\"{}\"]", spec.id);
        Ok(Self {
            name,
            root: parse_selector(name, &root)?,
            entry: parse_selector(name, &spec.entry)?,
            label: parse_selector(name, &spec.label)?,
        })
    }

    /// Entries of the first matching section container. Empty when the
    /// section is missing; entries without any label/value pair are dropped.
    pub fn entries(&self, doc: &Html) -> Vec<Entry> {
        let Some(container) = doc.select(&self.root).next() else {
            tracing::trace!(section = self.name, "section not found");
            return Vec::new();
        };

        container
            .select(&self.entry)
            .map(|block| self.read_entry(block))
            .filter(|e| !e.is_empty())
            .collect()
    }

    fn read_entry(&self, block: ElementRef<'_>) -> Entry {
        let mut entry = Entry::default();
        for label in block.select(&self.label) {
            let Some(value) = next_element_sibling(label) else { continue };
            entry.push(text_of(label), text_of(value));
        }
        entry
    }
}

fn parse_selector(section: &'static str, css: &str) -> Result<Selector, LayoutError> {
    Selector::parse(css).map_err(|e| LayoutError::Selector {
        section,
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

fn next_element_sibling(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Visible text of an element, whitespace-normalized.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parties() -> Section {
        let spec = SectionSpec::new("tblDocket2", "[id=\"tblForms2\"]", "div.bold-font");
        Section::compile("parties", &spec).unwrap()
    }

    #[test]
    fn reads_label_value_pairs_per_entry() {
        let doc = Html::parse_document(r#"
            <div id="tblDocket2">
              <div id="tblForms2">
                <div class="col-4 bold-font">Party Name</div><div class="col-8">State Of Arizona</div>
                <div class="col-4 bold-font">Attorney</div><div class="col-8"> Jane
                   Doe </div>
              </div>
              <div id="tblForms2">
                <div class="col-4 bold-font">Party Name</div><div class="col-8">SMITH, JOHN</div>
              </div>
            </div>
        "#);

        let entries = parties().entries(&doc);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].get("Party Name"), Some("State Of Arizona"));
        assert_eq!(entries[0].get("Attorney"), Some("Jane Doe"));
        assert_eq!(entries[1].get("Attorney"), None);
    }

    #[test]
    fn missing_section_yields_nothing() {
        let doc = Html::parse_document("<html><body><p>nothing here</p></body></html>");
        assert!(parties().entries(&doc).is_empty());
    }

    #[test]
    fn label_without_value_is_skipped() {
        let doc = Html::parse_document(r#"
            <div id="tblDocket2"><div id="tblForms2">
              <div class="bold-font">Party Name</div>
            </div></div>
        "#);
        assert!(parties().entries(&doc).is_empty());
    }

    #[test]
    fn bad_selector_is_reported() {
        let spec = SectionSpec::new("x", "div[", "div");
        let err = Section::compile("calendar", &spec).unwrap_err();
        assert!(err.to_string().contains("calendar"));
    }
}
