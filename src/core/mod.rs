// src/core/mod.rs

pub mod dates;
pub mod html;
pub mod sanitize;

pub use html::{Entry, LayoutError, Section, SectionSpec};
