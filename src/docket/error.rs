// src/docket/error.rs
use thiserror::Error;

/// Content that cannot be treated as a document at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("page content is empty")]
    Empty,
    #[error("page content contains no markup")]
    NotMarkup,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("case has no docket URL")]
    MissingUrl,
    #[error("case has no tracked party name")]
    MissingPartyName,
}
