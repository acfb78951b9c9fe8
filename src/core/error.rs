use thiserror::Error;

use crate::infrastructure::browser::BrowserError;

/// Client error taxonomy.
///
/// Variants distinguish caller mistakes (`InvalidFilter`, `NotInitialized`)
/// from site incompatibilities (`ElementNotFound`, `PageStructure`) and from
/// faults of the underlying browser driver (`Search`, `Submission`,
/// `Reservation`). Only `ReservationRejected` carries text produced by the
/// remote site itself.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("not initialized: {0}")]
    NotInitialized(&'static str),

    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("unexpected page structure: {0}")]
    PageStructure(String),

    #[error("search failed: {0}")]
    Search(#[source] BrowserError),

    #[error("login submission failed: {0}")]
    Submission(#[source] BrowserError),

    #[error("reservation failed: {0}")]
    Reservation(#[source] BrowserError),

    #[error("reservation rejected by the site: {0}")]
    ReservationRejected(String),

    #[error("session data is malformed: {0}")]
    Session(#[from] serde_json::Error),
}

/// Crate-wide Result type.
pub type Result<T> = std::result::Result<T, Error>;
