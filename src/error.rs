//! Error module
//!

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Status {
    #[error("Bad file version {0}")]
    BadFileVersion(usize),
    #[error("Missing configuration file, use -c or create {0}")]
    MissingConfig(String),
    #[error("Feed payload is not JSON ({0})")]
    BadPayload(#[from] serde_json::Error),
    #[error("Malformed field {0} ({1})")]
    MalformedField(String, String),
    #[error("Feed unavailable ({0})")]
    SourceUnavailable(String),
}
