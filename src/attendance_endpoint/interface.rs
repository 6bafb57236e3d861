use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Location {
    #[default]
    #[serde(rename = "kantor")]
    Office,
    #[serde(rename = "rumah")]
    Home,
}

impl Location {
    pub fn label(&self) -> &'static str {
        match self {
            Location::Office => "Kantor",
            Location::Home => "Rumah",
        }
    }
}

/// The payload sent for one attendance entry. Built at submit time only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRecord {
    pub name: String,
    pub location: Location,
    pub photo: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("endpoint responded with status {status}")]
    Rejected { status: u16 },
    #[error("request failed: {0}")]
    Network(String),
}

pub trait AttendanceEndpoint: Send + Sync {
    /// Sends `record` once. Any 2xx response counts as accepted.
    fn submit(&self, record: &SubmissionRecord) -> Result<(), SubmitError>;
}
