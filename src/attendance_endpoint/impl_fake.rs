use crate::attendance_endpoint::interface::{AttendanceEndpoint, SubmissionRecord, SubmitError};
use crate::library::logger::interface::Logger;
use std::sync::{Arc, Mutex};

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeOutcome {
    Accept,
    Reject(u16),
    NetworkFailure,
}

pub struct AttendanceEndpointFake {
    outcome: Mutex<FakeOutcome>,
    requests: Mutex<Vec<SubmissionRecord>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl AttendanceEndpointFake {
    pub fn new(outcome: FakeOutcome, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            outcome: Mutex::new(outcome),
            requests: Mutex::new(Vec::new()),
            logger: logger.with_namespace("endpoint").with_namespace("fake"),
        }
    }

    #[allow(dead_code)]
    pub fn set_outcome(&self, outcome: FakeOutcome) {
        *self
            .outcome
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = outcome;
    }

    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<SubmissionRecord> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl AttendanceEndpoint for AttendanceEndpointFake {
    fn submit(&self, record: &SubmissionRecord) -> Result<(), SubmitError> {
        let _ = self
            .logger
            .info(&format!("Received submission for {}", record.name));

        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record.clone());

        let outcome = *self
            .outcome
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match outcome {
            FakeOutcome::Accept => Ok(()),
            FakeOutcome::Reject(status) => Err(SubmitError::Rejected { status }),
            FakeOutcome::NetworkFailure => {
                Err(SubmitError::Network("connection refused".to_string()))
            }
        }
    }
}
