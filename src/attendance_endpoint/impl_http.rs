use crate::attendance_endpoint::interface::{AttendanceEndpoint, SubmissionRecord, SubmitError};
use crate::library::logger::interface::Logger;
use std::sync::Arc;
use std::time::Duration;

/// Posts records as JSON to the spreadsheet script.
pub struct AttendanceEndpointHttp {
    url: String,
    client: reqwest::blocking::Client,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl AttendanceEndpointHttp {
    pub fn new(
        url: &str,
        timeout: Duration,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            url: url.trim().to_string(),
            client,
            logger: logger.with_namespace("endpoint").with_namespace("http"),
        })
    }
}

impl AttendanceEndpoint for AttendanceEndpointHttp {
    fn submit(&self, record: &SubmissionRecord) -> Result<(), SubmitError> {
        let _ = self.logger.info(&format!("POST {}", self.url));

        // `.json` sets `Content-Type: application/json`.
        let response = self
            .client
            .post(&self.url)
            .json(record)
            .send()
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = response.status();
        let _ = self.logger.info(&format!("Endpoint responded {}", status));

        if status.is_success() {
            Ok(())
        } else {
            Err(SubmitError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}
