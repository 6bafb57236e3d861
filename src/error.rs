use crate::attendance_endpoint::interface::SubmitError;
use crate::frame_capturer::CaptureError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttendanceError {
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),
    #[error("submit attempted without a captured photo")]
    MissingPhoto,
    #[error("capture failed: {0}")]
    CaptureFailed(String),
    #[error("endpoint rejected submission with status {status}")]
    SubmissionRejected { status: u16 },
    #[error("network failure: {0}")]
    NetworkFailure(String),
}

impl AttendanceError {
    /// Text shown to the user. Log lines use `Display` instead.
    pub fn user_message(&self) -> String {
        match self {
            AttendanceError::CameraUnavailable(_) => "Kamera tidak tersedia".to_string(),
            AttendanceError::MissingPhoto => "Silakan ambil foto sebelum mengirim".to_string(),
            AttendanceError::CaptureFailed(_) => {
                "Gagal mengambil foto. Silakan coba lagi.".to_string()
            }
            AttendanceError::SubmissionRejected { .. } => {
                "Gagal mengirim absensi. Silakan coba lagi.".to_string()
            }
            AttendanceError::NetworkFailure(_) => {
                "Kesalahan jaringan. Silakan coba lagi nanti.".to_string()
            }
        }
    }
}

impl From<SubmitError> for AttendanceError {
    fn from(value: SubmitError) -> Self {
        match value {
            SubmitError::Rejected { status } => AttendanceError::SubmissionRejected { status },
            SubmitError::Network(reason) => AttendanceError::NetworkFailure(reason),
        }
    }
}

impl From<CaptureError> for AttendanceError {
    fn from(value: CaptureError) -> Self {
        AttendanceError::CaptureFailed(value.to_string())
    }
}
