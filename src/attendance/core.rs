use crate::attendance_endpoint::interface::{Location, SubmissionRecord, SubmitError};
use crate::config::Config;
use crate::error::AttendanceError;
use crate::frame_capturer::{CaptureError, CapturedPhoto};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::BTreeMap;
use std::time::Duration;

//
// Model
//

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FormState {
    pub name: String,
    pub location: Location,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormField {
    Name,
}

pub type ValidationErrors = BTreeMap<FormField, String>;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum CameraStatus {
    #[default]
    Pending,
    Ready,
    Unavailable(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Editing,
    Submitting,
    Submitted,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Model {
    pub form: FormState,
    pub photo: Option<CapturedPhoto>,
    pub errors: ValidationErrors,
    pub phase: Phase,
    /// Blocking alert. The form stays inert until it is dismissed.
    pub alert: Option<AttendanceError>,
    pub camera: CameraStatus,
    /// Number of the latest capture request. Results tagged with an older
    /// number are stale and dropped.
    pub capture_seq: u64,
}

impl Model {
    pub fn to_display_string(&self) -> String {
        format!(
            "phase={:?} name={:?} location={:?} photo={} errors={:?} alert={:?} camera={:?} capture_seq={}",
            self.phase,
            self.form.name,
            self.form.location,
            self.photo.is_some(),
            self.errors,
            self.alert,
            self.camera,
            self.capture_seq,
        )
    }
}

//
// Msg
//

#[derive(Debug)]
pub enum Msg {
    CameraReady,
    CameraUnavailable(String),
    NameChanged(String),
    LocationChanged(Location),
    CaptureRequested,
    PhotoCaptured {
        seq: u64,
        result: Result<CapturedPhoto, CaptureError>,
    },
    SubmitRequested { at: DateTime<Utc> },
    SubmitDone(Result<(), SubmitError>),
    SubmittedDisplayElapsed,
    AlertDismissed,
}

impl Msg {
    pub fn to_display_string(&self) -> String {
        match self {
            Msg::PhotoCaptured {
                seq,
                result: Ok(photo),
            } => format!(
                "PhotoCaptured {{ seq: {}, result: Ok({}x{}, {} bytes) }}",
                seq,
                photo.image.width(),
                photo.image.height(),
                photo.data_uri.len()
            ),
            msg => format!("{:?}", msg),
        }
    }
}

//
// Effect
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    AcquireCamera,
    CaptureFrame { seq: u64 },
    Submit { record: SubmissionRecord },
    ScheduleRevert { after: Duration },
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::Submit { record } => format!(
                "Submit {{ name: {:?}, location: {:?}, timestamp: {:?}, photo: {} bytes }}",
                record.name,
                record.location,
                record.timestamp,
                record.photo.len()
            ),
            effect => format!("{:?}", effect),
        }
    }
}

//
// Validation
//

pub fn validate(form: &FormState) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if form.name.trim().is_empty() {
        errors.insert(FormField::Name, "Nama wajib diisi".to_string());
    }
    errors
}

//
// Transition
//

pub fn init() -> (Model, Vec<Effect>) {
    (Model::default(), vec![Effect::AcquireCamera])
}

pub fn transition(config: &Config, model: Model, msg: Msg) -> (Model, Vec<Effect>) {
    match (model.phase, msg) {
        (_, Msg::CameraReady) => (
            Model {
                camera: CameraStatus::Ready,
                ..model
            },
            vec![],
        ),

        (_, Msg::CameraUnavailable(reason)) => (
            Model {
                camera: CameraStatus::Unavailable(reason),
                ..model
            },
            vec![],
        ),

        (_, Msg::AlertDismissed) => (
            Model {
                alert: None,
                ..model
            },
            vec![],
        ),

        // Editing
        (Phase::Editing, Msg::NameChanged(name)) => {
            let mut model = model;
            model.form.name = name;
            (model, vec![])
        }

        (Phase::Editing, Msg::LocationChanged(location)) => {
            let mut model = model;
            model.form.location = location;
            (model, vec![])
        }

        (Phase::Editing, Msg::CaptureRequested) => {
            if model.camera == CameraStatus::Ready {
                let seq = model.capture_seq + 1;
                (
                    Model {
                        capture_seq: seq,
                        ..model
                    },
                    vec![Effect::CaptureFrame { seq }],
                )
            } else {
                (model, vec![])
            }
        }

        (_, Msg::PhotoCaptured { seq, .. }) if seq != model.capture_seq => (model, vec![]),

        (Phase::Editing, Msg::PhotoCaptured { result: Ok(photo), .. }) => (
            Model {
                photo: Some(photo),
                ..model
            },
            vec![],
        ),

        (Phase::Editing, Msg::PhotoCaptured { result: Err(e), .. }) => (
            Model {
                alert: Some(e.into()),
                ..model
            },
            vec![],
        ),

        (Phase::Editing, Msg::SubmitRequested { at }) => {
            let errors = validate(&model.form);
            let photo = model.photo.as_ref().map(|photo| photo.data_uri.clone());

            match photo {
                Some(photo) if errors.is_empty() => {
                    let record = SubmissionRecord {
                        name: model.form.name.clone(),
                        location: model.form.location,
                        photo,
                        timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
                    };

                    (
                        Model {
                            errors,
                            phase: Phase::Submitting,
                            ..model
                        },
                        vec![Effect::Submit { record }],
                    )
                }
                Some(_) => (Model { errors, ..model }, vec![]),
                None => (
                    Model {
                        errors,
                        alert: Some(AttendanceError::MissingPhoto),
                        ..model
                    },
                    vec![],
                ),
            }
        }

        // Submitting
        (Phase::Submitting, Msg::SubmitDone(Ok(()))) => (
            Model {
                form: FormState::default(),
                photo: None,
                errors: ValidationErrors::new(),
                phase: Phase::Submitted,
                ..model
            },
            vec![Effect::ScheduleRevert {
                after: config.submitted_display_duration,
            }],
        ),

        (Phase::Submitting, Msg::SubmitDone(Err(e))) => (
            Model {
                phase: Phase::Editing,
                alert: Some(e.into()),
                ..model
            },
            vec![],
        ),

        // Submitted
        (Phase::Submitted, Msg::SubmittedDisplayElapsed) => (
            Model {
                phase: Phase::Editing,
                ..model
            },
            vec![],
        ),

        (_, _) => (model, vec![]),
    }
}
