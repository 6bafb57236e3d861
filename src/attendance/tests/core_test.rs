use crate::attendance::core::{
    init, transition, validate, CameraStatus, Effect, FormField, FormState, Model, Msg, Phase,
};
use crate::attendance_endpoint::interface::{Location, SubmitError};
use crate::config::Config;
use crate::error::AttendanceError;
use crate::frame_capturer::{CaptureError, CapturedPhoto};
use chrono::{TimeZone, Utc};
use image::{Rgb, RgbImage};
use std::time::Duration;

fn photo(shade: u8) -> CapturedPhoto {
    CapturedPhoto {
        data_uri: format!("data:image/png;base64,{}", shade),
        image: RgbImage::from_pixel(300, 200, Rgb([shade, shade, shade])),
    }
}

fn editing(name: &str, photo: Option<CapturedPhoto>) -> Model {
    Model {
        form: FormState {
            name: name.to_string(),
            location: Location::Home,
        },
        photo,
        camera: CameraStatus::Ready,
        ..Model::default()
    }
}

fn submit_at() -> Msg {
    Msg::SubmitRequested {
        at: Utc.with_ymd_and_hms(2026, 10, 18, 1, 30, 0).unwrap(),
    }
}

#[test]
fn test_init() {
    let (model, effects) = init();

    assert_eq!(model.phase, Phase::Editing);
    assert_eq!(model.form, FormState::default());
    assert_eq!(model.form.location, Location::Office);
    assert!(model.photo.is_none());
    assert_eq!(model.camera, CameraStatus::Pending);
    assert_eq!(effects, vec![Effect::AcquireCamera]);
}

#[test]
fn test_camera_outcome_leaves_pending() {
    let config = Config::default();
    let (model, _) = init();

    let (ready, _) = transition(&config, model.clone(), Msg::CameraReady);
    let (denied, _) = transition(
        &config,
        model,
        Msg::CameraUnavailable("permission denied".to_string()),
    );

    assert_eq!(ready.camera, CameraStatus::Ready);
    assert_eq!(
        denied.camera,
        CameraStatus::Unavailable("permission denied".to_string())
    );
}

#[test]
fn test_capture_ignored_while_camera_pending() {
    let config = Config::default();
    let (model, _) = init();

    let (model, effects) = transition(&config, model, Msg::CaptureRequested);

    assert!(effects.is_empty());
    assert_eq!(model.capture_seq, 0);
}

#[test]
fn test_blank_names_fail_validation() {
    for name in ["", " ", "\t", "  \n "] {
        let form = FormState {
            name: name.to_string(),
            location: Location::Office,
        };

        let errors = validate(&form);

        assert_eq!(
            errors.get(&FormField::Name).map(String::as_str),
            Some("Nama wajib diisi")
        );
    }

    let form = FormState {
        name: " Andi ".to_string(),
        location: Location::Office,
    };
    assert!(validate(&form).is_empty());
}

#[test]
fn test_blank_name_never_submits() {
    let config = Config::default();

    for name in ["", "   "] {
        let (model, effects) = transition(&config, editing(name, Some(photo(1))), submit_at());

        assert!(effects.is_empty());
        assert_eq!(model.phase, Phase::Editing);
        assert!(model.errors.contains_key(&FormField::Name));
        assert!(model.alert.is_none());
    }
}

#[test]
fn test_missing_photo_raises_alert() {
    let config = Config::default();

    let (model, effects) = transition(&config, editing("Andi", None), submit_at());

    assert!(effects.is_empty());
    assert_eq!(model.phase, Phase::Editing);
    assert_eq!(model.alert, Some(AttendanceError::MissingPhoto));
    assert!(model.errors.is_empty());
}

#[test]
fn test_missing_photo_and_blank_name_report_both() {
    let config = Config::default();

    let (model, effects) = transition(&config, editing("", None), submit_at());

    assert!(effects.is_empty());
    assert_eq!(model.alert, Some(AttendanceError::MissingPhoto));
    assert!(model.errors.contains_key(&FormField::Name));
}

#[test]
fn test_valid_submit_builds_record() {
    let config = Config::default();

    let (model, effects) = transition(&config, editing("Andi", Some(photo(7))), submit_at());

    assert_eq!(model.phase, Phase::Submitting);
    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::Submit { record } => {
            assert_eq!(record.name, "Andi");
            assert_eq!(record.location, Location::Home);
            assert_eq!(record.photo, photo(7).data_uri);
            assert_eq!(record.timestamp, "2026-10-18T01:30:00.000Z");
        }
        effect => panic!("Unexpected effect {:?}", effect),
    }
}

#[test]
fn test_second_submit_while_submitting_is_ignored() {
    let config = Config::default();
    let (model, _) = transition(&config, editing("Andi", Some(photo(7))), submit_at());

    let (model, effects) = transition(&config, model, submit_at());

    assert_eq!(model.phase, Phase::Submitting);
    assert!(effects.is_empty());
}

#[test]
fn test_fields_are_frozen_while_submitting() {
    let config = Config::default();
    let (model, _) = transition(&config, editing("Andi", Some(photo(7))), submit_at());

    let (model, _) = transition(&config, model, Msg::NameChanged("Budi".to_string()));
    let (model, effects) = transition(&config, model, Msg::CaptureRequested);

    assert_eq!(model.form.name, "Andi");
    assert!(effects.is_empty());
}

#[test]
fn test_success_resets_form_and_schedules_revert() {
    let config = Config {
        submitted_display_duration: Duration::from_secs(3),
        ..Config::default()
    };
    let (model, _) = transition(&config, editing("Andi", Some(photo(7))), submit_at());

    let (model, effects) = transition(&config, model, Msg::SubmitDone(Ok(())));

    assert_eq!(model.phase, Phase::Submitted);
    assert_eq!(model.form, FormState::default());
    assert!(model.photo.is_none());
    assert_eq!(
        effects,
        vec![Effect::ScheduleRevert {
            after: Duration::from_secs(3)
        }]
    );

    let (model, effects) = transition(&config, model, Msg::SubmittedDisplayElapsed);

    assert_eq!(model.phase, Phase::Editing);
    assert!(effects.is_empty());
}

#[test]
fn test_rejection_preserves_input() {
    let config = Config::default();
    let before = editing("Andi", Some(photo(7)));
    let (model, _) = transition(&config, before.clone(), submit_at());

    let (model, effects) = transition(
        &config,
        model,
        Msg::SubmitDone(Err(SubmitError::Rejected { status: 500 })),
    );

    assert!(effects.is_empty());
    assert_eq!(model.phase, Phase::Editing);
    assert_eq!(model.form, before.form);
    assert_eq!(model.photo, before.photo);
    assert_eq!(
        model.alert,
        Some(AttendanceError::SubmissionRejected { status: 500 })
    );
}

#[test]
fn test_network_failure_preserves_input() {
    let config = Config::default();
    let before = editing("Andi", Some(photo(7)));
    let (model, _) = transition(&config, before.clone(), submit_at());

    let (model, _) = transition(
        &config,
        model,
        Msg::SubmitDone(Err(SubmitError::Network("reset".to_string()))),
    );

    assert_eq!(model.phase, Phase::Editing);
    assert_eq!(model.form, before.form);
    assert_eq!(model.photo, before.photo);
    assert_eq!(
        model.alert,
        Some(AttendanceError::NetworkFailure("reset".to_string()))
    );
}

#[test]
fn test_capture_replaces_previous_photo() {
    let config = Config::default();
    let model = editing("Andi", None);

    let (model, effects) = transition(&config, model, Msg::CaptureRequested);
    assert_eq!(effects, vec![Effect::CaptureFrame { seq: 1 }]);
    let (model, _) = transition(
        &config,
        model,
        Msg::PhotoCaptured {
            seq: 1,
            result: Ok(photo(1)),
        },
    );
    assert_eq!(model.photo, Some(photo(1)));

    let (model, effects) = transition(&config, model, Msg::CaptureRequested);
    assert_eq!(effects, vec![Effect::CaptureFrame { seq: 2 }]);
    let (model, _) = transition(
        &config,
        model,
        Msg::PhotoCaptured {
            seq: 2,
            result: Ok(photo(2)),
        },
    );

    assert_eq!(model.photo, Some(photo(2)));
}

#[test]
fn test_older_capture_finishing_last_is_dropped() {
    let config = Config::default();
    let model = editing("Andi", None);

    let (model, _) = transition(&config, model, Msg::CaptureRequested);
    let (model, _) = transition(&config, model, Msg::CaptureRequested);
    assert_eq!(model.capture_seq, 2);

    let (model, _) = transition(
        &config,
        model,
        Msg::PhotoCaptured {
            seq: 2,
            result: Ok(photo(2)),
        },
    );
    let (model, effects) = transition(
        &config,
        model,
        Msg::PhotoCaptured {
            seq: 1,
            result: Ok(photo(1)),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(model.photo, Some(photo(2)));
}

#[test]
fn test_older_capture_failure_does_not_alert() {
    let config = Config::default();
    let model = editing("Andi", None);

    let (model, _) = transition(&config, model, Msg::CaptureRequested);
    let (model, _) = transition(&config, model, Msg::CaptureRequested);
    let (model, _) = transition(
        &config,
        model,
        Msg::PhotoCaptured {
            seq: 1,
            result: Err(CaptureError::NoFrame),
        },
    );

    assert!(model.alert.is_none());
    assert!(model.photo.is_none());
}

#[test]
fn test_capture_failure_alerts_and_keeps_photo() {
    let config = Config::default();
    let (model, _) = transition(
        &config,
        editing("Andi", Some(photo(1))),
        Msg::CaptureRequested,
    );

    let (model, _) = transition(
        &config,
        model,
        Msg::PhotoCaptured {
            seq: 1,
            result: Err(CaptureError::NoFrame),
        },
    );

    assert_eq!(model.photo, Some(photo(1)));
    assert!(matches!(model.alert, Some(AttendanceError::CaptureFailed(_))));
}

#[test]
fn test_capture_ignored_without_camera() {
    let config = Config::default();
    let (model, _) = transition(
        &config,
        Model::default(),
        Msg::CameraUnavailable("permission denied".to_string()),
    );

    let (model, effects) = transition(&config, model, Msg::CaptureRequested);

    assert!(effects.is_empty());
    assert_eq!(
        model.camera,
        CameraStatus::Unavailable("permission denied".to_string())
    );
}

#[test]
fn test_alert_dismissed() {
    let config = Config::default();
    let (model, _) = transition(&config, editing("Andi", None), submit_at());
    assert!(model.alert.is_some());

    let (model, _) = transition(&config, model, Msg::AlertDismissed);

    assert!(model.alert.is_none());
    assert_eq!(model.form.name, "Andi");
}

#[test]
fn test_revert_outside_submitted_is_ignored() {
    let config = Config::default();
    let model = editing("Andi", Some(photo(1)));

    let (after, effects) = transition(&config, model.clone(), Msg::SubmittedDisplayElapsed);

    assert_eq!(after, model);
    assert!(effects.is_empty());
}
