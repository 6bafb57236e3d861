use super::main::AttendanceApp;
use crate::attendance::core::{Effect, Msg};
use crate::frame_capturer::{self, CaptureError};
use std::sync::mpsc::{self, RecvTimeoutError};

impl AttendanceApp {
    pub fn execute_effect(&mut self, effect: Effect) {
        let _ = self
            .logger
            .info(&format!("Running effect: {}", effect.to_display_string()));

        match effect {
            Effect::AcquireCamera => {
                let camera = self.camera.clone();
                let device_camera = self.device_camera.clone();
                let sender = self.msg_sender.clone();
                std::thread::spawn(move || {
                    let msg = match camera.acquire(&*device_camera) {
                        Ok(()) => Msg::CameraReady,
                        Err(e) => Msg::CameraUnavailable(e.to_string()),
                    };
                    let _ = sender.send(msg);
                });
            }
            Effect::CaptureFrame { seq } => {
                // Read the frame now. Only encoding runs on the thread.
                let frame = self.camera.latest_frame();
                let (width, height) = (self.config.capture_width, self.config.capture_height);
                let sender = self.msg_sender.clone();
                std::thread::spawn(move || {
                    let result = frame
                        .ok_or(CaptureError::NoFrame)
                        .and_then(|frame| frame_capturer::capture(&frame, width, height));
                    let _ = sender.send(Msg::PhotoCaptured { seq, result });
                });
            }
            Effect::Submit { record } => {
                let endpoint = self.endpoint.clone();
                let logger = self.logger.clone();
                let sender = self.msg_sender.clone();
                std::thread::spawn(move || {
                    let submitted = endpoint.submit(&record);
                    if let Err(e) = &submitted {
                        let _ = logger.error(&format!("Submission failed: {}", e));
                    }
                    let _ = sender.send(Msg::SubmitDone(submitted));
                });
            }
            Effect::ScheduleRevert { after } => {
                let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
                let sender = self.msg_sender.clone();
                std::thread::spawn(move || {
                    // Only a timeout fires the revert. A disconnect means the app is gone.
                    if let Err(RecvTimeoutError::Timeout) = cancel_rx.recv_timeout(after) {
                        let _ = sender.send(Msg::SubmittedDisplayElapsed);
                    }
                });
                self.revert_timer = Some(cancel_tx);
            }
        }
    }
}
