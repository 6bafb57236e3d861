use crate::attendance::core::{init, transition, Effect, Model, Msg};
use crate::attendance_endpoint::interface::AttendanceEndpoint;
use crate::camera_manager::CameraManager;
use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::library::logger::interface::Logger;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

/// One mounted attendance form. Owns its model, the camera for its whole
/// lifetime, and any pending revert timer.
pub struct AttendanceApp {
    pub model: Model,
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pub camera: Arc<CameraManager>,
    pub endpoint: Arc<dyn AttendanceEndpoint + Send + Sync>,
    pub msg_sender: Sender<Msg>,
    pub msg_receiver: Receiver<Msg>,
    /// Dropping this sender cancels the pending revert timer.
    pub revert_timer: Option<Sender<()>>,
    pub preview_texture: Option<egui::TextureHandle>,
    pub photo_texture: Option<egui::TextureHandle>,
}

impl AttendanceApp {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        endpoint: Arc<dyn AttendanceEndpoint + Send + Sync>,
    ) -> Self {
        let logger = logger.with_namespace("attendance");
        let (msg_sender, msg_receiver) = channel();
        let (model, effects) = init();

        let camera = Arc::new(CameraManager::new(logger.clone()));

        let mut app = Self {
            model,
            config,
            logger,
            device_camera,
            camera,
            endpoint,
            msg_sender,
            msg_receiver,
            revert_timer: None,
            preview_texture: None,
            photo_texture: None,
        };

        app.execute_effects(effects);

        app
    }

    /// Applies `msg` to the model and starts the resulting effects.
    pub fn dispatch(&mut self, msg: Msg) {
        let _ = self.logger.info(&format!(
            "\nold model:\n\t{}\n\nmsg:\n\t{}",
            self.model.to_display_string(),
            msg.to_display_string(),
        ));

        let (new_model, effects) = transition(&self.config, std::mem::take(&mut self.model), msg);

        let _ = self.logger.info(&format!(
            "\nnew model:\n\t{}\n\neffects:\n\t{:?}",
            new_model.to_display_string(),
            effects
                .iter()
                .map(Effect::to_display_string)
                .collect::<Vec<_>>(),
        ));

        self.model = new_model;

        self.execute_effects(effects);
    }

    /// Feeds every message produced by finished effects back into the model.
    /// Returns how many were handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.msg_receiver.try_recv() {
            self.dispatch(msg);
            handled += 1;
        }
        handled
    }

    fn execute_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }
}

impl Drop for AttendanceApp {
    fn drop(&mut self) {
        self.revert_timer = None;
        self.camera.release();
    }
}
