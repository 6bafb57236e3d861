use attendance::main::AttendanceApp;
use attendance_endpoint::impl_fake::{AttendanceEndpointFake, FakeOutcome};
use attendance_endpoint::impl_http::AttendanceEndpointHttp;
use attendance_endpoint::interface::AttendanceEndpoint;
use config::{CameraBackend, Config, EndpointBackend};
use device_camera::impl_fake::{DeviceCameraFake, FakeCameraMode};
use device_camera::impl_nokhwa::DeviceCameraNokhwa;
use device_camera::interface::DeviceCamera;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::sync::Arc;

mod attendance;
mod attendance_endpoint;
mod camera_manager;
mod config;
mod device_camera;
mod error;
mod frame_capturer;
mod library;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::default();

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));

    let device_camera: Arc<dyn DeviceCamera + Send + Sync> = match config.camera {
        CameraBackend::Native {
            index,
            open_timeout,
        } => Arc::new(DeviceCameraNokhwa::new(index, open_timeout, logger.clone())),
        CameraBackend::Fake => Arc::new(DeviceCameraFake::new(
            FakeCameraMode::Available {
                width: 640,
                height: 480,
            },
            logger.clone(),
        )),
    };

    let endpoint: Arc<dyn AttendanceEndpoint + Send + Sync> = match &config.endpoint {
        EndpointBackend::Http {
            url,
            request_timeout,
        } => Arc::new(AttendanceEndpointHttp::new(
            url,
            *request_timeout,
            logger.clone(),
        )?),
        EndpointBackend::Fake => Arc::new(AttendanceEndpointFake::new(
            FakeOutcome::Accept,
            logger.clone(),
        )),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 640.0])
            .with_resizable(false),
        ..Default::default()
    };

    let title = config.window_title.clone();
    let app = AttendanceApp::new(config, logger.clone(), device_camera, endpoint);

    eframe::run_native(&title, options, Box::new(|_cc| Box::new(app)))
        .map_err(|e| e.to_string())?;

    let _ = logger.info("Attendance window closed");

    Ok(())
}
