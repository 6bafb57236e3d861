use crate::device_camera::interface::{CameraStream, DeviceCamera, Frame};
use crate::error::AttendanceError;
use crate::library::logger::interface::Logger;
use std::sync::{Arc, Mutex, MutexGuard};

struct CameraSlot {
    stream: Option<Box<dyn CameraStream>>,
    released: bool,
}

/// Sole owner of the camera stream. Starts empty, is filled by `acquire`, and
/// the stream is released exactly once, either through `release` or on drop.
pub struct CameraManager {
    slot: Mutex<CameraSlot>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl CameraManager {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            slot: Mutex::new(CameraSlot {
                stream: None,
                released: false,
            }),
            logger: logger.with_namespace("camera_manager"),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CameraSlot> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Opens `device` and keeps the stream. Blocks for as long as the device
    /// takes to open, so callers run it off the UI thread. A stream that opens
    /// after `release` is stopped straight away.
    pub fn acquire(&self, device: &dyn DeviceCamera) -> Result<(), AttendanceError> {
        let stream = device.open().map_err(|e| {
            let error = AttendanceError::CameraUnavailable(e.to_string());
            let _ = self.logger.error(&error.to_string());
            error
        })?;

        let mut slot = self.lock();
        if slot.released {
            drop(slot);
            let _ = self.logger.info("Camera opened after release");
            self.stop(stream);
            return Err(AttendanceError::CameraUnavailable(
                "released before the camera opened".to_string(),
            ));
        }

        let previous = slot.stream.replace(stream);
        drop(slot);
        if let Some(previous) = previous {
            self.stop(previous);
        }

        let _ = self.logger.info("Camera acquired");
        Ok(())
    }

    pub fn latest_frame(&self) -> Option<Frame> {
        self.lock()
            .stream
            .as_ref()
            .and_then(|stream| stream.latest_frame())
    }

    /// Stops the held stream and refuses any later acquisition. Later calls,
    /// and calls without a stream, do nothing.
    pub fn release(&self) {
        let stream = {
            let mut slot = self.lock();
            slot.released = true;
            slot.stream.take()
        };

        if let Some(stream) = stream {
            self.stop(stream);
        }
    }

    fn stop(&self, mut stream: Box<dyn CameraStream>) {
        match stream.stop() {
            Ok(()) => {
                let _ = self.logger.info("Camera released");
            }
            Err(e) => {
                let _ = self.logger.error(&format!("Failed to release camera: {}", e));
            }
        }
    }
}

impl Drop for CameraManager {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device_camera::impl_fake::{DeviceCameraFake, FakeCameraMode};
    use crate::library::logger::impl_console::LoggerConsole;

    fn logger() -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap()))
    }

    fn available() -> FakeCameraMode {
        FakeCameraMode::Available {
            width: 32,
            height: 24,
        }
    }

    #[test]
    fn test_empty_until_acquired() {
        let device = DeviceCameraFake::new(available(), logger());
        let manager = CameraManager::new(logger());

        assert!(manager.latest_frame().is_none());

        manager.acquire(&device).unwrap();
        assert!(manager.latest_frame().is_some());
    }

    #[test]
    fn test_teardown_stops_stream_exactly_once() {
        let device = DeviceCameraFake::new(available(), logger());

        let manager = CameraManager::new(logger());
        manager.acquire(&device).unwrap();

        manager.release();
        manager.release();
        drop(manager);

        assert_eq!(device.stop_count(), 1);
    }

    #[test]
    fn test_drop_releases_without_any_capture() {
        let device = DeviceCameraFake::new(available(), logger());

        let manager = CameraManager::new(logger());
        manager.acquire(&device).unwrap();
        drop(manager);

        assert_eq!(device.stop_count(), 1);
    }

    #[test]
    fn test_stream_opened_after_release_is_stopped_at_once() {
        let device = DeviceCameraFake::new(available(), logger());

        let manager = CameraManager::new(logger());
        manager.release();

        let acquired = manager.acquire(&device);

        assert!(matches!(acquired, Err(AttendanceError::CameraUnavailable(_))));
        assert!(manager.latest_frame().is_none());
        assert_eq!(device.stop_count(), 1);

        drop(manager);
        assert_eq!(device.stop_count(), 1);
    }

    #[test]
    fn test_unavailable_camera_degrades() {
        let device = DeviceCameraFake::new(FakeCameraMode::PermissionDenied, logger());

        let manager = CameraManager::new(logger());
        let acquired = manager.acquire(&device);

        assert!(matches!(acquired, Err(AttendanceError::CameraUnavailable(_))));
        assert!(manager.latest_frame().is_none());

        drop(manager);
        assert_eq!(device.stop_count(), 0);
    }
}
