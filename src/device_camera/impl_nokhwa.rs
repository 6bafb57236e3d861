use crate::device_camera::interface::{CameraStream, DeviceCamera, Frame};
use crate::library::logger::interface::Logger;
use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use std::sync::mpsc::{self, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

pub struct DeviceCameraNokhwa {
    index: u32,
    open_timeout: Duration,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceCameraNokhwa {
    pub fn new(index: u32, open_timeout: Duration, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            index,
            open_timeout,
            logger: logger.with_namespace("camera").with_namespace("nokhwa"),
        }
    }
}

impl DeviceCamera for DeviceCameraNokhwa {
    fn open(&self) -> Result<Box<dyn CameraStream>, Box<dyn std::error::Error + Send + Sync>> {
        self.logger
            .info(&format!("Opening camera at index {}", self.index))?;

        let latest = Arc::new(Mutex::new(None));
        let (opened_tx, opened_rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel();

        let index = self.index;
        let thread_latest = latest.clone();
        let logger = self.logger.clone();

        // nokhwa::Camera is not Send on every backend, so it lives and dies on this thread.
        let handle = std::thread::spawn(move || {
            let requested =
                RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);

            let mut camera = match nokhwa::Camera::new(CameraIndex::Index(index), requested)
                .and_then(|mut camera| camera.open_stream().map(|_| camera))
            {
                Ok(camera) => {
                    let _ = opened_tx.send(Ok(()));
                    camera
                }
                Err(e) => {
                    let _ = opened_tx.send(Err(e.to_string()));
                    return;
                }
            };

            loop {
                match shutdown_rx.try_recv() {
                    Ok(()) | Err(TryRecvError::Disconnected) => break,
                    Err(TryRecvError::Empty) => {}
                }

                let decoded = camera
                    .frame()
                    .and_then(|buffer| buffer.decode_image::<RgbFormat>());

                match decoded {
                    Ok(decoded) => {
                        let (width, height) = (decoded.width(), decoded.height());
                        if let Some(image) = RgbImage::from_raw(width, height, decoded.into_raw()) {
                            let mut latest = thread_latest
                                .lock()
                                .unwrap_or_else(|poisoned| poisoned.into_inner());
                            *latest = Some(Frame(image));
                        }
                    }
                    Err(e) => {
                        let _ = logger.error(&format!("Failed to read frame: {}", e));
                        std::thread::sleep(Duration::from_millis(100));
                    }
                }
            }

            if let Err(e) = camera.stop_stream() {
                let _ = logger.error(&format!("Failed to stop stream: {}", e));
            }
        });

        match opened_rx.recv_timeout(self.open_timeout) {
            Ok(Ok(())) => {
                self.logger.info("Camera stream opened")?;
                Ok(Box::new(CameraStreamNokhwa {
                    latest,
                    shutdown_tx: Some(shutdown_tx),
                    capture_thread: Some(handle),
                    logger: self.logger.clone(),
                }))
            }
            Ok(Err(reason)) => Err(reason.into()),
            Err(RecvTimeoutError::Timeout) => {
                // Dropping the sender tells the thread to exit once the device answers.
                drop(shutdown_tx);
                Err(format!("camera did not open within {:?}", self.open_timeout).into())
            }
            Err(RecvTimeoutError::Disconnected) => Err("camera thread exited".into()),
        }
    }
}

pub struct CameraStreamNokhwa {
    latest: Arc<Mutex<Option<Frame>>>,
    shutdown_tx: Option<Sender<()>>,
    capture_thread: Option<JoinHandle<()>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl CameraStream for CameraStreamNokhwa {
    fn latest_frame(&self) -> Option<Frame> {
        self.latest
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Stopping camera stream")?;

        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        if let Some(handle) = self.capture_thread.take() {
            handle
                .join()
                .map_err(|_| "camera thread panicked while stopping")?;
        }

        Ok(())
    }
}
