use crate::device_camera::interface::{CameraStream, DeviceCamera, Frame};
use crate::library::logger::interface::Logger;
use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeCameraMode {
    Available { width: u32, height: u32 },
    PermissionDenied,
}

pub struct DeviceCameraFake {
    mode: FakeCameraMode,
    stop_count: Arc<AtomicUsize>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceCameraFake {
    pub fn new(mode: FakeCameraMode, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            mode,
            stop_count: Arc::new(AtomicUsize::new(0)),
            logger: logger.with_namespace("camera").with_namespace("fake"),
        }
    }

    /// Number of times any stream opened by this device has been stopped.
    #[allow(dead_code)]
    pub fn stop_count(&self) -> usize {
        self.stop_count.load(Ordering::SeqCst)
    }

    /// The frame a stream hands out at `index`. Noise is seeded by the index so
    /// frames differ from each other yet are reproducible.
    pub fn frame_at(width: u32, height: u32, index: u64) -> Frame {
        let mut rng = StdRng::seed_from_u64(index);
        let base = (index.wrapping_mul(37) % 256) as u8;
        let image = RgbImage::from_fn(width, height, |x, y| {
            let noise: u8 = rng.random_range(0..16);
            Rgb([
                base.wrapping_add(noise),
                ((x * 255) / width.max(1)) as u8,
                ((y * 255) / height.max(1)) as u8,
            ])
        });
        Frame(image)
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn open(&self) -> Result<Box<dyn CameraStream>, Box<dyn std::error::Error + Send + Sync>> {
        match self.mode {
            FakeCameraMode::Available { width, height } => {
                self.logger
                    .info(&format!("Opening fake camera {}x{}", width, height))?;
                Ok(Box::new(CameraStreamFake {
                    width,
                    height,
                    next_index: AtomicU64::new(0),
                    stop_count: self.stop_count.clone(),
                    logger: self.logger.clone(),
                }))
            }
            FakeCameraMode::PermissionDenied => {
                self.logger.info("Fake camera permission denied")?;
                Err("camera permission denied".into())
            }
        }
    }
}

pub struct CameraStreamFake {
    width: u32,
    height: u32,
    next_index: AtomicU64,
    stop_count: Arc<AtomicUsize>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl CameraStream for CameraStreamFake {
    fn latest_frame(&self) -> Option<Frame> {
        let index = self.next_index.fetch_add(1, Ordering::SeqCst);
        Some(DeviceCameraFake::frame_at(self.width, self.height, index))
    }

    fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.stop_count.fetch_add(1, Ordering::SeqCst);
        self.logger.info("Fake camera stopped")?;
        Ok(())
    }
}
