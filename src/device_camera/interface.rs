use image::RgbImage;

/// A single decoded RGB frame from the camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame(pub RgbImage);

/// A live stream acquired from a camera device.
pub trait CameraStream: Send + Sync {
    /// Most recent frame, or `None` before the first frame arrives.
    fn latest_frame(&self) -> Option<Frame>;

    /// Stops every track of the stream. Callers must invoke this at most once.
    fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

pub trait DeviceCamera: Send + Sync {
    /// Requests access to the device. Fails on permission denial or a missing device.
    fn open(&self) -> Result<Box<dyn CameraStream>, Box<dyn std::error::Error + Send + Sync>>;
}
