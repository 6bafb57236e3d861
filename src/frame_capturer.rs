use crate::device_camera::interface::Frame;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{imageops, ImageFormat, RgbImage};
use std::io::Cursor;
use thiserror::Error;

const DATA_URI_PREFIX: &str = "data:image/png;base64,";

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no frame available from the camera yet")]
    NoFrame,
    #[error("failed to encode frame: {0}")]
    Encode(#[from] image::ImageError),
}

/// A still image frozen from the live preview.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedPhoto {
    /// Self-contained `data:image/png;base64,...` string sent to the endpoint.
    pub data_uri: String,
    /// The resized raster, kept for the on-screen thumbnail.
    pub image: RgbImage,
}

/// Freezes `frame` into a `width`x`height` PNG data URI. The frame is stretched
/// to the target size, not cropped.
pub fn capture(frame: &Frame, width: u32, height: u32) -> Result<CapturedPhoto, CaptureError> {
    let resized = imageops::resize(&frame.0, width, height, imageops::FilterType::Triangle);

    let mut png = Vec::new();
    resized.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(CapturedPhoto {
        data_uri: format!("{}{}", DATA_URI_PREFIX, STANDARD.encode(&png)),
        image: resized,
    })
}
