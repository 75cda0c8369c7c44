use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    ApiBackend, CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType,
    Resolution,
};
use nokhwa::{Camera, query};

/// Errors that can occur while enumerating cameras or acquiring frames.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The capture backend failed to enumerate devices, open the requested
    /// device, or deliver a frame. Covers missing cameras, busy devices, and
    /// unsupported stream formats.
    #[error("camera backend error: {0}")]
    Backend(#[from] nokhwa::NokhwaError),
    /// Failed to encode a captured frame. This error is returned when the
    /// JPEG encoder rejects the frame dimensions or pixel layout.
    #[error("failed to encode frame: {0}")]
    Encode(#[from] image::ImageError),
}

/// Represents an available camera input device.
#[derive(Debug, Clone)]
pub struct CameraInputDevice {
    /// Identifier of the device within the capture backend.
    pub id: String,
    /// Human-readable device description.
    pub description: String,
}

impl std::fmt::Display for CameraInputDevice {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{} ({})", self.description, self.id)
    }
}

/// Returns a list of all camera devices available on this host.
pub fn list_camera_devices() -> Result<Vec<CameraInputDevice>, CaptureError> {
    Ok(query(ApiBackend::Auto)?
        .into_iter()
        .map(|info| CameraInputDevice {
            id: info.index().to_string(),
            description: info.human_name(),
        })
        .collect())
}

fn parse_device_index(device_id: &str) -> CameraIndex {
    match device_id.parse::<u32>() {
        Ok(index) => CameraIndex::Index(index),
        Err(_) => CameraIndex::String(device_id.to_string()),
    }
}

/// Opens a capture stream on the given device, or the first available device
/// when no id is provided.
///
/// The stream is requested at the crate's fixed capture format (see
/// [`crate::CAPTURE_WIDTH`]); the backend picks the closest mode the device
/// actually supports.
pub fn open_camera(device_id: Option<&str>) -> Result<Camera, CaptureError> {
    let index = match device_id {
        Some(id) => parse_device_index(id),
        None => CameraIndex::Index(0),
    };

    let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
        CameraFormat::new(
            Resolution::new(crate::CAPTURE_WIDTH, crate::CAPTURE_HEIGHT),
            FrameFormat::MJPEG,
            crate::CAPTURE_FRAME_RATE,
        ),
    ));

    let mut camera = Camera::new(index, requested)?;
    camera.open_stream()?;
    Ok(camera)
}

/// Blocks until the camera delivers its next frame and decodes it to RGB.
///
/// One successful call is one tick of the sampling loop; a failed call is a
/// tick with no frame available.
pub fn grab_frame(camera: &mut Camera) -> Result<RgbImage, CaptureError> {
    let buffer = camera.frame()?;
    Ok(buffer.decode_image::<RgbFormat>()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_device_ids_map_to_indices() {
        assert_eq!(parse_device_index("2"), CameraIndex::Index(2));
        assert_eq!(
            parse_device_index("FaceTime HD Camera"),
            CameraIndex::String("FaceTime HD Camera".to_string())
        );
    }
}
