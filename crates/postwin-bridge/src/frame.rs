use std::sync::Arc;

/// The latest captured frame, encoded for display.
///
/// Frames are pushed once per capture tick so the preview surfaces (main
/// panel, overlay, mirror window) can redraw without touching the camera.
/// The pixels are already horizontally mirrored to the selfie convention.
#[derive(Clone)]
pub struct PreviewFrame {
    /// JPEG-encoded frame bytes.
    pub jpeg: Arc<Vec<u8>>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

impl PreviewFrame {
    pub fn new(jpeg: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            jpeg: Arc::new(jpeg),
            width,
            height,
        }
    }
}

// Bridge messages are logged wholesale; a derived Debug would dump the JPEG
// payload into the log line.
impl std::fmt::Debug for PreviewFrame {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("PreviewFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("jpeg_bytes", &self.jpeg.len())
            .finish()
    }
}
