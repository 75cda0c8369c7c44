/// A camera input device as presented to the frontend device picker.
#[derive(Debug, Clone)]
pub struct CameraDevice {
    /// Identifier of the device within the capture backend.
    pub id: String,
    /// Human-readable device description.
    pub description: String,
    /// Whether this device is the one currently selected in the config.
    pub selected: bool,
}
