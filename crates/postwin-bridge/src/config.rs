use serde::{Deserialize, Serialize};

/// Configuration for the detection sampling pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DetectionConfig {
    /// Number of capture ticks between detection samples.
    pub sample_interval: u32,
    /// Minimum confidence the remote service should require for a detection.
    pub confidence_threshold: f32,
    /// Base URL of the detection service. When unset, the environment
    /// override or the local default is used.
    pub api_base_url: Option<String>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            sample_interval: 30,
            confidence_threshold: 0.5,
            api_base_url: None,
        }
    }
}

/// Initial appearance of the floating overlay. The live geometry is
/// session-only; these are only the values the overlay opens with.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OverlayConfig {
    /// Initial horizontal offset of the overlay, in pixels from the left.
    pub initial_x: f32,
    /// Initial vertical offset of the overlay, in pixels from the top.
    pub initial_y: f32,
    /// Initial overlay opacity, within `[0.2, 1.0]`.
    pub opacity: f32,
    /// Whether the audio cue on bad posture is enabled.
    pub sound_enabled: bool,
    /// Whether the overlay shows the camera preview by default.
    pub show_camera: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            initial_x: 20.0,
            initial_y: 20.0,
            opacity: 0.9,
            sound_enabled: true,
            show_camera: true,
        }
    }
}

/// Configuration for selecting a specific camera device.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CameraDeviceConfig {
    /// Identifier of the preferred camera input device.
    pub selected_device_id: Option<String>,
}

/// Global application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Configuration for the detection sampling pipeline.
    pub detection: DetectionConfig,
    /// Configuration for the floating overlay widget.
    pub overlay: OverlayConfig,
    /// Configuration for camera devices of the host.
    pub camera_device: CameraDeviceConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_ranges() {
        let config = Config::default();
        assert_eq!(config.detection.sample_interval, 30);
        assert!((0.1..=0.9).contains(&config.detection.confidence_threshold));
        assert!((0.2..=1.0).contains(&config.overlay.opacity));
        assert!(config.detection.api_base_url.is_none());
        assert!(config.camera_device.selected_device_id.is_none());
    }
}
