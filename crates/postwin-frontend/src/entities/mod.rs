use std::sync::Arc;

use gpui::Entity;
use postwin_bridge::detection::{DetectionStatus, SessionStats};

pub mod camera_devices_entity;
pub mod settings_entity;

/// Live detection state as last reported by the backend.
#[derive(Clone, Default)]
pub struct DetectionEntity {
    /// Whether the capture loop is running. Driven only by the backend's
    /// started/stopped responses, never by classification results, so a
    /// stale response can never re-show the live state.
    pub live: bool,
    /// Current posture verdict.
    pub status: DetectionStatus,
    /// Session tally of verdicts.
    pub stats: SessionStats,
    /// Confidence of the most recent primary detection.
    pub confidence: Option<f32>,
    /// Persistent detection error, cleared by the next successful update.
    pub error: Option<String>,
    /// The latest preview frame, ready for `img()`.
    pub last_frame: Option<Arc<gpui::Image>>,
}

/// Whether the floating overlay is enabled. Toggled from the overview page
/// and the overlay's own close button; the root view reacts by mounting or
/// tearing down the overlay.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlayEntity {
    pub enabled: bool,
}

#[derive(Clone)]
pub struct DataEntities {
    pub settings: Entity<settings_entity::SettingsEntity>,
    pub camera_devices: Entity<camera_devices_entity::CameraDevicesEntity>,
    pub detection: Entity<DetectionEntity>,
    pub overlay: Entity<OverlayEntity>,
}
