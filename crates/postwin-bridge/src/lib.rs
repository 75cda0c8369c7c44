//! Communication bridge between frontend and backend.
//!
//! This crate defines the types and protocols used to connect a graphical
//! frontend with an asynchronous backend responsible for camera capture,
//! remote posture detection, configuration, and more.
//!
//! The design is deliberately lightweight and unidirectional:
//! - The frontend sends commands (e.g., start detection, select a camera,
//!   request config).
//! - The backend pushes events (e.g., classification updates, preview
//!   frames, notifications).
//!
//! Communication happens over bounded [`tokio::sync::mpsc`] channels wrapped
//! in [`BridgeChannels`], providing back-pressure, async compatibility, and
//! clean separation of concerns.

pub mod camera;
pub mod config;
pub mod detection;
pub mod frame;
pub mod notification;

use tokio::sync::mpsc::{self, Receiver, Sender};

/// Messages emitted by the backend to inform the frontend of state updates.
///
/// These are typically sent in response to frontend requests or to push
/// asynchronous events (e.g., preview frames, classification results,
/// notifications).
#[derive(Debug, Clone)]
pub enum MessageFromBackend {
    /// Generic message for all notifications in the application.
    NotificationMessage(notification::NotificationMessage),
    /// Response to the configuration request from the frontend.
    ConfigurationResponse(config::Config),
    CameraDevicesListResponse(Vec<camera::CameraDevice>),
    /// The capture loop is running; the UI may show its live state.
    DetectionStartedResponse,
    /// The capture loop has been asked to stop; no further ticks follow.
    DetectionStoppedResponse,
    /// A successful round-trip to the detection service. Clears any error
    /// previously surfaced through [`MessageFromBackend::DetectionFailureUpdate`].
    DetectionStateUpdate {
        classification: detection::Classification,
        stats: detection::SessionStats,
    },
    /// A failed round-trip to the detection service. The message stays
    /// visible until the next successful update.
    DetectionFailureUpdate {
        message: String,
    },
    /// The latest captured frame, pushed once per capture tick regardless of
    /// whether a detection request was issued.
    FramePreviewUpdate(frame::PreviewFrame),
}

/// Commands issued by the frontend to control or query the backend.
///
/// These messages drive the core functionality of the application.
#[derive(Debug, Clone)]
pub enum MessageToBackend {
    /// Request for the application configuration.
    ConfigurationRequest,
    CameraDevicesListRequest,
    SelectCameraDevice(String),
    StartDetectionRequest,
    StopDetectionRequest,
    /// Change the number of capture ticks between detection samples.
    SetSampleInterval(u32),
    /// Change the confidence threshold and push it to the detection service.
    SetConfidenceThreshold(f32),
    /// Toggle the audio cue played when posture turns bad.
    SetSoundEnabled(bool),
}

/// Paired `tokio::mpsc` channels for bidirectional communication between
/// frontend and backend.
pub struct BridgeChannels {
    /// Receiver used by the frontend to get messages from the backend.
    pub frontend_rx: Receiver<MessageFromBackend>,
    /// Sender used by the frontend to send commands to the backend.
    pub frontend_tx: Sender<MessageToBackend>,

    /// Receiver used by the backend to get commands from the frontend.
    pub backend_rx: Receiver<MessageToBackend>,
    /// Sender used by the backend to send events/responses to the frontend.
    pub backend_tx: Sender<MessageFromBackend>,
}

impl BridgeChannels {
    /// Creates a new pair of bridged channels with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (to_backend_tx, to_backend_rx) = mpsc::channel(buffer);
        let (to_frontend_tx, to_frontend_rx) = mpsc::channel(buffer);
        Self {
            frontend_tx: to_backend_tx,
            frontend_rx: to_frontend_rx,
            backend_rx: to_backend_rx,
            backend_tx: to_frontend_tx,
        }
    }
}

impl Default for BridgeChannels {
    fn default() -> Self {
        Self::new(64)
    }
}
