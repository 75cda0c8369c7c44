use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32};

use postwin_detect::single_flight::InFlight;
use postwin_detect::status::StatusTracker;

/// Live control handles for the capture loop.
///
/// These are shared between the service handlers (which flip them) and the
/// capture loop thread (which observes them every tick). The loop owns the
/// camera itself; stopping means clearing `active` and letting the loop wind
/// down on its next tick.
#[derive(Debug, Clone, Default)]
pub struct DetectionRuntime {
    /// Whether the capture loop should keep ticking.
    pub active: Arc<AtomicBool>,
    /// Single-flight guard for detection requests.
    pub in_flight: InFlight,
    /// Current decimation interval, read by the loop each tick.
    pub sample_interval: Arc<AtomicU32>,
}

/// The core application state that holds configuration and other shared
/// resources.
///
/// This struct contains all the data that needs to be shared across async
/// tasks in the application.
///
/// It is designed to be wrapped in thread-safe, async-friendly concurrency
/// primitives (see [`SharedState`]) to allow safe concurrent reads and
/// occasional writes from multiple tasks.
#[derive(Debug, Clone)]
pub struct State {
    /// The loaded application configuration.
    pub config: postwin_bridge::config::Config,
    /// Shared HTTP client for making efficient, pooled requests.
    pub request_client: reqwest::Client,
    /// Whether an audio output device was present at startup. Probed once;
    /// when `false` the alert cue stays silent.
    pub alert_available: bool,
    /// Session-long classification status and tally.
    pub tracker: StatusTracker,
    /// Control handles for the capture loop.
    pub detection: DetectionRuntime,
}

/// Thread-safe, async-friendly shared reference to the application [`State`].
///
/// This is the recommended way to pass state into async handlers, background
/// tasks, or any context where multiple tasks need read access (and occasional
/// write access).
pub type SharedState = std::sync::Arc<tokio::sync::RwLock<State>>;
