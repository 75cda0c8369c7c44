use serde::{Deserialize, Serialize};

/// Posture classification as reported by the detection service.
///
/// The status starts as [`DetectionStatus::Unknown`] and is only ever
/// replaced by the handler of a successful detection response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionStatus {
    /// No classification yet, or the service saw no subject in the frame.
    #[default]
    Unknown,
    /// The subject's posture is fine.
    Good,
    /// The subject's posture needs correcting.
    Bad,
}

impl DetectionStatus {
    /// Human-readable label shown next to the status indicator.
    pub fn label(self) -> &'static str {
        match self {
            DetectionStatus::Good => "Good Posture",
            DetectionStatus::Bad => "Fix Your Posture!",
            DetectionStatus::Unknown => "Detecting...",
        }
    }
}

/// A single detection box reported by the service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Detection {
    /// Bounding box as `[x1, y1, x2, y2]` in source-image pixels.
    #[serde(default)]
    pub bbox: [f32; 4],
    /// Model confidence for this detection, in `[0.0, 1.0]`.
    pub confidence: f32,
    /// Raw class index of the detection.
    #[serde(default)]
    pub class_id: u32,
    /// Human-readable class name of the detection.
    #[serde(default)]
    pub class_name: String,
    /// Whether this detection was classified as good posture.
    #[serde(default)]
    pub is_good_posture: bool,
}

/// The outcome of one successful round-trip to the detection service.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Overall posture verdict across all detections in the frame.
    pub status: DetectionStatus,
    /// Individual detections contributing to the verdict.
    pub detections: Vec<Detection>,
    /// Service-side timestamp of the classification, if provided.
    pub timestamp: Option<String>,
}

impl Classification {
    /// Confidence of the primary detection, if any.
    pub fn confidence(&self) -> Option<f32> {
        self.detections.first().map(|detection| detection.confidence)
    }
}

/// Running tally of classifications observed during this session.
///
/// Counters are monotonically non-decreasing and survive stopping and
/// restarting the capture loop; only a process restart resets them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    /// Total number of good/bad verdicts observed.
    pub total: u64,
    /// Number of good-posture verdicts.
    pub good: u64,
    /// Number of bad-posture verdicts.
    pub bad: u64,
}
