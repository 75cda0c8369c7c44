/// Failure classification for one detection round-trip.
///
/// Every failure maps to a distinct user-facing message surfaced in the
/// frontend's error slot until the next successful round-trip clears it.
/// None of these stop the capture loop: the next sample tick is the only
/// retry mechanism, so a failing backend is throttled by the sampling
/// cadence instead of a client-side backoff.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectionError {
    /// The service could not be reached at all (connection refused, DNS
    /// failure, no route).
    #[error("Cannot connect to the detection service. Make sure the backend is running.")]
    Unreachable,
    /// The round-trip exceeded the request deadline
    /// ([`crate::REQUEST_TIMEOUT_MILLISECONDS`]).
    #[error("Detection timed out; the service is responding slowly.")]
    Timeout,
    /// The service answered but rejected the request: an HTTP error status,
    /// a `success: false` payload, or a body that could not be decoded. The
    /// message is the service's own error text when it provided one.
    #[error("{0}")]
    Rejected(String),
}

impl DetectionError {
    /// Builds a [`DetectionError::Rejected`] from an optional service-side
    /// error text.
    pub fn rejected(message: Option<String>) -> Self {
        DetectionError::Rejected(message.unwrap_or_else(|| "Detection failed.".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_and_unreachable_read_differently() {
        assert_ne!(
            DetectionError::Timeout.to_string(),
            DetectionError::Unreachable.to_string()
        );
    }

    #[test]
    fn rejection_prefers_the_service_message() {
        assert_eq!(
            DetectionError::rejected(Some("No image provided".to_string())).to_string(),
            "No image provided"
        );
        assert_eq!(
            DetectionError::rejected(None).to_string(),
            "Detection failed."
        );
    }
}
