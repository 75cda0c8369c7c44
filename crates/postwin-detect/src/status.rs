use postwin_bridge::detection::{Classification, DetectionStatus, SessionStats};

/// Folds classification results into the current status and session tally.
///
/// Transitions happen only when a verdict (`Good` or `Bad`) arrives; the
/// status never decays back to `Unknown` on its own, and an `Unknown`
/// classification (nobody in frame, service busy) changes nothing. Counters
/// never decrement and survive stop/start of the capture loop.
#[derive(Debug, Clone, Default)]
pub struct StatusTracker {
    current: DetectionStatus,
    stats: SessionStats,
}

/// The observable outcome of applying one classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    /// Status before the classification was applied.
    pub previous: DetectionStatus,
    /// Status after the classification was applied.
    pub current: DetectionStatus,
    /// Session tally after the classification was applied.
    pub stats: SessionStats,
}

impl StatusUpdate {
    /// Whether this update transitioned into bad posture. Used to trigger
    /// the alert cue exactly once per lapse rather than on every bad sample.
    pub fn entered_bad(&self) -> bool {
        self.current == DetectionStatus::Bad && self.previous != DetectionStatus::Bad
    }
}

impl StatusTracker {
    /// Current classification status.
    pub fn current(&self) -> DetectionStatus {
        self.current
    }

    /// Session tally so far.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Applies one classification result.
    ///
    /// Status and counters change together in this single call, so readers
    /// under the same lock never observe them disagreeing.
    pub fn apply(&mut self, classification: &Classification) -> StatusUpdate {
        let previous = self.current;
        match classification.status {
            DetectionStatus::Good => {
                self.stats.total += 1;
                self.stats.good += 1;
                self.current = DetectionStatus::Good;
            }
            DetectionStatus::Bad => {
                self.stats.total += 1;
                self.stats.bad += 1;
                self.current = DetectionStatus::Bad;
            }
            DetectionStatus::Unknown => {}
        }

        StatusUpdate {
            previous,
            current: self.current,
            stats: self.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classified(status: DetectionStatus) -> Classification {
        Classification {
            status,
            ..Classification::default()
        }
    }

    #[test]
    fn tallies_good_bad_good() {
        let mut tracker = StatusTracker::default();
        for status in [
            DetectionStatus::Good,
            DetectionStatus::Bad,
            DetectionStatus::Good,
        ] {
            tracker.apply(&classified(status));
        }

        assert_eq!(
            tracker.stats(),
            SessionStats {
                total: 3,
                good: 2,
                bad: 1
            }
        );
        assert_eq!(tracker.current(), DetectionStatus::Good);
    }

    #[test]
    fn unknown_changes_nothing() {
        let mut tracker = StatusTracker::default();
        tracker.apply(&classified(DetectionStatus::Good));

        let update = tracker.apply(&classified(DetectionStatus::Unknown));

        assert_eq!(update.current, DetectionStatus::Good);
        assert_eq!(
            tracker.stats(),
            SessionStats {
                total: 1,
                good: 1,
                bad: 0
            }
        );
    }

    #[test]
    fn entered_bad_fires_only_on_the_transition() {
        let mut tracker = StatusTracker::default();
        assert!(tracker.apply(&classified(DetectionStatus::Bad)).entered_bad());
        assert!(!tracker.apply(&classified(DetectionStatus::Bad)).entered_bad());
        assert!(!tracker.apply(&classified(DetectionStatus::Good)).entered_bad());
        assert!(tracker.apply(&classified(DetectionStatus::Bad)).entered_bad());
    }

    #[test]
    fn status_persists_until_the_next_verdict() {
        let mut tracker = StatusTracker::default();
        assert_eq!(tracker.current(), DetectionStatus::Unknown);

        tracker.apply(&classified(DetectionStatus::Bad));
        tracker.apply(&classified(DetectionStatus::Unknown));
        assert_eq!(tracker.current(), DetectionStatus::Bad);

        tracker.apply(&classified(DetectionStatus::Good));
        assert_eq!(tracker.current(), DetectionStatus::Good);
    }
}
