use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Single-flight guard for detection requests.
///
/// At most one detection request may be outstanding at any time, regardless
/// of tick rate or how slowly the network responds. The guard hands out an
/// [`InFlightToken`] whose `Drop` releases the slot, so every exit path
/// (success, failure, timeout, early return) clears the flag.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    busy: Arc<AtomicBool>,
}

impl InFlight {
    /// Claims the in-flight slot, or returns `None` when a request is
    /// already outstanding.
    pub fn try_begin(&self) -> Option<InFlightToken> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightToken {
                busy: self.busy.clone(),
            })
    }

    /// Whether a request is currently outstanding.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Proof of holding the in-flight slot. Dropping it releases the slot.
#[derive(Debug)]
pub struct InFlightToken {
    busy: Arc<AtomicBool>,
}

impl Drop for InFlightToken {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_token_at_a_time() {
        let guard = InFlight::default();
        let token = guard.try_begin().expect("slot is free");
        assert!(guard.is_busy());
        assert!(guard.try_begin().is_none());
        drop(token);
        assert!(!guard.is_busy());
        assert!(guard.try_begin().is_some());
    }

    #[test]
    fn clones_share_the_slot() {
        let guard = InFlight::default();
        let clone = guard.clone();
        let _token = guard.try_begin().expect("slot is free");
        assert!(clone.is_busy());
        assert!(clone.try_begin().is_none());
    }

    #[test]
    fn token_survives_moving_across_threads() {
        let guard = InFlight::default();
        let token = guard.try_begin().expect("slot is free");
        let handle = std::thread::spawn(move || drop(token));
        handle.join().expect("thread finished");
        assert!(!guard.is_busy());
    }
}
