//! Lifecycle state machine for the always-on-top mirror window.
//!
//! The mirror surface can be torn down from three directions: the user
//! closes it, the overlay it belongs to closes, or the OS window goes away
//! on its own. All three must converge on `Closed` and release the window
//! handle exactly once, so the transitions live in one table instead of
//! being scattered across UI callbacks.

/// Lifecycle phase of the mirror surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MirrorPhase {
    /// No surface exists.
    #[default]
    Closed,
    /// A surface is being acquired.
    Opening,
    /// The surface is live and mirroring.
    Open,
}

/// Events consumed by the mirror state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorEvent {
    /// The user asked for the mirror.
    OpenRequested,
    /// The surface was acquired.
    SurfaceReady,
    /// The surface could not be acquired.
    OpenFailed,
    /// The user closed the mirror explicitly.
    CloseRequested,
    /// The owning overlay closed; the mirror cascades.
    OverlayClosed,
    /// The OS window disappeared out-of-band.
    SurfaceClosed,
}

/// What the caller must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorAction {
    /// Nothing; the event was redundant in the current phase.
    None,
    /// Acquire a surface and report back with `SurfaceReady`/`OpenFailed`.
    AcquireSurface,
    /// Close the OS window and drop the handle.
    ReleaseSurface,
    /// Drop the handle without closing; the window is already gone.
    ForgetSurface,
    /// Surface a user-visible failure message. The affordance stays
    /// available for a retry.
    ReportFailure,
}

/// The mirror lifecycle: `Closed -> Opening -> Open -> Closed`.
#[derive(Debug, Clone, Default)]
pub struct MirrorState {
    phase: MirrorPhase,
}

impl MirrorState {
    /// Current lifecycle phase.
    pub fn phase(&self) -> MirrorPhase {
        self.phase
    }

    /// Whether a surface is live.
    pub fn is_open(&self) -> bool {
        self.phase == MirrorPhase::Open
    }

    /// Applies one event and returns the action the caller must perform.
    pub fn apply(&mut self, event: MirrorEvent) -> MirrorAction {
        match (self.phase, event) {
            (MirrorPhase::Closed, MirrorEvent::OpenRequested) => {
                self.phase = MirrorPhase::Opening;
                MirrorAction::AcquireSurface
            }
            (MirrorPhase::Opening, MirrorEvent::SurfaceReady) => {
                self.phase = MirrorPhase::Open;
                MirrorAction::None
            }
            (MirrorPhase::Opening, MirrorEvent::OpenFailed) => {
                self.phase = MirrorPhase::Closed;
                MirrorAction::ReportFailure
            }
            // Abandoned while still acquiring: nothing to release yet.
            (
                MirrorPhase::Opening,
                MirrorEvent::CloseRequested | MirrorEvent::OverlayClosed | MirrorEvent::SurfaceClosed,
            ) => {
                self.phase = MirrorPhase::Closed;
                MirrorAction::None
            }
            (MirrorPhase::Open, MirrorEvent::CloseRequested | MirrorEvent::OverlayClosed) => {
                self.phase = MirrorPhase::Closed;
                MirrorAction::ReleaseSurface
            }
            (MirrorPhase::Open, MirrorEvent::SurfaceClosed) => {
                self.phase = MirrorPhase::Closed;
                MirrorAction::ForgetSurface
            }
            _ => MirrorAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_mirror() -> MirrorState {
        let mut mirror = MirrorState::default();
        assert_eq!(
            mirror.apply(MirrorEvent::OpenRequested),
            MirrorAction::AcquireSurface
        );
        assert_eq!(mirror.apply(MirrorEvent::SurfaceReady), MirrorAction::None);
        assert!(mirror.is_open());
        mirror
    }

    #[test]
    fn every_close_trigger_converges_on_closed() {
        for (event, expected_action) in [
            (MirrorEvent::CloseRequested, MirrorAction::ReleaseSurface),
            (MirrorEvent::OverlayClosed, MirrorAction::ReleaseSurface),
            (MirrorEvent::SurfaceClosed, MirrorAction::ForgetSurface),
        ] {
            let mut mirror = open_mirror();
            assert_eq!(mirror.apply(event), expected_action);
            assert_eq!(mirror.phase(), MirrorPhase::Closed);
        }
    }

    #[test]
    fn closing_twice_is_a_no_op() {
        let mut mirror = open_mirror();
        assert_eq!(
            mirror.apply(MirrorEvent::CloseRequested),
            MirrorAction::ReleaseSurface
        );
        for event in [
            MirrorEvent::CloseRequested,
            MirrorEvent::OverlayClosed,
            MirrorEvent::SurfaceClosed,
        ] {
            assert_eq!(mirror.apply(event), MirrorAction::None);
            assert_eq!(mirror.phase(), MirrorPhase::Closed);
        }
    }

    #[test]
    fn surface_close_after_release_does_not_release_again() {
        // Closing the OS window fires an out-of-band close signal as well;
        // the handle must still be released only once.
        let mut mirror = open_mirror();
        assert_eq!(
            mirror.apply(MirrorEvent::CloseRequested),
            MirrorAction::ReleaseSurface
        );
        assert_eq!(mirror.apply(MirrorEvent::SurfaceClosed), MirrorAction::None);
    }

    #[test]
    fn failed_open_reports_and_returns_to_closed() {
        let mut mirror = MirrorState::default();
        assert_eq!(
            mirror.apply(MirrorEvent::OpenRequested),
            MirrorAction::AcquireSurface
        );
        assert_eq!(
            mirror.apply(MirrorEvent::OpenFailed),
            MirrorAction::ReportFailure
        );
        assert_eq!(mirror.phase(), MirrorPhase::Closed);

        // The feature stays usable for a retry.
        assert_eq!(
            mirror.apply(MirrorEvent::OpenRequested),
            MirrorAction::AcquireSurface
        );
    }

    #[test]
    fn redundant_open_requests_are_ignored() {
        let mut mirror = open_mirror();
        assert_eq!(mirror.apply(MirrorEvent::OpenRequested), MirrorAction::None);
        assert!(mirror.is_open());
    }
}
