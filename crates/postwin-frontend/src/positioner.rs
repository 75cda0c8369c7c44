//! Drag/clamp state machine for the floating overlay widget.
//!
//! All overlay geometry lives here, mutated exclusively through
//! [`OverlayPositioner::apply`], so the widget can never escape the viewport
//! and a drag can never get stuck. The module is plain data so the clamping
//! rules are testable without a window system.

/// Overlay footprint when expanded, in pixels.
pub const EXPANDED_SIZE: (f32, f32) = (320.0, 300.0);

/// Overlay footprint when minimized to its header, in pixels.
pub const MINIMIZED_SIZE: (f32, f32) = (240.0, 44.0);

/// Lowest allowed overlay opacity. Below this the widget is effectively
/// invisible but still swallows pointer events.
pub const MIN_OPACITY: f32 = 0.2;

/// Highest allowed overlay opacity.
pub const MAX_OPACITY: f32 = 1.0;

/// Pointer and toggle events consumed by the positioner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayEvent {
    /// The pointer was pressed at `(x, y)` in viewport coordinates.
    /// `on_handle` is whether it landed on the drag handle.
    PointerDown { x: f32, y: f32, on_handle: bool },
    /// The pointer moved to `(x, y)` in viewport coordinates.
    PointerMoved { x: f32, y: f32 },
    /// The pointer was released, anywhere.
    PointerUp,
    /// The minimize toggle was pressed.
    ToggleMinimized,
    /// The opacity slider moved.
    SetOpacity(f32),
    /// The viewport changed size.
    ViewportResized { width: f32, height: f32 },
}

/// Position, opacity, and drag state of the floating overlay.
#[derive(Debug, Clone)]
pub struct OverlayPositioner {
    x: f32,
    y: f32,
    opacity: f32,
    minimized: bool,
    /// Pointer offset from the widget origin while dragging.
    drag_offset: Option<(f32, f32)>,
    viewport: (f32, f32),
}

impl OverlayPositioner {
    /// Creates a positioner at the given initial geometry. The viewport is
    /// unknown until the first [`OverlayEvent::ViewportResized`], so the
    /// initial position is taken as-is.
    pub fn new(x: f32, y: f32, opacity: f32) -> Self {
        Self {
            x,
            y,
            opacity: opacity.clamp(MIN_OPACITY, MAX_OPACITY),
            minimized: false,
            drag_offset: None,
            viewport: (f32::INFINITY, f32::INFINITY),
        }
    }

    /// Current widget origin in viewport coordinates.
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Current opacity in `[MIN_OPACITY, MAX_OPACITY]`.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Whether the overlay is collapsed to its header.
    pub fn minimized(&self) -> bool {
        self.minimized
    }

    /// Whether a drag is in progress.
    pub fn dragging(&self) -> bool {
        self.drag_offset.is_some()
    }

    /// Current widget footprint, accounting for the minimized state.
    pub fn footprint(&self) -> (f32, f32) {
        if self.minimized {
            MINIMIZED_SIZE
        } else {
            EXPANDED_SIZE
        }
    }

    /// Applies one event to the overlay state.
    pub fn apply(&mut self, event: OverlayEvent) {
        match event {
            OverlayEvent::PointerDown { x, y, on_handle } => {
                if on_handle {
                    self.drag_offset = Some((x - self.x, y - self.y));
                }
            }
            OverlayEvent::PointerMoved { x, y } => {
                if let Some((offset_x, offset_y)) = self.drag_offset {
                    self.x = x - offset_x;
                    self.y = y - offset_y;
                    self.clamp_to_viewport();
                }
            }
            // Releases unconditionally so a drag never sticks when the
            // pointer leaves the widget before the release.
            OverlayEvent::PointerUp => self.drag_offset = None,
            OverlayEvent::ToggleMinimized => {
                self.minimized = !self.minimized;
                self.clamp_to_viewport();
            }
            OverlayEvent::SetOpacity(value) => {
                self.opacity = value.clamp(MIN_OPACITY, MAX_OPACITY);
            }
            OverlayEvent::ViewportResized { width, height } => {
                self.viewport = (width, height);
                self.clamp_to_viewport();
            }
        }
    }

    fn clamp_to_viewport(&mut self) {
        let (width, height) = self.footprint();
        self.x = self.x.min(self.viewport.0 - width).max(0.0);
        self.y = self.y.min(self.viewport.1 - height).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positioner() -> OverlayPositioner {
        let mut positioner = OverlayPositioner::new(20.0, 20.0, 0.9);
        positioner.apply(OverlayEvent::ViewportResized {
            width: 1280.0,
            height: 720.0,
        });
        positioner
    }

    fn drag(positioner: &mut OverlayPositioner, to: (f32, f32)) {
        positioner.apply(OverlayEvent::PointerDown {
            x: positioner.position().0 + 10.0,
            y: positioner.position().1 + 10.0,
            on_handle: true,
        });
        positioner.apply(OverlayEvent::PointerMoved { x: to.0, y: to.1 });
        positioner.apply(OverlayEvent::PointerUp);
    }

    #[test]
    fn drag_follows_the_pointer_minus_the_grab_offset() {
        let mut positioner = positioner();
        drag(&mut positioner, (210.0, 110.0));
        assert_eq!(positioner.position(), (200.0, 100.0));
    }

    #[test]
    fn position_is_clamped_for_any_trajectory() {
        let mut positioner = positioner();
        for target in [
            (-500.0, -500.0),
            (5000.0, 90.0),
            (90.0, 5000.0),
            (f32::MAX, f32::MAX),
        ] {
            drag(&mut positioner, target);
            let (x, y) = positioner.position();
            let (width, height) = positioner.footprint();
            assert!((0.0..=1280.0 - width).contains(&x), "x escaped: {x}");
            assert!((0.0..=720.0 - height).contains(&y), "y escaped: {y}");
        }
    }

    #[test]
    fn pointer_down_outside_the_handle_does_not_drag() {
        let mut positioner = positioner();
        positioner.apply(OverlayEvent::PointerDown {
            x: 30.0,
            y: 30.0,
            on_handle: false,
        });
        assert!(!positioner.dragging());
        positioner.apply(OverlayEvent::PointerMoved { x: 600.0, y: 600.0 });
        assert_eq!(positioner.position(), (20.0, 20.0));
    }

    #[test]
    fn pointer_up_ends_the_drag_wherever_it_happens() {
        let mut positioner = positioner();
        positioner.apply(OverlayEvent::PointerDown {
            x: 30.0,
            y: 30.0,
            on_handle: true,
        });
        assert!(positioner.dragging());
        // Release far outside the widget.
        positioner.apply(OverlayEvent::PointerUp);
        assert!(!positioner.dragging());
        positioner.apply(OverlayEvent::PointerMoved { x: 900.0, y: 500.0 });
        assert_eq!(positioner.position(), (20.0, 20.0));
    }

    #[test]
    fn minimize_mid_drag_clamps_with_the_new_footprint() {
        let mut positioner = positioner();
        positioner.apply(OverlayEvent::PointerDown {
            x: 30.0,
            y: 30.0,
            on_handle: true,
        });
        // Park the widget at the bottom-right limit for the expanded size.
        positioner.apply(OverlayEvent::PointerMoved {
            x: 5000.0,
            y: 5000.0,
        });
        assert_eq!(
            positioner.position(),
            (1280.0 - EXPANDED_SIZE.0, 720.0 - EXPANDED_SIZE.1)
        );

        positioner.apply(OverlayEvent::ToggleMinimized);
        positioner.apply(OverlayEvent::PointerMoved {
            x: 5000.0,
            y: 5000.0,
        });
        assert_eq!(
            positioner.position(),
            (1280.0 - MINIMIZED_SIZE.0, 720.0 - MINIMIZED_SIZE.1)
        );
    }

    #[test]
    fn shrinking_the_viewport_pulls_the_widget_back_in() {
        let mut positioner = positioner();
        drag(&mut positioner, (5000.0, 5000.0));
        positioner.apply(OverlayEvent::ViewportResized {
            width: 400.0,
            height: 350.0,
        });
        let (x, y) = positioner.position();
        assert_eq!((x, y), (400.0 - EXPANDED_SIZE.0, 350.0 - EXPANDED_SIZE.1));
    }

    #[test]
    fn opacity_is_clamped_and_independent_of_dragging() {
        let mut positioner = positioner();
        positioner.apply(OverlayEvent::SetOpacity(0.05));
        assert_eq!(positioner.opacity(), MIN_OPACITY);
        positioner.apply(OverlayEvent::SetOpacity(1.7));
        assert_eq!(positioner.opacity(), MAX_OPACITY);

        let before = positioner.position();
        positioner.apply(OverlayEvent::SetOpacity(0.5));
        assert_eq!(positioner.position(), before);
    }
}
