use gpui::{IntoElement, ParentElement, Rgba, Styled, div, prelude::FluentBuilder, rgb};
use gpui_component::StyledExt;
use postwin_bridge::detection::DetectionStatus;

use crate::formatting::format_confidence;

/// Color shared by every surface that shows a posture status.
pub fn status_color(status: DetectionStatus) -> Rgba {
    match status {
        DetectionStatus::Good => rgb(0x10B981),
        DetectionStatus::Bad => rgb(0xEF4444),
        DetectionStatus::Unknown => rgb(0x666666),
    }
}

/// A pill showing the current posture verdict and, when known, the model
/// confidence behind it.
#[derive(IntoElement)]
pub struct StatusBadge {
    status: DetectionStatus,
    confidence: Option<f32>,
}

impl StatusBadge {
    pub fn new(status: DetectionStatus) -> Self {
        Self {
            status,
            confidence: None,
        }
    }

    pub fn confidence(mut self, confidence: Option<f32>) -> Self {
        self.confidence = confidence;
        self
    }
}

impl gpui::RenderOnce for StatusBadge {
    fn render(self, _: &mut gpui::Window, _: &mut gpui::App) -> impl IntoElement {
        let color = status_color(self.status);
        div()
            .flex()
            .items_center()
            .gap_2()
            .px_3()
            .py_1()
            .rounded_full()
            .border_1()
            .border_color(color)
            .text_color(color)
            .text_sm()
            .font_semibold()
            .child(self.status.label())
            .when_some(self.confidence, |this, confidence| {
                this.child(format!("({})", format_confidence(confidence)))
            })
    }
}
