use gpui::{
    Context, Entity, IntoElement, ParentElement, Render, Styled, StyledImage, Window, div, hsla, img,
    prelude::FluentBuilder, px, rgb,
};
use gpui_component::StyledExt;

use crate::components::status_badge::status_color;
use crate::entities::{DataEntities, DetectionEntity};

/// Root view of the always-on-top mirror window.
///
/// It owns no state of its own: it re-renders the latest preview frame and
/// status on every detection-entity change, which the backend drives once
/// per capture tick. The mirror therefore stays current even when no new
/// classification has arrived, and it never touches the camera itself.
pub struct MirrorView {
    detection: Entity<DetectionEntity>,
}

impl MirrorView {
    pub fn new(data: &DataEntities, cx: &mut Context<Self>) -> Self {
        cx.observe(&data.detection.clone(), |_, _, cx| {
            cx.notify();
        })
        .detach();

        Self {
            detection: data.detection.clone(),
        }
    }
}

impl Render for MirrorView {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let detection = self.detection.read(cx);
        let status = detection.status;
        let frame = detection.last_frame.clone();

        div()
            .size_full()
            .flex()
            .flex_col()
            .bg(rgb(0x1A1A25))
            .child(
                div()
                    .flex_1()
                    .overflow_hidden()
                    .when_some(frame, |this, image| {
                        this.child(img(image).w_full().h_full().object_fit(gpui::ObjectFit::Cover))
                    }),
            )
            .child(
                div()
                    .h(px(50.0))
                    .flex()
                    .items_center()
                    .justify_center()
                    .bg(status_color(status))
                    .text_color(hsla(0., 0., 1., 0.95))
                    .font_bold()
                    .child(status.label()),
            )
    }
}
