use gpui::{
    AppContext, Context, Entity, IntoElement, ParentElement, Render, SharedString, Styled,
    StyledImage, Window,
    div, img, prelude::FluentBuilder, px, rgb,
};
use gpui_component::{
    IndexPath, StyledExt,
    button::{Button, ButtonVariants},
    select::{Select, SelectEvent, SelectItem, SelectState},
};

use crate::{
    BackendBridge,
    components::status_badge::{StatusBadge, status_color},
    entities::DataEntities,
};

#[derive(Debug, Clone)]
struct CameraDevice {
    id: SharedString,
    visible_name: SharedString,
}

impl SelectItem for CameraDevice {
    type Value = SharedString;

    fn title(&self) -> SharedString {
        self.visible_name.clone()
    }

    fn value(&self) -> &Self::Value {
        &self.id
    }
}

pub struct OverviewPage {
    data: DataEntities,
    active_camera_device: Entity<SelectState<Vec<CameraDevice>>>,
}

impl OverviewPage {
    pub fn new(data: &DataEntities, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let active_camera_device = cx.new(|cx| {
            let camera_devices_entity = data.camera_devices.read(cx);
            let devices: Vec<CameraDevice> = camera_devices_entity
                .camera_devices
                .iter()
                .map(|device| CameraDevice {
                    id: device.id.clone().into(),
                    visible_name: device.description.clone().into(),
                })
                .collect();

            let selected_camera_device = camera_devices_entity
                .camera_devices
                .iter()
                .position(|device| device.selected);

            SelectState::new(
                devices,
                selected_camera_device.map(IndexPath::new),
                window,
                cx,
            )
        });

        let camera_devices = data.camera_devices.clone();
        cx.observe_in(
            &camera_devices.clone(),
            window,
            move |this, _, window, cx| {
                let camera_devices = {
                    let state = &camera_devices.read(cx);
                    state.camera_devices.clone()
                };

                let devices = camera_devices
                    .iter()
                    .map(|device| CameraDevice {
                        id: device.id.clone().into(),
                        visible_name: device.description.clone().into(),
                    })
                    .collect::<Vec<_>>();

                this.active_camera_device.update(cx, |state, cx| {
                    state.set_items(devices, window, cx);
                });

                if let Some(selected_index) =
                    camera_devices.iter().position(|device| device.selected)
                {
                    this.active_camera_device.update(cx, |state, cx| {
                        state.set_selected_index(Some(IndexPath::new(selected_index)), window, cx);
                    });
                }
            },
        )
        .detach();

        cx.subscribe_in(
            &active_camera_device,
            window,
            |_, _, event, _, cx| match event {
                SelectEvent::Confirm(value) => {
                    let bridge = cx.global::<BackendBridge>().clone();
                    let selected_value = value.clone();
                    if selected_value.is_none() {
                        return;
                    }

                    let selected_value = selected_value
                        .expect("failed to get the selected value")
                        .clone()
                        .into();
                    cx.spawn(async move |_, _| {
                        bridge.select_camera_device(selected_value).await;
                    })
                    .detach();
                }
            },
        )
        .detach();

        // Every preview frame and classification lands in the detection
        // entity; re-render the panel whenever it changes.
        cx.observe_in(&data.detection.clone(), window, |_, _, _, cx| {
            cx.notify();
        })
        .detach();

        cx.observe_in(&data.overlay.clone(), window, |_, _, _, cx| {
            cx.notify();
        })
        .detach();

        Self {
            data: data.clone(),
            active_camera_device,
        }
    }

    fn render_preview(&self, cx: &Context<Self>) -> impl IntoElement {
        let detection = self.data.detection.read(cx);
        let live = detection.live;
        let status = detection.status;
        let confidence = detection.confidence;
        let error = detection.error.clone();
        let frame = detection.last_frame.clone();

        div()
            .relative()
            .w(px(480.0))
            .h(px(360.0))
            .rounded_xl()
            .overflow_hidden()
            .bg(rgb(0x1A1A25))
            .when_some(frame, |this, image| {
                this.child(img(image).w_full().h_full().object_fit(gpui::ObjectFit::Cover))
            })
            .child(
                div()
                    .absolute()
                    .top_4()
                    .left_4()
                    .child(StatusBadge::new(status).confidence(confidence)),
            )
            .when(live, |this| {
                this.child(
                    div()
                        .absolute()
                        .top_4()
                        .right_4()
                        .px_3()
                        .py_1()
                        .rounded_full()
                        .border_1()
                        .border_color(rgb(0xEF4444))
                        .text_color(rgb(0xEF4444))
                        .text_sm()
                        .font_semibold()
                        .child("LIVE"),
                )
            })
            .when_some(error, |this, message| {
                this.child(
                    div()
                        .absolute()
                        .bottom_4()
                        .left_4()
                        .right_4()
                        .p_3()
                        .rounded_xl()
                        .bg(gpui::hsla(0., 0.84, 0.6, 0.2))
                        .border_1()
                        .border_color(rgb(0xEF4444))
                        .text_sm()
                        .text_color(rgb(0xEF4444))
                        .child(message),
                )
            })
    }

    fn render_stat_tile(
        value: u64,
        label: &'static str,
        color: impl Into<gpui::Hsla>,
    ) -> impl IntoElement {
        div()
            .flex_1()
            .flex()
            .flex_col()
            .items_center()
            .gap_1()
            .p_4()
            .rounded_xl()
            .border_1()
            .border_color(gpui::hsla(0., 0., 1., 0.1))
            .child(
                div()
                    .text_2xl()
                    .font_bold()
                    .text_color(color)
                    .child(value.to_string()),
            )
            .child(div().text_sm().child(label))
    }
}

impl Render for OverviewPage {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let (live, stats) = {
            let detection = self.data.detection.read(cx);
            (detection.live, detection.stats)
        };
        let overlay_enabled = self.data.overlay.read(cx).enabled;

        div()
            .flex()
            .flex_col()
            .gap_3()
            .child(div().child("Overview").text_2xl().font_bold())
            .child(Select::new(&self.active_camera_device).placeholder("Select a camera..."))
            .child(
                div()
                    .flex()
                    .gap_3()
                    .child(
                        Button::new("toggle_detection")
                            .label(if live {
                                "Stop Detection"
                            } else {
                                "Start Detection"
                            })
                            .on_click(move |_, _, cx| {
                                let bridge = cx.global::<BackendBridge>().clone();
                                cx.spawn(async move |_| {
                                    if live {
                                        bridge.stop_detection().await;
                                    } else {
                                        bridge.start_detection().await;
                                    }
                                })
                                .detach();
                            }),
                    )
                    .child(
                        Button::new("toggle_overlay")
                            .outline()
                            .label(if overlay_enabled {
                                "Disable Overlay"
                            } else {
                                "Enable Overlay"
                            })
                            .on_click(cx.listener(|this, _, _, cx| {
                                this.data.overlay.update(cx, |model, cx| {
                                    model.enabled = !model.enabled;
                                    cx.notify();
                                });
                            })),
                    ),
            )
            .child(self.render_preview(cx))
            .child(
                div()
                    .flex()
                    .gap_4()
                    .w(px(480.0))
                    .child(Self::render_stat_tile(
                        stats.total,
                        "Total Scans",
                        gpui::hsla(0., 0., 1., 0.9),
                    ))
                    .child(Self::render_stat_tile(
                        stats.good,
                        "Good Posture",
                        status_color(postwin_bridge::detection::DetectionStatus::Good),
                    ))
                    .child(Self::render_stat_tile(
                        stats.bad,
                        "Bad Posture",
                        status_color(postwin_bridge::detection::DetectionStatus::Bad),
                    )),
            )
    }
}
