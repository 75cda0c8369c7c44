use gpui::{
    AppContext, Bounds, Context, Entity, InteractiveElement, IntoElement, MouseButton,
    MouseDownEvent, ParentElement, Pixels, Point, Render, Styled, StyledImage, Window, WindowBounds,
    WindowHandle, WindowOptions, div, hsla,
    img, prelude::FluentBuilder, px, size,
};
use gpui_component::{
    IconName, Sizable, StyledExt, WindowExt,
    button::{Button, ButtonVariants},
    notification::Notification,
    slider::{Slider, SliderEvent, SliderState},
    switch::Switch,
};

use crate::{
    BackendBridge,
    components::status_badge::{StatusBadge, status_color},
    entities::DataEntities,
    mirror::{MirrorAction, MirrorEvent, MirrorPhase, MirrorState},
    positioner::{OverlayEvent, OverlayPositioner},
    views::mirror_view::MirrorView,
};

/// Size of the mirror window content, matching the preview aspect plus the
/// status bar.
const MIRROR_WINDOW_SIZE: (f32, f32) = (320.0, 290.0);

/// The floating status widget: draggable by its header, collapsible to the
/// header, with its own opacity, and able to spawn the always-on-top mirror
/// window.
pub struct OverlayView {
    data: DataEntities,
    positioner: OverlayPositioner,
    show_camera: bool,
    mirror: MirrorState,
    mirror_window: Option<WindowHandle<MirrorView>>,
    mirror_supported: bool,
    opacity_state: Entity<SliderState>,
}

impl OverlayView {
    pub fn new(
        data: &DataEntities,
        mirror_supported: bool,
        _: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let overlay_config = {
            let settings = data.settings.read(cx);
            settings.config.overlay.clone()
        };

        let opacity_state = cx.new(|_| {
            SliderState::new()
                .min(crate::positioner::MIN_OPACITY)
                .default_value(overlay_config.opacity)
                .max(crate::positioner::MAX_OPACITY)
        });
        cx.subscribe(&opacity_state, |this, _, event: &SliderEvent, cx| {
            match event {
                SliderEvent::Change(value) => {
                    this.positioner.apply(OverlayEvent::SetOpacity(value.start()));
                    cx.notify();
                }
            }
        })
        .detach();

        cx.observe(&data.detection.clone(), |_, _, cx| {
            cx.notify();
        })
        .detach();

        cx.observe(&data.settings.clone(), |_, _, cx| {
            cx.notify();
        })
        .detach();

        Self {
            data: data.clone(),
            positioner: OverlayPositioner::new(
                overlay_config.initial_x,
                overlay_config.initial_y,
                overlay_config.opacity,
            ),
            show_camera: overlay_config.show_camera,
            mirror: MirrorState::default(),
            mirror_window: None,
            mirror_supported,
            opacity_state,
        }
    }

    /// Forwarded from the root view: the pointer moved anywhere in the
    /// window.
    pub fn pointer_moved(
        &mut self,
        position: Point<Pixels>,
        _: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if !self.positioner.dragging() {
            return;
        }
        self.positioner.apply(OverlayEvent::PointerMoved {
            x: position.x.to_f64() as f32,
            y: position.y.to_f64() as f32,
        });
        cx.notify();
    }

    /// Forwarded from the root view: the pointer was released anywhere.
    pub fn pointer_up(&mut self, cx: &mut Context<Self>) {
        self.positioner.apply(OverlayEvent::PointerUp);
        cx.notify();
    }

    /// The owning overlay is going away; cascade to the mirror window.
    pub fn overlay_closed(&mut self, cx: &mut Context<Self>) {
        self.close_mirror(MirrorEvent::OverlayClosed, cx);
    }

    fn toggle_mirror(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        match self.mirror.phase() {
            MirrorPhase::Open | MirrorPhase::Opening => {
                self.close_mirror(MirrorEvent::CloseRequested, cx);
            }
            MirrorPhase::Closed => self.open_mirror(window, cx),
        }
    }

    fn open_mirror(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        if self.mirror.apply(MirrorEvent::OpenRequested) != MirrorAction::AcquireSurface {
            return;
        }

        let (window_width, window_height) =
            (px(MIRROR_WINDOW_SIZE.0), px(MIRROR_WINDOW_SIZE.1));
        let mirror_window_bounds = Bounds::new(
            Point::new(px(40.0), px(40.0)),
            size(window_width, window_height),
        );

        let mirror_window_options: WindowOptions = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(mirror_window_bounds)),
            titlebar: None,
            focus: false,
            show: true,
            kind: gpui::WindowKind::PopUp,
            is_movable: true,
            is_resizable: false,
            is_minimizable: false,
            display_id: None,
            window_background: gpui::WindowBackgroundAppearance::Opaque,
            app_id: Some("postwin".to_owned()),
            window_min_size: None,
            window_decorations: None,
            tabbing_identifier: Some("postwin".to_owned()),
        };

        let data = self.data.clone();
        let mut mirror_root: Option<Entity<MirrorView>> = None;
        let opened = cx.open_window(mirror_window_options, |_, cx| {
            let view = cx.new(|cx| MirrorView::new(&data, cx));
            mirror_root = Some(view.clone());
            view
        });

        match opened {
            Ok(handle) => {
                self.mirror.apply(MirrorEvent::SurfaceReady);
                self.mirror_window = Some(handle);
                if let Some(view) = mirror_root {
                    // The OS can close the window out-of-band; reconcile
                    // through the same state machine when its view drops.
                    cx.observe_release(&view, |this, _, cx| {
                        this.mirror_surface_closed(cx);
                    })
                    .detach();
                }
                cx.notify();
            }
            Err(err) => {
                log::error!("Failed to open the mirror window: {err}");
                self.mirror.apply(MirrorEvent::OpenFailed);
                window.push_notification(
                    Notification::new()
                        .message("Failed to open the always-on-top mirror window.")
                        .with_type(gpui_component::notification::NotificationType::Error),
                    cx,
                );
                cx.notify();
            }
        }
    }

    fn close_mirror(&mut self, event: MirrorEvent, cx: &mut Context<Self>) {
        if self.mirror.apply(event) == MirrorAction::ReleaseSurface
            && let Some(handle) = self.mirror_window.take()
        {
            let _ = handle.update(cx, |_, window, _| window.remove_window());
        }
        cx.notify();
    }

    fn mirror_surface_closed(&mut self, cx: &mut Context<Self>) {
        if self.mirror.apply(MirrorEvent::SurfaceClosed) == MirrorAction::ForgetSurface {
            self.mirror_window = None;
        }
        cx.notify();
    }
}

impl Render for OverlayView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        // Keep the clamp in sync with the live window size.
        let viewport = window.viewport_size();
        self.positioner.apply(OverlayEvent::ViewportResized {
            width: viewport.width.to_f64() as f32,
            height: viewport.height.to_f64() as f32,
        });

        let (x, y) = self.positioner.position();
        let (width, _) = self.positioner.footprint();
        let minimized = self.positioner.minimized();
        let mirror_open = self.mirror.is_open();

        let (status, confidence, error, frame, sound_enabled) = {
            let detection = self.data.detection.read(cx);
            let sound_enabled = self.data.settings.read(cx).config.overlay.sound_enabled;
            (
                detection.status,
                detection.confidence,
                detection.error.clone(),
                detection.last_frame.clone(),
                sound_enabled,
            )
        };
        let color = status_color(status);

        let header = div()
            .flex()
            .items_center()
            .justify_between()
            .px_3()
            .py_2()
            .bg(hsla(0., 0., 0., 0.3))
            .cursor_pointer()
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, event: &MouseDownEvent, _, cx| {
                    this.positioner.apply(OverlayEvent::PointerDown {
                        x: event.position.x.to_f64() as f32,
                        y: event.position.y.to_f64() as f32,
                        on_handle: true,
                    });
                    cx.notify();
                }),
            )
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_2()
                    .child(div().text_sm().font_semibold().child("Posture Monitor"))
                    .when(minimized, |this| {
                        this.child(StatusBadge::new(status).confidence(confidence))
                    }),
            )
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_1()
                    .when(self.mirror_supported, |this| {
                        this.child(
                            Button::new("toggle_mirror")
                                .icon(IconName::ExternalLink)
                                .outline()
                                .small()
                                .on_click(cx.listener(|this, _, window, cx| {
                                    this.toggle_mirror(window, cx);
                                })),
                        )
                    })
                    .child(
                        Button::new("toggle_minimized")
                            .icon(if minimized {
                                IconName::Plus
                            } else {
                                IconName::Minus
                            })
                            .outline()
                            .small()
                            .on_click(cx.listener(|this, _, _, cx| {
                                this.positioner.apply(OverlayEvent::ToggleMinimized);
                                cx.notify();
                            })),
                    )
                    .child(
                        Button::new("close_overlay")
                            .icon(IconName::Close)
                            .outline()
                            .small()
                            .on_click(cx.listener(|this, _, _, cx| {
                                this.data.overlay.update(cx, |model, cx| {
                                    model.enabled = false;
                                    cx.notify();
                                });
                            })),
                    ),
            );

        div()
            .absolute()
            .left(px(x))
            .top(px(y))
            .w(px(width))
            .opacity(self.positioner.opacity())
            .rounded_xl()
            .overflow_hidden()
            .bg(hsla(0., 0., 0., 0.65))
            .border_1()
            .border_color(color)
            .shadow_lg()
            .child(header)
            .when(!minimized, |this| {
                this.child(
                    div()
                        .flex()
                        .flex_col()
                        .when(mirror_open, |this| {
                            this.child(
                                div()
                                    .px_3()
                                    .py_1()
                                    .text_sm()
                                    .text_color(status_color(
                                        postwin_bridge::detection::DetectionStatus::Good,
                                    ))
                                    .child("Mirror window active."),
                            )
                        })
                        .when(self.show_camera, |this| {
                            this.child(
                                div()
                                    .relative()
                                    .h(px(180.0))
                                    .bg(hsla(0., 0., 0., 0.5))
                                    .when_some(frame, |this, image| {
                                        this.child(
                                            img(image)
                                                .w_full()
                                                .h_full()
                                                .object_fit(gpui::ObjectFit::Cover),
                                        )
                                    }),
                            )
                        })
                        .child(
                            div()
                                .flex()
                                .items_center()
                                .justify_center()
                                .gap_2()
                                .py_2()
                                .bg(color)
                                .text_color(hsla(0., 0., 1., 0.95))
                                .font_semibold()
                                .child(status.label()),
                        )
                        .when_some(error, |this, message| {
                            this.child(
                                div()
                                    .px_3()
                                    .py_2()
                                    .text_sm()
                                    .text_color(status_color(
                                        postwin_bridge::detection::DetectionStatus::Bad,
                                    ))
                                    .child(message),
                            )
                        })
                        .child(
                            div()
                                .flex()
                                .flex_col()
                                .gap_2()
                                .px_3()
                                .py_2()
                                .child(
                                    div()
                                        .flex()
                                        .items_center()
                                        .justify_between()
                                        .text_sm()
                                        .child("Opacity")
                                        .child(crate::formatting::format_opacity(
                                            self.positioner.opacity(),
                                        )),
                                )
                                .child(Slider::new(&self.opacity_state))
                                .child(
                                    div()
                                        .flex()
                                        .items_center()
                                        .justify_between()
                                        .text_sm()
                                        .child("Sound alerts")
                                        .child(
                                            Switch::new("overlay_sound_enabled")
                                                .checked(sound_enabled)
                                                .on_click(cx.listener(
                                                    |_, checked: &bool, _, cx| {
                                                        let bridge = cx
                                                            .global::<BackendBridge>()
                                                            .clone();
                                                        let enabled = *checked;
                                                        cx.spawn(async move |_, _| {
                                                            bridge
                                                                .set_sound_enabled(enabled)
                                                                .await;
                                                            bridge.request_config().await;
                                                        })
                                                        .detach();
                                                    },
                                                )),
                                        ),
                                )
                                .child(
                                    div()
                                        .flex()
                                        .items_center()
                                        .justify_between()
                                        .text_sm()
                                        .child("Show camera")
                                        .child(
                                            Switch::new("overlay_show_camera")
                                                .checked(self.show_camera)
                                                .on_click(cx.listener(
                                                    |this, checked: &bool, _, cx| {
                                                        this.show_camera = *checked;
                                                        cx.notify();
                                                    },
                                                )),
                                        ),
                                ),
                        ),
                )
            })
    }
}
