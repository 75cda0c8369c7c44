use gpui::{AppContext, Context, Entity, IntoElement, ParentElement, Render, Styled, Window, div};
use gpui_component::{
    StyledExt,
    group_box::{GroupBox, GroupBoxVariants},
    slider::{Slider, SliderEvent, SliderState},
    switch::Switch,
};
use postwin_detect::{MAX_SAMPLE_INTERVAL, MIN_SAMPLE_INTERVAL};

use crate::{BackendBridge, components::settings_item::SettingsItem, entities::DataEntities};

pub struct SettingsPage {
    data: DataEntities,
    confidence_state: Entity<SliderState>,
    sample_interval_state: Entity<SliderState>,
}

impl SettingsPage {
    pub fn new(data: &DataEntities, cx: &mut Context<Self>) -> Self {
        let config = {
            let settings_state = data.settings.read(cx);
            settings_state.config.clone()
        };

        let confidence_state = cx.new(|_| {
            SliderState::new()
                .min(0.1)
                .default_value(config.detection.confidence_threshold)
                .max(0.9)
        });
        cx.subscribe(
            &confidence_state,
            |_, _, event: &SliderEvent, cx| match event {
                SliderEvent::Change(value) => {
                    let bridge = cx.global::<BackendBridge>().clone();
                    let value = value.start();
                    cx.spawn(async move |_, _| {
                        bridge.set_confidence_threshold(value).await;
                    })
                    .detach();
                }
            },
        )
        .detach();

        let sample_interval_state = cx.new(|_| {
            SliderState::new()
                .min(MIN_SAMPLE_INTERVAL as f32)
                .default_value(config.detection.sample_interval as f32)
                .max(MAX_SAMPLE_INTERVAL as f32)
        });
        cx.subscribe(
            &sample_interval_state,
            |_, _, event: &SliderEvent, cx| match event {
                SliderEvent::Change(value) => {
                    let bridge = cx.global::<BackendBridge>().clone();
                    let interval = value.start().round() as u32;
                    cx.spawn(async move |_, _| {
                        bridge.set_sample_interval(interval).await;
                        // refresh the settings entity so the label follows
                        bridge.request_config().await;
                    })
                    .detach();
                }
            },
        )
        .detach();

        cx.observe(&data.settings.clone(), |_, _, cx| {
            cx.notify();
        })
        .detach();

        Self {
            data: data.clone(),
            confidence_state,
            sample_interval_state,
        }
    }
}

impl Render for SettingsPage {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let config = {
            let settings_state = self.data.settings.read(cx);
            settings_state.config.clone()
        };

        div()
            .size_full()
            .flex()
            .flex_col()
            .gap_6()
            .child(
                GroupBox::new()
                    .outline()
                    .child(div().child("Detection").text_xl().font_bold())
                    .child(
                        SettingsItem::new()
                            .label("Confidence threshold")
                            .child(Slider::new(&self.confidence_state).max_w_1_4()),
                    )
                    .child(
                        SettingsItem::new()
                            .label("Process every N frames")
                            .child(Slider::new(&self.sample_interval_state).max_w_1_4()),
                    )
                    .child(
                        div()
                            .text_sm()
                            .child(crate::formatting::format_sample_interval(
                                config.detection.sample_interval,
                            )),
                    ),
            )
            .child(
                GroupBox::new()
                    .outline()
                    .child(div().child("Alerts").text_xl().font_bold())
                    .child(
                        SettingsItem::new().label("Sound on bad posture").child(
                            Switch::new("sound_enabled")
                                .checked(config.overlay.sound_enabled)
                                .on_click(cx.listener(|_, checked: &bool, _, cx| {
                                    let bridge = cx.global::<BackendBridge>().clone();
                                    let enabled = *checked;
                                    cx.spawn(async move |_, _| {
                                        bridge.set_sound_enabled(enabled).await;
                                    })
                                    .detach();
                                })),
                        ),
                    ),
            )
    }
}
