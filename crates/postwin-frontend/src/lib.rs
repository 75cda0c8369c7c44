use std::sync::Arc;

use gpui::{AppContext, Application, Global, Image, ImageFormat, WindowOptions};
use gpui_component::{
    Root, WindowExt,
    notification::{Notification, NotificationType},
};
use postwin_bridge::MessageFromBackend;
use tokio::sync::mpsc;

use crate::entities::{
    DetectionEntity, OverlayEntity, camera_devices_entity::CameraDevicesEntity,
    settings_entity::SettingsEntity,
};

pub mod components;
pub mod entities;
pub mod formatting;
pub mod mirror;
pub mod positioner;
mod views;

#[derive(Clone)]
pub struct BackendBridge {
    pub to_backend: mpsc::Sender<postwin_bridge::MessageToBackend>,
}

impl BackendBridge {
    pub async fn request_config(&self) {
        self.to_backend
            .send(postwin_bridge::MessageToBackend::ConfigurationRequest)
            .await
            .expect("failed to request config");
    }

    pub async fn request_camera_devices_list(&self) {
        self.to_backend
            .send(postwin_bridge::MessageToBackend::CameraDevicesListRequest)
            .await
            .expect("failed to request camera devices list");
    }

    pub async fn select_camera_device(&self, device_id: String) {
        self.to_backend
            .send(postwin_bridge::MessageToBackend::SelectCameraDevice(
                device_id,
            ))
            .await
            .expect("failed to select the camera device");
    }

    pub async fn start_detection(&self) {
        self.to_backend
            .send(postwin_bridge::MessageToBackend::StartDetectionRequest)
            .await
            .expect("failed to request detection start");
    }

    pub async fn stop_detection(&self) {
        self.to_backend
            .send(postwin_bridge::MessageToBackend::StopDetectionRequest)
            .await
            .expect("failed to request detection stop");
    }

    pub async fn set_sample_interval(&self, interval: u32) {
        self.to_backend
            .send(postwin_bridge::MessageToBackend::SetSampleInterval(
                interval,
            ))
            .await
            .expect("failed to update the sample interval");
    }

    pub async fn set_confidence_threshold(&self, value: f32) {
        self.to_backend
            .send(postwin_bridge::MessageToBackend::SetConfidenceThreshold(
                value,
            ))
            .await
            .expect("failed to update the confidence threshold");
    }

    pub async fn set_sound_enabled(&self, enabled: bool) {
        self.to_backend
            .send(postwin_bridge::MessageToBackend::SetSoundEnabled(enabled))
            .await
            .expect("failed to update the sound toggle");
    }
}

impl Global for BackendBridge {}

pub fn run(
    mut rx: mpsc::Receiver<postwin_bridge::MessageFromBackend>,
    tx: mpsc::Sender<postwin_bridge::MessageToBackend>,
) -> anyhow::Result<()> {
    let app = Application::new().with_assets(gpui_component_assets::Assets);

    app.run(move |cx| {
        gpui_component::init(cx);

        let settings = cx.new(|_| SettingsEntity::default());
        let camera_devices = cx.new(|_| CameraDevicesEntity::default());
        let detection = cx.new(|_| DetectionEntity::default());
        let overlay = cx.new(|_| OverlayEntity::default());

        let data = entities::DataEntities {
            settings,
            camera_devices,
            detection,
            overlay,
        };
        let listener_data = data.clone();

        let bridge = BackendBridge {
            to_backend: tx.clone(),
        };
        cx.set_global(bridge.clone());

        cx.spawn(async move |cx| {
            cx.open_window(WindowOptions::default(), |window, cx| {
                let window_handle = window.window_handle();
                cx.spawn(async move |cx| {
                    while let Some(message) = rx.recv().await {
                        log::trace!("Got a message from backend: {message:?}");
                        match message {
                            MessageFromBackend::ConfigurationResponse(config) => {
                                SettingsEntity::update(&listener_data.settings, config, cx)
                            }
                            MessageFromBackend::NotificationMessage(notification) => {
                                let _notification_type = match notification.notification_type {
                                    postwin_bridge::notification::NotificationType::Info => {
                                        NotificationType::Info
                                    }
                                    postwin_bridge::notification::NotificationType::Success => {
                                        NotificationType::Success
                                    }
                                    postwin_bridge::notification::NotificationType::Warning => {
                                        NotificationType::Warning
                                    }
                                    postwin_bridge::notification::NotificationType::Error => {
                                        NotificationType::Error
                                    }
                                };
                                window_handle
                                    .update(cx, |_, window, cx| {
                                        let _notification = Notification::new()
                                            .message(notification.message)
                                            .with_type(_notification_type);
                                        window.push_notification(_notification, cx);
                                    })
                                    .expect("failed to push a new notification");
                            }
                            MessageFromBackend::CameraDevicesListResponse(camera_devices) => {
                                let _ = listener_data.camera_devices.update(cx, |model, cx| {
                                    model.camera_devices = camera_devices;
                                    cx.notify();
                                });
                            }
                            MessageFromBackend::DetectionStartedResponse => {
                                let _ = listener_data.detection.update(cx, |model, cx| {
                                    model.live = true;
                                    cx.notify();
                                });
                            }
                            MessageFromBackend::DetectionStoppedResponse => {
                                let _ = listener_data.detection.update(cx, |model, cx| {
                                    model.live = false;
                                    cx.notify();
                                });
                            }
                            MessageFromBackend::DetectionStateUpdate {
                                classification,
                                stats,
                            } => {
                                let _ = listener_data.detection.update(cx, |model, cx| {
                                    model.status = classification.status;
                                    model.confidence = classification.confidence();
                                    model.stats = stats;
                                    model.error = None;
                                    cx.notify();
                                });
                            }
                            MessageFromBackend::DetectionFailureUpdate { message } => {
                                let _ = listener_data.detection.update(cx, |model, cx| {
                                    model.error = Some(message);
                                    cx.notify();
                                });
                            }
                            MessageFromBackend::FramePreviewUpdate(frame) => {
                                let image = Arc::new(Image::from_bytes(
                                    ImageFormat::Jpeg,
                                    frame.jpeg.as_ref().clone(),
                                ));
                                let _ = listener_data.detection.update(cx, |model, cx| {
                                    model.last_frame = Some(image);
                                    cx.notify();
                                });
                            }
                        }
                    }
                })
                .detach();

                cx.spawn(async move |_| {
                    bridge.request_config().await;
                    bridge.request_camera_devices_list().await;
                })
                .detach();

                let view = cx.new(|cx| crate::views::FrontendUi::new(&data, window, cx));
                cx.new(|cx| Root::new(view, window, cx))
            })?;

            Ok::<_, anyhow::Error>(())
        })
        .detach();
    });

    Ok(())
}
