use postwin_bridge::camera::CameraDevice;
use postwin_bridge::notification::NotificationType;

/// Handles an incoming camera devices list request (see
/// [`postwin_bridge::MessageToBackend::CameraDevicesListRequest`]).
pub async fn handle_camera_devices_list_request(context: super::AppContextHandle) {
    let config = {
        let state = context.state.read().await;
        state.config.clone()
    };

    let devices = match tokio::task::spawn_blocking(postwin_capture::device::list_camera_devices)
        .await
        .expect("failed to join camera enumeration task")
    {
        Ok(devices) => devices,
        Err(err) => {
            log::error!("Failed to enumerate cameras: {err}");
            context
                .send_notification(
                    NotificationType::Error,
                    format!("Failed to list camera devices: {err}"),
                )
                .await;
            return;
        }
    };

    let response_devices: Vec<CameraDevice> = devices
        .iter()
        .map(|device| CameraDevice {
            id: device.id.clone(),
            description: device.description.clone(),
            selected: config.camera_device.selected_device_id.as_deref() == Some(device.id.as_str()),
        })
        .collect();

    context
        .send(postwin_bridge::MessageFromBackend::CameraDevicesListResponse(response_devices))
        .await;
}

/// Handles a camera device selection request and persists it to config.
///
/// A running capture loop keeps its current camera; the selection applies
/// when detection is next started.
pub async fn handle_camera_device_selection(context: super::AppContextHandle, id: String) {
    let config = {
        let mut state = context.state.write().await;
        state.config.camera_device.selected_device_id = Some(id.clone());
        state.config.clone()
    };

    // persist the updated selection so it is remembered across runs
    if let Err(err) = crate::config::save_config(&config).await {
        log::error!("Failed to persist the selected camera: {err}");
    }

    let detection_active = {
        let state = context.state.read().await;
        state
            .detection
            .active
            .load(std::sync::atomic::Ordering::SeqCst)
    };
    if detection_active {
        log::info!("Camera {id} selected; it will be used when detection is restarted.");
        context
            .send_notification(
                NotificationType::Info,
                "The new camera will be used the next time detection starts.",
            )
            .await;
    }
}
