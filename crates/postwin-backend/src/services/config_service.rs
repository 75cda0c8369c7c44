use postwin_detect::{MAX_SAMPLE_INTERVAL, MIN_SAMPLE_INTERVAL};
use serde::Serialize;

/// Range the detection service accepts for its confidence threshold.
const CONFIDENCE_THRESHOLD_RANGE: (f32, f32) = (0.1, 0.9);

#[derive(Debug, Serialize)]
struct RemoteConfigRequest {
    confidence_threshold: f32,
}

/// Handles an incoming configuration request (see
/// [`postwin_bridge::MessageToBackend::ConfigurationRequest`]).
pub async fn handle_config_request(context: super::AppContextHandle) {
    let config = {
        let state = context.state.read().await;
        state.config.clone()
    };
    context
        .send(postwin_bridge::MessageFromBackend::ConfigurationResponse(
            config,
        ))
        .await;
}

/// Handles a sample interval change and persists it to config. The running
/// capture loop picks the new interval up on its next tick.
pub async fn handle_sample_interval_update(context: super::AppContextHandle, interval: u32) {
    let interval = interval.clamp(MIN_SAMPLE_INTERVAL, MAX_SAMPLE_INTERVAL);

    let config = {
        let mut state = context.state.write().await;
        state.config.detection.sample_interval = interval;
        state
            .detection
            .sample_interval
            .store(interval, std::sync::atomic::Ordering::SeqCst);
        state.config.clone()
    };

    if let Err(err) = crate::config::save_config(&config).await {
        log::error!("Failed to persist the sample interval: {err}");
    }
}

/// Handles a confidence threshold change: persists it and pushes it to the
/// detection service. The remote push is fire-and-forget; its failure is
/// logged and does not surface to the user.
pub async fn handle_confidence_threshold_update(context: super::AppContextHandle, value: f32) {
    let value = value.clamp(CONFIDENCE_THRESHOLD_RANGE.0, CONFIDENCE_THRESHOLD_RANGE.1);

    let (config, request_client) = {
        let mut state = context.state.write().await;
        state.config.detection.confidence_threshold = value;
        (state.config.clone(), state.request_client.clone())
    };

    if let Err(err) = crate::config::save_config(&config).await {
        log::error!("Failed to persist the confidence threshold: {err}");
    }

    let base_url = crate::config::resolve_api_base_url(&config);
    tokio::spawn(async move {
        let result = request_client
            .post(format!("{base_url}/config"))
            .json(&RemoteConfigRequest {
                confidence_threshold: value,
            })
            .send()
            .await;
        match result {
            Ok(response) if response.status().is_success() => {
                log::info!("Pushed confidence threshold {value} to the detection service.");
            }
            Ok(response) => {
                log::warn!(
                    "Detection service rejected the confidence threshold update: {}",
                    response.status()
                );
            }
            Err(err) => {
                log::warn!(
                    "Failed to push the confidence threshold: {}",
                    err.without_url()
                );
            }
        }
    });
}

/// Handles toggling the bad-posture audio cue and persists the choice.
pub async fn handle_sound_enabled_update(context: super::AppContextHandle, enabled: bool) {
    let config = {
        let mut state = context.state.write().await;
        state.config.overlay.sound_enabled = enabled;
        state.config.clone()
    };

    if let Err(err) = crate::config::save_config(&config).await {
        log::error!("Failed to persist the sound toggle: {err}");
    }
}
