use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use postwin_bridge::MessageFromBackend;
use postwin_bridge::detection::{Classification, Detection, DetectionStatus};
use postwin_bridge::frame::PreviewFrame;
use postwin_bridge::notification::NotificationType;
use postwin_capture::device::{grab_frame, open_camera};
use postwin_capture::encode::{JPEG_QUALITY, encode_jpeg, to_data_url};
use postwin_detect::error::DetectionError;
use postwin_detect::sampler::FrameSampler;
use postwin_detect::single_flight::InFlightToken;
use postwin_detect::{REQUEST_TIMEOUT_MILLISECONDS, TICK_MILLISECONDS};
use serde::{Deserialize, Serialize};

use crate::state::DetectionRuntime;

#[derive(Debug, Serialize)]
struct DetectRequest {
    image: String,
}

/// Response shape of `POST /detect`. The service also answers `success: true`
/// with an `unknown` status when it is busy or sees no subject.
#[derive(Debug, Deserialize)]
struct DetectResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    overall_status: DetectionStatus,
    #[serde(default)]
    detections: Vec<Detection>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Error body the service attaches to non-2xx answers.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Handles a request to start the capture loop (see
/// [`postwin_bridge::MessageToBackend::StartDetectionRequest`]).
///
/// The loop runs on a blocking task and owns the camera for its entire
/// lifetime; there is never a second capture consumer. Every delivered frame
/// is one tick: the preview surfaces get a mirrored frame each tick, and
/// every `sample_interval`-th tick additionally submits the frame for
/// detection, provided no request is already in flight.
pub async fn handle_start_detection_request(context: super::AppContextHandle) {
    let (config, runtime) = {
        let state = context.state.read().await;
        (state.config.clone(), state.detection.clone())
    };

    if runtime.active.swap(true, Ordering::SeqCst) {
        context
            .send_notification(NotificationType::Warning, "Detection is already running.")
            .await;
        return;
    }

    runtime
        .sample_interval
        .store(config.detection.sample_interval, Ordering::SeqCst);

    let request_client = {
        let state = context.state.read().await;
        state.request_client.clone()
    };
    let base_url = crate::config::resolve_api_base_url(&config);
    let device_id = config.camera_device.selected_device_id.clone();
    let handle = tokio::runtime::Handle::current();
    let loop_context = context.clone();

    tokio::task::spawn_blocking(move || {
        run_capture_loop(
            loop_context,
            runtime,
            device_id,
            base_url,
            request_client,
            handle,
        );
    });
}

/// Handles a request to stop the capture loop.
///
/// Only the activity flag is flipped here: the loop observes it on its next
/// tick and winds down, so no further ticks are scheduled. An in-flight
/// detection request is not cancelled; its completion path re-checks the
/// flag and discards the response.
pub async fn handle_stop_detection_request(context: super::AppContextHandle) {
    let runtime = {
        let state = context.state.read().await;
        state.detection.clone()
    };

    if !runtime.active.swap(false, Ordering::SeqCst) {
        log::debug!("Stop requested while detection was not running.");
        return;
    }

    log::info!("Stopping the capture loop.");
    context
        .send(MessageFromBackend::DetectionStoppedResponse)
        .await;
}

fn run_capture_loop(
    context: super::AppContextHandle,
    runtime: DetectionRuntime,
    device_id: Option<String>,
    base_url: String,
    request_client: reqwest::Client,
    handle: tokio::runtime::Handle,
) {
    let mut camera = match open_camera(device_id.as_deref()) {
        Ok(camera) => camera,
        Err(err) => {
            log::error!("Failed to open the camera: {err}");
            runtime.active.store(false, Ordering::SeqCst);
            context.send_notification_blocking(
                NotificationType::Error,
                format!("Failed to open the camera: {err}"),
            );
            return;
        }
    };

    log::info!("Capture loop started against {base_url}.");
    context.send_blocking(MessageFromBackend::DetectionStartedResponse);

    let mut sampler = FrameSampler::new(runtime.sample_interval.load(Ordering::SeqCst));
    while runtime.active.load(Ordering::SeqCst) {
        let frame = match grab_frame(&mut camera) {
            Ok(frame) => Some(frame),
            Err(err) => {
                // No frame this tick; retry at the next sample tick.
                log::debug!("No frame available this tick: {err}");
                std::thread::sleep(Duration::from_millis(TICK_MILLISECONDS));
                None
            }
        };

        sampler.set_interval(runtime.sample_interval.load(Ordering::SeqCst));
        let sample_tick = sampler.tick();

        let Some(mut frame) = frame else { continue };

        if sample_tick && let Some(token) = runtime.in_flight.try_begin() {
            match encode_jpeg(&frame, JPEG_QUALITY) {
                Ok(jpeg) => {
                    let image_payload = to_data_url(&jpeg);
                    handle.spawn(submit_frame(
                        context.clone(),
                        request_client.clone(),
                        base_url.clone(),
                        image_payload,
                        runtime.active.clone(),
                        token,
                    ));
                }
                Err(err) => log::error!("Failed to encode the detection payload: {err}"),
            }
        }

        // Preview surfaces show the selfie view.
        postwin_capture::mirror::mirror_in_place(&mut frame);
        let (width, height) = frame.dimensions();
        match encode_jpeg(&frame, JPEG_QUALITY) {
            Ok(jpeg) => context.send_blocking(MessageFromBackend::FramePreviewUpdate(
                PreviewFrame::new(jpeg, width, height),
            )),
            Err(err) => log::error!("Failed to encode the preview frame: {err}"),
        }
    }

    log::info!("Capture loop stopped; no further ticks will fire.");
}

/// Runs one detection round-trip and applies the result.
///
/// The in-flight token is released on every exit path by its `Drop`. A
/// response that lands after deactivation is discarded before any state
/// mutation so a stopped UI is never revived by a stale answer.
async fn submit_frame(
    context: super::AppContextHandle,
    request_client: reqwest::Client,
    base_url: String,
    image_payload: String,
    active: Arc<AtomicBool>,
    token: InFlightToken,
) {
    let result = request_detection(&request_client, &base_url, image_payload).await;

    if !active.load(Ordering::SeqCst) {
        log::debug!("Dropping a detection response that arrived after stop.");
        drop(token);
        return;
    }

    match result {
        Ok(classification) => {
            let (update, sound_enabled, alert_available) = {
                let mut state = context.state.write().await;
                let update = state.tracker.apply(&classification);
                (
                    update,
                    state.config.overlay.sound_enabled,
                    state.alert_available,
                )
            };

            if update.entered_bad() && sound_enabled && alert_available {
                tokio::task::spawn_blocking(|| {
                    if let Err(err) = crate::alert::play_cue_blocking() {
                        log::error!("Failed to play the alert cue: {err}");
                    }
                });
            }

            context
                .send(MessageFromBackend::DetectionStateUpdate {
                    classification,
                    stats: update.stats,
                })
                .await;
        }
        Err(error) => {
            log::warn!("Detection request failed: {error}");
            context
                .send(MessageFromBackend::DetectionFailureUpdate {
                    message: error.to_string(),
                })
                .await;
        }
    }

    drop(token);
}

/// Issues exactly one `POST /detect` call; never queues or retries. The next
/// sample tick is the only retry mechanism.
async fn request_detection(
    request_client: &reqwest::Client,
    base_url: &str,
    image: String,
) -> Result<Classification, DetectionError> {
    let response = request_client
        .post(format!("{base_url}/detect"))
        .timeout(Duration::from_millis(REQUEST_TIMEOUT_MILLISECONDS))
        .json(&DetectRequest { image })
        .send()
        .await
        .map_err(classify_transport_error)?;

    if !response.status().is_success() {
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error);
        return Err(DetectionError::rejected(message));
    }

    let payload = response
        .json::<DetectResponse>()
        .await
        .map_err(|err| DetectionError::rejected(Some(err.without_url().to_string())))?;
    classification_from_payload(payload)
}

fn classify_transport_error(error: reqwest::Error) -> DetectionError {
    if error.is_timeout() {
        DetectionError::Timeout
    } else if error.is_connect() {
        DetectionError::Unreachable
    } else {
        DetectionError::rejected(Some(error.without_url().to_string()))
    }
}

fn classification_from_payload(payload: DetectResponse) -> Result<Classification, DetectionError> {
    if !payload.success {
        return Err(DetectionError::rejected(
            payload.error.or(payload.message),
        ));
    }

    Ok(Classification {
        status: payload.overall_status,
        detections: payload.detections,
        timestamp: payload.timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_detection_payload() {
        let payload: DetectResponse = serde_json::from_str(
            r#"{
                "success": true,
                "detections": [{
                    "bbox": [10.0, 20.0, 110.0, 220.0],
                    "confidence": 0.87,
                    "class_id": 1,
                    "class_name": "good_posture",
                    "is_good_posture": true
                }],
                "detection_count": 1,
                "overall_status": "good",
                "timestamp": "2025-11-02T10:15:30"
            }"#,
        )
        .expect("payload parses");

        let classification = classification_from_payload(payload).expect("successful payload");
        assert_eq!(classification.status, DetectionStatus::Good);
        assert_eq!(classification.confidence(), Some(0.87));
        assert_eq!(classification.timestamp.as_deref(), Some("2025-11-02T10:15:30"));
    }

    #[test]
    fn busy_payload_is_an_unknown_classification() {
        let payload: DetectResponse = serde_json::from_str(
            r#"{
                "success": true,
                "detections": [],
                "detection_count": 0,
                "overall_status": "unknown",
                "message": "Server busy, skipping frame"
            }"#,
        )
        .expect("payload parses");

        let classification = classification_from_payload(payload).expect("successful payload");
        assert_eq!(classification.status, DetectionStatus::Unknown);
        assert!(classification.detections.is_empty());
    }

    #[test]
    fn unsuccessful_payload_maps_to_rejection() {
        let payload: DetectResponse =
            serde_json::from_str(r#"{"success": false, "error": "No image provided"}"#)
                .expect("payload parses");

        let error = classification_from_payload(payload).expect_err("rejected payload");
        assert_eq!(
            error,
            DetectionError::Rejected("No image provided".to_string())
        );
    }

    #[test]
    fn missing_status_defaults_to_unknown() {
        let payload: DetectResponse = serde_json::from_str(
            r#"{"success": true, "detections": [], "message": "Model not loaded"}"#,
        )
        .expect("payload parses");

        let classification = classification_from_payload(payload).expect("successful payload");
        assert_eq!(classification.status, DetectionStatus::Unknown);
    }
}
