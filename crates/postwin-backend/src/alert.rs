//! Audio cue played when posture turns bad.
//!
//! A short synthesized sine burst, generated sample-by-sample into a `cpal`
//! output stream. Output availability is probed once at startup; when no
//! output device exists the cue is skipped entirely.

use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

/// Frequency of the cue tone.
const CUE_FREQUENCY_HZ: f32 = 440.0;

/// Length of the cue.
const CUE_DURATION_MILLISECONDS: u64 = 500;

/// Gain at the start of the cue.
const CUE_START_GAIN: f32 = 0.3;

/// Gain the cue decays to by its end.
const CUE_END_GAIN: f32 = 0.01;

/// Errors that can occur while playing the alert cue.
#[derive(Debug, thiserror::Error)]
pub enum CueError {
    /// No audio output device is available on the default host.
    #[error("no audio output device available")]
    NoOutputDevice,
    /// Failed to obtain the device's default output stream configuration.
    #[error("failed to build device config: {0}")]
    BuildStreamConfig(#[from] cpal::DefaultStreamConfigError),
    /// Failed to construct the output audio stream.
    #[error("failed to build device output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),
    /// The stream was built but could not be started.
    #[error("failed to play output stream: {0}")]
    Play(#[from] cpal::PlayStreamError),
}

/// Checks once whether an audio output device is present.
pub fn probe_output_device() -> bool {
    let available = cpal::default_host().default_output_device().is_some();
    if !available {
        log::warn!("No audio output device found; posture alerts will be silent.");
    }
    available
}

/// One sample of the cue: a sine at [`CUE_FREQUENCY_HZ`] with gain decaying
/// exponentially from [`CUE_START_GAIN`] to [`CUE_END_GAIN`], silent after
/// [`CUE_DURATION_MILLISECONDS`].
fn cue_sample(clock: u64, sample_rate: f32) -> f32 {
    let elapsed = clock as f32 / sample_rate;
    let duration = CUE_DURATION_MILLISECONDS as f32 / 1000.0;
    if elapsed >= duration {
        return 0.0;
    }

    let gain = CUE_START_GAIN * (CUE_END_GAIN / CUE_START_GAIN).powf(elapsed / duration);
    gain * (std::f32::consts::TAU * CUE_FREQUENCY_HZ * elapsed).sin()
}

/// Synthesizes the cue into the default output device and blocks until it
/// finishes. Call from a blocking task, never from the async runtime.
pub fn play_cue_blocking() -> Result<(), CueError> {
    let host = cpal::default_host();
    let device = host.default_output_device().ok_or(CueError::NoOutputDevice)?;
    let supported = device.default_output_config()?;

    if supported.sample_format() != cpal::SampleFormat::F32 {
        log::debug!(
            "Unsupported output sample format {:?}; skipping the alert cue.",
            supported.sample_format()
        );
        return Ok(());
    }

    let sample_rate = supported.sample_rate().0 as f32;
    let channels = supported.config().channels as usize;

    let mut clock = 0u64;
    let stream = device.build_output_stream(
        &supported.config(),
        move |data: &mut [f32], _| {
            for frame in data.chunks_mut(channels) {
                let value = cue_sample(clock, sample_rate);
                for sample in frame {
                    *sample = value;
                }
                clock += 1;
            }
        },
        |error| log::error!("An error occured while writing the alert cue: {error}"),
        None,
    )?;

    stream.play()?;
    std::thread::sleep(Duration::from_millis(CUE_DURATION_MILLISECONDS + 50));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    #[test]
    fn cue_stays_within_the_start_gain() {
        for clock in 0..(SAMPLE_RATE as u64 / 2) {
            assert!(cue_sample(clock, SAMPLE_RATE).abs() <= CUE_START_GAIN);
        }
    }

    #[test]
    fn cue_decays_over_time() {
        let early: f32 = (0..100)
            .map(|clock| cue_sample(clock, SAMPLE_RATE).abs())
            .fold(0.0, f32::max);
        let late: f32 = (20_000..20_100)
            .map(|clock| cue_sample(clock, SAMPLE_RATE).abs())
            .fold(0.0, f32::max);
        assert!(late < early);
    }

    #[test]
    fn cue_is_silent_after_its_duration() {
        let past_end = (SAMPLE_RATE as u64 * (CUE_DURATION_MILLISECONDS + 1)) / 1000;
        assert_eq!(cue_sample(past_end, SAMPLE_RATE), 0.0);
    }
}
