//! Camera utilities for capturing, mirroring, and encoding webcam frames.
//!
//! This crate wraps low-level capture building blocks into a small set of
//! helpers that are oriented toward continuous frame acquisition and
//! network-friendly encoding. It focuses on:
//! - Enumerating camera devices and opening capture streams with `nokhwa`.
//! - Mirroring RGB frames horizontally for selfie-style display.
//! - Encoding frames as JPEG and packaging them as base64 data URLs.
//!
//! # Real-time constraints
//! Frame grabbing blocks until the camera delivers the next frame, so it must
//! run off the async runtime (a blocking task or dedicated thread). Encoding
//! happens on the same thread at capture cadence; keep payloads small.

pub mod device;
pub mod encode;
pub mod mirror;

/// Requested capture width in pixels.
///
/// Frames are requested at a deliberately small size: the detection service
/// resizes its input anyway, and a small frame keeps the per-tick JPEG
/// encoding and the request payload cheap.
pub const CAPTURE_WIDTH: u32 = 480;

/// Requested capture height in pixels.
pub const CAPTURE_HEIGHT: u32 = 360;

/// Requested capture frame rate. One delivered frame is one tick of the
/// sampling loop.
pub const CAPTURE_FRAME_RATE: u32 = 30;
