//! Real-time sampling scheduling primitives and detection state machines.
//!
//! This crate provides foundational timing constants and the small state
//! machines that drive continuous posture detection over a live camera feed.
//! It enables bounded-rate inference by decimating the capture tick stream,
//! serializing requests through a single-flight guard, and folding results
//! into a session-long status tally.

pub mod error;
pub mod sampler;
pub mod single_flight;
pub mod status;

/// Default number of capture ticks between detection samples.
///
/// At the nominal 30 ticks per second this samples roughly once per second.
/// A larger interval reduces load on the detection service, while a smaller
/// one reduces the latency of posture feedback.
pub const DEFAULT_SAMPLE_INTERVAL: u32 = 30;

/// Smallest accepted decimation interval.
pub const MIN_SAMPLE_INTERVAL: u32 = 5;

/// Largest accepted decimation interval.
pub const MAX_SAMPLE_INTERVAL: u32 = 60;

/// Hard deadline for one detection round-trip, in milliseconds.
///
/// The deadline is enforced by the request layer itself, not by the tick
/// loop; ticks keep firing while a request is outstanding.
pub const REQUEST_TIMEOUT_MILLISECONDS: u64 = 30_000;

/// Nominal duration of one capture tick, in milliseconds.
///
/// The camera paces the loop in practice; this constant is the fallback
/// cadence when a tick produced no frame and there is nothing to wait on.
pub const TICK_MILLISECONDS: u64 = 33;
